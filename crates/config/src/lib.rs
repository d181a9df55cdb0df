//! Shared configuration for Dabble
//!
//! This crate provides the single source of truth for brush limits, trace
//! sampling and input bindings shared by the painting engine and the editor
//! layer. Values can come from defaults, a JSON document, or environment
//! overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Default brush diameter in pixels
pub const DEFAULT_DIAMETER: f32 = 20.0;

/// Smallest diameter the size shortcuts can reach
pub const DEFAULT_MIN_DIAMETER: f32 = 1.0;

/// Largest diameter the size shortcuts can reach
pub const DEFAULT_MAX_DIAMETER: f32 = 500.0;

/// Diameter change per increase/decrease step
pub const DEFAULT_SIZE_STEP: f32 = 2.0;

/// Symmetry instances allowed to share one brush settings object
pub const DEFAULT_MAX_MIRRORS: usize = 4;

/// Arc-length distance between trace samples, in pixels
pub const DEFAULT_TRACE_STEP: f32 = 0.5;

/// Curve flattening tolerance used when tracing outlines
pub const DEFAULT_FLATTEN_TOLERANCE: f64 = 0.1;

/// Environment variable overriding [`BrushConfig::max_mirrors`]
pub const ENV_MAX_MIRRORS: &str = "DABBLE_MAX_MIRRORS";

/// Environment variable overriding [`BrushConfig::trace_step`]
pub const ENV_TRACE_STEP: &str = "DABBLE_TRACE_STEP";

/// Environment variable overriding [`BrushConfig::jitter_seed`]
pub const ENV_JITTER_SEED: &str = "DABBLE_JITTER_SEED";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Brush sizing, symmetry and trace configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Diameter given to newly created brush tools
    pub default_diameter: f32,
    /// Lower bound for interactive size changes
    pub min_diameter: f32,
    /// Upper bound for interactive size changes
    pub max_diameter: f32,
    /// Diameter change per `[` / `]` press
    pub size_step: f32,
    /// Maximum brush instances registered on one settings object
    pub max_mirrors: usize,
    /// Arc-length step used to sample traced outlines
    pub trace_step: f32,
    /// Tolerance for flattening curved outlines into polylines
    pub flatten_tolerance: f64,
    /// Fixed seed for spacing/angle jitter (None = seeded from the OS)
    pub jitter_seed: Option<u64>,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_diameter: DEFAULT_DIAMETER,
            min_diameter: DEFAULT_MIN_DIAMETER,
            max_diameter: DEFAULT_MAX_DIAMETER,
            size_step: DEFAULT_SIZE_STEP,
            max_mirrors: DEFAULT_MAX_MIRRORS,
            trace_step: DEFAULT_TRACE_STEP,
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
            jitter_seed: None,
        }
    }
}

impl BrushConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok());
        config
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Values that fail to parse or validate are logged and ignored, leaving
    /// the previous value in place.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_MAX_MIRRORS) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => self.max_mirrors = n,
                _ => warn!("Ignoring {}={:?}: expected a positive integer", ENV_MAX_MIRRORS, raw),
            }
        }
        if let Some(raw) = lookup(ENV_TRACE_STEP) {
            match raw.trim().parse::<f32>() {
                Ok(step) if step.is_finite() && step > 0.0 => self.trace_step = step,
                _ => warn!("Ignoring {}={:?}: expected a positive number", ENV_TRACE_STEP, raw),
            }
        }
        if let Some(raw) = lookup(ENV_JITTER_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.jitter_seed = Some(seed),
                Err(_) => warn!("Ignoring {}={:?}: expected an unsigned integer", ENV_JITTER_SEED, raw),
            }
        }
    }

    /// Check that limits are positive and ordered
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        };

        positive("min_diameter", self.min_diameter)?;
        positive("max_diameter", self.max_diameter)?;
        positive("size_step", self.size_step)?;
        positive("trace_step", self.trace_step)?;

        if self.min_diameter > self.max_diameter {
            return Err(ConfigError::Invalid {
                field: "min_diameter",
                reason: format!(
                    "{} is larger than max_diameter {}",
                    self.min_diameter, self.max_diameter
                ),
            });
        }
        if !(self.min_diameter..=self.max_diameter).contains(&self.default_diameter) {
            return Err(ConfigError::Invalid {
                field: "default_diameter",
                reason: format!(
                    "{} is outside {}..={}",
                    self.default_diameter, self.min_diameter, self.max_diameter
                ),
            });
        }
        if self.max_mirrors == 0 {
            return Err(ConfigError::Invalid {
                field: "max_mirrors",
                reason: "at least one brush instance is required".to_string(),
            });
        }
        if !(self.flatten_tolerance.is_finite() && self.flatten_tolerance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "flatten_tolerance",
                reason: format!("must be a positive number, got {}", self.flatten_tolerance),
            });
        }
        Ok(())
    }

    /// Clamp a diameter into the configured range
    pub fn clamp_diameter(&self, diameter: f32) -> f32 {
        diameter.clamp(self.min_diameter, self.max_diameter)
    }
}

/// Keyboard and pointer input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Key that grows the active brush
    pub increase_size_key: char,
    /// Key that shrinks the active brush
    pub decrease_size_key: char,
    /// Whether Tab toggles "show/hide all" (turned off while dialogs are open)
    pub show_hide_all_for_tab: bool,
    /// Log every pointer event at trace level
    pub debug_pointer_events: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            increase_size_key: ']',
            decrease_size_key: '[',
            show_hide_all_for_tab: true,
            debug_pointer_events: false,
        }
    }
}

/// Complete editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub brush: BrushConfig,
    pub input: InputConfig,
    /// Fail loudly when the selection actions' enabled state disagrees with
    /// the composition (used by automated GUI tests)
    pub strict_selection_checks: bool,
}

impl EditorConfig {
    /// Parse a full editor configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.brush.validate()?;
        Ok(config)
    }
}
