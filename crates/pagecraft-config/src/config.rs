//! Top-level configuration

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{default_breakpoints, BreakpointConfig, ConfigError, CopyConfig};

/// Root configuration for the pagecraft runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagecraftConfig {
    /// Device breakpoints, base first.
    pub breakpoints: Vec<BreakpointConfig>,

    /// Copy operation settings.
    pub copy: CopyConfig,

    /// Resolution settings.
    pub resolve: ResolveConfig,

    /// Logging defaults.
    pub logging: LoggingConfig,
}

impl Default for PagecraftConfig {
    fn default() -> Self {
        Self {
            breakpoints: default_breakpoints(),
            copy: CopyConfig::default(),
            resolve: ResolveConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Resolution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Prefix of class names produced for `class-name` formatted controls.
    pub class_name_prefix: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            class_name_prefix: "pc".to_string(),
        }
    }
}

/// Logging defaults, used when the command line does not override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl PagecraftConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// The base breakpoint. Callers must have validated the configuration,
    /// otherwise an empty list falls back to the first default breakpoint.
    pub fn base_breakpoint(&self) -> BreakpointConfig {
        self.breakpoints
            .first()
            .cloned()
            .unwrap_or_else(|| default_breakpoints().remove(0))
    }

    /// Validate cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(base) = self.breakpoints.first() else {
            return Err(ConfigError::NoBreakpoints);
        };

        if let Some(max_width) = base.max_width {
            return Err(ConfigError::InvalidValue {
                field: format!("breakpoints.{}.max_width", base.id),
                value: format!("base breakpoint must not have a max width, found {max_width}"),
            });
        }

        let mut seen = HashSet::new();
        for breakpoint in &self.breakpoints {
            if breakpoint.id.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "breakpoints.id".to_string(),
                });
            }
            if !seen.insert(breakpoint.id.as_str()) {
                return Err(ConfigError::DuplicateBreakpoint(breakpoint.id.clone()));
            }
        }

        let mut previous: Option<u32> = None;
        for breakpoint in self.breakpoints.iter().skip(1) {
            let Some(max_width) = breakpoint.max_width else {
                return Err(ConfigError::MissingField {
                    field: format!("breakpoints.{}.max_width", breakpoint.id),
                });
            };
            if previous.is_some_and(|previous| max_width >= previous) {
                return Err(ConfigError::InvalidValue {
                    field: format!("breakpoints.{}.max_width", breakpoint.id),
                    value: format!("{max_width} must be narrower than the previous breakpoint"),
                });
            }
            previous = Some(max_width);
        }

        if self.resolve.class_name_prefix.is_empty() {
            return Err(ConfigError::MissingField {
                field: "resolve.class_name_prefix".to_string(),
            });
        }

        Ok(())
    }
}
