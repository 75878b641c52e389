//! Configuration loading

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::PagecraftConfig;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file content could not be parsed.
    #[error("failed to parse {format} configuration: {message}")]
    Parse {
        /// Format that was being parsed
        format: ConfigFormat,
        /// Parser message
        message: String,
    },

    /// The file extension or requested format is not supported by this build.
    #[error("unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// No breakpoints were configured.
    #[error("at least one breakpoint is required")]
    NoBreakpoints,

    /// Two breakpoints share an id.
    #[error("duplicate breakpoint id: {0}")]
    DuplicateBreakpoint(String),

    /// A required field is missing.
    #[error("missing required field: {field}")]
    MissingField {
        /// The name of the missing field
        field: String,
    },

    /// A field holds an invalid value.
    #[error("invalid value for {field}: {value}")]
    InvalidValue {
        /// The field holding the value
        field: String,
        /// Description of the problem
        value: String,
    },
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`)
    Toml,
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// JSON (`.json`)
    Json,
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Yaml => write!(f, "YAML"),
            ConfigFormat::Json => write!(f, "JSON"),
        }
    }
}

impl ConfigFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        match extension.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Loads and validates [`PagecraftConfig`].
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file, picking the format by extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<PagecraftConfig, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        debug!(path = %path.display(), %format, "loading configuration");

        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from a file if it exists, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<PagecraftConfig, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(PagecraftConfig::default()),
        }
    }

    /// Parse and validate configuration text.
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<PagecraftConfig, ConfigError> {
        let config = Self::parse(content, format)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str, format: ConfigFormat) -> Result<PagecraftConfig, ConfigError> {
        let parse_error = |message: String| ConfigError::Parse { format, message };

        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),

            #[cfg(feature = "toml")]
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
            #[cfg(not(feature = "toml"))]
            ConfigFormat::Toml => Err(ConfigError::UnsupportedFormat("toml".to_string())),

            #[cfg(feature = "yaml")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            #[cfg(not(feature = "yaml"))]
            ConfigFormat::Yaml => Err(ConfigError::UnsupportedFormat("yaml".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdPolicy;
    use std::io::Write;
    use tempfile::Builder;
    use test_case::test_case;

    #[test_case("config.toml", ConfigFormat::Toml ; "toml")]
    #[test_case("config.yaml", ConfigFormat::Yaml ; "yaml")]
    #[test_case("config.YML", ConfigFormat::Yaml ; "upper case yml")]
    #[test_case("config.json", ConfigFormat::Json ; "json")]
    fn detects_format(name: &str, expected: ConfigFormat) {
        assert_eq!(ConfigFormat::from_path(Path::new(name)).unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_extension() {
        assert!(matches!(
            ConfigFormat::from_path(Path::new("config.ini")),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }

    #[test]
    fn loads_toml_with_partial_sections() {
        let toml = r#"
[[breakpoints]]
id = "desktop"
label = "Desktop"

[[breakpoints]]
id = "mobile"
label = "Mobile"
max_width = 575

[copy.ids]
page = "preserve"
"#;

        let config = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.breakpoints.len(), 2);
        assert_eq!(config.copy.ids.page, IdPolicy::Preserve);
        assert_eq!(config.copy.ids.file, IdPolicy::Regenerate);
        assert_eq!(config.resolve.class_name_prefix, "pc");
    }

    #[test]
    fn loads_yaml_file_from_disk() {
        let mut file = Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "logging:\n  level: debug\nresolve:\n  class_name_prefix: site").unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.resolve.class_name_prefix, "site");
        assert_eq!(config.breakpoints.len(), 3);
    }

    #[test]
    fn every_section_uses_snake_case_keys() {
        let json = r#"{
            "breakpoints": [
                {"id": "desktop", "label": "Desktop"},
                {"id": "mobile", "label": "Mobile", "max_width": 575, "viewport_width": 390}
            ],
            "copy": {"ids": {"element_html_id": "preserve"}},
            "resolve": {"class_name_prefix": "site"}
        }"#;
        let config = ConfigLoader::load_from_str(json, ConfigFormat::Json).unwrap();
        assert_eq!(config.breakpoints[1].max_width, Some(575));
        assert_eq!(config.breakpoints[1].viewport_width, Some(390));
        assert_eq!(config.copy.ids.element_html_id, IdPolicy::Preserve);
        assert_eq!(config.resolve.class_name_prefix, "site");

        let written = serde_json::to_string(&PagecraftConfig::default()).unwrap();
        assert!(written.contains("\"class_name_prefix\""));
        assert!(written.contains("\"max_width\""));
        assert!(written.contains("\"element_html_id\""));
        assert!(!written.contains("maxWidth") && !written.contains("class-name"));
    }

    #[test]
    fn invalid_json_reports_parse_error() {
        let err = ConfigLoader::load_from_str("{ not json", ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: ConfigFormat::Json, .. }));
    }

    #[test]
    fn validation_runs_after_parse() {
        let err = ConfigLoader::load_from_str(r#"{"breakpoints": []}"#, ConfigFormat::Json)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NoBreakpoints));
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = ConfigLoader::load_or_default(None).unwrap();
        assert_eq!(config, PagecraftConfig::default());
    }
}
