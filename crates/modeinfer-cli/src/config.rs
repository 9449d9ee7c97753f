use modeinfer_core::{ClusterStrategy, InferError, InferResult, ParseOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CONFIG_PATH: &str = "modeinfer.toml";

/// Log output style
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}', expected 'pretty' or 'json'")),
        }
    }
}

/// Result rendering style
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}', expected 'text' or 'json'")),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::default() }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceConfig {
    #[serde(default)]
    pub strategy: ClusterStrategy,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    #[serde(default = "default_true")]
    pub skip_blank_lines: bool,
    /// An empty prefix disables comment skipping
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { skip_blank_lines: true, comment_prefix: default_comment_prefix() }
    }
}

impl InputConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            skip_blank_lines: self.skip_blank_lines,
            comment_prefix: (!self.comment_prefix.is_empty()).then(|| self.comment_prefix.clone()),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub symbolic: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeinferConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The default path did not exist
    Defaults(PathBuf),
}

impl ModeinferConfig {
    /// Load the configuration file.
    ///
    /// An explicit `path` must exist. Without one, `MODEINFER_CONFIG_PATH` or
    /// `modeinfer.toml` is tried and built-in defaults are used when it is absent.
    pub fn load(path: Option<&Path>) -> InferResult<(Self, ConfigSource)> {
        if let Some(path) = path {
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        let config_path = std::env::var("MODEINFER_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        match fs::read_to_string(&config_path) {
            Ok(text) => Ok((Self::from_toml(&text)?, ConfigSource::File(config_path))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Ok((Self::default(), ConfigSource::Defaults(config_path)))
            }
            Err(err) => Err(InferError::file(&config_path, &err)),
        }
    }

    pub fn from_file(path: &Path) -> InferResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| InferError::file(path, &err))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> InferResult<Self> {
        toml::from_str(text).map_err(|err| InferError::configuration(None, err.to_string()))
    }

    /// Apply `MODEINFER_*` environment overrides, returning the variables that were set
    pub fn apply_profile(self) -> InferResult<(Self, Vec<&'static str>)> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> InferResult<(Self, Vec<&'static str>)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut applied = Vec::new();
        if let Some(level) = lookup("MODEINFER_LOG_LEVEL") {
            self.logging.level = level;
            applied.push("MODEINFER_LOG_LEVEL");
        }
        if let Some(format) = lookup("MODEINFER_LOG_FORMAT") {
            self.logging.format = parse_override("MODEINFER_LOG_FORMAT", &format)?;
            applied.push("MODEINFER_LOG_FORMAT");
        }
        if let Some(strategy) = lookup("MODEINFER_STRATEGY") {
            self.inference.strategy = parse_override("MODEINFER_STRATEGY", &strategy)?;
            applied.push("MODEINFER_STRATEGY");
        }
        if let Some(format) = lookup("MODEINFER_OUTPUT_FORMAT") {
            self.output.format = parse_override("MODEINFER_OUTPUT_FORMAT", &format)?;
            applied.push("MODEINFER_OUTPUT_FORMAT");
        }
        Ok((self, applied))
    }
}

fn parse_override<T>(setting: &str, value: &str) -> InferResult<T>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|message: String| InferError::configuration(Some(setting), message))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_comment_prefix() -> String {
    "%".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ModeinferConfig::from_toml("").unwrap();
        assert_eq!(config, ModeinferConfig::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.inference.strategy, ClusterStrategy::UnionFind);
        assert_eq!(config.input.parse_options(), ParseOptions::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = ModeinferConfig::from_toml(
            r#"
[inference]
strategy = "flood-fill"

[output]
symbolic = true
"#,
        )
        .unwrap();
        assert_eq!(config.inference.strategy, ClusterStrategy::FloodFill);
        assert!(config.output.symbolic);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.input.skip_blank_lines);
    }

    #[test]
    fn test_empty_comment_prefix_disables_comments() {
        let config = ModeinferConfig::from_toml("[input]\ncomment_prefix = \"\"\n").unwrap();
        assert_eq!(config.input.parse_options().comment_prefix, None);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = ModeinferConfig::from_toml("[inference]\nstrategy = \"random\"\n").unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("MODEINFER_LOG_LEVEL", "trace"),
            ("MODEINFER_LOG_FORMAT", "json"),
            ("MODEINFER_STRATEGY", "flood_fill"),
            ("MODEINFER_OUTPUT_FORMAT", "JSON"),
        ]);
        let (config, applied) = ModeinferConfig::default()
            .apply_overrides(|key| vars.get(key).map(|value| value.to_string()))
            .unwrap();

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.inference.strategy, ClusterStrategy::FloodFill);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(applied.len(), 4);
    }

    #[test]
    fn test_overrides_report_only_variables_that_were_set() {
        let (config, applied) = ModeinferConfig::default()
            .apply_overrides(|key| (key == "MODEINFER_STRATEGY").then(|| "flood-fill".to_string()))
            .unwrap();
        assert_eq!(applied, vec!["MODEINFER_STRATEGY"]);
        assert_eq!(config.logging, LoggingConfig::default());

        let (_, applied) = ModeinferConfig::default().apply_overrides(|_| None).unwrap();
        assert!(applied.is_empty());
    }

    #[test]
    fn test_bad_override_names_the_setting() {
        let err = ModeinferConfig::default()
            .apply_overrides(|key| (key == "MODEINFER_STRATEGY").then(|| "bfs".to_string()))
            .unwrap_err();
        match err {
            InferError::Configuration { setting, .. } => {
                assert_eq!(setting.as_deref(), Some("MODEINFER_STRATEGY"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_missing_explicit_path_is_file_error() {
        let path = std::env::temp_dir().join("modeinfer-config-that-does-not-exist.toml");
        let err = ModeinferConfig::load(Some(&path)).unwrap_err();
        assert_eq!(err.category(), "file");
    }
}
