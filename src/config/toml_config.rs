use crate::core::{ConfigProvider, DEFAULT_CHUNK_SIZE};
use crate::utils::error::{FilterError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, PortValidation, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid placeholder pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: Option<ProcessingConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub log_path: String,
    pub exceptions_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub chunk_size: Option<usize>,
    pub port_validation: Option<PortValidation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FilterError::ResourceNotFound {
                path: path.display().to_string(),
            },
            _ => FilterError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FilterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LOG_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn chunk_size(&self) -> usize {
        self.processing
            .as_ref()
            .and_then(|p| p.chunk_size)
            .unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    pub fn port_validation(&self) -> PortValidation {
        self.processing
            .as_ref()
            .and_then(|p| p.port_validation)
            .unwrap_or_default()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn log_path(&self) -> &str {
        &self.input.log_path
    }

    fn exceptions_path(&self) -> &str {
        &self.input.exceptions_path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size()
    }

    fn port_validation(&self) -> PortValidation {
        self.port_validation()
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring_enabled()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input.log_path", &self.input.log_path)?;
        validate_path("input.exceptions_path", &self.input.exceptions_path)?;
        validate_path("output.path", &self.output.path)?;
        validate_positive_number("processing.chunk_size", self.chunk_size(), 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[input]
log_path = "firewall_logs.csv"
exceptions_path = "exceptions.csv"

[output]
path = "filtered_logs.csv"

[processing]
chunk_size = 500
port_validation = "lenient"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.log_path(), "firewall_logs.csv");
        assert_eq!(config.output_path(), "filtered_logs.csv");
        assert_eq!(config.chunk_size(), 500);
        assert_eq!(config.port_validation(), PortValidation::Lenient);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_optional_sections_default() {
        let toml_content = r#"
[input]
log_path = "a.csv"
exceptions_path = "b.csv"

[output]
path = "c.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.port_validation(), PortValidation::Strict);
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FWLOG_TEST_LOG_DIR", "/var/log/fw");

        let toml_content = r#"
[input]
log_path = "${FWLOG_TEST_LOG_DIR}/firewall.csv"
exceptions_path = "${FWLOG_TEST_UNSET_VAR}/exceptions.csv"

[output]
path = "./filtered.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.log_path, "/var/log/fw/firewall.csv");
        assert_eq!(
            config.input.exceptions_path,
            "${FWLOG_TEST_UNSET_VAR}/exceptions.csv"
        );

        std::env::remove_var("FWLOG_TEST_LOG_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[input]
log_path = "a.csv"
exceptions_path = "b.csv"

[output]
path = ""

[processing]
chunk_size = 0
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_port_validation_mode_is_rejected() {
        let toml_content = r#"
[input]
log_path = "a.csv"
exceptions_path = "b.csv"

[output]
path = "c.csv"

[processing]
port_validation = "sloppy"
"#;

        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(FilterError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[input]
log_path = "file.csv"
exceptions_path = "exceptions.csv"

[output]
path = "out.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.log_path(), "file.csv");
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            TomlConfig::from_file("/definitely/not/config.toml"),
            Err(FilterError::ResourceNotFound { .. })
        ));
    }
}
