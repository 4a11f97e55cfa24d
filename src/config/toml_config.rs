use crate::config::ClientConfig;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{validate_base_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub session: SessionSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSection {
    pub token_file: Option<PathBuf>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ApiError::Validation {
            field: "config".to_string(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FEDERATION_API_BASE_URL})，未定義者保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Overlays the `[api]` section on top of `base`.
    pub fn apply_to(&self, base: ClientConfig) -> ClientConfig {
        base.merge(self.api.base_url.clone(), self.api.timeout_seconds)
    }

    pub fn token_file(&self) -> Option<&Path> {
        self.session.token_file.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api.base_url {
            if url.contains("${") {
                return Err(ApiError::Validation {
                    field: "api.base_url".to_string(),
                    reason: format!("unresolved environment variable in {}", url),
                });
            }
            validate_base_url("api.base_url", url)?;
        }
        if self.api.timeout_seconds == Some(0) {
            return Err(ApiError::Validation {
                field: "api.timeout_seconds".to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
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
[api]
base_url = "https://api.federation.org"
timeout_seconds = 10

[session]
token_file = "/tmp/federation/session.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.token_file(),
            Some(Path::new("/tmp/federation/session.json"))
        );

        let client = config.apply_to(ClientConfig::default());
        assert_eq!(client.base_url.as_deref(), Some("https://api.federation.org"));
        assert_eq!(client.timeout_seconds, 10);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TOML_TEST_FEDERATION_URL", "https://env.federation.org");

        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "${TOML_TEST_FEDERATION_URL}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://env.federation.org")
        );

        std::env::remove_var("TOML_TEST_FEDERATION_URL");
    }

    #[test]
    fn test_unresolved_variable_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[api]
base_url = "${TOML_TEST_SURELY_UNDEFINED_VAR}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let client = config.apply_to(ClientConfig::default());
        assert_eq!(client, ClientConfig::default());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\nbase_url = \"http://localhost:3000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_invalid_toml_is_validation_error() {
        let err = TomlConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }
}
