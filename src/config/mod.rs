pub mod toml_config;

use crate::domain::ports::ClassifierSettings;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_status_codes, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub use toml_config::TomlConfig;

pub const DEFAULT_CLASSIFIER_URL: &str = "https://sn-watson-emotion.labs.skills.network/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";
pub const DEFAULT_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "emotion-detector")]
#[command(about = "Web front-end for the Watson NLP emotion classifier")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub classifier_url: Option<String>,

    #[arg(long)]
    pub model_id: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub model_id: String,
    pub timeout_seconds: u64,
    /// 除了 4xx 之外，也視為「文件被拒絕」的狀態碼
    pub rejection_statuses: Vec<u16>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CLASSIFIER_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            rejection_statuses: Vec::new(),
        }
    }
}

impl ClassifierSettings for ClassifierConfig {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn rejection_statuses(&self) -> &[u16] {
        &self.rejection_statuses
    }
}

/// Resolved application settings, handed to the server at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// 以預設值補齊 TOML 中未設定的欄位
    pub fn from_toml(toml: TomlConfig) -> Self {
        let server = toml.server.unwrap_or_default();
        let classifier = toml.classifier.unwrap_or_default();
        let defaults = AppConfig::default();

        Self {
            server: ServerConfig {
                host: server.host.unwrap_or(defaults.server.host),
                port: server.port.unwrap_or(defaults.server.port),
            },
            classifier: ClassifierConfig {
                endpoint: classifier.endpoint.unwrap_or(defaults.classifier.endpoint),
                model_id: classifier.model_id.unwrap_or(defaults.classifier.model_id),
                timeout_seconds: classifier
                    .timeout_seconds
                    .unwrap_or(defaults.classifier.timeout_seconds),
                rejection_statuses: classifier
                    .rejection_statuses
                    .unwrap_or(defaults.classifier.rejection_statuses),
            },
        }
    }

    /// 載入設定檔 (若有指定)，再套用命令列參數
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                Self::from_toml(TomlConfig::from_file(path)?)
            }
            None => Self::default(),
        };

        if let Some(host) = &cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Some(url) = &cli.classifier_url {
            config.classifier.endpoint = url.clone();
        }
        if let Some(model_id) = &cli.model_id {
            config.classifier.model_id = model_id.clone();
        }
        if let Some(timeout) = cli.timeout_seconds {
            config.classifier.timeout_seconds = timeout;
        }

        Ok(config)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validate_url("classifier.endpoint", &self.classifier.endpoint)?;
        validate_non_empty_string("classifier.model_id", &self.classifier.model_id)?;
        validate_range(
            "classifier.timeout_seconds",
            self.classifier.timeout_seconds,
            1,
            300,
        )?;
        validate_status_codes(
            "classifier.rejection_statuses",
            &self.classifier.rejection_statuses,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.address(), "0.0.0.0:5000");
        assert_eq!(config.classifier.model_id, DEFAULT_MODEL_ID);
    }

    #[test]
    fn test_invalid_endpoint_fails_validation() {
        let mut config = AppConfig::default();
        config.classifier.endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let mut config = AppConfig::default();
        config.classifier.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_defaults() {
        let cli = CliConfig::parse_from([
            "emotion-detector",
            "--port",
            "8080",
            "--classifier-url",
            "http://127.0.0.1:9000/predict",
        ]);

        let config = AppConfig::resolve(&cli).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.classifier.endpoint, "http://127.0.0.1:9000/predict");
        assert_eq!(config.classifier.model_id, DEFAULT_MODEL_ID);
    }
}
