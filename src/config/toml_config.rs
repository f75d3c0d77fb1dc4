use crate::core::dashboard::{SliderSettings, MAX_SLIDER_MARKS};
use crate::core::ConfigProvider;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATASET_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBM-DS0321EN-SkillsNetwork/datasets/spacex_launch_dash.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_url")]
    pub url: String,
    pub path: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub mark_step: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: default_dataset_url(),
            path: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATASET_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn slider_settings(&self) -> SliderSettings {
        let defaults = SliderSettings::default();
        SliderSettings {
            min: self.slider.min.unwrap_or(defaults.min),
            max: self.slider.max.unwrap_or(defaults.max),
            step: self.slider.step.unwrap_or(defaults.step),
            mark_step: self.slider.mark_step.unwrap_or(defaults.mark_step),
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_positive_number("server.port", u64::from(self.server.port), 1)?;

        match &self.dataset.path {
            Some(path) => validation::validate_path("dataset.path", path)?,
            None => validation::validate_url("dataset.url", &self.dataset.url)?,
        }
        validation::validate_positive_number("dataset.timeout_seconds", self.dataset.timeout_seconds, 1)?;

        let slider = self.slider_settings();
        validation::validate_finite("slider.min", slider.min)?;
        validation::validate_finite("slider.max", slider.max)?;
        validation::validate_ordered("slider", slider.min, slider.max)?;
        validation::validate_positive_finite("slider.step", slider.step)?;
        validation::validate_positive_finite("slider.mark_step", slider.mark_step)?;
        if slider.mark_count().is_none() {
            return Err(DashError::InvalidConfigValueError {
                field: "slider.mark_step".to_string(),
                value: slider.mark_step.to_string(),
                reason: format!(
                    "Mark step yields more than {} marks between {} and {}",
                    MAX_SLIDER_MARKS, slider.min, slider.max
                ),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_url(&self) -> &str {
        &self.dataset.url
    }

    fn dataset_path(&self) -> Option<&str> {
        self.dataset.path.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.dataset.timeout_seconds
    }

    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
