use crate::adapters::telegram::DEFAULT_TELEGRAM_API;
use crate::domain::model::DEFAULT_API_VERSION;
use crate::utils::error::{MonitorError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// 一週
pub const MAX_CHECK_INTERVAL_MINUTES: u64 = 10_080;
pub const MAX_ROUTE_DELAY_SECONDS: u64 = 3_600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub discovery_url: String,
    pub default_version: String,
    pub request_timeout_seconds: Option<u64>,
    pub discovery_timeout_seconds: Option<u64>,
    pub day_interval: Option<u32>,
    pub user_agents: Option<Vec<String>>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://be.wizzair.com".to_string(),
            discovery_url: "https://www.wizzair.com/buildnumber".to_string(),
            default_version: DEFAULT_API_VERSION.to_string(),
            request_timeout_seconds: None,
            discovery_timeout_seconds: None,
            day_interval: None,
            user_agents: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub check_interval_minutes: u64,
    pub route_delay_seconds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            check_interval_minutes: 60,
            route_delay_seconds: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
    pub routes_file: String,
    pub prices_file: String,
    pub airports_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            routes_file: "routes.json".to_string(),
            prices_file: "prev_prices.json".to_string(),
            airports_file: "airports.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub api_base_url: Option<String>,
    pub token: Option<String>,
    pub chat_id: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl MonitorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MonitorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MonitorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TELEGRAM_TOKEN})；未設定的保持原樣，交給驗證處理
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MonitorError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_url("api.discovery_url", &self.api.discovery_url)?;
        validation::validate_version("api.default_version", &self.api.default_version)?;
        validation::validate_range("api.day_interval", self.day_interval(), 1, 31)?;

        validation::validate_range(
            "schedule.check_interval_minutes",
            self.schedule.check_interval_minutes,
            1,
            MAX_CHECK_INTERVAL_MINUTES,
        )?;
        validation::validate_range(
            "schedule.route_delay_seconds",
            self.schedule.route_delay_seconds,
            0,
            MAX_ROUTE_DELAY_SECONDS,
        )?;

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_json_file("storage.routes_file", &self.storage.routes_file)?;
        validation::validate_json_file("storage.prices_file", &self.storage.prices_file)?;
        validation::validate_json_file("storage.airports_file", &self.storage.airports_file)?;

        let token = validation::validate_required_field("telegram.token", &self.telegram.token)?;
        validation::validate_secret("telegram.token", token)?;
        let chat_id =
            validation::validate_required_field("telegram.chat_id", &self.telegram.chat_id)?;
        validation::validate_secret("telegram.chat_id", chat_id)?;
        validation::validate_url("telegram.api_base_url", self.telegram_api_base())?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_seconds.unwrap_or(30))
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.api.discovery_timeout_seconds.unwrap_or(10))
    }

    pub fn day_interval(&self) -> u32 {
        self.api.day_interval.unwrap_or(7)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.schedule.check_interval_minutes.saturating_mul(60))
    }

    pub fn route_delay(&self) -> Duration {
        Duration::from_secs(self.schedule.route_delay_seconds)
    }

    pub fn telegram_api_base(&self) -> &str {
        self.telegram
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_TELEGRAM_API)
    }

    pub fn telegram_timeout(&self) -> Duration {
        Duration::from_secs(self.telegram.timeout_seconds.unwrap_or(10))
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
