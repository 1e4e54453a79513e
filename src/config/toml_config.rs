use crate::core::ConfigProvider;
use crate::domain::model::Thresholds;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_INCIDENCE_URL: &str =
    "https://www.augsburg.de/umwelt-soziales/gesundheit/coronavirus";
pub const DEFAULT_CASES_URL: &str =
    "https://www.augsburg.de/umwelt-soziales/gesundheit/coronavirus/fallzahlen";
pub const DEFAULT_API_AUTHOR: &str = "@pichfl";

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

/// 應用程式設定；每個區段都可省略，省略時使用預設值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: SourceConfig,
    pub thresholds: Thresholds,
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub meta: MetaConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub incidence_url: String,
    pub cases_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            incidence_url: DEFAULT_INCIDENCE_URL.to_string(),
            cases_url: DEFAULT_CASES_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 15,
            retry_attempts: 1,
            retry_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_age_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_seconds: crate::core::assembler::DEFAULT_MAX_AGE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaConfig {
    pub api_author: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            api_author: DEFAULT_API_AUTHOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${INCIDENCE_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}

impl ConfigProvider for AppConfig {
    fn incidence_url(&self) -> &str {
        &self.sources.incidence_url
    }

    fn cases_url(&self) -> &str {
        &self.sources.cases_url
    }

    fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    fn api_author(&self) -> &str {
        &self.meta.api_author
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    fn retry_attempts(&self) -> u32 {
        self.http.retry_attempts
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.http.retry_delay_ms)
    }

    fn cache_max_age(&self) -> u64 {
        self.cache.max_age_seconds
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;

        if self.server.bind.parse::<std::net::SocketAddr>().is_err() {
            return Err(ReportError::InvalidConfigValueError {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                reason: "Expected an address such as 127.0.0.1:3000".to_string(),
            });
        }

        Ok(())
    }
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    // 驗證資料來源
    validation::validate_url("sources.incidence_url", config.incidence_url())?;
    validation::validate_url("sources.cases_url", config.cases_url())?;

    // 驗證門檻值遞增
    let thresholds = config.thresholds();
    validation::validate_ascending(
        "thresholds",
        &[thresholds.signal, thresholds.threshold, thresholds.darkred],
    )?;

    validation::validate_range("http.timeout_seconds", config.request_timeout().as_secs(), 1, 120)?;
    validation::validate_range("http.retry_attempts", config.retry_attempts(), 0, 5)?;
    validation::validate_non_empty_string("meta.api_author", config.api_author())?;

    Ok(())
}
