//! Configuration types and loading
//!
//! Everything except credentials comes from one TOML file. Credentials come
//! from the environment only.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

use dns_switch_core::error::CoreError;
use dns_switch_core::{RecordCatalog, RecordGroup, ServiceSettings};
use dns_switch_provider::ALIYUN_DNS_ENDPOINT;

/// 凭证环境变量
pub const ACCESS_KEY_ID_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub const ACCESS_KEY_SECRET_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub toggle: ToggleConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// Record groups, shown in this order
    #[serde(default)]
    pub groups: Vec<RecordGroup>,
}

impl AppConfig {
    /// Read, parse and validate the configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            bail!("server.port must be > 0");
        }
        if self.server.workers == Some(0) {
            bail!("server.workers must be > 0");
        }
        if !self.provider.endpoint.starts_with("http://")
            && !self.provider.endpoint.starts_with("https://")
        {
            bail!(
                "provider.endpoint must be an http(s) URL, got '{}'",
                self.provider.endpoint
            );
        }
        if self.provider.request_timeout_secs == 0 || self.provider.connect_timeout_secs == 0 {
            bail!("provider timeouts must be > 0");
        }
        if let Some(url) = &self.notifier.webhook_url
            && url.trim().is_empty()
        {
            bail!("notifier.webhook_url is empty; remove it to disable notifications");
        }
        if self.notifier.timeout_secs == 0 {
            bail!("notifier.timeout_secs must be > 0");
        }
        if self.toggle.max_concurrency == 0 {
            bail!("toggle.max_concurrency must be > 0");
        }
        if self.groups.is_empty() {
            tracing::warn!("No record groups configured");
        }

        // 目录校验（重复 ID 等）
        self.catalog()?;
        Ok(())
    }

    /// Build the record catalog from `[[groups]]`.
    pub fn catalog(&self) -> Result<RecordCatalog, CoreError> {
        RecordCatalog::new(self.groups.clone())
    }

    pub fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            settle_delay: Duration::from_millis(self.toggle.settle_delay_ms),
            max_concurrency: self.toggle.max_concurrency,
        }
    }
}

/// `[server]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 默认为 CPU 核数
    pub workers: Option<usize>,
}

impl ServerConfig {
    pub fn workers(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4999,
            workers: None,
        }
    }
}

/// `[provider]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: ALIYUN_DNS_ENDPOINT.to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
        }
    }
}

/// `[notifier]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// 群机器人地址，未配置则不发送通知
    pub webhook_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 10,
        }
    }
}

/// `[toggle]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// 写入后回读前的等待时间
    pub settle_delay_ms: u64,
    /// 状态汇总并发数
    pub max_concurrency: usize,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        let defaults = ServiceSettings::default();
        Self {
            settle_delay_ms: u64::try_from(defaults.settle_delay.as_millis()).unwrap_or(1000),
            max_concurrency: defaults.max_concurrency,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `[log]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    pub format: LogFormat,
    /// 按天滚动的日志目录，不配置则只输出到 stdout
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            dir: None,
        }
    }
}

/// Access key pair, read once at startup.
pub struct Credentials {
    pub access_key_id: String,
    pub access_key_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "access_key_id",
                &dns_switch_provider::mask_identifier(&self.access_key_id),
            )
            .field("access_key_secret", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Missing or blank variables are a configuration error naming the variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    CoreError::Configuration(format!("environment variable {name} is not set"))
                })
        };

        Ok(Self {
            access_key_id: read(ACCESS_KEY_ID_ENV)?,
            access_key_secret: read(ACCESS_KEY_SECRET_ENV)?,
        })
    }
}
