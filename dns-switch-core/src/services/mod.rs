//! 业务逻辑服务层

mod status_service;
mod toggle_service;

pub use status_service::StatusService;
pub use toggle_service::{ToggleService, notification_message};

use std::sync::Arc;
use std::time::Duration;

use dns_switch_provider::{Notifier, RecordStatusProvider};

use crate::types::RecordCatalog;

/// 写入后到回读前的默认等待时间
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1000);
/// 状态汇总时的默认并发查询数
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Tunables shared by the services.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Wait between a status write and the confirming read.
    pub settle_delay: Duration,
    /// Upper bound on concurrent status queries in a snapshot.
    pub max_concurrency: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// 服务上下文 - 持有所有依赖
///
/// 应用层创建此上下文并注入具体的 provider 与 notifier，创建后只读。
pub struct ServiceContext {
    /// 记录目录
    pub catalog: RecordCatalog,
    /// DNS 服务商客户端
    pub provider: Arc<dyn RecordStatusProvider>,
    /// 启停通知
    pub notifier: Arc<dyn Notifier>,
    /// 调优参数
    pub settings: ServiceSettings,
}

impl ServiceContext {
    /// 创建服务上下文（默认参数）
    #[must_use]
    pub fn new(
        catalog: RecordCatalog,
        provider: Arc<dyn RecordStatusProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            provider,
            notifier,
            settings: ServiceSettings::default(),
        }
    }

    /// 替换调优参数
    #[must_use]
    pub fn with_settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }
}
