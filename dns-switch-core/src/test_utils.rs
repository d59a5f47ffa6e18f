//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dns_switch_provider::{Notifier, ProviderError, RecordStatus, RecordStatusProvider};
use tokio::sync::RwLock;

use crate::services::{ServiceContext, ServiceSettings};
use crate::types::{RecordCatalog, RecordDescriptor, RecordGroup};

// ===== MockStatusProvider =====

#[derive(Default)]
struct ProviderState {
    statuses: HashMap<String, RecordStatus>,
    failing_reads: HashSet<String>,
    panicking_reads: HashSet<String>,
    write_error: Option<ProviderError>,
    /// 为 true 时写入成功但不改变状态（模拟服务端生效延迟）
    ignore_writes: bool,
    set_calls: Vec<(String, RecordStatus)>,
    read_count: usize,
    in_flight: usize,
    max_in_flight: usize,
}

pub struct MockStatusProvider {
    state: RwLock<ProviderState>,
}

impl MockStatusProvider {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ProviderState::default()),
        }
    }

    pub async fn set_status(&self, record_id: &str, status: RecordStatus) {
        self.state
            .write()
            .await
            .statuses
            .insert(record_id.to_string(), status);
    }

    /// 对该记录的读取返回网络错误
    pub async fn fail_reads(&self, record_id: &str) {
        self.state
            .write()
            .await
            .failing_reads
            .insert(record_id.to_string());
    }

    /// 对该记录的读取直接 panic（模拟任务崩溃）
    pub async fn panic_on_read(&self, record_id: &str) {
        self.state
            .write()
            .await
            .panicking_reads
            .insert(record_id.to_string());
    }

    /// 所有写入返回此错误
    pub async fn fail_writes(&self, error: ProviderError) {
        self.state.write().await.write_error = Some(error);
    }

    pub async fn ignore_writes(&self) {
        self.state.write().await.ignore_writes = true;
    }

    pub async fn set_calls(&self) -> Vec<(String, RecordStatus)> {
        self.state.read().await.set_calls.clone()
    }

    pub async fn read_count(&self) -> usize {
        self.state.read().await.read_count
    }

    pub async fn max_in_flight(&self) -> usize {
        self.state.read().await.max_in_flight
    }
}

#[async_trait]
impl RecordStatusProvider for MockStatusProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn get_record_status(&self, record_id: &str) -> Result<RecordStatus, ProviderError> {
        {
            let mut state = self.state.write().await;
            state.read_count += 1;
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            if state.panicking_reads.contains(record_id) {
                state.in_flight -= 1;
                drop(state);
                panic!("simulated failure reading {record_id}");
            }
        }

        // 让出调度，使并发查询有机会交错
        tokio::task::yield_now().await;

        let mut state = self.state.write().await;
        state.in_flight -= 1;

        if state.failing_reads.contains(record_id) {
            return Err(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: "connection reset".to_string(),
            });
        }

        state
            .statuses
            .get(record_id)
            .copied()
            .ok_or_else(|| ProviderError::RecordNotFound {
                provider: "mock".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            })
    }

    async fn set_record_status(
        &self,
        record_id: &str,
        status: RecordStatus,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.write().await;
        state.set_calls.push((record_id.to_string(), status));

        if let Some(e) = state.write_error.clone() {
            return Err(e);
        }
        if !state.ignore_writes {
            state.statuses.insert(record_id.to_string(), status);
        }
        Ok(())
    }
}

// ===== MockNotifier =====

pub struct MockNotifier {
    messages: RwLock<Vec<String>>,
    delay: Duration,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    /// 每次通知前等待 `delay`
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
            delay,
        }
    }

    pub async fn messages(&self) -> Vec<String> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, message: &str) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.messages.write().await.push(message.to_string());
    }
}

// ===== Factories =====

/// 两个分组、三条记录：uat(101, 102), sit(201)
pub fn test_catalog() -> RecordCatalog {
    let record = |name: &str, id: &str| RecordDescriptor {
        name: name.to_string(),
        record_id: id.to_string(),
    };

    let groups = vec![
        RecordGroup {
            name: "uat".to_string(),
            records: vec![
                record("c-live-uat.example.com", "101"),
                record("b-live-uat.example.com", "102"),
            ],
        },
        RecordGroup {
            name: "sit".to_string(),
            records: vec![record("c-live-sit.example.com", "201")],
        },
    ];

    match RecordCatalog::new(groups) {
        Ok(catalog) => catalog,
        Err(e) => panic!("test catalog is invalid: {e}"),
    }
}

/// 测试用上下文：无等待，默认并发
pub fn create_test_context(
    catalog: RecordCatalog,
    provider: Arc<dyn RecordStatusProvider>,
    notifier: Arc<dyn Notifier>,
) -> Arc<ServiceContext> {
    create_test_context_with(
        catalog,
        provider,
        notifier,
        ServiceSettings {
            settle_delay: Duration::ZERO,
            ..ServiceSettings::default()
        },
    )
}

pub fn create_test_context_with(
    catalog: RecordCatalog,
    provider: Arc<dyn RecordStatusProvider>,
    notifier: Arc<dyn Notifier>,
    settings: ServiceSettings,
) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(catalog, provider, notifier).with_settings(settings))
}
