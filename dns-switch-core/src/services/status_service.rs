//! 记录状态汇总服务

use std::sync::Arc;

use futures::StreamExt;

use crate::services::ServiceContext;
use crate::types::{ObservedStatus, RecordDescriptor, StatusResult, StatusSnapshot};

/// 记录状态汇总服务
pub struct StatusService {
    ctx: Arc<ServiceContext>,
}

impl StatusService {
    /// 创建状态服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Queries every record in the catalog and groups the results.
    ///
    /// Queries run concurrently, at most `max_concurrency` at a time. Each one
    /// runs in its own task: a task that dies yields
    /// [`ObservedStatus::Error`] for that record and the rest carry on. The
    /// snapshot always has one result per catalog record.
    pub async fn snapshot(&self) -> StatusSnapshot {
        let limit = self.ctx.settings.max_concurrency.max(1);

        let records: Vec<RecordDescriptor> = self
            .ctx
            .catalog
            .groups()
            .iter()
            .flat_map(|g| g.records.iter().cloned())
            .collect();

        // buffered 保持输入顺序
        let mut results = futures::stream::iter(records)
            .map(|record| self.query_isolated(record))
            .buffered(limit)
            .collect::<Vec<_>>()
            .await
            .into_iter();

        let mut snapshot = StatusSnapshot::default();
        for group in self.ctx.catalog.groups() {
            let group_results: Vec<StatusResult> =
                results.by_ref().take(group.records.len()).collect();
            snapshot.push_group(group.name.clone(), group_results);
        }

        log::info!(
            "Status snapshot: {} records, {} enabled, {} disabled, {} errors",
            snapshot.len(),
            snapshot.count(ObservedStatus::Enable),
            snapshot.count(ObservedStatus::Disable),
            snapshot.count(ObservedStatus::Error)
        );

        snapshot
    }

    /// Queries one record. Unknown ids are queried as-is and shown by id.
    pub async fn query_record(&self, record_id: &str) -> StatusResult {
        let record = self.descriptor(record_id);
        let status = self.ctx.provider.query_status(record_id).await;
        StatusResult::new(&record, status)
    }

    fn descriptor(&self, record_id: &str) -> RecordDescriptor {
        self.ctx
            .catalog
            .find(record_id)
            .cloned()
            .unwrap_or_else(|| RecordDescriptor {
                name: record_id.to_string(),
                record_id: record_id.to_string(),
            })
    }

    async fn query_isolated(&self, record: RecordDescriptor) -> StatusResult {
        let provider = Arc::clone(&self.ctx.provider);
        let record_id = record.record_id.clone();

        let handle = tokio::spawn(async move { provider.query_status(&record_id).await });

        match handle.await {
            Ok(status) => StatusResult::new(&record, status),
            Err(e) => {
                log::error!(
                    "Status query task for {} ({}) failed: {e}",
                    record.name,
                    record.record_id
                );
                StatusResult::new(&record, ObservedStatus::Error)
            }
        }
    }
}
