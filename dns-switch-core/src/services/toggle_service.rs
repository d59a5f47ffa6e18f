//! 记录启停服务

use std::sync::Arc;

use dns_switch_provider::RecordStatus;

use crate::services::ServiceContext;
use crate::types::{ToggleAction, ToggleOutcome};

/// 通知文案
#[must_use]
pub fn notification_message(name: &str, status: RecordStatus) -> String {
    match status {
        RecordStatus::Enable => format!("域名：{name} 已启动"),
        RecordStatus::Disable => format!("域名：{name} 已停止"),
    }
}

/// 记录启停服务
pub struct ToggleService {
    ctx: Arc<ServiceContext>,
}

impl ToggleService {
    /// 创建启停服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Switches a record and reports what a read shows afterwards.
    ///
    /// 1. Write the desired status. On failure return at once: no retry, no
    ///    notification.
    /// 2. Notify and wait out the settle delay, concurrently. Notification
    ///    failures are logged by the notifier and never reach the outcome.
    /// 3. Read the status again. The read is advisory; `success` stays `true`
    ///    even if it still shows the old value.
    ///
    /// Ids missing from the catalog are sent to the provider unchanged and
    /// shown by id.
    pub async fn toggle(&self, record_id: &str, action: ToggleAction) -> ToggleOutcome {
        let catalog = &self.ctx.catalog;
        if catalog.find(record_id).is_none() {
            log::warn!("Record {record_id} is not in the catalog, using the id as its name");
        }
        let name = catalog.display_name(record_id);
        let requested = action.desired_status();

        log::info!("Toggle {name} ({record_id}): {action} -> {requested}");

        if let Err(e) = self
            .ctx
            .provider
            .set_record_status(record_id, requested)
            .await
        {
            if e.is_expected() {
                log::warn!("Toggle {name} ({record_id}) failed: {e}");
            } else {
                log::error!("Toggle {name} ({record_id}) failed: {e}");
            }
            return ToggleOutcome::failed(record_id, name, action, e);
        }

        let message = notification_message(name, requested);
        tokio::join!(
            self.ctx.notifier.notify(&message),
            tokio::time::sleep(self.ctx.settings.settle_delay),
        );

        let confirmed = self.ctx.provider.query_status(record_id).await;
        let outcome = ToggleOutcome::succeeded(record_id, name, action, confirmed);

        if outcome.converged() {
            log::info!("Toggle {name} ({record_id}) confirmed: {confirmed}");
        } else {
            log::info!(
                "Toggle {name} ({record_id}) accepted, read still shows {confirmed} (requested {requested})"
            );
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use dns_switch_provider::ProviderError;

    use crate::services::ServiceSettings;
    use crate::test_utils::{
        create_test_context, create_test_context_with, test_catalog, MockNotifier,
        MockStatusProvider,
    };

    fn service(provider: Arc<MockStatusProvider>, notifier: Arc<MockNotifier>) -> ToggleService {
        ToggleService::new(create_test_context(test_catalog(), provider, notifier))
    }

    #[test]
    fn message_texts() {
        assert_eq!(
            notification_message("a.example.com", RecordStatus::Enable),
            "域名：a.example.com 已启动"
        );
        assert_eq!(
            notification_message("a.example.com", RecordStatus::Disable),
            "域名：a.example.com 已停止"
        );
    }

    #[tokio::test]
    async fn success_notifies_once_with_display_name() {
        let provider = Arc::new(MockStatusProvider::new());
        provider.set_status("101", RecordStatus::Disable).await;
        let notifier = Arc::new(MockNotifier::new());

        let outcome = service(provider.clone(), notifier.clone())
            .toggle("101", ToggleAction::Start)
            .await;

        assert!(outcome.success);
        assert!(outcome.error.is_none());
        assert_eq!(outcome.name, "c-live-uat.example.com");
        assert_eq!(outcome.requested_status, RecordStatus::Enable);
        assert_eq!(outcome.confirmed_status, Some(RecordStatus::Enable));
        assert!(outcome.converged());

        assert_eq!(
            provider.set_calls().await,
            vec![("101".to_string(), RecordStatus::Enable)]
        );
        assert_eq!(
            notifier.messages().await,
            vec!["域名：c-live-uat.example.com 已启动".to_string()]
        );
    }

    #[tokio::test]
    async fn failure_never_notifies() {
        let provider = Arc::new(MockStatusProvider::new());
        provider.set_status("101", RecordStatus::Enable).await;
        provider
            .fail_writes(ProviderError::HttpStatus {
                provider: "mock".to_string(),
                status: 500,
                detail: "Internal Server Error".to_string(),
            })
            .await;
        let notifier = Arc::new(MockNotifier::new());

        let outcome = service(provider.clone(), notifier.clone())
            .toggle("101", ToggleAction::Stop)
            .await;

        assert!(!outcome.success);
        assert!(matches!(
            outcome.error,
            Some(ProviderError::HttpStatus { status: 500, .. })
        ));
        assert!(outcome.confirmed_status.is_none());
        assert!(notifier.messages().await.is_empty());
        // 失败后不再回读
        assert_eq!(provider.read_count().await, 0);
        assert_eq!(provider.set_calls().await.len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_uses_raw_id() {
        let provider = Arc::new(MockStatusProvider::new());
        provider.set_status("999", RecordStatus::Enable).await;
        let notifier = Arc::new(MockNotifier::new());

        let outcome = service(provider.clone(), notifier.clone())
            .toggle("999", ToggleAction::Stop)
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.name, "999");
        assert_eq!(
            provider.set_calls().await,
            vec![("999".to_string(), RecordStatus::Disable)]
        );
        assert_eq!(notifier.messages().await, vec!["域名：999 已停止".to_string()]);
    }

    #[tokio::test]
    async fn lagging_read_is_still_success() {
        let provider = Arc::new(MockStatusProvider::new());
        provider.set_status("101", RecordStatus::Disable).await;
        provider.ignore_writes().await;
        let notifier = Arc::new(MockNotifier::new());

        let outcome = service(provider, notifier.clone())
            .toggle("101", ToggleAction::Start)
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.confirmed_status, Some(RecordStatus::Disable));
        assert!(!outcome.converged());
        assert_eq!(notifier.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_confirmation_read_falls_back_to_sentinel() {
        let provider = Arc::new(MockStatusProvider::new());
        provider.set_status("101", RecordStatus::Disable).await;
        provider.fail_reads("101").await;

        let outcome = service(provider, Arc::new(MockNotifier::new()))
            .toggle("101", ToggleAction::Start)
            .await;

        assert!(outcome.success);
        assert_eq!(outcome.confirmed_status, Some(RecordStatus::SENTINEL));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_settle_delay_before_reading() {
        let provider = Arc::new(MockStatusProvider::new());
        provider.set_status("101", RecordStatus::Disable).await;
        let ctx = create_test_context_with(
            test_catalog(),
            provider,
            Arc::new(MockNotifier::new()),
            ServiceSettings {
                settle_delay: Duration::from_millis(1000),
                max_concurrency: 4,
            },
        );

        let started = tokio::time::Instant::now();
        let outcome = ToggleService::new(ctx).toggle("101", ToggleAction::Start).await;

        assert!(outcome.success);
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_notifier_overlaps_settle_delay() {
        let provider = Arc::new(MockStatusProvider::new());
        provider.set_status("101", RecordStatus::Disable).await;
        let notifier = Arc::new(MockNotifier::with_delay(Duration::from_millis(800)));
        let ctx = create_test_context_with(
            test_catalog(),
            provider,
            notifier.clone(),
            ServiceSettings {
                settle_delay: Duration::from_millis(1000),
                max_concurrency: 4,
            },
        );

        let started = tokio::time::Instant::now();
        ToggleService::new(ctx).toggle("101", ToggleAction::Start).await;

        assert!(started.elapsed() < Duration::from_millis(1800));
        assert_eq!(notifier.messages().await.len(), 1);
    }
}
