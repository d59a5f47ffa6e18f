use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::RecordStatus;

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
}

impl ErrorContext {
    pub fn for_record(record_id: &str) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// A DNS provider that can report and switch the status of a record.
#[async_trait]
pub trait RecordStatusProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Reads the record's current status.
    async fn get_record_status(&self, record_id: &str) -> Result<RecordStatus>;

    /// Requests a status change.
    ///
    /// `Ok(())` means the provider accepted the request for this exact record.
    /// It does not mean a subsequent read already shows the new status.
    async fn set_record_status(&self, record_id: &str, status: RecordStatus) -> Result<()>;

    /// Reads the record's status, degrading any failure to
    /// [`RecordStatus::SENTINEL`].
    ///
    /// Never fails. Used by read-only views that must not be destabilized by a
    /// single bad record.
    async fn query_status(&self, record_id: &str) -> RecordStatus {
        match self.get_record_status(record_id).await {
            Ok(status) => {
                log::info!("[{}] record {record_id} status: {status}", self.id());
                status
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("[{}] status query for {record_id} failed: {e}", self.id());
                } else {
                    log::error!("[{}] status query for {record_id} failed: {e}", self.id());
                }
                RecordStatus::SENTINEL
            }
        }
    }
}

/// A best-effort message sink.
///
/// Implementations swallow their own failures; callers never see them.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `message`, logging (not returning) any failure.
    async fn notify(&self, message: &str);
}
