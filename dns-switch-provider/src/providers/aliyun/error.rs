//! 阿里云错误映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{AliyunProvider, PROVIDER_NAME};

/// 阿里云错误码映射
/// 参考: <https://api.aliyun.com/document/Alidns/2015-01-09/errorCode>
impl ProviderErrorMapper for AliyunProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ 认证错误 ============
            Some(
                "InvalidAccessKeyId.NotFound"
                | "InvalidAccessKeyId.Inactive"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature",
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 记录不存在 ============
            Some(
                "DomainRecordNotBelongToUser"
                | "InvalidRecordId.NotFound"
                | "InvalidRecordId.Malformed",
            ) => ProviderError::RecordNotFound {
                provider: self.provider_name().to_string(),
                record_id: context.record_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ 记录被锁定 ============
            Some("DomainRecordLocked" | "RecordForbidden.BlackHole" | "RecordFobidden.BlackHole") => {
                ProviderError::RecordLocked {
                    provider: self.provider_name().to_string(),
                    record_id: context.record_id.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }

            // ============ 频率限流 ============
            Some("Throttling" | "Throttling.User" | "Throttling.Api") => {
                ProviderError::RateLimited {
                    provider: self.provider_name().to_string(),
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            // ============ 权限/操作被拒绝 ============
            Some(
                "Forbidden"
                | "Forbidden.RAM"
                | "Forbidden.RiskControl"
                | "OperationDomain.NoPermission"
                | "IllegalUser"
                | "IncorrectDomainUser",
            ) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ 其他错误 fallback ============
            _ => self.unknown_error(raw),
        }
    }
}
