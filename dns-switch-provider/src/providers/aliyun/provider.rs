//! 阿里云 `RecordStatusProvider` trait 实现

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, ProviderErrorMapper, RecordStatusProvider};
use crate::types::RecordStatus;

use super::{
    AliyunProvider, DescribeDomainRecordInfoResponse, PROVIDER_NAME, SetDomainRecordStatusResponse,
};

impl AliyunProvider {
    /// 从 `DescribeDomainRecordInfo` 响应中取出记录状态
    pub(crate) fn status_from_describe(
        &self,
        record_id: &str,
        response: DescribeDomainRecordInfoResponse,
    ) -> Result<RecordStatus> {
        log::debug!(
            "[{PROVIDER_NAME}] record {record_id}: {}.{} locked={:?}",
            response.rr.as_deref().unwrap_or("?"),
            response.domain_name.as_deref().unwrap_or("?"),
            response.locked
        );

        if let Some(returned) = response.record_id.as_deref()
            && returned != record_id
        {
            return Err(ProviderError::RecordMismatch {
                provider: self.provider_name().to_string(),
                expected: record_id.to_string(),
                actual: Some(returned.to_string()),
            });
        }

        let raw = response
            .status
            .ok_or_else(|| self.parse_error("response has no Status field"))?;

        RecordStatus::from_api_value(&raw)
            .ok_or_else(|| self.parse_error(format!("unrecognized record status '{raw}'")))
    }

    /// 校验 `SetDomainRecordStatus` 响应确实针对请求的记录
    pub(crate) fn confirm_set_response(
        &self,
        record_id: &str,
        response: &SetDomainRecordStatusResponse,
    ) -> Result<()> {
        match response.record_id.as_deref() {
            Some(returned) if returned == record_id => Ok(()),
            other => Err(ProviderError::RecordMismatch {
                provider: self.provider_name().to_string(),
                expected: record_id.to_string(),
                actual: other.map(str::to_string),
            }),
        }
    }
}

#[async_trait]
impl RecordStatusProvider for AliyunProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn get_record_status(&self, record_id: &str) -> Result<RecordStatus> {
        let params = BTreeMap::from([("RecordId".to_string(), record_id.to_string())]);

        let response: DescribeDomainRecordInfoResponse = self
            .request(
                "DescribeDomainRecordInfo",
                params,
                ErrorContext::for_record(record_id),
            )
            .await?;

        self.status_from_describe(record_id, response)
    }

    async fn set_record_status(&self, record_id: &str, status: RecordStatus) -> Result<()> {
        log::info!("[{PROVIDER_NAME}] set record {record_id} -> {status}");

        let params = BTreeMap::from([
            ("RecordId".to_string(), record_id.to_string()),
            ("Status".to_string(), status.as_api_value().to_string()),
        ]);

        let response: SetDomainRecordStatusResponse = self
            .request(
                "SetDomainRecordStatus",
                params,
                ErrorContext::for_record(record_id),
            )
            .await?;

        self.confirm_set_response(record_id, &response)?;

        log::info!(
            "[{PROVIDER_NAME}] record {record_id} accepted status {}",
            response.status.as_deref().unwrap_or(status.as_api_value())
        );
        Ok(())
    }
}
