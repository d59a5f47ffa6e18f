//! 阿里云 API 类型定义

use serde::Deserialize;

/// 错误响应体 (`Code` / `Message`)
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(rename = "Code")]
    pub code: Option<String>,
    #[serde(rename = "Message")]
    pub message: Option<String>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

/// `DescribeDomainRecordInfo` 响应
///
/// 只有 `Status` 是必须的，其余字段用于日志。
#[derive(Debug, Deserialize)]
pub struct DescribeDomainRecordInfoResponse {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
    #[serde(rename = "DomainName")]
    pub domain_name: Option<String>,
    #[serde(rename = "RR")]
    pub rr: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Locked")]
    pub locked: Option<bool>,
}

/// `SetDomainRecordStatus` 响应
#[derive(Debug, Deserialize)]
pub struct SetDomainRecordStatusResponse {
    #[serde(rename = "RecordId")]
    pub record_id: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
}
