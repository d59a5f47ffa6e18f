//! Provider 公共工具函数

use std::time::Duration;

use hmac::{Hmac, Mac};
use reqwest::Client;
use sha1::Sha1;

use crate::error::{ProviderError, Result};

type HmacSha1 = Hmac<Sha1>;

// ============ HTTP Client ============

/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// 创建带超时配置的 HTTP Client
///
/// 每个出站请求都受 `request_timeout` 约束，避免卡死的远端拖住调用方。
pub fn create_http_client(
    provider: &str,
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| ProviderError::ClientBuild {
            provider: provider.to_string(),
            detail: e.to_string(),
        })
}

// ============ HMAC-SHA1 ============

/// HMAC-SHA1 计算（阿里云 RPC 签名）
#[allow(clippy::expect_used)]
pub fn hmac_sha1(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha1::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
