//! 阿里云 DNS (Alidns) 记录状态客户端

mod error;
mod http;
mod provider;
pub mod sign;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client,
};

pub use sign::{AliyunSigner, SignedRequest};

pub(crate) use types::{DescribeDomainRecordInfoResponse, SetDomainRecordStatusResponse};

/// 默认接入点（华东2 上海）
pub const ALIYUN_DNS_ENDPOINT: &str = "https://alidns.cn-shanghai.aliyuncs.com";
pub(crate) const ALIYUN_DNS_VERSION: &str = "2015-01-09";
pub(crate) const PROVIDER_NAME: &str = "aliyun";

/// Alidns client for querying and switching record status.
///
/// Every call is an HTTP GET against the RPC endpoint, signed with
/// HMAC-SHA1 by an [`AliyunSigner`].
///
/// # Construction
///
/// ```rust,no_run
/// use std::time::Duration;
/// use dns_switch_provider::AliyunProvider;
///
/// let provider = AliyunProvider::builder("your-access-key-id", "your-access-key-secret")
///     .request_timeout(Duration::from_secs(5))
///     .build()?;
/// # Ok::<(), dns_switch_provider::ProviderError>(())
/// ```
pub struct AliyunProvider {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) signer: AliyunSigner,
}

impl std::fmt::Debug for AliyunProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AliyunProvider")
            .field("endpoint", &self.endpoint)
            .field("signer", &self.signer)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AliyunProvider`].
pub struct AliyunProviderBuilder {
    access_key_id: String,
    access_key_secret: String,
    endpoint: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl AliyunProviderBuilder {
    fn new(access_key_id: String, access_key_secret: String) -> Self {
        Self {
            access_key_id,
            access_key_secret,
            endpoint: ALIYUN_DNS_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the API endpoint (default: the Shanghai region).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the connect timeout (default: 5s).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the overall per-request timeout (default: 10s).
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the [`AliyunProvider`] instance.
    pub fn build(self) -> Result<AliyunProvider> {
        Ok(AliyunProvider {
            client: create_http_client(
                PROVIDER_NAME,
                self.connect_timeout,
                self.request_timeout,
            )?,
            endpoint: self.endpoint,
            signer: AliyunSigner::new(self.access_key_id, self.access_key_secret),
        })
    }
}

impl AliyunProvider {
    /// Creates a client with default endpoint and timeouts.
    pub fn new(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(access_key_id, access_key_secret).build()
    }

    /// Returns a builder for customizing endpoint and timeouts.
    pub fn builder(
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> AliyunProviderBuilder {
        AliyunProviderBuilder::new(access_key_id.into(), access_key_secret.into())
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
