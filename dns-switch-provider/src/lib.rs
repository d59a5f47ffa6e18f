//! # dns-switch-provider
//!
//! Signed client for the Alibaba Cloud DNS (Alidns) record-status API, plus a
//! best-effort webhook notifier.
//!
//! ## What it does
//!
//! | Component | Type | Transport |
//! |-----------|------|-----------|
//! | Request signing | [`AliyunSigner`] | RPC signature v1 (HMAC-SHA1) |
//! | Record status client | [`AliyunProvider`] | signed HTTP GET |
//! | Notifications | [`WebhookNotifier`] | HTTP POST JSON |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for static/musl builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_switch_provider::{AliyunProvider, RecordStatus, RecordStatusProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = AliyunProvider::new("your-access-key-id", "your-access-key-secret")?;
//!
//!     // Typed read
//!     let status = provider.get_record_status("750504892456594432").await?;
//!     println!("current: {status}");
//!
//!     // Switch, then read again (reads may lag behind writes)
//!     provider
//!         .set_record_status("750504892456594432", status.toggled())
//!         .await?;
//!
//!     // Never-failing read; any error becomes RecordStatus::SENTINEL
//!     let observed = provider.query_status("750504892456594432").await;
//!     println!("observed: {observed}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`]: transport failures
//! - [`ProviderError::HttpStatus`] / [`ProviderError::ParseError`]: the remote
//!   answered, but not with something usable
//! - [`ProviderError::RecordMismatch`]: a write was acknowledged for a different record
//!
//! Nothing is retried automatically.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export public traits (error mapping traits stay internal)
pub use traits::{Notifier, RecordStatusProvider};

// Re-export types
pub use types::RecordStatus;

// Re-export clients
pub use providers::{
    AliyunProvider, AliyunProviderBuilder, AliyunSigner, NoopNotifier, SignedRequest,
    WebhookNotifier, WebhookNotifierBuilder,
};

/// Alidns request signing building blocks.
pub use providers::sign;

/// Default Alidns endpoint.
pub use providers::ALIYUN_DNS_ENDPOINT;

pub use utils::log_sanitizer::mask_identifier;
