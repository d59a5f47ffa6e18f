pub mod common;
mod aliyun;
mod webhook;

pub use aliyun::{ALIYUN_DNS_ENDPOINT, AliyunProvider, AliyunProviderBuilder, AliyunSigner, SignedRequest, sign};
pub use webhook::{NoopNotifier, WebhookNotifier, WebhookNotifierBuilder};
