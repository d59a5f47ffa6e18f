//! Webhook 通知 (企业微信群机器人 text 消息格式)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::providers::common::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, create_http_client,
};
use crate::traits::Notifier;
use crate::utils::log_sanitizer::truncate_for_log;

const PROVIDER_NAME: &str = "webhook";

/// `{"msgtype":"text","text":{"content":"..."}}`
#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    msgtype: &'static str,
    text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

impl<'a> TextMessage<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            msgtype: "text",
            text: TextContent { content },
        }
    }
}

/// 机器人回执，非 JSON 或缺字段时视为成功
#[derive(Debug, Default, Deserialize)]
struct WebhookReply {
    errcode: Option<i64>,
    errmsg: Option<String>,
}

/// Posts plain-text messages to a group-robot webhook.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl std::fmt::Debug for WebhookNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // URL 中携带机器人 key，不打印
        f.debug_struct("WebhookNotifier").finish_non_exhaustive()
    }
}

/// Builder for [`WebhookNotifier`].
pub struct WebhookNotifierBuilder {
    url: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl WebhookNotifierBuilder {
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

    /// Build the [`WebhookNotifier`] instance.
    pub fn build(self) -> Result<WebhookNotifier> {
        Ok(WebhookNotifier {
            client: create_http_client(PROVIDER_NAME, self.connect_timeout, self.request_timeout)?,
            url: self.url,
        })
    }
}

impl WebhookNotifier {
    /// Returns a builder for the given webhook URL.
    pub fn builder(url: impl Into<String>) -> WebhookNotifierBuilder {
        WebhookNotifierBuilder {
            url: url.into(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Creates a notifier with default timeouts.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::builder(url).build()
    }

    /// Sends `message` and reports the outcome.
    ///
    /// Fails on transport errors, a non-200 status, or a reply whose
    /// `errcode` is non-zero.
    pub async fn send(&self, message: &str) -> Result<()> {
        let request = self.client.post(&self.url).json(&TextMessage::new(message));

        let (status, response_text) =
            HttpUtils::execute_request(request, PROVIDER_NAME, "POST", "webhook").await?;

        Self::check_reply(status, &response_text)
    }

    fn check_reply(status: u16, response_text: &str) -> Result<()> {
        if status != 200 {
            return Err(ProviderError::HttpStatus {
                provider: PROVIDER_NAME.to_string(),
                status,
                detail: truncate_for_log(response_text),
            });
        }

        let reply: WebhookReply = serde_json::from_str(response_text).unwrap_or_default();
        match reply.errcode {
            Some(code) if code != 0 => Err(ProviderError::Unknown {
                provider: PROVIDER_NAME.to_string(),
                raw_code: Some(code.to_string()),
                raw_message: reply.errmsg.unwrap_or_default(),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str) {
        match self.send(message).await {
            Ok(()) => log::info!("[{PROVIDER_NAME}] notification sent"),
            Err(e) => log::warn!("[{PROVIDER_NAME}] notification dropped: {e}"),
        }
    }
}

/// Notifier that discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, message: &str) {
        log::debug!("[noop] {message}");
    }
}
