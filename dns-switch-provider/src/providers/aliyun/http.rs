//! 阿里云 HTTP 请求方法 (RPC 风格: 签名参数放在 GET query string 中)

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::AliyunProvider;
use super::types::ApiErrorBody;

impl AliyunProvider {
    /// Execute an Alidns API request.
    ///
    /// `params` are the action-specific parameters; `Action` and the common
    /// signing parameters are added here. A new signature (fresh timestamp and
    /// nonce) is produced for every call.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        action: &str,
        mut params: BTreeMap<String, String>,
        ctx: ErrorContext,
    ) -> Result<T> {
        params.insert("Action".to_string(), action.to_string());
        let signed = self.signer.sign(params);

        let url = format!("{}/?{}", self.endpoint, signed.query_string());
        let request = self.client.get(&url);

        let (status, response_text) = HttpUtils::execute_request(
            request,
            self.provider_name(),
            "GET",
            &format!("{} (Action: {action})", self.endpoint),
        )
        .await?;

        self.interpret_response(status, &response_text, ctx)
    }

    /// Turn a raw HTTP exchange into a typed result.
    ///
    /// Only HTTP 200 with a parsable, error-free body is a success. Nothing is
    /// assumed about partially readable responses.
    pub(crate) fn interpret_response<T: DeserializeOwned>(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<T> {
        if status != 200 {
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(response_text)
                && let (Some(code), Some(message)) = (body.code, body.message)
            {
                log::error!(
                    "API error: {code} - {message} (RequestId: {})",
                    body.request_id.as_deref().unwrap_or("-")
                );
                return Err(self.map_error(RawApiError::with_code(code, message), ctx));
            }

            if status == 429 {
                return Err(ProviderError::RateLimited {
                    provider: self.provider_name().to_string(),
                    retry_after: None,
                    raw_message: Some(truncate_for_log(response_text)),
                });
            }

            return Err(ProviderError::HttpStatus {
                provider: self.provider_name().to_string(),
                status,
                detail: truncate_for_log(response_text),
            });
        }

        let value: serde_json::Value = HttpUtils::parse_json(response_text, self.provider_name())?;

        // 某些网关在 200 响应中也会返回错误信封
        if let (Some(code), Some(message)) = (
            value.get("Code").and_then(|v| v.as_str()),
            value.get("Message").and_then(|v| v.as_str()),
        ) {
            log::error!("API error: {code} - {message}");
            return Err(self.map_error(RawApiError::with_code(code, message), ctx));
        }

        serde_json::from_value(value).map_err(|e| self.parse_error(e))
    }
}
