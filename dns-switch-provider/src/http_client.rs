//! Generic HTTP client tools
//!
//! Shared by the DNS API client and the webhook notifier. Each caller builds its
//! own `RequestBuilder` (signing, headers, body); this module only sends it,
//! logs it, and reads the response.
//!
//! No retries happen here. A failed call is reported once and the caller decides.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// Only transport failures become errors here. Any HTTP status, including
    /// 4xx/5xx, is returned to the caller for interpretation.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `provider_name` - remote side name (for logging and errors)
    /// * `method_name` - request method name (for logging)
    /// * `url_or_action` - URL or Action name (for logging)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: format!("Timed out reading response body: {e}"),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
