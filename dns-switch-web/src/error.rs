//! HTTP error responses
//!
//! Every failure leaves the handler as `{"status": "fail", "error": "..."}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use dns_switch_core::CoreError;

#[derive(Debug)]
pub enum ApiError {
    /// 请求体或参数不合法
    BadRequest(String),
    /// 服务商拒绝或无法完成状态切换
    ToggleFailed(String),
}

#[derive(Serialize)]
struct FailBody<'a> {
    status: &'static str,
    error: &'a str,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(msg) | Self::ToggleFailed(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ToggleFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        HttpResponse::build(self.status_code()).json(FailBody {
            status: "fail",
            error: &message,
        })
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidAction(action) => {
                Self::BadRequest(format!("unknown action '{action}', expected 'start' or 'stop'"))
            }
            other => Self::ToggleFailed(other.to_string()),
        }
    }
}
