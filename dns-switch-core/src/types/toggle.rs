//! 启停操作类型

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use dns_switch_provider::{ProviderError, RecordStatus};

use crate::error::CoreError;

/// Requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    /// 启用记录
    Start,
    /// 暂停记录
    Stop,
}

impl ToggleAction {
    /// Status the record should end up in.
    pub fn desired_status(self) -> RecordStatus {
        match self {
            Self::Start => RecordStatus::Enable,
            Self::Stop => RecordStatus::Disable,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

impl FromStr for ToggleAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(CoreError::InvalidAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for ToggleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a toggle.
///
/// `success` reflects the write only. `confirmed_status` is the read taken
/// after the settle delay and may still lag behind `requested_status`.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleOutcome {
    pub record_id: String,
    /// 目录中的名称，未登记时为 `record_id`
    pub name: String,
    pub action: ToggleAction,
    pub requested_status: RecordStatus,
    /// 写入失败时为 `None`
    pub confirmed_status: Option<RecordStatus>,
    pub success: bool,
    pub error: Option<ProviderError>,
}

impl ToggleOutcome {
    pub(crate) fn failed(
        record_id: &str,
        name: &str,
        action: ToggleAction,
        error: ProviderError,
    ) -> Self {
        Self {
            record_id: record_id.to_string(),
            name: name.to_string(),
            action,
            requested_status: action.desired_status(),
            confirmed_status: None,
            success: false,
            error: Some(error),
        }
    }

    pub(crate) fn succeeded(
        record_id: &str,
        name: &str,
        action: ToggleAction,
        confirmed: RecordStatus,
    ) -> Self {
        Self {
            record_id: record_id.to_string(),
            name: name.to_string(),
            action,
            requested_status: action.desired_status(),
            confirmed_status: Some(confirmed),
            success: true,
            error: None,
        }
    }

    /// Whether the confirming read already shows the requested status.
    pub fn converged(&self) -> bool {
        self.confirmed_status == Some(self.requested_status)
    }
}
