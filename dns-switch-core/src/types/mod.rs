//! 类型定义模块

mod catalog;
mod status;
mod toggle;

pub use catalog::{RecordCatalog, RecordDescriptor, RecordGroup};
pub use status::{ObservedStatus, StatusResult, StatusSnapshot};
pub use toggle::{ToggleAction, ToggleOutcome};

// Re-export provider 库的公共类型
pub use dns_switch_provider::RecordStatus;
