//! DNS Switch Core Library
//!
//! Business logic on top of the provider client:
//! - record catalog (static configuration, lookup by id, ordered groups)
//! - status aggregation across all records (Status Service)
//! - toggling a record with notification and confirming read (Toggle Service)
//!
//! Dependencies are injected through [`ServiceContext`] as trait objects, so
//! the same services run against the real Alidns client or test doubles.

pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ServiceContext, ServiceSettings, StatusService, ToggleService};
pub use types::{
    ObservedStatus, RecordCatalog, RecordDescriptor, RecordGroup, RecordStatus, StatusResult,
    StatusSnapshot, ToggleAction, ToggleOutcome,
};
