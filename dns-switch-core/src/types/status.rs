//! 状态查询结果

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use dns_switch_provider::RecordStatus;

use super::RecordDescriptor;

/// Status as shown to callers.
///
/// `Error` only appears when the query task itself failed; provider-side
/// failures are already folded into [`RecordStatus::SENTINEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservedStatus {
    Enable,
    Disable,
    Error,
}

impl ObservedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Error => "error",
        }
    }
}

impl From<RecordStatus> for ObservedStatus {
    fn from(status: RecordStatus) -> Self {
        match status {
            RecordStatus::Enable => Self::Enable,
            RecordStatus::Disable => Self::Disable,
        }
    }
}

impl std::fmt::Display for ObservedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record's status at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResult {
    pub name: String,
    pub record_id: String,
    pub status: ObservedStatus,
}

impl StatusResult {
    pub fn new(record: &RecordDescriptor, status: impl Into<ObservedStatus>) -> Self {
        Self {
            name: record.name.clone(),
            record_id: record.record_id.clone(),
            status: status.into(),
        }
    }
}

/// Point-in-time status of every record, grouped as in the catalog.
///
/// Serializes as `{"group": [{name, record_id, status}, ...], ...}` with keys
/// in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    groups: Vec<(String, Vec<StatusResult>)>,
}

impl StatusSnapshot {
    pub(crate) fn push_group(&mut self, name: String, results: Vec<StatusResult>) {
        self.groups.push((name, results));
    }

    /// `(group name, results)` in catalog order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[StatusResult])> {
        self.groups
            .iter()
            .map(|(name, results)| (name.as_str(), results.as_slice()))
    }

    /// Results of one group.
    pub fn group(&self, name: &str) -> Option<&[StatusResult]> {
        self.groups
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, results)| results.as_slice())
    }

    /// Total number of results.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, results)| results.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of results per status, for log summaries.
    pub fn count(&self, status: ObservedStatus) -> usize {
        self.groups
            .iter()
            .flat_map(|(_, results)| results)
            .filter(|r| r.status == status)
            .count()
    }
}

impl Serialize for StatusSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (name, results) in &self.groups {
            map.serialize_entry(name, results)?;
        }
        map.end()
    }
}
