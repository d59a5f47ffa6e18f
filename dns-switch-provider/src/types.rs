use serde::{Deserialize, Serialize};

/// Status of a DNS record as the provider reports it.
///
/// Serialized lowercase (`"enable"` / `"disable"`), the provider's own
/// spelling once lowercased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// The record resolves.
    Enable,
    /// The record is paused.
    Disable,
}

impl RecordStatus {
    /// Value reported when the real status cannot be determined.
    pub const SENTINEL: Self = Self::Disable;

    /// Lowercase name, as exposed to HTTP callers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }

    /// Uppercase value expected by `SetDomainRecordStatus`.
    pub fn as_api_value(self) -> &'static str {
        match self {
            Self::Enable => "ENABLE",
            Self::Disable => "DISABLE",
        }
    }

    /// Parses a provider status value, case-insensitively.
    pub fn from_api_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "enable" => Some(Self::Enable),
            "disable" => Some(Self::Disable),
            _ => None,
        }
    }

    /// The other state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Enable => Self::Disable,
            Self::Disable => Self::Enable,
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_spellings() {
        assert_eq!(RecordStatus::from_api_value("ENABLE"), Some(RecordStatus::Enable));
        assert_eq!(RecordStatus::from_api_value("Disable"), Some(RecordStatus::Disable));
        assert_eq!(RecordStatus::from_api_value(" enable "), Some(RecordStatus::Enable));
        assert_eq!(RecordStatus::from_api_value("PAUSE"), None);
        assert_eq!(RecordStatus::from_api_value(""), None);
    }

    #[test]
    fn api_and_display_values() {
        assert_eq!(RecordStatus::Enable.as_api_value(), "ENABLE");
        assert_eq!(RecordStatus::Disable.as_api_value(), "DISABLE");
        assert_eq!(RecordStatus::Enable.to_string(), "enable");
        assert_eq!(RecordStatus::Disable.toggled(), RecordStatus::Enable);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Enable).unwrap(),
            r#""enable""#
        );
        let back: RecordStatus = serde_json::from_str(r#""disable""#).unwrap();
        assert_eq!(back, RecordStatus::Disable);
    }
}
