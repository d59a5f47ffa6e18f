//! 记录目录（启动时加载，只读）

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A managed DNS record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// 完整域名，仅用于展示
    pub name: String,
    /// 服务商分配的记录 ID
    pub record_id: String,
}

/// A named, ordered set of records (e.g. an environment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordGroup {
    /// 分组名
    pub name: String,
    /// 分组内记录，保持配置顺序
    #[serde(default)]
    pub records: Vec<RecordDescriptor>,
}

/// Immutable catalog of record groups.
///
/// Supports lookup by record id and iteration in configuration order.
/// A record id may appear at most once across all groups.
#[derive(Debug, Clone, Default)]
pub struct RecordCatalog {
    groups: Vec<RecordGroup>,
    /// `record_id` -> (group index, record index)
    index: HashMap<String, (usize, usize)>,
}

impl RecordCatalog {
    /// Validates `groups` and builds the catalog.
    pub fn new(groups: Vec<RecordGroup>) -> CoreResult<Self> {
        let mut index = HashMap::new();
        let mut group_names = HashSet::new();

        for (gi, group) in groups.iter().enumerate() {
            if group.name.trim().is_empty() {
                return Err(CoreError::Configuration(format!(
                    "group #{} has an empty name",
                    gi + 1
                )));
            }
            if !group_names.insert(group.name.as_str()) {
                return Err(CoreError::Configuration(format!(
                    "duplicate group name '{}'",
                    group.name
                )));
            }

            for (ri, record) in group.records.iter().enumerate() {
                if record.record_id.trim().is_empty() {
                    return Err(CoreError::InvalidRecord(format!(
                        "record #{} in group '{}' has an empty record_id",
                        ri + 1,
                        group.name
                    )));
                }
                if record.name.trim().is_empty() {
                    return Err(CoreError::InvalidRecord(format!(
                        "record '{}' in group '{}' has an empty name",
                        record.record_id, group.name
                    )));
                }
                if index.insert(record.record_id.clone(), (gi, ri)).is_some() {
                    return Err(CoreError::DuplicateRecord(record.record_id.clone()));
                }
            }
        }

        Ok(Self { groups, index })
    }

    /// Groups in configuration order.
    pub fn groups(&self) -> &[RecordGroup] {
        &self.groups
    }

    /// Looks up a record by id.
    pub fn find(&self, record_id: &str) -> Option<&RecordDescriptor> {
        self.index
            .get(record_id)
            .map(|&(gi, ri)| &self.groups[gi].records[ri])
    }

    /// Display name for `record_id`, or the id itself when it is not in the
    /// catalog.
    pub fn display_name<'a>(&'a self, record_id: &'a str) -> &'a str {
        self.find(record_id).map_or(record_id, |r| r.name.as_str())
    }

    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, id: &str) -> RecordDescriptor {
        RecordDescriptor {
            name: name.to_string(),
            record_id: id.to_string(),
        }
    }

    fn group(name: &str, records: Vec<RecordDescriptor>) -> RecordGroup {
        RecordGroup {
            name: name.to_string(),
            records,
        }
    }

    #[test]
    fn lookup_and_order() {
        let catalog = RecordCatalog::new(vec![
            group(
                "uat",
                vec![record("b.example.com", "2"), record("a.example.com", "1")],
            ),
            group("sit", vec![record("c.example.com", "3")]),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.groups()[0].name, "uat");
        assert_eq!(catalog.groups()[0].records[0].record_id, "2");
        assert_eq!(catalog.find("3").map(|r| r.name.as_str()), Some("c.example.com"));
        assert!(catalog.find("4").is_none());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let catalog =
            RecordCatalog::new(vec![group("uat", vec![record("a.example.com", "1")])]).unwrap();
        assert_eq!(catalog.display_name("1"), "a.example.com");
        assert_eq!(catalog.display_name("999"), "999");
    }

    #[test]
    fn duplicate_record_id_rejected() {
        let result = RecordCatalog::new(vec![
            group("uat", vec![record("a.example.com", "1")]),
            group("sit", vec![record("b.example.com", "1")]),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateRecord(id)) if id == "1"));
    }

    #[test]
    fn duplicate_group_name_rejected() {
        let result = RecordCatalog::new(vec![group("uat", vec![]), group("uat", vec![])]);
        assert!(matches!(result, Err(CoreError::Configuration(_))));
    }

    #[test]
    fn empty_fields_rejected() {
        assert!(matches!(
            RecordCatalog::new(vec![group("uat", vec![record("a.example.com", " ")])]),
            Err(CoreError::InvalidRecord(_))
        ));
        assert!(matches!(
            RecordCatalog::new(vec![group("uat", vec![record("", "1")])]),
            Err(CoreError::InvalidRecord(_))
        ));
        assert!(matches!(
            RecordCatalog::new(vec![group("", vec![])]),
            Err(CoreError::Configuration(_))
        ));
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = RecordCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.groups().is_empty());
    }
}
