//! Named references between records and the explicit accessor that reads them.

use serde::{Deserialize, Serialize};

/// Label substituted when a subject or department relation is absent.
pub const UNASSIGNED: &str = "Unassigned";

/// Label substituted when a user carries no role.
pub const UNKNOWN_ROLE: &str = "unknown";

/// A related record as embedded by the source: its id and display name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NamedRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NamedRef {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }
}

/// Relation paths the dashboard reads through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationPath {
    SubjectDepartment,
    ClassSubject,
    ClassTeacher,
}

/// Records that expose named relations.
pub trait Related {
    /// The reference at `path`, or `None` if absent or not carried by this record.
    fn related(&self, path: RelationPath) -> Option<&NamedRef>;
}

/// Name of the record related through `path`, or [`UNASSIGNED`].
pub fn relation_name<E: Related>(entity: &E, path: RelationPath) -> &str {
    entity
        .related(path)
        .and_then(|r| r.name.as_deref())
        .unwrap_or(UNASSIGNED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class::ClassRecord;
    use crate::models::subject::Subject;

    fn subject(department: Option<NamedRef>) -> Subject {
        Subject {
            id: 1,
            name: "Algebra".to_string(),
            department,
        }
    }

    #[test]
    fn present_relation_resolves_to_name() {
        let s = subject(Some(NamedRef::new(3, "Mathematics")));
        assert_eq!(relation_name(&s, RelationPath::SubjectDepartment), "Mathematics");
    }

    #[test]
    fn absent_relation_resolves_to_sentinel() {
        assert_eq!(relation_name(&subject(None), RelationPath::SubjectDepartment), UNASSIGNED);
    }

    #[test]
    fn relation_without_name_resolves_to_sentinel() {
        let s = subject(Some(NamedRef { id: Some(3), name: None }));
        assert_eq!(relation_name(&s, RelationPath::SubjectDepartment), UNASSIGNED);
    }

    #[test]
    fn empty_name_is_kept() {
        let s = subject(Some(NamedRef { id: None, name: Some(String::new()) }));
        assert_eq!(relation_name(&s, RelationPath::SubjectDepartment), "");
    }

    #[test]
    fn path_not_carried_by_record_resolves_to_sentinel() {
        let s = subject(Some(NamedRef::new(3, "Mathematics")));
        assert_eq!(relation_name(&s, RelationPath::ClassTeacher), UNASSIGNED);

        let c = ClassRecord {
            id: 1,
            name: "1A".to_string(),
            subject: None,
            teacher: Some(NamedRef::new(9, "Grace")),
            created_at: None,
        };
        assert_eq!(relation_name(&c, RelationPath::ClassTeacher), "Grace");
        assert_eq!(relation_name(&c, RelationPath::SubjectDepartment), UNASSIGNED);
    }
}
