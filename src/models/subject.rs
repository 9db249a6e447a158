//! Subject and department records.

use serde::{Deserialize, Serialize};

use super::relation::{NamedRef, Related, RelationPath};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub name: String,
}

/// Subject with its owning department embedded by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub department: Option<NamedRef>,
}

impl Related for Subject {
    fn related(&self, path: RelationPath) -> Option<&NamedRef> {
        match path {
            RelationPath::SubjectDepartment => self.department.as_ref(),
            _ => None,
        }
    }
}
