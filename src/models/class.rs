//! Class record with embedded subject and teacher references.

use serde::{Deserialize, Serialize};

use super::relation::{NamedRef, Related, RelationPath};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub subject: Option<NamedRef>,
    #[serde(default)]
    pub teacher: Option<NamedRef>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Related for ClassRecord {
    fn related(&self, path: RelationPath) -> Option<&NamedRef> {
        match path {
            RelationPath::ClassSubject => self.subject.as_ref(),
            RelationPath::ClassTeacher => self.teacher.as_ref(),
            RelationPath::SubjectDepartment => None,
        }
    }
}
