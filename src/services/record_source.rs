//! Record-fetch collaborator: full, unpaginated lists per resource.
//!
//! Records travel as JSON objects shaped like the public models (camelCase,
//! relations embedded as `{ id, name }`), so every source decodes the same way.

use std::collections::HashMap;
use std::future::Future;

use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;

use crate::errors::AppError;

/// The four collections the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Subjects,
    Departments,
    Classes,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Subjects => "subjects",
            Self::Departments => "departments",
            Self::Classes => "classes",
        }
    }

    /// One JSON object per row, ordered by id.
    fn list_query(&self) -> &'static str {
        match self {
            Self::Users => {
                r#"
                SELECT json_build_object(
                    'id', u.id,
                    'name', u.name,
                    'email', u.email,
                    'role', u.role,
                    'image', u.image,
                    'createdAt', u.created_at
                )
                FROM users u
                ORDER BY u.id
                "#
            }
            Self::Subjects => {
                r#"
                SELECT json_build_object(
                    'id', s.id,
                    'name', s.name,
                    'department', CASE WHEN d.id IS NULL THEN NULL
                                       ELSE json_build_object('id', d.id, 'name', d.name) END
                )
                FROM subjects s
                LEFT JOIN departments d ON d.id = s.department_id
                ORDER BY s.id
                "#
            }
            Self::Departments => {
                r#"
                SELECT json_build_object('id', d.id, 'name', d.name)
                FROM departments d
                ORDER BY d.id
                "#
            }
            Self::Classes => {
                r#"
                SELECT json_build_object(
                    'id', c.id,
                    'name', c.name,
                    'subject', CASE WHEN s.id IS NULL THEN NULL
                                    ELSE json_build_object('id', s.id, 'name', s.name) END,
                    'teacher', CASE WHEN t.id IS NULL THEN NULL
                                    ELSE json_build_object('id', t.id, 'name', t.name) END,
                    'createdAt', c.created_at
                )
                FROM classes c
                LEFT JOIN subjects s ON s.id = c.subject_id
                LEFT JOIN users t ON t.id = c.teacher_id
                ORDER BY c.id
                "#
            }
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can hand over a full resource list.
pub trait RecordSource: Sync {
    fn fetch_list(
        &self,
        resource: Resource,
    ) -> impl Future<Output = Result<Vec<Value>, AppError>> + Send;
}

impl RecordSource for PgPool {
    async fn fetch_list(&self, resource: Resource) -> Result<Vec<Value>, AppError> {
        let rows = sqlx::query_scalar::<_, Value>(resource.list_query())
            .fetch_all(self)
            .await?;
        Ok(rows)
    }
}

/// Fixed lists held in memory. A resource never inserted fails to fetch.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    lists: HashMap<Resource, Vec<Value>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON records for `resource`.
    pub fn with_json(mut self, resource: Resource, records: Vec<Value>) -> Self {
        self.lists.insert(resource, records);
        self
    }
}

impl RecordSource for InMemorySource {
    async fn fetch_list(&self, resource: Resource) -> Result<Vec<Value>, AppError> {
        self.lists
            .get(&resource)
            .cloned()
            .ok_or_else(|| AppError::Internal(format!("Resource '{resource}' is not available")))
    }
}

/// Decode a fetched list into typed records; one bad record fails the list.
pub fn decode_list<T: DeserializeOwned>(records: Vec<Value>) -> Result<Vec<T>, AppError> {
    records
        .into_iter()
        .map(|r| serde_json::from_value(r).map_err(AppError::from))
        .collect()
}
