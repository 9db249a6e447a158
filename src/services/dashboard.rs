//! Dashboard view-model assembly.
//!
//! [`assemble`] is a pure function of a [`DashboardSnapshot`]: the four source
//! collections as currently available. A collection that has not loaded (or
//! failed to load) is `None` and counts as empty; nothing here can fail.

use serde::{Deserialize, Serialize};

use super::grouping::{count_by, GroupCount};
use super::kpi::{Kpi, KpiCalculator};
use super::ranking::{top_n, RankedItem};
use super::recency::{newest, newest_matching, RecentItem};
use super::record_source::{decode_list, RecordSource, Resource};
use crate::models::class::ClassRecord;
use crate::models::relation::{relation_name, RelationPath, UNKNOWN_ROLE};
use crate::models::subject::{Department, Subject};
use crate::models::user::{User, UserRole};

/// Entries kept in the top-N rankings.
pub const TOP_LIMIT: usize = 5;

/// Entries kept in the newest-records lists.
pub const RECENT_LIMIT: usize = 5;

pub const KPI_TOTAL_USERS: &str = "Total Users";
pub const KPI_TEACHERS: &str = "Teachers";
pub const KPI_ADMINS: &str = "Admins";
pub const KPI_SUBJECTS: &str = "Subjects";
pub const KPI_DEPARTMENTS: &str = "Departments";
pub const KPI_CLASSES: &str = "Classes";

/// The four source collections at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub users: Option<Vec<User>>,
    pub subjects: Option<Vec<Subject>>,
    pub departments: Option<Vec<Department>>,
    pub classes: Option<Vec<ClassRecord>>,
}

/// Aggregated view consumed by the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub kpis: Vec<Kpi>,
    pub users_by_role: Vec<RoleTotal>,
    pub subjects_by_department: Vec<GroupTotal>,
    pub classes_by_subject: Vec<GroupTotal>,
    pub newest_classes: Vec<RecentItem<ClassRecord>>,
    pub newest_teachers: Vec<RecentItem<User>>,
    pub top_departments: Vec<RankedGroup>,
    pub top_subjects: Vec<RankedGroup>,
}

impl DashboardView {
    /// Value of the KPI named `label`, if present.
    pub fn kpi(&self, label: &str) -> Option<usize> {
        super::kpi::value_of(&self.kpis, label)
    }
}

/// User count for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleTotal {
    pub role: String,
    pub total: usize,
}

impl From<GroupCount> for RoleTotal {
    fn from(g: GroupCount) -> Self {
        Self {
            role: g.key,
            total: g.total,
        }
    }
}

/// Record count for one named group (department or subject).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotal {
    pub group_name: String,
    pub total: usize,
}

impl From<&GroupCount> for GroupTotal {
    fn from(g: &GroupCount) -> Self {
        Self {
            group_name: g.key.clone(),
            total: g.total,
        }
    }
}

/// A group in a top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedGroup {
    pub group_name: String,
    pub total: usize,
    pub rank: usize,
}

impl From<RankedItem> for RankedGroup {
    fn from(r: RankedItem) -> Self {
        Self {
            group_name: r.key,
            total: r.total,
            rank: r.rank,
        }
    }
}

/// Build the view-model from whatever collections are available.
pub fn assemble(snapshot: &DashboardSnapshot) -> DashboardView {
    let users: &[User] = snapshot.users.as_deref().unwrap_or_default();
    let subjects: &[Subject] = snapshot.subjects.as_deref().unwrap_or_default();
    let departments: &[Department] = snapshot.departments.as_deref().unwrap_or_default();
    let classes: &[ClassRecord] = snapshot.classes.as_deref().unwrap_or_default();

    let users_by_role = count_by(users, |u| u.role.as_deref().unwrap_or(UNKNOWN_ROLE));
    let subjects_by_department =
        count_by(subjects, |s| relation_name(s, RelationPath::SubjectDepartment));
    let classes_by_subject = count_by(classes, |c| relation_name(c, RelationPath::ClassSubject));

    let top_departments = top_n(&subjects_by_department, TOP_LIMIT);
    let top_subjects = top_n(&classes_by_subject, TOP_LIMIT);

    let newest_classes = newest(classes, RECENT_LIMIT);
    let newest_teachers =
        newest_matching(users, |u| u.has_role(UserRole::Teacher), RECENT_LIMIT);

    let kpis = KpiCalculator::new()
        .total(KPI_TOTAL_USERS, users)
        .matching(KPI_TEACHERS, users, |u| u.has_role(UserRole::Teacher))
        .matching(KPI_ADMINS, users, |u| u.has_role(UserRole::Admin))
        .total(KPI_SUBJECTS, subjects)
        .total(KPI_DEPARTMENTS, departments)
        .total(KPI_CLASSES, classes)
        .finish();

    DashboardView {
        kpis,
        users_by_role: users_by_role.into_iter().map(RoleTotal::from).collect(),
        subjects_by_department: subjects_by_department.iter().map(GroupTotal::from).collect(),
        classes_by_subject: classes_by_subject.iter().map(GroupTotal::from).collect(),
        newest_classes,
        newest_teachers,
        top_departments: top_departments.into_iter().map(RankedGroup::from).collect(),
        top_subjects: top_subjects.into_iter().map(RankedGroup::from).collect(),
    }
}

/// Fetch all four collections concurrently.
///
/// A resource whose fetch or decode fails is logged and left `None`; the
/// remaining collections are still returned.
pub async fn load_snapshot<S: RecordSource>(source: &S) -> DashboardSnapshot {
    let (users, subjects, departments, classes) = tokio::join!(
        fetch_collection::<User, S>(source, Resource::Users),
        fetch_collection::<Subject, S>(source, Resource::Subjects),
        fetch_collection::<Department, S>(source, Resource::Departments),
        fetch_collection::<ClassRecord, S>(source, Resource::Classes),
    );

    tracing::debug!(
        users = users.as_ref().map(Vec::len),
        subjects = subjects.as_ref().map(Vec::len),
        departments = departments.as_ref().map(Vec::len),
        classes = classes.as_ref().map(Vec::len),
        "Loaded dashboard snapshot"
    );

    DashboardSnapshot {
        users,
        subjects,
        departments,
        classes,
    }
}

async fn fetch_collection<T, S>(source: &S, resource: Resource) -> Option<Vec<T>>
where
    T: serde::de::DeserializeOwned,
    S: RecordSource,
{
    match source.fetch_list(resource).await.and_then(decode_list::<T>) {
        Ok(records) => Some(records),
        Err(e) => {
            tracing::warn!(resource = %resource, error = %e, "Collection unavailable, treating as empty");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::relation::{NamedRef, UNASSIGNED};
    use crate::services::record_source::InMemorySource;
    use serde_json::json;

    fn user(id: i64, role: Option<&str>, created_at: Option<&str>) -> User {
        User {
            id,
            name: format!("user-{id}"),
            email: format!("user-{id}@campus.test"),
            role: role.map(str::to_string),
            image: None,
            created_at: created_at.map(str::to_string),
        }
    }

    fn subject(id: i64, department: Option<&str>) -> Subject {
        Subject {
            id,
            name: format!("subject-{id}"),
            department: department.map(|d| NamedRef::new(id * 100, d)),
        }
    }

    fn class(id: i64, subject: Option<&str>, created_at: Option<&str>) -> ClassRecord {
        ClassRecord {
            id,
            name: format!("class-{id}"),
            subject: subject.map(|s| NamedRef::new(id * 10, s)),
            teacher: None,
            created_at: created_at.map(str::to_string),
        }
    }

    fn sample_snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            users: Some(vec![
                user(1, Some("teacher"), Some("2024-01-01")),
                user(2, Some("teacher"), Some("2024-03-01")),
                user(3, Some("admin"), Some("2024-04-01")),
                user(4, None, None),
                user(5, Some("student"), Some("2024-02-01")),
                user(6, Some("teacher"), None),
            ]),
            subjects: Some(vec![
                subject(1, Some("Science")),
                subject(2, Some("Arts")),
                subject(3, Some("Science")),
                subject(4, None),
            ]),
            departments: Some(vec![
                Department { id: 1, name: "Science".to_string() },
                Department { id: 2, name: "Arts".to_string() },
            ]),
            classes: Some(vec![
                class(1, Some("Biology"), Some("2024-01-10")),
                class(2, Some("Painting"), Some("2024-05-10")),
                class(3, Some("Biology"), None),
                class(4, None, Some("2024-03-10")),
            ]),
        }
    }

    #[test]
    fn groups_users_by_role_first_seen() {
        let view = assemble(&sample_snapshot());
        assert_eq!(
            view.users_by_role,
            vec![
                RoleTotal { role: "teacher".to_string(), total: 3 },
                RoleTotal { role: "admin".to_string(), total: 1 },
                RoleTotal { role: UNKNOWN_ROLE.to_string(), total: 1 },
                RoleTotal { role: "student".to_string(), total: 1 },
            ]
        );
    }

    #[test]
    fn groups_subjects_and_classes_with_sentinel() {
        let view = assemble(&sample_snapshot());
        let depts: Vec<(&str, usize)> = view
            .subjects_by_department
            .iter()
            .map(|g| (g.group_name.as_str(), g.total))
            .collect();
        assert_eq!(depts, vec![("Science", 2), ("Arts", 1), (UNASSIGNED, 1)]);

        let subjects: Vec<(&str, usize)> = view
            .classes_by_subject
            .iter()
            .map(|g| (g.group_name.as_str(), g.total))
            .collect();
        assert_eq!(subjects, vec![("Biology", 2), ("Painting", 1), (UNASSIGNED, 1)]);
    }

    #[test]
    fn ranks_top_groups() {
        let view = assemble(&sample_snapshot());
        assert_eq!(
            view.top_departments[0],
            RankedGroup { group_name: "Science".to_string(), total: 2, rank: 1 }
        );
        let order: Vec<&str> = view.top_subjects.iter().map(|r| r.group_name.as_str()).collect();
        assert_eq!(order, vec!["Biology", "Painting", UNASSIGNED]);
    }

    #[test]
    fn newest_lists_are_ordered_and_filtered() {
        let view = assemble(&sample_snapshot());
        let class_ids: Vec<i64> = view.newest_classes.iter().map(|c| c.record.id).collect();
        assert_eq!(class_ids, vec![2, 4, 1, 3]);

        let teacher_ids: Vec<i64> = view.newest_teachers.iter().map(|t| t.record.id).collect();
        assert_eq!(teacher_ids, vec![2, 1, 6]);
    }

    #[test]
    fn kpis_in_fixed_order() {
        let view = assemble(&sample_snapshot());
        let pairs: Vec<(&str, usize)> =
            view.kpis.iter().map(|k| (k.label.as_str(), k.value)).collect();
        assert_eq!(
            pairs,
            vec![
                (KPI_TOTAL_USERS, 6),
                (KPI_TEACHERS, 3),
                (KPI_ADMINS, 1),
                (KPI_SUBJECTS, 4),
                (KPI_DEPARTMENTS, 2),
                (KPI_CLASSES, 4),
            ]
        );
    }

    #[test]
    fn empty_classes_yield_empty_outputs() {
        let mut snapshot = sample_snapshot();
        snapshot.classes = Some(Vec::new());
        let view = assemble(&snapshot);
        assert!(view.newest_classes.is_empty());
        assert!(view.top_subjects.is_empty());
        assert!(view.classes_by_subject.is_empty());
        assert_eq!(view.kpi(KPI_CLASSES), Some(0));
    }

    #[test]
    fn unavailable_collections_count_as_empty() {
        let view = assemble(&DashboardSnapshot::default());
        assert!(view.kpis.iter().all(|k| k.value == 0));
        assert_eq!(view.kpis.len(), 6);
        assert!(view.users_by_role.is_empty());
        assert!(view.newest_teachers.is_empty());
        assert!(view.top_departments.is_empty());
    }

    #[test]
    fn partial_snapshot_uses_what_is_present() {
        let snapshot = DashboardSnapshot {
            departments: Some(vec![Department { id: 1, name: "Science".to_string() }]),
            ..Default::default()
        };
        let view = assemble(&snapshot);
        assert_eq!(view.kpi(KPI_DEPARTMENTS), Some(1));
        assert_eq!(view.kpi(KPI_TOTAL_USERS), Some(0));
    }

    #[test]
    fn assemble_is_idempotent() {
        let snapshot = sample_snapshot();
        assert_eq!(assemble(&snapshot), assemble(&snapshot.clone()));
    }

    #[test]
    fn view_serializes_camel_case() {
        let json = serde_json::to_value(assemble(&sample_snapshot())).unwrap();
        assert!(json["usersByRole"].is_array());
        assert_eq!(json["topDepartments"][0]["groupName"], "Science");
        assert_eq!(json["topDepartments"][0]["rank"], 1);
        assert_eq!(json["newestClasses"][0]["name"], "class-2");
        assert_eq!(json["newestClasses"][0]["rank"], 1);
        assert_eq!(json["kpis"][5]["label"], "Classes");
    }

    #[tokio::test]
    async fn load_snapshot_degrades_failed_resources() {
        let source = InMemorySource::new()
            .with_json(
                Resource::Users,
                vec![json!({ "id": 1, "name": "A", "email": "a@campus.test", "role": "teacher" })],
            )
            .with_json(Resource::Departments, vec![json!({ "id": "not-a-number" })])
            .with_json(Resource::Classes, vec![]);

        let snapshot = load_snapshot(&source).await;
        assert_eq!(snapshot.users.as_ref().map(Vec::len), Some(1));
        assert!(snapshot.subjects.is_none());
        assert!(snapshot.departments.is_none());
        assert_eq!(snapshot.classes, Some(Vec::new()));

        let view = assemble(&snapshot);
        assert_eq!(view.kpi(KPI_TEACHERS), Some(1));
        assert_eq!(view.kpi(KPI_SUBJECTS), Some(0));
    }
}
