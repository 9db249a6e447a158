//! Most-recently-created selection.

use serde::Serialize;

use super::timestamp;
use crate::models::class::ClassRecord;
use crate::models::user::User;

/// Records carrying an optional raw creation timestamp.
pub trait Timestamped {
    fn created_at(&self) -> Option<&str>;
}

impl Timestamped for User {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl Timestamped for ClassRecord {
    fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

/// A selected record with its 1-based recency position.
///
/// Serializes as the record's own fields plus `rank`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentItem<T> {
    #[serde(flatten)]
    pub record: T,
    pub rank: usize,
}

/// The `limit` newest items, most recent first.
pub fn newest<T>(items: &[T], limit: usize) -> Vec<RecentItem<T>>
where
    T: Timestamped + Clone,
{
    select(items, None, limit)
}

/// The `limit` newest items accepted by `predicate`, most recent first.
pub fn newest_matching<T, P>(items: &[T], predicate: P, limit: usize) -> Vec<RecentItem<T>>
where
    T: Timestamped + Clone,
    P: Fn(&T) -> bool,
{
    let predicate: &dyn Fn(&T) -> bool = &predicate;
    select(items, Some(predicate), limit)
}

fn select<T>(items: &[T], predicate: Option<&dyn Fn(&T) -> bool>, limit: usize) -> Vec<RecentItem<T>>
where
    T: Timestamped + Clone,
{
    let mut keyed: Vec<_> = items
        .iter()
        .filter(|item| predicate.map_or(true, |p| p(*item)))
        .map(|item| (item.created_at().and_then(timestamp::parse), item))
        .collect();

    // Descending on Option puts None after every instant, however old.
    // The stable sort keeps input order within equal keys.
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    keyed
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, (_, item))| RecentItem {
            record: item.clone(),
            rank: idx + 1,
        })
        .collect()
}
