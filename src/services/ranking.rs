//! Top-N selection over group counts.

use serde::Serialize;

use super::grouping::GroupCount;

/// A group count annotated with its 1-based position after ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedItem {
    pub key: String,
    pub total: usize,
    pub rank: usize,
}

/// Return the `limit` largest groups, highest total first.
///
/// Equal totals keep their input order (`sort_by` is stable), so the same
/// input always ranks the same way.
pub fn top_n(groups: &[GroupCount], limit: usize) -> Vec<RankedItem> {
    let mut sorted: Vec<&GroupCount> = groups.iter().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));

    sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, g)| RankedItem {
            key: g.key.clone(),
            total: g.total,
            rank: idx + 1,
        })
        .collect()
}
