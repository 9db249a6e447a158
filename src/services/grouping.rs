//! Group-and-count over record collections.

use std::collections::HashMap;

use serde::Serialize;

/// Number of records sharing one derived key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub total: usize,
}

/// Count `items` per key, keeping groups in first-seen order.
///
/// `key` must return the sentinel label itself when the underlying field is
/// absent; every item lands in exactly one group, so the totals always sum to
/// `items.len()`.
pub fn count_by<'a, T, F>(items: &'a [T], key: F) -> Vec<GroupCount>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<GroupCount> = Vec::new();

    for item in items {
        let k = key(item);
        match slots.get(k) {
            Some(&idx) => groups[idx].total += 1,
            None => {
                slots.insert(k, groups.len());
                groups.push(GroupCount {
                    key: k.to_string(),
                    total: 1,
                });
            }
        }
    }

    groups
}
