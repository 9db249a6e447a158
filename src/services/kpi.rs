//! Labeled scalar counts across collections.

use serde::Serialize;

/// One headline number on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: usize,
}

/// Builds an ordered list of KPIs, one per labeled collection.
///
/// ```ignore
/// let kpis = KpiCalculator::new()
///     .total("Users", &users)
///     .matching("Teachers", &users, |u| u.has_role(UserRole::Teacher))
///     .finish();
/// ```
#[derive(Debug, Default)]
pub struct KpiCalculator {
    kpis: Vec<Kpi>,
}

impl KpiCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every item in `items`.
    pub fn total<T>(mut self, label: &str, items: &[T]) -> Self {
        self.push(label, items.len());
        self
    }

    /// Count the items in `items` accepted by `predicate`.
    pub fn matching<T, P>(mut self, label: &str, items: &[T], predicate: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        let value = items.iter().filter(|item| predicate(*item)).count();
        self.push(label, value);
        self
    }

    pub fn finish(self) -> Vec<Kpi> {
        self.kpis
    }

    fn push(&mut self, label: &str, value: usize) {
        self.kpis.push(Kpi {
            label: label.to_string(),
            value,
        });
    }
}

/// Value of the KPI named `label`, if present.
pub fn value_of(kpis: &[Kpi], label: &str) -> Option<usize> {
    kpis.iter().find(|k| k.label == label).map(|k| k.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_filtered_counts_in_insertion_order() {
        let roles = ["teacher", "admin", "teacher", "student"];
        let rooms = [101, 102];
        let kpis = KpiCalculator::new()
            .total("People", &roles)
            .matching("Teachers", &roles, |r| *r == "teacher")
            .total("Rooms", &rooms)
            .finish();

        let labels: Vec<&str> = kpis.iter().map(|k| k.label.as_str()).collect();
        assert_eq!(labels, vec!["People", "Teachers", "Rooms"]);
        assert_eq!(value_of(&kpis, "People"), Some(4));
        assert_eq!(value_of(&kpis, "Teachers"), Some(2));
        assert_eq!(value_of(&kpis, "Rooms"), Some(2));
    }

    #[test]
    fn empty_collections_count_zero() {
        let none: [&str; 0] = [];
        let kpis = KpiCalculator::new()
            .total("All", &none)
            .matching("Some", &none, |_| true)
            .finish();
        assert!(kpis.iter().all(|k| k.value == 0));
        assert_eq!(kpis.len(), 2);
    }

    #[test]
    fn missing_label_is_none() {
        assert_eq!(value_of(&[], "Classes"), None);
    }
}
