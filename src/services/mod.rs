//! Aggregation engine and the collaborators around it.

pub mod dashboard;
pub mod grouping;
pub mod kpi;
pub mod ranking;
pub mod recency;
pub mod record_source;
pub mod session;
pub mod snapshot_cache;
pub mod timestamp;
