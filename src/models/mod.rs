//! Record types for the four dashboard resources.

pub mod class;
pub mod relation;
pub mod subject;
pub mod user;
