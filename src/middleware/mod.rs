//! Request extractors shared by route handlers.

pub mod auth;
