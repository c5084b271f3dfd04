//! Data models: configuration, field results and lease records.

pub mod config;
pub mod field;
pub mod lease;
