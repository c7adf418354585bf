//! Builders for common test trees

pub mod scenarios;
