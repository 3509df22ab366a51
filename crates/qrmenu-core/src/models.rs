//! Domain models for the directory.
//!
//! Documents are stored with camelCase field names. Each module names
//! its collection and the fields used in equality filters.

pub mod establishment;
pub mod menu;
