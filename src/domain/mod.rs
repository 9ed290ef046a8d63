//! Domain entities and rules, free of persistence and HTTP concerns.

pub mod hoot;
pub mod policy;
pub mod types;
pub mod user;
