//! Diesel row types and their conversions into domain entities.

pub mod comment;
#[cfg(feature = "server")]
pub mod config;
pub mod hoot;
pub mod user;
