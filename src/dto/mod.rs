//! JSON response shapes.

pub mod errors;
pub mod hoots;
