//! Business logic behind the HTTP routes.
//!
//! Services take the authenticated user and a repository, apply the
//! ownership rule and translate repository failures into [`ServiceError`], so
//! routes stay thin wrappers.

pub mod comments;
pub mod errors;
pub mod hoots;

pub use errors::{ServiceError, ServiceResult};
