//! Request bodies and their validated payloads.

pub mod comments;
pub mod hoots;
