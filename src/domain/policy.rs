//! Ownership rule shared by hoots and comments.
//!
//! A resource may be changed or deleted only by the user recorded as its
//! author when it was created. There are no roles and no override.

use thiserror::Error;

use crate::domain::hoot::{Comment, Hoot};
use crate::domain::types::UserId;

/// Anything that records the user who created it.
pub trait Authored {
    fn author(&self) -> UserId;
}

impl Authored for Hoot {
    fn author(&self) -> UserId {
        self.author
    }
}

impl Authored for Comment {
    fn author(&self) -> UserId {
        self.author
    }
}

/// The acting user is not the resource's author.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("user {principal} is not the author (author is {author})")]
pub struct PolicyViolation {
    pub principal: UserId,
    pub author: UserId,
}

/// Check that `principal` authored `resource`.
pub fn ensure_author<T>(principal: UserId, resource: &T) -> Result<(), PolicyViolation>
where
    T: Authored + ?Sized,
{
    let author = resource.author();
    if author == principal {
        Ok(())
    } else {
        Err(PolicyViolation { principal, author })
    }
}
