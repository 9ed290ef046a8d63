use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, Username};

/// Account record owned by the identity service, read to resolve authors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
}
