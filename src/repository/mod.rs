use crate::db::{DbConnection, DbPool};
use crate::domain::hoot::{Hoot, NewHoot};
use crate::domain::types::{HootId, UserId};
use crate::domain::user::User;

pub mod errors;
pub mod hoot;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for hoot aggregates.
pub trait HootReader {
    /// List every hoot, newest first, each with its comments.
    fn list_hoots(&self) -> RepositoryResult<Vec<Hoot>>;
    /// Retrieve a hoot and its comments by identifier.
    fn get_hoot_by_id(&self, id: HootId) -> RepositoryResult<Option<Hoot>>;
}

/// Write operations for hoot aggregates.
///
/// Comments have no writer of their own: they are changed on a loaded [`Hoot`]
/// and persisted with [`HootWriter::save_hoot`].
pub trait HootWriter {
    /// Persist a new hoot without comments.
    fn create_hoot(&self, hoot: &NewHoot) -> RepositoryResult<Hoot>;
    /// Persist the hoot fields and every pending comment change in one
    /// transaction, returning the stored aggregate.
    ///
    /// Fails with [`RepositoryError::NotFound`] if the hoot was deleted in the
    /// meantime.
    fn save_hoot(&self, hoot: &Hoot) -> RepositoryResult<Hoot>;
    /// Delete a hoot together with its comments.
    fn delete_hoot(&self, id: HootId) -> RepositoryResult<usize>;
}

/// Read access to the account records used to resolve authors.
pub trait UserReader {
    /// Fetch the users matching `ids`. Unknown ids are skipped.
    fn list_users_by_ids(&self, ids: &[UserId]) -> RepositoryResult<Vec<User>>;
}
