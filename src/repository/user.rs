use diesel::prelude::*;

use crate::domain::types::UserId;
use crate::domain::user::User;
use crate::models::user::User as DbUser;
use crate::repository::{DieselRepository, RepositoryResult, UserReader};

impl UserReader for DieselRepository {
    fn list_users_by_ids(&self, ids: &[UserId]) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let users = users::table
            .filter(users::id.eq_any(raw_ids))
            .select(DbUser::as_select())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<User>, _>>()?;

        Ok(users)
    }
}
