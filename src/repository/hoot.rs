use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::hoot::{Comment, Hoot, NewHoot};
use crate::domain::types::HootId;
use crate::models::comment::{Comment as DbComment, NewComment as DbNewComment};
use crate::models::hoot::{Hoot as DbHoot, HootChangeset, NewHoot as DbNewHoot};
use crate::repository::{
    DieselRepository, HootReader, HootWriter, RepositoryError, RepositoryResult,
};

/// Load the comments of `hoot_ids`, grouped by hoot and kept in insertion order.
fn load_comments(
    conn: &mut SqliteConnection,
    hoot_ids: Vec<i32>,
) -> RepositoryResult<HashMap<i32, Vec<Comment>>> {
    use crate::schema::comments;

    let rows = comments::table
        .filter(comments::hoot_id.eq_any(hoot_ids))
        .order((comments::hoot_id.asc(), comments::id.asc()))
        .select(DbComment::as_select())
        .load::<DbComment>(conn)?;

    let mut grouped: HashMap<i32, Vec<Comment>> = HashMap::new();
    for row in rows {
        let hoot_id = row.hoot_id;
        grouped.entry(hoot_id).or_default().push(row.try_into()?);
    }
    Ok(grouped)
}

fn load_hoot(conn: &mut SqliteConnection, id: HootId) -> RepositoryResult<Option<Hoot>> {
    use crate::schema::hoots;

    let Some(row) = hoots::table
        .filter(hoots::id.eq(id.get()))
        .select(DbHoot::as_select())
        .first::<DbHoot>(conn)
        .optional()?
    else {
        return Ok(None);
    };

    let comments = load_comments(conn, vec![row.id])?
        .remove(&row.id)
        .unwrap_or_default();

    Ok(Some(row.into_domain(comments)?))
}

impl HootReader for DieselRepository {
    fn list_hoots(&self) -> RepositoryResult<Vec<Hoot>> {
        use crate::schema::hoots;

        let mut conn = self.conn()?;

        let rows = hoots::table
            .order((hoots::created_at.desc(), hoots::id.desc()))
            .select(DbHoot::as_select())
            .load::<DbHoot>(&mut conn)?;

        let mut comments = load_comments(&mut conn, rows.iter().map(|h| h.id).collect())?;

        let hoots = rows
            .into_iter()
            .map(|row| {
                let hoot_comments = comments.remove(&row.id).unwrap_or_default();
                row.into_domain(hoot_comments)
            })
            .collect::<Result<Vec<Hoot>, _>>()?;

        Ok(hoots)
    }

    fn get_hoot_by_id(&self, id: HootId) -> RepositoryResult<Option<Hoot>> {
        let mut conn = self.conn()?;
        load_hoot(&mut conn, id)
    }
}

impl HootWriter for DieselRepository {
    fn create_hoot(&self, hoot: &NewHoot) -> RepositoryResult<Hoot> {
        use crate::schema::hoots;

        let mut conn = self.conn()?;

        let row = diesel::insert_into(hoots::table)
            .values(DbNewHoot::from(hoot))
            .returning(DbHoot::as_returning())
            .get_result::<DbHoot>(&mut conn)?;

        Ok(row.into_domain(Vec::new())?)
    }

    fn save_hoot(&self, hoot: &Hoot) -> RepositoryResult<Hoot> {
        use crate::schema::{comments, hoots};

        let mut conn = self.conn()?;
        let hoot_id = hoot.id.get();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let updated = diesel::update(hoots::table.filter(hoots::id.eq(hoot_id)))
                .set(HootChangeset::from(hoot))
                .execute(conn)?;
            if updated == 0 {
                return Err(RepositoryError::NotFound);
            }

            if !hoot.removed_comments().is_empty() {
                let removed: Vec<i32> = hoot.removed_comments().iter().map(|id| id.get()).collect();
                diesel::delete(
                    comments::table
                        .filter(comments::hoot_id.eq(hoot_id))
                        .filter(comments::id.eq_any(removed)),
                )
                .execute(conn)?;
            }

            for comment_id in hoot.edited_comments() {
                let Some(comment) = hoot.comment(*comment_id) else {
                    continue;
                };
                let edited = diesel::update(
                    comments::table
                        .filter(comments::id.eq(comment.id.get()))
                        .filter(comments::hoot_id.eq(hoot_id)),
                )
                .set((
                    comments::text.eq(comment.text.as_str()),
                    comments::updated_at.eq(comment.updated_at),
                ))
                .execute(conn)?;
                // Removed by another request since this hoot was loaded.
                if edited == 0 {
                    return Err(RepositoryError::NotFound);
                }
            }

            for comment in hoot.pending_comments() {
                diesel::insert_into(comments::table)
                    .values(DbNewComment::for_hoot(hoot.id, comment))
                    .execute(conn)?;
            }

            load_hoot(conn, hoot.id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_hoot(&self, id: HootId) -> RepositoryResult<usize> {
        use crate::schema::{comments, hoots};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(comments::table.filter(comments::hoot_id.eq(id.get()))).execute(conn)?;
            Ok(diesel::delete(hoots::table.filter(hoots::id.eq(id.get()))).execute(conn)?)
        })?;

        Ok(affected)
    }
}
