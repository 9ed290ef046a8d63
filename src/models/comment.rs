use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::hoot::{Comment as DomainComment, NewComment as DomainNewComment};
use crate::domain::types::{CommentText, HootId, TypeConstraintError};

/// Diesel model representing the `comments` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Comment {
    pub id: i32,
    pub hoot_id: i32,
    pub text: String,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Comment`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::comments)]
pub struct NewComment<'a> {
    pub hoot_id: i32,
    pub text: &'a str,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Comment> for DomainComment {
    type Error = TypeConstraintError;

    fn try_from(comment: Comment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: comment.id.try_into()?,
            text: CommentText::new(comment.text)?,
            author: comment.author_id.try_into()?,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }
}

impl<'a> NewComment<'a> {
    pub fn for_hoot(hoot_id: HootId, comment: &'a DomainNewComment) -> Self {
        Self {
            hoot_id: hoot_id.get(),
            text: comment.text.as_str(),
            author_id: comment.author.get(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
