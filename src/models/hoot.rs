use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::hoot::{Comment, Hoot as DomainHoot, NewHoot as DomainNewHoot};
use crate::domain::types::{HootCategory, HootText, HootTitle, TypeConstraintError};

/// Diesel model representing the `hoots` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::hoots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Hoot {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub category: String,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Hoot`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::hoots)]
pub struct NewHoot<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub category: &'a str,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Hoot-level columns written when the aggregate is saved.
///
/// `author_id` and `created_at` are never written after insert.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::hoots)]
pub struct HootChangeset<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub category: &'a str,
    pub updated_at: NaiveDateTime,
}

impl Hoot {
    /// Convert the row into a domain aggregate owning `comments`.
    pub fn into_domain(self, comments: Vec<Comment>) -> Result<DomainHoot, TypeConstraintError> {
        Ok(DomainHoot::restore(
            self.id.try_into()?,
            HootTitle::new(self.title)?,
            HootText::new(self.text)?,
            HootCategory::try_from(self.category.as_str())?,
            self.author_id.try_into()?,
            comments,
            self.created_at,
            self.updated_at,
        ))
    }
}

impl<'a> From<&'a DomainNewHoot> for NewHoot<'a> {
    fn from(hoot: &'a DomainNewHoot) -> Self {
        Self {
            title: hoot.title.as_str(),
            text: hoot.text.as_str(),
            category: hoot.category.as_str(),
            author_id: hoot.author.get(),
            created_at: hoot.created_at,
            updated_at: hoot.updated_at,
        }
    }
}

impl<'a> From<&'a DomainHoot> for HootChangeset<'a> {
    fn from(hoot: &'a DomainHoot) -> Self {
        Self {
            title: hoot.title.as_str(),
            text: hoot.text.as_str(),
            category: hoot.category.as_str(),
            updated_at: hoot.updated_at,
        }
    }
}
