use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::AuthenticatedUser;
use crate::domain::hoot::{Comment, Hoot};
use crate::domain::types::{HootCategory, UserId};
use crate::domain::user::User;

/// Author reference expanded to whatever profile data is known.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthorDto {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Extra profile fields carried by the token, echoed verbatim.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl AuthorDto {
    /// Bare reference used when no account record is available.
    pub fn reference(id: UserId) -> Self {
        Self {
            id: id.get(),
            username: None,
            profile: Map::new(),
        }
    }
}

impl From<&User> for AuthorDto {
    fn from(value: &User) -> Self {
        Self {
            id: value.id.get(),
            username: Some(value.username.as_str().to_string()),
            profile: Map::new(),
        }
    }
}

impl From<&AuthenticatedUser> for AuthorDto {
    fn from(value: &AuthenticatedUser) -> Self {
        Self {
            id: value.id.get(),
            username: value.username.clone(),
            profile: value.profile.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    pub text: String,
    pub author: AuthorDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentDto {
    pub fn new(comment: Comment, author: AuthorDto) -> Self {
        Self {
            id: comment.id.get(),
            text: comment.text.into_inner(),
            author,
            created_at: comment.created_at.and_utc(),
            updated_at: comment.updated_at.and_utc(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HootDto {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub category: HootCategory,
    pub author: AuthorDto,
    pub comments: Vec<CommentDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HootDto {
    /// Build the response for `hoot`, expanding every author id with `author_of`.
    pub fn new<F>(hoot: Hoot, author_of: F) -> Self
    where
        F: Fn(UserId) -> AuthorDto,
    {
        let comments = hoot
            .comments
            .into_iter()
            .map(|comment| {
                let author = author_of(comment.author);
                CommentDto::new(comment, author)
            })
            .collect();

        Self {
            id: hoot.id.get(),
            title: hoot.title.into_inner(),
            text: hoot.text.into_inner(),
            category: hoot.category,
            author: author_of(hoot.author),
            comments,
            created_at: hoot.created_at.and_utc(),
            updated_at: hoot.updated_at.and_utc(),
        }
    }
}
