use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CommentId, CommentText, HootCategory, HootId, HootText, HootTitle, UserId,
};

/// A post together with the comments it owns.
///
/// `Hoot` is the aggregate root: comments are only created, edited or removed
/// through the methods below and reach the store when the whole hoot is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hoot {
    pub id: HootId,
    pub title: HootTitle,
    pub text: HootText,
    pub category: HootCategory,
    pub author: UserId,
    /// Comments in insertion order.
    pub comments: Vec<Comment>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(skip)]
    pub(crate) pending_comments: Vec<NewComment>,
    #[serde(skip)]
    pub(crate) edited_comments: Vec<CommentId>,
    #[serde(skip)]
    pub(crate) removed_comments: Vec<CommentId>,
}

/// A comment embedded in a [`Hoot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub text: CommentText,
    pub author: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Hoot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHoot {
    pub title: HootTitle,
    pub text: HootText,
    pub category: HootCategory,
    pub author: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A comment that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub text: CommentText,
    pub author: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of the hoot-level fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HootChanges {
    pub title: Option<HootTitle>,
    pub text: Option<HootText>,
    pub category: Option<HootCategory>,
}

impl Hoot {
    /// Rebuild an aggregate from stored state with no pending changes.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: HootId,
        title: HootTitle,
        text: HootText,
        category: HootCategory,
        author: UserId,
        comments: Vec<Comment>,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title,
            text,
            category,
            author,
            comments,
            created_at,
            updated_at,
            pending_comments: Vec::new(),
            edited_comments: Vec::new(),
            removed_comments: Vec::new(),
        }
    }

    /// Apply a partial update. The author is never part of the change set.
    pub fn apply(&mut self, changes: HootChanges, now: NaiveDateTime) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(text) = changes.text {
            self.text = text;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        self.updated_at = now;
    }

    /// Queue a comment for insertion at the end of the sequence.
    pub fn add_comment(&mut self, comment: NewComment) {
        self.updated_at = comment.created_at;
        self.pending_comments.push(comment);
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Replace a comment's text in place, keeping its id, author and position.
    pub fn edit_comment(
        &mut self,
        id: CommentId,
        text: CommentText,
        now: NaiveDateTime,
    ) -> Option<&Comment> {
        let comment = self.comments.iter_mut().find(|c| c.id == id)?;
        comment.text = text;
        comment.updated_at = now;
        if !self.edited_comments.contains(&id) {
            self.edited_comments.push(id);
        }
        self.updated_at = now;
        self.comment(id)
    }

    /// Detach a comment; it is deleted from the store on the next save.
    pub fn remove_comment(&mut self, id: CommentId, now: NaiveDateTime) -> Option<Comment> {
        let index = self.comments.iter().position(|c| c.id == id)?;
        let removed = self.comments.remove(index);
        self.edited_comments.retain(|edited| *edited != id);
        self.removed_comments.push(removed.id);
        self.updated_at = now;
        Some(removed)
    }

    /// Comments queued by [`Hoot::add_comment`] since the aggregate was loaded.
    pub fn pending_comments(&self) -> &[NewComment] {
        &self.pending_comments
    }

    /// Ids changed by [`Hoot::edit_comment`] since the aggregate was loaded.
    pub fn edited_comments(&self) -> &[CommentId] {
        &self.edited_comments
    }

    /// Ids removed by [`Hoot::remove_comment`] since the aggregate was loaded.
    pub fn removed_comments(&self) -> &[CommentId] {
        &self.removed_comments
    }
}
