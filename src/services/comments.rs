use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::domain::policy::ensure_author;
use crate::domain::types::CommentId;
use crate::dto::errors::MessageDto;
use crate::dto::hoots::{AuthorDto, CommentDto};
use crate::forms::comments::CommentFormPayload;
use crate::repository::{HootReader, HootWriter};
use crate::services::hoots::{load_hoot, write_error};

use super::{ServiceError, ServiceResult};

pub const NOT_COMMENT_AUTHOR_EDIT_MESSAGE: &str = "You are not authorized to edit this comment";
pub const NOT_COMMENT_AUTHOR_DELETE_MESSAGE: &str =
    "You are not authorized to delete this comment";
pub const COMMENT_UPDATED_MESSAGE: &str = "Comment updated successfully";
pub const COMMENT_DELETED_MESSAGE: &str = "Comment deleted successfully";

fn parse_comment_id(comment_id: i32) -> ServiceResult<CommentId> {
    CommentId::new(comment_id).map_err(|_| ServiceError::NotFound)
}

/// Append a comment by `user` to the end of a hoot's comment list.
pub fn add_comment<R>(
    hoot_id: i32,
    payload: CommentFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CommentDto>
where
    R: HootReader + HootWriter,
{
    let mut hoot = load_hoot(hoot_id, repo)?;
    let known: Vec<CommentId> = hoot.comments.iter().map(|c| c.id).collect();

    hoot.add_comment(payload.into_new_comment(user.id));
    let saved = repo.save_hoot(&hoot).map_err(write_error("add comment"))?;

    let created = saved
        .comments
        .into_iter()
        .rev()
        .find(|c| c.author == user.id && !known.contains(&c.id));

    match created {
        Some(comment) => Ok(CommentDto::new(comment, AuthorDto::from(user))),
        None => {
            log::error!("Saved hoot {} does not contain the new comment", hoot.id);
            Err(ServiceError::Internal)
        }
    }
}

/// Replace the text of a comment written by `user`.
pub fn update_comment<R>(
    hoot_id: i32,
    comment_id: i32,
    payload: CommentFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<MessageDto>
where
    R: HootReader + HootWriter,
{
    let mut hoot = load_hoot(hoot_id, repo)?;
    let comment_id = parse_comment_id(comment_id)?;

    let comment = hoot.comment(comment_id).ok_or(ServiceError::NotFound)?;
    if let Err(violation) = ensure_author(user.id, comment) {
        log::warn!("Refused edit of comment {comment_id}: {violation}");
        return Err(ServiceError::Forbidden(
            NOT_COMMENT_AUTHOR_EDIT_MESSAGE.to_string(),
        ));
    }

    hoot.edit_comment(comment_id, payload.text, Utc::now().naive_utc());
    repo.save_hoot(&hoot).map_err(write_error("update comment"))?;

    Ok(MessageDto::new(COMMENT_UPDATED_MESSAGE))
}

/// Remove a comment written by `user` from its hoot.
pub fn delete_comment<R>(
    hoot_id: i32,
    comment_id: i32,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<MessageDto>
where
    R: HootReader + HootWriter,
{
    let mut hoot = load_hoot(hoot_id, repo)?;
    let comment_id = parse_comment_id(comment_id)?;

    let comment = hoot.comment(comment_id).ok_or(ServiceError::NotFound)?;
    if let Err(violation) = ensure_author(user.id, comment) {
        log::warn!("Refused delete of comment {comment_id}: {violation}");
        return Err(ServiceError::Forbidden(
            NOT_COMMENT_AUTHOR_DELETE_MESSAGE.to_string(),
        ));
    }

    hoot.remove_comment(comment_id, Utc::now().naive_utc());
    repo.save_hoot(&hoot).map_err(write_error("delete comment"))?;

    Ok(MessageDto::new(COMMENT_DELETED_MESSAGE))
}
