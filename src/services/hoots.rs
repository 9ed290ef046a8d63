use std::collections::{BTreeSet, HashMap};
use std::iter;

use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::domain::hoot::Hoot;
use crate::domain::policy::ensure_author;
use crate::domain::types::{HootId, UserId};
use crate::dto::hoots::{AuthorDto, HootDto};
use crate::forms::hoots::{CreateHootFormPayload, UpdateHootFormPayload};
use crate::repository::{HootReader, HootWriter, RepositoryError, UserReader};

use super::{ServiceError, ServiceResult};

/// Returned when someone other than the author edits or deletes a hoot.
pub const NOT_HOOT_AUTHOR_MESSAGE: &str = "You're not allowed to do that!";

/// Load a hoot by its raw path id.
///
/// Ids that cannot name a hoot (zero, negative) are reported as not found,
/// the same as ids that simply do not exist.
pub(crate) fn load_hoot<R>(hoot_id: i32, repo: &R) -> ServiceResult<Hoot>
where
    R: HootReader,
{
    let hoot_id = match HootId::new(hoot_id) {
        Ok(hoot_id) => hoot_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_hoot_by_id(hoot_id) {
        Ok(Some(hoot)) => Ok(hoot),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get hoot {hoot_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Map a failed aggregate write. A hoot deleted between load and save is a 404.
pub(crate) fn write_error(action: &'static str) -> impl Fn(RepositoryError) -> ServiceError {
    move |e| match e {
        RepositoryError::NotFound => ServiceError::NotFound,
        e => {
            log::error!("Failed to {action}: {e}");
            ServiceError::Internal
        }
    }
}

/// Expand every author id referenced by `hoots` into an [`AuthorDto`].
///
/// The acting user, when given, is rendered from the token rather than from
/// the account record.
fn author_directory<R>(
    hoots: &[Hoot],
    principal: Option<&AuthenticatedUser>,
    repo: &R,
) -> ServiceResult<HashMap<UserId, AuthorDto>>
where
    R: UserReader,
{
    let ids: BTreeSet<UserId> = hoots
        .iter()
        .flat_map(|h| iter::once(h.author).chain(h.comments.iter().map(|c| c.author)))
        .collect();
    let ids: Vec<UserId> = ids.into_iter().collect();

    let users = match repo.list_users_by_ids(&ids) {
        Ok(users) => users,
        Err(e) => {
            log::error!("Failed to resolve authors: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let mut directory: HashMap<UserId, AuthorDto> =
        users.iter().map(|u| (u.id, AuthorDto::from(u))).collect();
    if let Some(principal) = principal {
        directory.insert(principal.id, AuthorDto::from(principal));
    }
    Ok(directory)
}

fn render(hoot: Hoot, directory: &HashMap<UserId, AuthorDto>) -> HootDto {
    HootDto::new(hoot, |id| {
        directory
            .get(&id)
            .cloned()
            .unwrap_or_else(|| AuthorDto::reference(id))
    })
}

fn render_hoots<R>(hoots: Vec<Hoot>, repo: &R) -> ServiceResult<Vec<HootDto>>
where
    R: UserReader,
{
    let directory = author_directory(&hoots, None, repo)?;
    Ok(hoots.into_iter().map(|h| render(h, &directory)).collect())
}

fn render_hoot<R>(hoot: Hoot, repo: &R) -> ServiceResult<HootDto>
where
    R: UserReader,
{
    let directory = author_directory(std::slice::from_ref(&hoot), None, repo)?;
    Ok(render(hoot, &directory))
}

/// Create a hoot authored by `user`.
///
/// The author is always the caller; the response embeds the caller's full
/// profile as the author.
pub fn create_hoot<R>(
    payload: CreateHootFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<HootDto>
where
    R: HootWriter,
{
    let new_hoot = payload.into_new_hoot(user.id);

    match repo.create_hoot(&new_hoot) {
        Ok(hoot) => Ok(HootDto::new(hoot, |id| {
            if id == user.id {
                AuthorDto::from(user)
            } else {
                AuthorDto::reference(id)
            }
        })),
        Err(e) => {
            log::error!("Failed to create hoot: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List every hoot, newest first, with authors resolved.
pub fn list_hoots<R>(repo: &R) -> ServiceResult<Vec<HootDto>>
where
    R: HootReader + UserReader,
{
    let hoots = match repo.list_hoots() {
        Ok(hoots) => hoots,
        Err(e) => {
            log::error!("Failed to list hoots: {e}");
            return Err(ServiceError::Internal);
        }
    };

    render_hoots(hoots, repo)
}

/// Show a single hoot with its author and comment authors resolved.
pub fn show_hoot<R>(hoot_id: i32, repo: &R) -> ServiceResult<HootDto>
where
    R: HootReader + UserReader,
{
    let hoot = load_hoot(hoot_id, repo)?;
    render_hoot(hoot, repo)
}

/// Apply a partial update to a hoot owned by `user`.
pub fn update_hoot<R>(
    hoot_id: i32,
    payload: UpdateHootFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<HootDto>
where
    R: HootReader + HootWriter + UserReader,
{
    let mut hoot = load_hoot(hoot_id, repo)?;

    if let Err(violation) = ensure_author(user.id, &hoot) {
        log::warn!("Refused update of hoot {}: {violation}", hoot.id);
        return Err(ServiceError::Forbidden(NOT_HOOT_AUTHOR_MESSAGE.to_string()));
    }

    // Resolve authors before writing; a failed lookup must not follow a commit.
    let directory = author_directory(std::slice::from_ref(&hoot), Some(user), repo)?;

    hoot.apply(payload.changes, Utc::now().naive_utc());
    let saved = repo.save_hoot(&hoot).map_err(write_error("update hoot"))?;

    Ok(render(saved, &directory))
}

/// Delete a hoot owned by `user`, returning what was deleted.
pub fn delete_hoot<R>(hoot_id: i32, user: &AuthenticatedUser, repo: &R) -> ServiceResult<HootDto>
where
    R: HootReader + HootWriter + UserReader,
{
    let hoot = load_hoot(hoot_id, repo)?;

    if let Err(violation) = ensure_author(user.id, &hoot) {
        log::warn!("Refused delete of hoot {}: {violation}", hoot.id);
        return Err(ServiceError::Forbidden(NOT_HOOT_AUTHOR_MESSAGE.to_string()));
    }

    let hoot_id = hoot.id;
    let deleted = render_hoot(hoot, repo)?;

    match repo.delete_hoot(hoot_id) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(deleted),
        Err(e) => {
            log::error!("Failed to delete hoot {hoot_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
