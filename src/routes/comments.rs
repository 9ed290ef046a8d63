use actix_web::{HttpResponse, delete, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::comments::{CommentForm, CommentFormPayload};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::comments::{
    add_comment as add_comment_service, delete_comment as delete_comment_service,
    update_comment as update_comment_service,
};

#[post("/hoots/{hoot_id}/comments")]
pub async fn add_comment(
    user: AuthenticatedUser,
    hoot_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CommentForm>,
) -> Result<HttpResponse, ServiceError> {
    let payload: CommentFormPayload = form.try_into()?;
    let comment = add_comment_service(hoot_id.into_inner(), payload, &user, repo.get_ref())?;
    Ok(HttpResponse::Created().json(comment))
}

#[put("/hoots/{hoot_id}/comments/{comment_id}")]
pub async fn update_comment(
    user: AuthenticatedUser,
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CommentForm>,
) -> Result<HttpResponse, ServiceError> {
    let (hoot_id, comment_id) = path.into_inner();
    let payload: CommentFormPayload = form.try_into()?;
    let message = update_comment_service(hoot_id, comment_id, payload, &user, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(message))
}

#[delete("/hoots/{hoot_id}/comments/{comment_id}")]
pub async fn delete_comment(
    user: AuthenticatedUser,
    path: web::Path<(i32, i32)>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let (hoot_id, comment_id) = path.into_inner();
    let message = delete_comment_service(hoot_id, comment_id, &user, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(message))
}
