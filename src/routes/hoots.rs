use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::hoots::{
    CreateHootForm, CreateHootFormPayload, UpdateHootForm, UpdateHootFormPayload,
};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::hoots::{
    create_hoot as create_hoot_service, delete_hoot as delete_hoot_service,
    list_hoots as list_hoots_service, show_hoot as show_hoot_service,
    update_hoot as update_hoot_service,
};

#[post("/hoots")]
pub async fn create_hoot(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateHootForm>,
) -> Result<HttpResponse, ServiceError> {
    let payload: CreateHootFormPayload = form.try_into()?;
    let hoot = create_hoot_service(payload, &user, repo.get_ref())?;
    Ok(HttpResponse::Created().json(hoot))
}

#[get("/hoots")]
pub async fn list_hoots(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let hoots = list_hoots_service(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(hoots))
}

#[get("/hoots/{hoot_id}")]
pub async fn show_hoot(
    _user: AuthenticatedUser,
    hoot_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let hoot = show_hoot_service(hoot_id.into_inner(), repo.get_ref())?;
    Ok(HttpResponse::Ok().json(hoot))
}

#[put("/hoots/{hoot_id}")]
pub async fn update_hoot(
    user: AuthenticatedUser,
    hoot_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateHootForm>,
) -> Result<HttpResponse, ServiceError> {
    let payload: UpdateHootFormPayload = form.try_into()?;
    let hoot = update_hoot_service(hoot_id.into_inner(), payload, &user, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(hoot))
}

#[delete("/hoots/{hoot_id}")]
pub async fn delete_hoot(
    user: AuthenticatedUser,
    hoot_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let hoot = delete_hoot_service(hoot_id.into_inner(), &user, repo.get_ref())?;
    Ok(HttpResponse::Ok().json(hoot))
}
