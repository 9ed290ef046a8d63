use actix_web::error::{InternalError, JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};

use crate::dto::errors::{ErrorEnvelope, ErrorKind};
use crate::services::ServiceError;

pub mod comments;
pub mod health;
pub mod hoots;

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Form(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ServiceError::Forbidden(message) => ErrorEnvelope::new(ErrorKind::Forbidden, message),
            ServiceError::NotFound => ErrorEnvelope::new(ErrorKind::NotFound, "Not found"),
            ServiceError::Form(message) => ErrorEnvelope::new(ErrorKind::Validation, message),
            ServiceError::Internal => {
                ErrorEnvelope::new(ErrorKind::Internal, "Internal server error")
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest()
        .json(ErrorEnvelope::new(ErrorKind::Validation, err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Path ids that are not integers cannot name any resource.
fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response =
        HttpResponse::NotFound().json(ErrorEnvelope::new(ErrorKind::NotFound, "Not found"));
    InternalError::from_response(err, response).into()
}

/// Register every route and the JSON/path error handlers.
///
/// The caller must register `web::Data<DieselRepository>` and
/// `web::Data<JwtConfig>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(health::health)
        .service(hoots::create_hoot)
        .service(hoots::list_hoots)
        .service(hoots::show_hoot)
        .service(hoots::update_hoot)
        .service(hoots::delete_hoot)
        .service(comments::add_comment)
        .service(comments::update_comment)
        .service(comments::delete_comment);
}
