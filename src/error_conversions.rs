//! Error conversion glue between layers.
//!
//! Form errors are rendered as validation failures; the conversions into
//! [`ServiceError`] live here so forms stay free of service types.

use crate::forms::comments::CommentFormError;
use crate::forms::hoots::{CreateHootFormError, UpdateHootFormError};
use crate::services::errors::ServiceError;

impl From<CreateHootFormError> for ServiceError {
    fn from(val: CreateHootFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<UpdateHootFormError> for ServiceError {
    fn from(val: UpdateHootFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CommentFormError> for ServiceError {
    fn from(val: CommentFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
