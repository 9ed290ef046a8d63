use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::hoot::{HootChanges, NewHoot};
use crate::domain::types::{HootCategory, HootText, HootTitle, TypeConstraintError, UserId};

/// JSON body of `POST /hoots`.
///
/// There is no `author` field: any such key in the request is ignored and the
/// author is always taken from the token.
#[derive(Deserialize, Validate)]
pub struct CreateHootForm {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 1))]
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateHootFormPayload {
    pub title: HootTitle,
    pub text: HootText,
    pub category: HootCategory,
}

impl CreateHootFormPayload {
    pub fn into_new_hoot(self, author: UserId) -> NewHoot {
        let now = Utc::now().naive_utc();
        NewHoot {
            title: self.title,
            text: self.text,
            category: self.category,
            author,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateHootFormError {
    #[error("Create hoot form validation failed: {0}")]
    Validation(String),
    #[error("Create hoot form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CreateHootFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CreateHootFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateHootForm> for CreateHootFormPayload {
    type Error = CreateHootFormError;

    fn try_from(value: CreateHootForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            title: HootTitle::new(value.title)?,
            text: HootText::new(value.text)?,
            category: HootCategory::try_from(value.category)?,
        })
    }
}

/// JSON body of `PUT /hoots/{hoot_id}`. Absent fields are left unchanged.
#[derive(Deserialize, Validate, Default)]
pub struct UpdateHootForm {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHootFormPayload {
    pub changes: HootChanges,
}

#[derive(Debug, Error)]
pub enum UpdateHootFormError {
    #[error("Update hoot form validation failed: {0}")]
    Validation(String),
    #[error("Update hoot form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateHootFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateHootFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateHootForm> for UpdateHootFormPayload {
    type Error = UpdateHootFormError;

    fn try_from(value: UpdateHootForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            changes: HootChanges {
                title: value.title.map(HootTitle::new).transpose()?,
                text: value.text.map(HootText::new).transpose()?,
                category: value.category.map(HootCategory::try_from).transpose()?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form(title: &str, text: &str, category: &str) -> CreateHootForm {
        CreateHootForm {
            title: title.to_string(),
            text: text.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn create_payload_trims_and_parses_category() {
        let payload: CreateHootFormPayload =
            create_form(" t ", "x", "Music").try_into().unwrap();
        assert_eq!(payload.title, "t");
        assert_eq!(payload.category, HootCategory::Music);
    }

    #[test]
    fn create_rejects_empty_title() {
        let err = CreateHootFormPayload::try_from(create_form("", "x", "News")).unwrap_err();
        assert!(matches!(err, CreateHootFormError::Validation(_)));
    }

    #[test]
    fn create_rejects_whitespace_text() {
        let err = CreateHootFormPayload::try_from(create_form("t", "   ", "News")).unwrap_err();
        assert!(matches!(err, CreateHootFormError::TypeConstraint(_)));
    }

    #[test]
    fn create_rejects_unknown_category() {
        let err = CreateHootFormPayload::try_from(create_form("t", "x", "Cooking")).unwrap_err();
        assert!(err.to_string().contains("Cooking"));
    }

    #[test]
    fn new_hoot_takes_author_from_caller() {
        let payload: CreateHootFormPayload = create_form("t", "x", "News").try_into().unwrap();
        let hoot = payload.into_new_hoot(UserId::new(5).unwrap());
        assert_eq!(hoot.author, 5);
        assert_eq!(hoot.created_at, hoot.updated_at);
    }

    #[test]
    fn update_keeps_absent_fields_empty() {
        let form = UpdateHootForm {
            title: Some("t2".to_string()),
            ..UpdateHootForm::default()
        };
        let payload: UpdateHootFormPayload = form.try_into().unwrap();
        assert_eq!(payload.changes.title.unwrap(), "t2");
        assert!(payload.changes.text.is_none());
        assert!(payload.changes.category.is_none());
    }

    #[test]
    fn update_rejects_bad_category() {
        let form = UpdateHootForm {
            category: Some("news".to_string()),
            ..UpdateHootForm::default()
        };
        let err = UpdateHootFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, UpdateHootFormError::TypeConstraint(_)));
    }
}
