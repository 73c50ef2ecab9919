//! Argument checks shared by the resolvers
//!
//! Everything here runs before the store is touched.

use crate::errors::ValidationError;

pub const MIN_TITLE_LENGTH: usize = 1;
pub const MAX_TITLE_LENGTH: usize = 500;

/// An optional argument that may be omitted, explicitly null, or given
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Omitted,
    Null,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Self::Omitted)
    }
}

pub fn validate_id(id: i32) -> Result<i32, ValidationError> {
    if id < 1 {
        return Err(ValidationError::InvalidId);
    }
    Ok(id)
}

/// Trim `title` and check its length in characters
pub fn sanitize_title(title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    let length = trimmed.chars().count();

    if length < MIN_TITLE_LENGTH {
        return Err(ValidationError::TitleTooShort);
    }
    if length > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(trimmed.to_string())
}

/// `Ok(None)` when omitted; an explicit null is rejected
pub fn sanitize_title_update(title: FieldUpdate<String>) -> Result<Option<String>, ValidationError> {
    match title {
        FieldUpdate::Omitted => Ok(None),
        FieldUpdate::Null => Err(ValidationError::TitleRequired),
        FieldUpdate::Set(title) => sanitize_title(&title).map(Some),
    }
}

pub fn validate_completed_update(completed: FieldUpdate<bool>) -> Result<Option<bool>, ValidationError> {
    match completed {
        FieldUpdate::Omitted => Ok(None),
        FieldUpdate::Null => Err(ValidationError::CompletedNotBoolean),
        FieldUpdate::Set(completed) => Ok(Some(completed)),
    }
}
