use thiserror::Error;

use models::errors::ModelError;

use crate::access::errors::BindingError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    #[error(transparent)]
    Binding(#[from] BindingError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn forbidden(action: &str) -> Self { Self::Forbidden(format!("not allowed to {}", action)) }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ServiceError::Db(e.to_string()) }
}

/// Turn a unique-index violation into a validation error carrying `message`.
pub(crate) fn unique_as_validation(err: ModelError, message: &str) -> ServiceError {
    match err {
        ModelError::Duplicate(_) => ServiceError::Validation(message.into()),
        other => other.into(),
    }
}

/// Like [`unique_as_validation`] for tables with several unique columns.
/// `messages` pairs a constraint name with the message reported for it.
pub(crate) fn unique_by_constraint(err: ModelError, messages: &[(&str, &str)]) -> ServiceError {
    match err {
        ModelError::Duplicate(constraint) => match messages.iter().find(|(name, _)| *name == constraint) {
            Some((_, message)) => ServiceError::Validation((*message).into()),
            None => ModelError::Duplicate(constraint).into(),
        },
        other => other.into(),
    }
}

pub(crate) fn db_unique_as_validation(err: sea_orm::DbErr, message: &str) -> ServiceError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => ServiceError::Validation(message.into()),
        _ => err.into(),
    }
}

/// Deleting a row still referenced under `ON DELETE RESTRICT`.
pub(crate) fn db_in_use_as_validation(err: sea_orm::DbErr, message: &str) -> ServiceError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => ServiceError::Validation(message.into()),
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: &[(&str, &str)] = &[("t_email_key", "email taken"), ("t_code_key", "code taken")];

    #[test]
    fn duplicate_picks_message_by_constraint() {
        let err = unique_by_constraint(ModelError::Duplicate("t_code_key".into()), MESSAGES);
        assert!(matches!(err, ServiceError::Validation(m) if m == "code taken"));
        let err = unique_by_constraint(ModelError::Duplicate("t_email_key".into()), MESSAGES);
        assert!(matches!(err, ServiceError::Validation(m) if m == "email taken"));
    }

    #[test]
    fn unknown_constraint_and_storage_errors_pass_through() {
        let err = unique_by_constraint(ModelError::Duplicate("other_key".into()), MESSAGES);
        assert!(matches!(err, ServiceError::Model(ModelError::Duplicate(c)) if c == "other_key"));
        let err = unique_as_validation(ModelError::Db("connection reset".into()), "taken");
        assert!(matches!(err, ServiceError::Model(ModelError::Db(_))));
    }
}
