use sea_orm::SqlErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Unique constraint violation, carrying the constraint name.
    #[error("duplicate value for {0}")]
    Duplicate(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ModelError::Duplicate(constraint_name(&detail).to_string()),
            _ => ModelError::Db(e.to_string()),
        }
    }
}

/// Postgres reports `duplicate key value violates unique constraint "<name>"`.
pub fn constraint_name(detail: &str) -> &str {
    detail.split('"').nth(1).unwrap_or(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_name_is_taken_from_quotes() {
        let detail = r#"duplicate key value violates unique constraint "partner_application_national_id_key""#;
        assert_eq!(constraint_name(detail), "partner_application_national_id_key");
        assert_eq!(constraint_name("no quotes"), "no quotes");
    }
}
