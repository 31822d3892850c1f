use models::errors::ModelError;
use thiserror::Error;

/// Failures of login, account creation and token checks.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("username is already taken")]
    Conflict,
    #[error("account not found")]
    NotFound,
    #[error("invalid username or password")]
    Unauthorized,
    #[error("password hashing failed: {0}")]
    HashError(String),
    #[error("token rejected: {0}")]
    TokenError(String),
    #[error("account storage error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code, logged alongside storage and hashing failures.
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

/// `app_user.username` is the only unique column, so any duplicate is a username clash.
impl From<ModelError> for AuthError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => AuthError::Validation(m),
            ModelError::Duplicate(_) => AuthError::Conflict,
            ModelError::Db(m) => AuthError::Repository(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_keep_their_class() {
        assert!(matches!(AuthError::from(ModelError::Validation("bad username".into())), AuthError::Validation(_)));
        assert!(matches!(AuthError::from(ModelError::Duplicate("app_user_username_key".into())), AuthError::Conflict));
        let storage = AuthError::from(ModelError::Db("connection refused".into()));
        assert!(matches!(storage, AuthError::Repository(_)));
        assert_eq!(storage.code(), 1200);
    }
}
