use std::fmt;

use thiserror::Error;

/// Which side of the user/company assignment already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSide {
    User,
    Company,
}

impl fmt::Display for BindingSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingSide::User => f.write_str("this user is already assigned to a company"),
            BindingSide::Company => f.write_str("this company is already assigned to a user"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("{0}")]
    Duplicate(BindingSide),
    #[error("unknown user or company: {0}")]
    UnknownTarget(String),
    #[error("binding not found")]
    NotFound,
    #[error("repository error: {0}")]
    Repository(String),
}
