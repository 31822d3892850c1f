use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use models::errors::ModelError;
use service::access::errors::BindingError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;

/// Error body: `{"error": <title>, "detail": <message?>}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, error: title.to_string(), detail }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("authentication required".into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let detail = Some(e.to_string());
        match &e {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) | ServiceError::Model(ModelError::Duplicate(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", detail)
            }
            ServiceError::Binding(BindingError::Duplicate(_)) | ServiceError::Binding(BindingError::UnknownTarget(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", detail)
            }
            ServiceError::Forbidden(_) => Self::new(StatusCode::FORBIDDEN, "Forbidden", detail),
            ServiceError::NotFound(_) | ServiceError::Binding(BindingError::NotFound) => {
                Self::new(StatusCode::NOT_FOUND, "Not Found", detail)
            }
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) | ServiceError::Binding(BindingError::Repository(_)) => {
                error!(err = %e, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", None)
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let detail = Some(e.to_string());
        match e {
            AuthError::Validation(_) | AuthError::Conflict => Self::new(StatusCode::BAD_REQUEST, "Validation Error", detail),
            AuthError::Unauthorized | AuthError::TokenError(_) => Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail),
            AuthError::NotFound => Self::new(StatusCode::NOT_FOUND, "Not Found", detail),
            AuthError::HashError(_) | AuthError::Repository(_) => {
                error!(code = e.code(), err = %e, "auth failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", None)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::access::errors::BindingSide;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Binding(BindingError::Duplicate(BindingSide::Company)), StatusCode::BAD_REQUEST),
            (ServiceError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Model(ModelError::Validation("bad".into())), StatusCode::BAD_REQUEST),
            (ServiceError::Model(ModelError::Duplicate("company_ruc_key".into())), StatusCode::BAD_REQUEST),
            (ServiceError::Model(ModelError::Db("reset".into())), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let err = JsonApiError::from(ServiceError::Db("password=secret".into()));
        assert!(err.detail.is_none());
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["error"], "Internal Error");
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn duplicate_binding_names_the_side() {
        let err = JsonApiError::from(ServiceError::Binding(BindingError::Duplicate(BindingSide::User)));
        assert_eq!(err.detail.as_deref(), Some("this user is already assigned to a company"));
    }
}
