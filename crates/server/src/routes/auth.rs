use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use service::access::repo::seaorm::SeaOrmBindingRepository;
use service::access::{AccessService, Principal};
use service::auth::domain::{AuthUser, LoginInput};
use service::auth::errors::AuthError;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::service::AuthService;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: AuthService<SeaOrmAuthRepository>,
    pub access: AccessService<SeaOrmBindingRepository>,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub user: AuthUser,
    pub token: String,
}

#[derive(Serialize)]
pub struct MeOutput {
    pub user: AuthUser,
    pub principal: Principal,
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let token = session
        .token
        .ok_or_else(|| JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", Some("token generation failed".into())))?;
    let mut cookie = Cookie::new(AUTH_COOKIE, token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(LoginOutput { user: session.user, token })))
}

#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Cookie cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/auth/me", tag = "auth", responses((status = 200, description = "Current user and principal"), (status = 401, description = "Unauthorized")))]
pub async fn me(
    Extension(user): Extension<AuthUser>,
    Extension(principal): Extension<Principal>,
) -> Json<MeOutput> {
    Json(MeOutput { user, principal })
}

/// Bearer header first, then the `auth_token` cookie.
fn extract_token(req: &Request) -> Option<String> {
    if let Some(h) = req.headers().get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return h.strip_prefix("Bearer ").map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    }
    CookieJar::from_headers(req.headers())
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Resolve the request's principal once and stash it in the request extensions.
///
/// Missing, malformed or expired tokens and inactive users yield
/// `Principal::Anonymous`. The authenticated user, when there is one, is
/// inserted as well so admin routes can tell "logged in without a company"
/// from "not logged in".
pub async fn resolve_principal(State(state): State<ServerState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let user = match extract_token(&req) {
        None => None,
        Some(token) => match state.auth.user_for_token(&token).await {
            Ok(u) if u.is_active => Some(u),
            Ok(u) => {
                tracing::warn!(path = %path, user_id = %u.id, "inactive user presented a token");
                None
            }
            Err(e @ (AuthError::TokenError(_) | AuthError::Unauthorized)) => {
                tracing::warn!(path = %path, err = %e, "token rejected");
                None
            }
            Err(e) => return JsonApiError::from(e).into_response(),
        },
    };

    let identity = user.as_ref().map(AuthUser::identity);
    let principal = match state.access.resolve(identity.as_ref()).await {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(path = %path, err = %e, "binding lookup failed");
            return JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Error", None).into_response();
        }
    };
    tracing::debug!(path = %path, principal = ?principal, "principal resolved");

    req.extensions_mut().insert(principal);
    if let Some(u) = user {
        req.extensions_mut().insert(u);
    }
    next.run(req).await
}

/// Admin routes need an authenticated, active user.
pub async fn require_authenticated(req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthUser>().is_none() {
        return JsonApiError::unauthorized().into_response();
    }
    next.run(req).await
}
