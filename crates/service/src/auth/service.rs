use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub password_algorithm: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, password_algorithm: "argon2".into(), token_ttl_hours: 12 }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> Clone for AuthService<R> {
    fn clone(&self) -> Self { Self { repo: self.repo.clone(), cfg: self.cfg.clone() } }
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    pub fn repository(&self) -> &R { &self.repo }

    /// Create an account with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { username: "ana".into(), email: "ana@example.com".into(), password: "Secret123".into(), is_staff: false, is_superuser: false };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "ana");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_user_by_username(&input.username).await? {
            debug!("user exists: {}", existing.username);
            return Err(AuthError::Conflict);
        }

        let hash = self.hash_password(&input.password)?;
        let user = self.repo.create_user(&input, hash, self.cfg.password_algorithm.clone()).await?;
        info!(user_id = %user.id, username = %user.username, superuser = user.is_superuser, "user_registered");
        Ok(user)
    }

    /// Replace a user's password.
    #[instrument(skip(self, password))]
    pub async fn set_password(&self, user_id: uuid::Uuid, password: &str) -> Result<(), AuthError> {
        if password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        self.repo.find_user_by_id(user_id).await?.ok_or(AuthError::NotFound)?;
        let hash = self.hash_password(password)?;
        self.repo.upsert_password(user_id, hash, self.cfg.password_algorithm.clone()).await?;
        Ok(())
    }

    /// Authenticate a user and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let cfg = AuthConfig { jwt_secret: Some("secret-key".into()), ..AuthConfig::default() };
    /// let svc = AuthService::new(repo.clone(), cfg);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "u".into(), email: "u@e.com".into(), password: "Passw0rd".into(), is_staff: false, is_superuser: false }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.repo
            .find_user_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;
        if !user.is_active {
            return Err(AuthError::Unauthorized);
        }

        let cred = self.repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let token = match &self.cfg.jwt_secret {
            Some(secret) => Some(self.issue_token(&user, secret)?),
            None => None,
        };
        info!(user_id = %user.id, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    /// Decode and validate a token issued by [`AuthService::login`].
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let secret = self.cfg.jwt_secret.as_deref().ok_or_else(|| AuthError::TokenError("jwt secret not configured".into()))?;
        let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok(data.claims)
    }

    /// Load the user a verified token refers to.
    pub async fn user_for_token(&self, token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.verify_token(token)?;
        self.repo.find_user_by_id(claims.uid).await?.ok_or(AuthError::Unauthorized)
    }

    fn issue_token(&self, user: &AuthUser, secret: &str) -> Result<String, AuthError> {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims { sub: user.username.clone(), uid: user.id, exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> AuthService<MockAuthRepository> {
        let cfg = AuthConfig { jwt_secret: Some("unit-test-secret".into()), ..AuthConfig::default() };
        AuthService::new(Arc::new(MockAuthRepository::default()), cfg)
    }

    fn register_input(username: &str) -> RegisterInput {
        RegisterInput { username: username.into(), email: format!("{username}@example.com"), password: "Passw0rd!".into(), is_staff: false, is_superuser: false }
    }

    #[tokio::test]
    async fn token_round_trips_to_user() {
        let svc = svc();
        let user = svc.register(register_input("owner")).await.unwrap();
        let session = svc.login(LoginInput { username: "owner".into(), password: "Passw0rd!".into() }).await.unwrap();
        let token = session.token.unwrap();
        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.uid, user.id);
        assert_eq!(svc.user_for_token(&token).await.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn wrong_password_and_inactive_users_are_rejected() {
        let svc = svc();
        svc.register(register_input("ana")).await.unwrap();
        let bad = svc.login(LoginInput { username: "ana".into(), password: "nope-nope".into() }).await;
        assert!(matches!(bad, Err(AuthError::Unauthorized)));

        svc.repository().set_active("ana", false);
        let inactive = svc.login(LoginInput { username: "ana".into(), password: "Passw0rd!".into() }).await;
        assert!(matches!(inactive, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let svc = svc();
        svc.register(register_input("dup")).await.unwrap();
        let err = svc.register(register_input("dup")).await.unwrap_err();
        assert_eq!(err.code(), 1002);
    }

    #[test]
    fn tampered_token_fails() {
        let svc = svc();
        assert!(matches!(svc.verify_token("not.a.token"), Err(AuthError::TokenError(_))));
    }

    #[tokio::test]
    async fn superuser_flag_implies_staff() {
        let svc = svc();
        let mut input = register_input("root");
        input.is_superuser = true;
        let user = svc.register(input).await.unwrap();
        assert!(user.is_staff);
        assert!(user.identity().is_superuser);
    }
}
