use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials, RegisterInput};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    /// Store the account and its password hash together; neither is kept if the other fails.
    async fn create_user(&self, input: &RegisterInput, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>, // key: username
        creds: Mutex<HashMap<Uuid, Credentials>>, // key: user_id
    }

    impl MockAuthRepository {
        /// Flip `is_active` for an existing user.
        pub fn set_active(&self, username: &str, active: bool) {
            if let Ok(mut users) = self.users.lock() {
                if let Some(u) = users.get_mut(username) {
                    u.is_active = active;
                }
            }
        }
    }

    fn poisoned<T>(e: std::sync::PoisonError<T>) -> AuthError { AuthError::Repository(e.to_string()) }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().map_err(poisoned)?;
            Ok(users.get(username).cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().map_err(poisoned)?;
            Ok(users.values().find(|u| u.id == id).cloned())
        }

        async fn create_user(&self, input: &RegisterInput, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().map_err(poisoned)?;
            let mut creds = self.creds.lock().map_err(poisoned)?;
            if users.contains_key(&input.username) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: Uuid::new_v4(),
                username: input.username.clone(),
                email: input.email.clone(),
                is_active: true,
                is_staff: input.is_staff || input.is_superuser,
                is_superuser: input.is_superuser,
            };
            creds.insert(user.id, Credentials { user_id: user.id, password_hash, password_algorithm });
            users.insert(input.username.clone(), user.clone());
            Ok(user)
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().map_err(poisoned)?;
            Ok(creds.get(&user_id).cloned())
        }

        async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().map_err(poisoned)?;
            let c = Credentials { user_id, password_hash, password_algorithm };
            creds.insert(user_id, c.clone());
            Ok(c)
        }
    }
}
