use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials, RegisterInput};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find()
            .filter(models::user::Column::Username.eq(username.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(AuthUser::from))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, input: &RegisterInput, password_hash: String, password_algorithm: String) -> Result<AuthUser, AuthError> {
        let new_user = models::user::NewUser {
            username: input.username.clone(),
            email: input.email.clone(),
            is_staff: input.is_staff,
            is_superuser: input.is_superuser,
        };
        let txn = self.db.begin().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        let created = models::user::create(&txn, &new_user).await?;
        models::user_credentials::upsert_password(&txn, created.id, password_hash, &password_algorithm).await?;
        txn.commit().await.map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(created.into())
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(|c| Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm).await?;
        Ok(Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, unique};

    fn account(username: &str) -> RegisterInput {
        RegisterInput {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: "Passw0rd!".into(),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn rejected_credentials_leave_no_user_behind() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmAuthRepository { db };
        let username = unique("acct");

        let err = repo.create_user(&account(&username), "  ".into(), "argon2".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert!(repo.find_user_by_username(&username).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn repeated_username_is_a_conflict() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmAuthRepository { db: db.clone() };
        let username = unique("acct");

        let first = repo.create_user(&account(&username), "$argon2id$stub".into(), "argon2".into()).await?;
        assert!(repo.get_credentials(first.id).await?.is_some());
        let err = repo.create_user(&account(&username), "$argon2id$stub".into(), "argon2".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict), "{err:?}");

        models::user::hard_delete(&db, first.id).await?;
        Ok(())
    }
}
