use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use models::company_user;

use crate::access::domain::Binding;
use crate::access::errors::{BindingError, BindingSide};
use crate::access::repository::BindingRepository;

pub struct SeaOrmBindingRepository {
    pub db: DatabaseConnection,
}

/// Map a failed insert onto the side whose unique index rejected it.
pub(crate) fn classify_insert_error(err: DbErr) -> BindingError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            if msg.contains(company_user::COMPANY_UNIQUE_INDEX) || msg.contains("company_id") {
                BindingError::Duplicate(BindingSide::Company)
            } else {
                BindingError::Duplicate(BindingSide::User)
            }
        }
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => BindingError::UnknownTarget(msg),
        _ => BindingError::Repository(err.to_string()),
    }
}

#[async_trait::async_trait]
impl BindingRepository for SeaOrmBindingRepository {
    async fn company_for_user(&self, user_id: Uuid) -> Result<Option<Uuid>, BindingError> {
        let found = company_user::Entity::find()
            .filter(company_user::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| BindingError::Repository(e.to_string()))?;
        Ok(found.map(|b| b.company_id))
    }

    async fn insert(&self, user_id: Uuid, company_id: Uuid) -> Result<Binding, BindingError> {
        let am = company_user::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            company_id: Set(company_id),
            assigned_at: Set(Utc::now().into()),
        };
        let created = am.insert(&self.db).await.map_err(classify_insert_error)?;
        Ok(created.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), BindingError> {
        let res = company_user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| BindingError::Repository(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(BindingError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Binding>, BindingError> {
        let rows = company_user::Entity::find()
            .order_by_desc(company_user::Column::AssignedAt)
            .all(&self.db)
            .await
            .map_err(|e| BindingError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(Binding::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, superuser, unique};

    async fn seed(db: &DatabaseConnection) -> Result<(Uuid, Uuid, Uuid), anyhow::Error> {
        let cat = models::category::create(db, models::category::CategoryInput { name: unique("cat"), description: None }).await?;
        let input: models::company::CompanyInput = serde_json::from_value(serde_json::json!({
            "name": unique("co"), "category_id": cat.id, "description": "d", "phone": "1", "address": "a"
        }))?;
        let co = models::company::create(db, input).await?;
        let user = models::user::create(db, &models::user::NewUser {
            username: unique("u"), email: "u@example.com".into(), is_staff: false, is_superuser: false,
        }).await?;
        Ok((cat.id, co.id, user.id))
    }

    #[tokio::test]
    async fn concurrent_binds_hit_unique_index_once() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let (cat, company, first) = seed(&db).await?;
        let (cat2, other_company, second) = seed(&db).await?;
        let repo = std::sync::Arc::new(SeaOrmBindingRepository { db: db.clone() });

        let a = tokio::spawn({ let r = repo.clone(); async move { r.insert(first, company).await } });
        let b = tokio::spawn({ let r = repo.clone(); async move { r.insert(second, company).await } });
        let results = [a.await?, b.await?];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(BindingError::Duplicate(BindingSide::Company)))));

        let winner = results.iter().find_map(|r| r.as_ref().ok()).map(|b| b.user_id).unwrap();
        let err = repo.insert(winner, other_company).await.unwrap_err();
        assert!(matches!(err, BindingError::Duplicate(BindingSide::User)));
        assert_eq!(repo.company_for_user(winner).await?, Some(company));

        let service = crate::access::AccessService::new(repo.clone());
        let listed = service.list(&superuser()).await?;
        assert!(listed.iter().any(|b| b.company_id == company));

        for user in [first, second] {
            models::user::hard_delete(&db, user).await?;
        }
        for co in [company, other_company] {
            models::company::Entity::delete_by_id(co).exec(&db).await?;
        }
        for c in [cat, cat2] {
            models::category::Entity::delete_by_id(c).exec(&db).await?;
        }
        Ok(())
    }
}
