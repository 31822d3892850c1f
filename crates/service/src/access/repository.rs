use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Binding;
use super::errors::BindingError;

/// Storage for user/company bindings. Implementations must reject a second
/// binding for either the user or the company atomically.
#[async_trait]
pub trait BindingRepository: Send + Sync {
    async fn company_for_user(&self, user_id: Uuid) -> Result<Option<Uuid>, BindingError>;
    async fn insert(&self, user_id: Uuid, company_id: Uuid) -> Result<Binding, BindingError>;
    async fn delete(&self, id: Uuid) -> Result<(), BindingError>;
    async fn list(&self) -> Result<Vec<Binding>, BindingError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::access::errors::BindingSide;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBindingRepository {
        rows: Mutex<Vec<Binding>>,
    }

    impl MockBindingRepository {
        fn rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<Binding>>, BindingError> {
            self.rows.lock().map_err(|e| BindingError::Repository(e.to_string()))
        }
    }

    #[async_trait]
    impl BindingRepository for MockBindingRepository {
        async fn company_for_user(&self, user_id: Uuid) -> Result<Option<Uuid>, BindingError> {
            Ok(self.rows()?.iter().find(|b| b.user_id == user_id).map(|b| b.company_id))
        }

        async fn insert(&self, user_id: Uuid, company_id: Uuid) -> Result<Binding, BindingError> {
            let mut rows = self.rows()?;
            if rows.iter().any(|b| b.user_id == user_id) {
                return Err(BindingError::Duplicate(BindingSide::User));
            }
            if rows.iter().any(|b| b.company_id == company_id) {
                return Err(BindingError::Duplicate(BindingSide::Company));
            }
            let b = Binding { id: Uuid::new_v4(), user_id, company_id, assigned_at: Utc::now() };
            rows.push(b.clone());
            Ok(b)
        }

        async fn delete(&self, id: Uuid) -> Result<(), BindingError> {
            let mut rows = self.rows()?;
            let before = rows.len();
            rows.retain(|b| b.id != id);
            if rows.len() == before {
                return Err(BindingError::NotFound);
            }
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Binding>, BindingError> {
            let mut rows = self.rows()?.clone();
            rows.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
            Ok(rows)
        }
    }
}
