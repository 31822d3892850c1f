use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{Binding, Identity, Principal};
use super::errors::BindingError;
use super::repository::BindingRepository;
use crate::errors::ServiceError;

/// Principal resolution and binding administration over a [`BindingRepository`].
pub struct AccessService<R: BindingRepository> {
    repo: Arc<R>,
}

impl<R: BindingRepository> Clone for AccessService<R> {
    fn clone(&self) -> Self { Self { repo: self.repo.clone() } }
}

impl<R: BindingRepository> AccessService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Build the principal for one request. Performs at most one binding lookup,
    /// and none for anonymous, inactive, or superuser identities.
    ///
    /// # Examples
    /// ```
    /// use service::access::{AccessService, Identity, Principal};
    /// use service::access::repository::mock::MockBindingRepository;
    /// use std::sync::Arc;
    /// let svc = AccessService::new(Arc::new(MockBindingRepository::default()));
    /// let who = Identity { user_id: uuid::Uuid::new_v4(), is_active: true, is_superuser: false };
    /// let p = tokio_test::block_on(svc.resolve(Some(&who))).unwrap();
    /// assert_eq!(p, Principal::Anonymous);
    /// ```
    pub async fn resolve(&self, identity: Option<&Identity>) -> Result<Principal, BindingError> {
        let needs_lookup = matches!(identity, Some(id) if id.is_active && !id.is_superuser);
        let bound = match identity {
            Some(id) if needs_lookup => self.repo.company_for_user(id.user_id).await?,
            _ => None,
        };
        Ok(Principal::resolve(identity, bound))
    }

    /// Assign `user_id` to `company_id`. Superuser only; either side already bound fails.
    #[instrument(skip_all, fields(user_id = %user_id, company_id = %company_id))]
    pub async fn bind(&self, actor: &Principal, user_id: Uuid, company_id: Uuid) -> Result<Binding, ServiceError> {
        require_superuser(actor)?;
        match self.repo.insert(user_id, company_id).await {
            Ok(b) => {
                info!(binding_id = %b.id, "company_user_bound");
                Ok(b)
            }
            Err(e @ BindingError::Duplicate(_)) => {
                warn!(error = %e, "company_user_bind_rejected");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, actor))]
    pub async fn unbind(&self, actor: &Principal, binding_id: Uuid) -> Result<(), ServiceError> {
        require_superuser(actor)?;
        self.repo.delete(binding_id).await?;
        info!(binding_id = %binding_id, "company_user_unbound");
        Ok(())
    }

    pub async fn list(&self, actor: &Principal) -> Result<Vec<Binding>, ServiceError> {
        require_superuser(actor)?;
        Ok(self.repo.list().await?)
    }
}

pub(crate) fn require_superuser(actor: &Principal) -> Result<(), ServiceError> {
    if actor.is_superuser() {
        Ok(())
    } else {
        Err(ServiceError::Forbidden("superuser access required".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::errors::BindingSide;
    use crate::access::repository::mock::MockBindingRepository;
    use crate::access::{visible_scope, Scope};

    fn admin() -> Principal { Principal::Superuser { user_id: Uuid::new_v4() } }

    fn svc() -> AccessService<MockBindingRepository> {
        AccessService::new(Arc::new(MockBindingRepository::default()))
    }

    fn duplicate_side(err: ServiceError) -> Option<BindingSide> {
        match err {
            ServiceError::Binding(BindingError::Duplicate(side)) => Some(side),
            _ => None,
        }
    }

    #[tokio::test]
    async fn binding_is_one_to_one_both_ways() {
        let svc = svc();
        let (u, u2, c, c2) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        svc.bind(&admin(), u, c).await.unwrap();

        let err = svc.bind(&admin(), u, c2).await.unwrap_err();
        assert_eq!(duplicate_side(err), Some(BindingSide::User));
        let err = svc.bind(&admin(), u2, c).await.unwrap_err();
        assert_eq!(duplicate_side(err), Some(BindingSide::Company));

        svc.bind(&admin(), u2, c2).await.unwrap();
        assert_eq!(svc.list(&admin()).await.unwrap().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_binds_of_one_company_yield_one_winner() {
        let svc = svc();
        let company = Uuid::new_v4();
        let a = tokio::spawn({
            let svc = svc.clone();
            async move { svc.bind(&admin(), Uuid::new_v4(), company).await }
        });
        let b = tokio::spawn({
            let svc = svc.clone();
            async move { svc.bind(&admin(), Uuid::new_v4(), company).await }
        });
        let results = [a.await.unwrap(), b.await.unwrap()];
        let ok = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(ok, 1);
        let failed = results.into_iter().find_map(|r| r.err()).unwrap();
        assert_eq!(duplicate_side(failed), Some(BindingSide::Company));
    }

    #[tokio::test]
    async fn only_superusers_administer_bindings() {
        let svc = svc();
        let company_user = Principal::CompanyUser { user_id: Uuid::new_v4(), company_id: Uuid::new_v4() };
        for actor in [Principal::Anonymous, company_user] {
            let err = svc.bind(&actor, Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
            assert!(matches!(err, ServiceError::Forbidden(_)));
            assert!(matches!(svc.list(&actor).await, Err(ServiceError::Forbidden(_))));
        }
    }

    #[tokio::test]
    async fn resolve_uses_binding_and_unbind_revokes_it() {
        let svc = svc();
        let who = Identity { user_id: Uuid::new_v4(), is_active: true, is_superuser: false };
        let company = Uuid::new_v4();
        let b = svc.bind(&admin(), who.user_id, company).await.unwrap();

        let p = svc.resolve(Some(&who)).await.unwrap();
        assert_eq!(p, Principal::CompanyUser { user_id: who.user_id, company_id: company });
        assert_eq!(visible_scope(&p), Scope::Company(company));

        svc.unbind(&admin(), b.id).await.unwrap();
        assert_eq!(svc.resolve(Some(&who)).await.unwrap(), Principal::Anonymous);
        assert!(matches!(
            svc.unbind(&admin(), b.id).await,
            Err(ServiceError::Binding(BindingError::NotFound))
        ));
    }

    #[tokio::test]
    async fn resolve_without_identity_is_anonymous() {
        assert_eq!(svc().resolve(None).await.unwrap(), Principal::Anonymous);
    }
}
