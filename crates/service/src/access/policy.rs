//! Pure access decisions. Nothing here touches storage.

use super::domain::{Owned, Principal, ResourceKind, Scope};

/// Filter predicate for scoped listings.
pub fn visible_scope(principal: &Principal) -> Scope {
    match principal {
        Principal::Superuser { .. } => Scope::All,
        Principal::CompanyUser { company_id, .. } => Scope::Company(*company_id),
        Principal::Anonymous => Scope::Nothing,
    }
}

/// Company users may add products to their company; only superusers create companies.
pub fn can_create(principal: &Principal, kind: ResourceKind) -> bool {
    match principal {
        Principal::Superuser { .. } => true,
        Principal::CompanyUser { .. } => kind == ResourceKind::Product,
        Principal::Anonymous => false,
    }
}

/// `None` asks about creating a new row of type `R`.
pub fn can_write<R: Owned>(principal: &Principal, resource: Option<&R>) -> bool {
    match (principal, resource) {
        (Principal::Superuser { .. }, _) => true,
        (Principal::CompanyUser { company_id, .. }, Some(r)) => r.owning_company() == *company_id,
        (_, None) => can_create(principal, R::KIND),
        (Principal::Anonymous, Some(_)) => false,
    }
}

/// A company user may delete their own products but never their company.
pub fn can_delete<R: Owned>(principal: &Principal, resource: &R) -> bool {
    match principal {
        Principal::Superuser { .. } => true,
        Principal::CompanyUser { company_id, .. } => {
            R::KIND != ResourceKind::Company && resource.owning_company() == *company_id
        }
        Principal::Anonymous => false,
    }
}

/// Companies a new or edited product may be assigned to.
pub fn allowed_company_choices(principal: &Principal) -> Scope {
    visible_scope(principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use models::{company, product};

    fn company_row(id: Uuid) -> company::Model {
        company::Model {
            id,
            ruc: None,
            name: "Acme".into(),
            category_id: Uuid::new_v4(),
            description: "d".into(),
            phone: "1".into(),
            email: None,
            website: None,
            address: "a".into(),
            registered_at: Utc::now().into(),
            active: true,
            logo_url: None,
            facebook: None,
            twitter: None,
            instagram: None,
            tiktok: None,
            linkedin: None,
        }
    }

    fn product_row(company_id: Uuid) -> product::Model {
        product::Model {
            id: Uuid::new_v4(),
            name: "Widget".into(),
            company_id,
            category_id: Uuid::new_v4(),
            description: "d".into(),
            price: Decimal::new(1000, 2),
            image_url: None,
            active: true,
        }
    }

    fn superuser() -> Principal { Principal::Superuser { user_id: Uuid::new_v4() } }

    fn bound_to(company_id: Uuid) -> Principal {
        Principal::CompanyUser { user_id: Uuid::new_v4(), company_id }
    }

    #[test]
    fn superuser_sees_and_writes_everything() {
        let p = superuser();
        let c = company_row(Uuid::new_v4());
        let pr = product_row(Uuid::new_v4());
        assert_eq!(visible_scope(&p), Scope::All);
        assert!(can_write(&p, Some(&c)));
        assert!(can_write(&p, Some(&pr)));
        assert!(can_write::<company::Model>(&p, None));
        assert!(can_write::<product::Model>(&p, None));
        assert!(can_delete(&p, &c));
        assert!(can_delete(&p, &pr));
        assert_eq!(allowed_company_choices(&p), Scope::All);
    }

    #[test]
    fn company_user_is_limited_to_own_company() {
        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p = bound_to(mine);

        assert_eq!(visible_scope(&p), Scope::Company(mine));
        assert!(can_write(&p, Some(&product_row(mine))));
        assert!(!can_write(&p, Some(&product_row(other))));
        assert!(can_write(&p, Some(&company_row(mine))));
        assert!(!can_write(&p, Some(&company_row(other))));
        assert!(can_delete(&p, &product_row(mine)));
        assert!(!can_delete(&p, &product_row(other)));
    }

    #[test]
    fn company_user_creates_products_but_not_companies() {
        let p = bound_to(Uuid::new_v4());
        assert!(can_write::<product::Model>(&p, None));
        assert!(!can_write::<company::Model>(&p, None));
    }

    #[test]
    fn company_user_never_deletes_own_company() {
        let mine = Uuid::new_v4();
        assert!(!can_delete(&bound_to(mine), &company_row(mine)));
    }

    #[test]
    fn allowed_choices_is_singleton_for_company_user() {
        let mine = Uuid::new_v4();
        let choices = allowed_company_choices(&bound_to(mine));
        assert!(choices.admits(mine));
        assert!(!choices.admits(Uuid::new_v4()));
    }

    #[test]
    fn anonymous_gets_nothing() {
        let p = Principal::Anonymous;
        let c = company_row(Uuid::new_v4());
        assert_eq!(visible_scope(&p), Scope::Nothing);
        assert!(!can_write::<product::Model>(&p, None));
        assert!(!can_write::<company::Model>(&p, None));
        assert!(!can_write(&p, Some(&c)));
        assert!(!can_delete(&p, &c));
        assert!(allowed_company_choices(&p).is_empty());
    }

    #[test]
    fn unbound_user_resolves_to_empty_access() {
        let identity = crate::access::Identity { user_id: Uuid::new_v4(), is_active: true, is_superuser: false };
        let p = Principal::resolve(Some(&identity), None);
        assert_eq!(p, Principal::Anonymous);
        assert!(visible_scope(&p).filter(vec![product_row(Uuid::new_v4())]).is_empty());
        assert!(!can_write::<product::Model>(&p, None));
    }

    #[test]
    fn inactive_superuser_is_anonymous() {
        let identity = crate::access::Identity { user_id: Uuid::new_v4(), is_active: false, is_superuser: true };
        assert_eq!(Principal::resolve(Some(&identity), None), Principal::Anonymous);
    }

    #[test]
    fn superuser_ignores_binding() {
        let identity = crate::access::Identity { user_id: Uuid::new_v4(), is_active: true, is_superuser: true };
        let p = Principal::resolve(Some(&identity), Some(Uuid::new_v4()));
        assert!(p.is_superuser());
        assert_eq!(p.company_id(), None);
    }

    #[test]
    fn scoped_listing_keeps_only_own_products() {
        let five = Uuid::new_v4();
        let seven = Uuid::new_v4();
        let rows = vec![product_row(five), product_row(five), product_row(seven)];
        let visible = visible_scope(&bound_to(five)).filter(rows.clone());
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|p| p.company_id == five));
        assert_eq!(visible_scope(&superuser()).filter(rows).len(), 3);
    }

    #[test]
    fn visible_rows_match_write_permission() {
        let mine = Uuid::new_v4();
        let p = bound_to(mine);
        let rows: Vec<_> = (0..6).map(|i| product_row(if i % 2 == 0 { mine } else { Uuid::new_v4() })).collect();
        let scope = visible_scope(&p);
        for r in &rows {
            assert_eq!(scope.admits(r.company_id), can_write(&p, Some(r)));
        }
    }
}
