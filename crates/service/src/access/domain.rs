use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{company, product};

/// Who is asking. Built once per request from the authenticated user and
/// their company binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    Anonymous,
    Superuser { user_id: Uuid },
    CompanyUser { user_id: Uuid, company_id: Uuid },
}

/// The parts of a user row that decide their principal.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<&models::user::Model> for Identity {
    fn from(u: &models::user::Model) -> Self {
        Self { user_id: u.id, is_active: u.is_active, is_superuser: u.is_superuser }
    }
}

impl Principal {
    /// Inactive users and users without a binding fall back to `Anonymous`.
    pub fn resolve(identity: Option<&Identity>, bound_company: Option<Uuid>) -> Self {
        match identity {
            Some(id) if !id.is_active => Principal::Anonymous,
            Some(id) if id.is_superuser => Principal::Superuser { user_id: id.user_id },
            Some(id) => match bound_company {
                Some(company_id) => Principal::CompanyUser { user_id: id.user_id, company_id },
                None => Principal::Anonymous,
            },
            None => Principal::Anonymous,
        }
    }

    pub fn is_superuser(&self) -> bool { matches!(self, Principal::Superuser { .. }) }

    pub fn is_anonymous(&self) -> bool { matches!(self, Principal::Anonymous) }

    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::Anonymous => None,
            Principal::Superuser { user_id } | Principal::CompanyUser { user_id, .. } => Some(*user_id),
        }
    }

    pub fn company_id(&self) -> Option<Uuid> {
        match self {
            Principal::CompanyUser { company_id, .. } => Some(*company_id),
            _ => None,
        }
    }
}

/// Guarded resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Company,
    Product,
}

/// A row that belongs to exactly one company.
pub trait Owned {
    const KIND: ResourceKind;

    fn owning_company(&self) -> Uuid;
}

impl Owned for company::Model {
    const KIND: ResourceKind = ResourceKind::Company;

    fn owning_company(&self) -> Uuid { self.id }
}

impl Owned for product::Model {
    const KIND: ResourceKind = ResourceKind::Product;

    fn owning_company(&self) -> Uuid { self.company_id }
}

/// Entity whose rows can be narrowed to a company by a single column.
pub trait OwnedEntity: EntityTrait {
    fn owner_column() -> Self::Column;
}

impl OwnedEntity for company::Entity {
    fn owner_column() -> company::Column { company::Column::Id }
}

impl OwnedEntity for product::Entity {
    fn owner_column() -> product::Column { product::Column::CompanyId }
}

/// Rows a principal may see: everything, one company's rows, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Company(Uuid),
    Nothing,
}

impl Scope {
    pub fn admits(&self, company_id: Uuid) -> bool {
        match self {
            Scope::All => true,
            Scope::Company(c) => *c == company_id,
            Scope::Nothing => false,
        }
    }

    pub fn is_empty(&self) -> bool { matches!(self, Scope::Nothing) }

    /// Narrow a query to this scope. `None` means the result is known to be
    /// empty and the query need not run.
    pub fn restrict<E: OwnedEntity>(&self, select: Select<E>) -> Option<Select<E>> {
        match self {
            Scope::All => Some(select),
            Scope::Company(c) => Some(select.filter(E::owner_column().eq(*c))),
            Scope::Nothing => None,
        }
    }

    /// In-memory counterpart of [`Scope::restrict`].
    pub fn filter<R: Owned>(&self, rows: impl IntoIterator<Item = R>) -> Vec<R> {
        rows.into_iter().filter(|r| self.admits(r.owning_company())).collect()
    }
}

/// A user's assignment to the company they manage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

impl From<models::company_user::Model> for Binding {
    fn from(m: models::company_user::Model) -> Self {
        Self { id: m.id, user_id: m.user_id, company_id: m.company_id, assigned_at: m.assigned_at.with_timezone(&Utc) }
    }
}
