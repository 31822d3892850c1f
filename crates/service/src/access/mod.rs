//! Per-company access scoping for companies and products.
//!
//! Same layering as `auth`: `domain` holds the principal and scope types,
//! `policy` the pure decision functions, `repository` the binding store
//! abstraction (with a SeaORM implementation under `repo`), and `service`
//! ties the two together for request handling and binding administration.

pub mod domain;
pub mod errors;
pub mod policy;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Identity, Owned, OwnedEntity, Principal, ResourceKind, Scope};
pub use policy::{allowed_company_choices, can_create, can_delete, can_write, visible_scope};
pub use service::AccessService;
