//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Scopes company and product access through `access`.

pub mod errors;
pub mod pagination;
pub mod access;
pub mod auth;
#[cfg(test)]
pub mod test_support;

pub mod catalog_service;
pub mod company_service;
pub mod content_service;
pub mod inbox_service;
pub mod offering_service;
pub mod product_service;
pub mod testimonial_service;
pub mod user_service;
