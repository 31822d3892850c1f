//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Password login for admin users and verification of the issued tokens.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
