//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod cat_service;
pub mod toy_service;
pub mod assoc_service;
pub mod feeding_service;
pub mod photo;
#[cfg(test)]
pub mod test_support;
