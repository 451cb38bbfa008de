//! Domain layer containing business entities and the store contract.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//!
//! The domain layer has no dependencies on concrete backends.

pub mod entities;
pub mod repositories;
