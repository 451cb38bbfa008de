//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; a mock is
//! generated via `mockall` for unit tests.

pub mod short_code_store;

pub use short_code_store::ShortCodeStore;

#[cfg(test)]
pub use short_code_store::MockShortCodeStore;
