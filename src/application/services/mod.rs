//! Application services orchestrating domain operations.
//!
//! - [`UniquenessResolver`] - Derives a short code and commits it once the store confirms it is free

pub mod uniqueness_resolver;

pub use uniqueness_resolver::{DEFAULT_STORE_TIMEOUT, UniquenessResolver};
