//! Core domain entities.
//!
//! - [`ShortCodeRecord`] - The persisted short code to URL mapping
//! - [`DerivationAttempt`] - A candidate considered while resolving a unique code

pub mod short_code;

pub use short_code::{DerivationAttempt, ShortCodeRecord};
