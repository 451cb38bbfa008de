//! Helpers shared across layers.
//!
//! - [`code_deriver`] - Short code derivation from a URL digest
//! - [`db_error`] - Classification of SQLx errors into store errors

pub mod code_deriver;
pub mod db_error;
