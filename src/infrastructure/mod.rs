//! Infrastructure layer for external integrations.
//!
//! Implements the store contract defined by the domain layer on top of
//! PostgreSQL, Redis, or process memory.
//!
//! # Modules
//!
//! - [`persistence`] - Store implementations and backend selection

pub mod persistence;
