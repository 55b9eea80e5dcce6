//! Shared foundation for the bureau back-office: identifier and timestamp
//! types, the error taxonomy, the open metadata bag, search/filter helpers,
//! and the per-screen dialog state machine.
//!
//! This crate has no internal dependencies so it can be used by the entity
//! catalogue, the controllers, and any adapter crate alike.

pub mod dialog;
pub mod error;
pub mod metadata;
pub mod search;
pub mod types;

pub use error::CoreError;
