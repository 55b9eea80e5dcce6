//! Entity catalogue for the bureau back-office.
//!
//! Each submodule contains:
//! - A record struct matching the hosted collection's row shape
//! - A `Serialize` create DTO for inserts
//! - A `Serialize` update DTO (all `Option` fields) for partial patches
//! - A view model with defaulted fields for the form and detail screens
//! - An [`kind::EntityKind`] impl binding them together

pub mod campaign;
pub mod client;
pub mod content_plan;
pub mod kind;
pub mod offer;
pub mod package;
pub mod prestation;
pub mod project;
pub mod social_post;
pub mod specification;
pub mod status;
pub mod task;
