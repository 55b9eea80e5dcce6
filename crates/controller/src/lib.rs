//! List-screen orchestration for the bureau back-office.
//!
//! Every screen is the same triad: a [`list::ListController`] owning the
//! collection and the dialog state machine, an [`form::EntityForm`] holding
//! a draft view model, and a [`detail::DetailView`] presenting one record.
//! Persistence is reached only through the [`port::DataAccessPort`] seam;
//! user-facing side effects go through the [`notify::ToastBus`] and the
//! [`confirm::ConfirmationGate`].

pub mod confirm;
pub mod detail;
pub mod form;
pub mod list;
pub mod memory;
pub mod notify;
pub mod port;

pub use list::{ListController, ReconcileStrategy};
pub use port::DataAccessPort;
