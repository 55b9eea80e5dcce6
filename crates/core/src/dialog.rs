//! Per-screen dialog state machine.
//!
//! Every list screen drives exactly one dialog at a time. Modeling the open
//! dialog as a single tagged union (instead of three independent booleans)
//! makes "two dialogs open at once" unrepresentable.
//!
//! Permitted transitions:
//!
//! ```text
//! Closed -> Creating -> Closed
//! Closed -> Viewing  -> Editing -> Closed
//! Closed -> Viewing  -> Closed
//! ```
//!
//! `Editing -> Viewing` is not a transition: a finished or cancelled edit
//! always lands on `Closed`.

use crate::error::CoreError;
use crate::types::RecordId;

/// Which dialog, if any, is open on a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    /// The Create form is open (no record id yet).
    Creating,
    /// The read-only detail view is open for a record.
    Viewing(RecordId),
    /// The edit form is open for a record.
    Editing(RecordId),
}

impl DialogState {
    /// Open the Create form. Legal only from `Closed`.
    pub fn open_create(&mut self) -> Result<(), CoreError> {
        match self {
            DialogState::Closed => {
                *self = DialogState::Creating;
                Ok(())
            }
            other => Err(illegal(*other, "Creating")),
        }
    }

    /// Open the detail view for `id`. Legal only from `Closed`.
    pub fn open_view(&mut self, id: RecordId) -> Result<(), CoreError> {
        match self {
            DialogState::Closed => {
                *self = DialogState::Viewing(id);
                Ok(())
            }
            other => Err(illegal(*other, "Viewing")),
        }
    }

    /// Switch from the detail view to the edit form for the same record.
    /// The detail view closes first; no two dialogs touch one record at once.
    pub fn open_edit(&mut self) -> Result<(), CoreError> {
        match self {
            DialogState::Viewing(id) => {
                *self = DialogState::Editing(*id);
                Ok(())
            }
            other => Err(illegal(*other, "Editing")),
        }
    }

    /// Close whatever is open. Always legal; closing `Closed` is a no-op.
    pub fn close(&mut self) {
        *self = DialogState::Closed;
    }

    /// The record id the open dialog refers to, if any.
    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            DialogState::Viewing(id) | DialogState::Editing(id) => Some(*id),
            _ => None,
        }
    }

    /// `true` when the open dialog refers to `id`.
    pub fn references(&self, id: RecordId) -> bool {
        self.record_id() == Some(id)
    }

    /// Force-close the dialog if it refers to `id` (the record was deleted).
    pub fn force_close_if_references(&mut self, id: RecordId) {
        if self.references(id) {
            self.close();
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DialogState::Closed => "Closed",
            DialogState::Creating => "Creating",
            DialogState::Viewing(_) => "Viewing",
            DialogState::Editing(_) => "Editing",
        }
    }
}

fn illegal(from: DialogState, to: &'static str) -> CoreError {
    CoreError::Validation(format!(
        "Illegal dialog transition {} -> {to}",
        from.label()
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id() -> RecordId {
        Uuid::new_v4()
    }

    #[test]
    fn create_cycle() {
        let mut d = DialogState::Closed;
        d.open_create().unwrap();
        assert_eq!(d, DialogState::Creating);
        d.close();
        assert_eq!(d, DialogState::Closed);
    }

    #[test]
    fn view_then_edit_then_closed() {
        let rid = id();
        let mut d = DialogState::Closed;
        d.open_view(rid).unwrap();
        d.open_edit().unwrap();
        assert_eq!(d, DialogState::Editing(rid));
        d.close();
        assert_eq!(d, DialogState::Closed);
    }

    #[test]
    fn cannot_open_create_over_view() {
        let mut d = DialogState::Viewing(id());
        assert!(d.open_create().is_err());
    }

    #[test]
    fn cannot_edit_from_closed() {
        let mut d = DialogState::Closed;
        assert!(d.open_edit().is_err());
    }

    #[test]
    fn cannot_edit_while_creating() {
        let mut d = DialogState::Creating;
        assert!(d.open_edit().is_err());
    }

    #[test]
    fn force_close_only_when_id_matches() {
        let rid = id();
        let mut d = DialogState::Viewing(rid);
        d.force_close_if_references(id());
        assert_eq!(d, DialogState::Viewing(rid));
        d.force_close_if_references(rid);
        assert_eq!(d, DialogState::Closed);
    }

    #[test]
    fn references_tracks_view_and_edit() {
        let rid = id();
        assert!(DialogState::Viewing(rid).references(rid));
        assert!(DialogState::Editing(rid).references(rid));
        assert!(!DialogState::Creating.references(rid));
        assert!(!DialogState::Closed.references(rid));
    }
}
