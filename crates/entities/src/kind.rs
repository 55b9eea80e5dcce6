//! The `EntityKind` trait: one implementation per business entity.
//!
//! A list screen is generic over its entity kind; everything the controller,
//! form, and data-access adapters need to know about an entity is expressed
//! here: its collection name, id and status accessors, the fixed set of
//! searchable fields, and the mappings between record, view model, and the
//! create/update DTOs.

use serde::de::DeserializeOwned;
use serde::Serialize;

use bureau_core::types::{RecordId, Timestamp};

/// A single field-level validation failure, surfaced inline next to the
/// offending form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    /// Standard "required field left empty" error.
    pub fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{field} is required"),
        }
    }
}

/// Map a defaulted view-model string back to the optional record field.
/// The empty string is the unset sentinel: it never reaches a patch, so a
/// partial update cannot clobber a server-side value with `""`.
pub fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Binds a persisted record type to its DTOs and view model.
///
/// Implemented directly on the record struct (`type` parameters would add
/// nothing: there is exactly one record shape per entity kind).
pub trait EntityKind:
    Serialize + DeserializeOwned + Clone + PartialEq + Send + Sync + 'static
{
    /// DTO sent to the data layer on insert.
    type Create: Serialize + Clone + Send + Sync + 'static;
    /// Partial-update DTO. Every field is `Option`; `None` fields are
    /// omitted from the serialized patch.
    type Update: Serialize + Clone + Send + Sync + 'static;
    /// Normalized, always-defaulted shape used by the form and detail view.
    type View: Clone + Send + Sync + 'static;

    /// Human-facing entity name, e.g. `"Client"`.
    const NAME: &'static str;
    /// Hosted collection (table) name, e.g. `"clients"`.
    const TABLE: &'static str;

    fn id(&self) -> RecordId;

    /// When the persistence layer created the record. Drives the default
    /// newest-first ordering of list screens.
    fn created_at(&self) -> Timestamp;

    /// The human-facing name or title shown as the row's main label.
    fn primary_label(&self) -> &str;

    /// Status as its canonical wire string, for the status filter.
    fn status_label(&self) -> &'static str;

    /// The fixed set of fields the search box matches against.
    fn search_fields(&self) -> Vec<&str>;

    /// Record -> view model. Every absent value becomes a literal default
    /// so the UI never renders a null.
    fn to_view(&self) -> Self::View;

    /// Blank view model seeding the Create form.
    fn default_view() -> Self::View;

    /// Required-field checks. An empty vec means the view may be submitted.
    fn validate_view(view: &Self::View) -> Vec<FieldError>;

    /// View model -> insert DTO for a record that has no id yet.
    fn create_from_view(view: &Self::View) -> Self::Create;

    /// View model -> partial patch, overlaid on `base` so metadata keys the
    /// UI does not know about survive the save.
    fn patch_from_view(view: &Self::View, base: &Self) -> Self::Update;
}
