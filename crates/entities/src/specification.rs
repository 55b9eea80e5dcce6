//! Specification document ("cahier des charges") entity model, DTOs, and
//! view model.
//!
//! The rich-text body is the external editor's HTML output, stored verbatim
//! inside metadata under `document_html`. This system never parses it; the
//! editor renders it and the PDF exporter consumes it as-is.

use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::SpecificationStatus;

/// A specification row from the hosted `specifications` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    pub id: RecordId,
    pub title: String,
    pub client_name: Option<String>,
    #[serde(default)]
    pub status: SpecificationStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpecification {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SpecificationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing specification. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSpecification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SpecificationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized specification shape for the editor and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationView {
    pub id: Option<RecordId>,
    pub title: String,
    pub client_name: String,
    pub status: SpecificationStatus,
    /// Opaque editor HTML. Never parsed here.
    pub document_html: String,
    pub version_note: String,
}

impl EntityKind for Specification {
    type Create = CreateSpecification;
    type Update = UpdateSpecification;
    type View = SpecificationView;

    const NAME: &'static str = "Specification";
    const TABLE: &'static str = "specifications";

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn primary_label(&self) -> &str {
        &self.title
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.client_name.as_deref());
        fields
    }

    fn to_view(&self) -> SpecificationView {
        SpecificationView {
            id: Some(self.id),
            title: self.title.clone(),
            client_name: self.client_name.clone().unwrap_or_default(),
            status: self.status,
            document_html: self.metadata.str_or_default("document_html"),
            version_note: self.metadata.str_or_default("version_note"),
        }
    }

    fn default_view() -> SpecificationView {
        SpecificationView {
            id: None,
            title: String::new(),
            client_name: String::new(),
            status: SpecificationStatus::default(),
            document_html: String::new(),
            version_note: String::new(),
        }
    }

    fn validate_view(view: &SpecificationView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.title.trim().is_empty() {
            errors.push(FieldError::required("title"));
        }
        errors
    }

    fn create_from_view(view: &SpecificationView) -> CreateSpecification {
        let metadata = MetadataPatch::empty()
            .str("document_html", &view.document_html)
            .str("version_note", &view.version_note)
            .finish();
        CreateSpecification {
            title: view.title.clone(),
            client_name: none_if_empty(&view.client_name),
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &SpecificationView, base: &Specification) -> UpdateSpecification {
        let metadata = MetadataPatch::over(&base.metadata)
            .str("document_html", &view.document_html)
            .str("version_note", &view.version_note)
            .finish();
        UpdateSpecification {
            title: none_if_empty(&view.title),
            client_name: none_if_empty(&view.client_name),
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn editor_html_passes_through_untouched() {
        let html = "<h1>Refonte</h1><p>Lot 1 &amp; lot 2</p>";
        let record = Specification {
            id: Uuid::new_v4(),
            title: "CDC Refonte".into(),
            client_name: Some("Acme".into()),
            status: SpecificationStatus::Review,
            metadata: Metadata::from_map(
                json!({ "document_html": html }).as_object().unwrap().clone(),
            ),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let view = record.to_view();
        assert_eq!(view.document_html, html);
        let patch = Specification::patch_from_view(&view, &record);
        assert_eq!(
            patch.metadata.unwrap().str_or_default("document_html"),
            html
        );
    }
}
