//! Prestation (billable service) entity model, DTOs, and view model.

use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::PrestationStatus;

/// A prestation row from the hosted `prestations` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prestation {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_days: Option<i32>,
    #[serde(default)]
    pub status: PrestationStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new prestation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrestation {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PrestationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing prestation. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrestation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PrestationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized prestation shape for the form and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct PrestationView {
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub duration_days: Option<i32>,
    pub status: PrestationStatus,
    pub category: String,
}

impl EntityKind for Prestation {
    type Create = CreatePrestation;
    type Update = UpdatePrestation;
    type View = PrestationView;

    const NAME: &'static str = "Prestation";
    const TABLE: &'static str = "prestations";

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn primary_label(&self) -> &str {
        &self.name
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.metadata.get("category").and_then(|v| v.as_str()));
        fields
    }

    fn to_view(&self) -> PrestationView {
        PrestationView {
            id: Some(self.id),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            price: self.price,
            duration_days: self.duration_days,
            status: self.status,
            category: self.metadata.str_or_default("category"),
        }
    }

    fn default_view() -> PrestationView {
        PrestationView {
            id: None,
            name: String::new(),
            description: String::new(),
            price: None,
            duration_days: None,
            status: PrestationStatus::default(),
            category: String::new(),
        }
    }

    fn validate_view(view: &PrestationView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.name.trim().is_empty() {
            errors.push(FieldError::required("name"));
        }
        errors
    }

    fn create_from_view(view: &PrestationView) -> CreatePrestation {
        let metadata = MetadataPatch::empty().str("category", &view.category).finish();
        CreatePrestation {
            name: view.name.clone(),
            description: none_if_empty(&view.description),
            price: view.price,
            duration_days: view.duration_days,
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &PrestationView, base: &Prestation) -> UpdatePrestation {
        let metadata = MetadataPatch::over(&base.metadata)
            .str("category", &view.category)
            .finish();
        UpdatePrestation {
            name: none_if_empty(&view.name),
            description: none_if_empty(&view.description),
            price: view.price,
            duration_days: view.duration_days,
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}
