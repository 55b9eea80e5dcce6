//! "Other offer" entity model, DTOs, and view model.
//!
//! Offers are one-off commercial items that do not fit the package or
//! prestation catalogues (hardware resale, licences, third-party services).

use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::OfferStatus;

/// An offer row from the hosted `offers` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(default)]
    pub status: OfferStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOffer {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OfferStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing offer. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOffer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OfferStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized offer shape for the form and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferView {
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub status: OfferStatus,
    pub valid_until: String,
    pub manufacturer: String,
}

impl EntityKind for Offer {
    type Create = CreateOffer;
    type Update = UpdateOffer;
    type View = OfferView;

    const NAME: &'static str = "Offer";
    const TABLE: &'static str = "offers";

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
        fields.extend(self.description.as_deref());
        fields.extend(self.metadata.get("manufacturer").and_then(|v| v.as_str()));
        fields
    }

    fn to_view(&self) -> OfferView {
        OfferView {
            id: Some(self.id),
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            price: self.price,
            status: self.status,
            valid_until: self.metadata.str_or_default("valid_until"),
            manufacturer: self.metadata.str_or_default("manufacturer"),
        }
    }

    fn default_view() -> OfferView {
        OfferView {
            id: None,
            title: String::new(),
            description: String::new(),
            price: None,
            status: OfferStatus::default(),
            valid_until: String::new(),
            manufacturer: String::new(),
        }
    }

    fn validate_view(view: &OfferView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.title.trim().is_empty() {
            errors.push(FieldError::required("title"));
        }
        errors
    }

    fn create_from_view(view: &OfferView) -> CreateOffer {
        let metadata = MetadataPatch::empty()
            .str("valid_until", &view.valid_until)
            .str("manufacturer", &view.manufacturer)
            .finish();
        CreateOffer {
            title: view.title.clone(),
            description: none_if_empty(&view.description),
            price: view.price,
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &OfferView, base: &Offer) -> UpdateOffer {
        let metadata = MetadataPatch::over(&base.metadata)
            .str("valid_until", &view.valid_until)
            .str("manufacturer", &view.manufacturer)
            .finish();
        UpdateOffer {
            title: none_if_empty(&view.title),
            description: none_if_empty(&view.description),
            price: view.price,
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}
