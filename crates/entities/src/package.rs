//! Package entity model, DTOs, and view model.

use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::PackageStatus;

/// A commercial package row from the hosted `packages` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in euros. `None` means "price on request", never zero.
    pub price: Option<f64>,
    #[serde(default)]
    pub status: PackageStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePackage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Defaults to `draft` if omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing package. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePackage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PackageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized package shape for the form and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageView {
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    /// `None` when the price input is left empty; never coerced to `0`.
    pub price: Option<f64>,
    pub status: PackageStatus,
    pub valid_until: String,
    pub features: Vec<String>,
}

impl EntityKind for Package {
    type Create = CreatePackage;
    type Update = UpdatePackage;
    type View = PackageView;

    const NAME: &'static str = "Package";
    const TABLE: &'static str = "packages";

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
        fields
    }

    fn to_view(&self) -> PackageView {
        PackageView {
            id: Some(self.id),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            price: self.price,
            status: self.status,
            valid_until: self.metadata.str_or_default("valid_until"),
            features: self.metadata.list_or_default("features"),
        }
    }

    fn default_view() -> PackageView {
        PackageView {
            id: None,
            name: String::new(),
            description: String::new(),
            price: None,
            status: PackageStatus::default(),
            valid_until: String::new(),
            features: Vec::new(),
        }
    }

    fn validate_view(view: &PackageView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.name.trim().is_empty() {
            errors.push(FieldError::required("name"));
        }
        errors
    }

    fn create_from_view(view: &PackageView) -> CreatePackage {
        let metadata = MetadataPatch::empty()
            .str("valid_until", &view.valid_until)
            .string_list("features", &view.features)
            .finish();
        CreatePackage {
            name: view.name.clone(),
            description: none_if_empty(&view.description),
            price: view.price,
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &PackageView, base: &Package) -> UpdatePackage {
        let metadata = MetadataPatch::over(&base.metadata)
            .str("valid_until", &view.valid_until)
            .string_list("features", &view.features)
            .finish();
        UpdatePackage {
            name: none_if_empty(&view.name),
            description: none_if_empty(&view.description),
            price: view.price,
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample() -> Package {
        Package {
            id: Uuid::new_v4(),
            name: "Site vitrine".into(),
            description: Some("Five pages, responsive".into()),
            price: Some(1490.0),
            status: PackageStatus::Published,
            metadata: Metadata::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_price_input_stays_none_in_patch() {
        let record = sample();
        let mut view = record.to_view();
        view.price = None;
        let patch = Package::patch_from_view(&view, &record);
        // Never `Some(0.0)`: "not provided" and "zero" are different things.
        assert_eq!(patch.price, None);
        let json = serde_json::to_value(&patch).unwrap();
        assert!(json.get("price").is_none());
    }

    #[test]
    fn price_round_trips_through_the_view() {
        let record = sample();
        let patch = Package::patch_from_view(&record.to_view(), &record);
        assert_eq!(patch.price, Some(1490.0));
    }
}
