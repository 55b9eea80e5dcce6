//! Client entity model, DTOs, and view model.

use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::ClientStatus;

/// A client row from the hosted `clients` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Defaults to `lead` if omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing client. All fields are optional; `None`
/// fields are omitted from the serialized patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateClient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized client shape for the form and detail screens. Every field is
/// defaulted; the UI never sees a null.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientView {
    /// `None` for a draft that has not been persisted yet.
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub status: ClientStatus,
    pub is_company: bool,
    pub company_name: String,
    pub team_members: Vec<String>,
}

impl EntityKind for Client {
    type Create = CreateClient;
    type Update = UpdateClient;
    type View = ClientView;

    const NAME: &'static str = "Client";
    const TABLE: &'static str = "clients";

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
        fields.extend(self.email.as_deref());
        fields.extend(self.description.as_deref());
        fields.extend(self.metadata.get("company_name").and_then(|v| v.as_str()));
        fields
    }

    fn to_view(&self) -> ClientView {
        ClientView {
            id: Some(self.id),
            name: self.name.clone(),
            email: self.email.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            status: self.status,
            is_company: self.metadata.bool_or_default("is_company"),
            company_name: self.metadata.str_or_default("company_name"),
            team_members: self.metadata.list_or_default("team_members"),
        }
    }

    fn default_view() -> ClientView {
        ClientView {
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            description: String::new(),
            status: ClientStatus::default(),
            is_company: false,
            company_name: String::new(),
            team_members: Vec::new(),
        }
    }

    fn validate_view(view: &ClientView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.name.trim().is_empty() {
            errors.push(FieldError::required("name"));
        }
        errors
    }

    fn create_from_view(view: &ClientView) -> CreateClient {
        let metadata = MetadataPatch::empty()
            .bool("is_company", view.is_company)
            .str("company_name", &view.company_name)
            .string_list("team_members", &view.team_members)
            .finish();
        CreateClient {
            name: view.name.clone(),
            email: none_if_empty(&view.email),
            phone: none_if_empty(&view.phone),
            description: none_if_empty(&view.description),
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &ClientView, base: &Client) -> UpdateClient {
        let metadata = MetadataPatch::over(&base.metadata)
            .bool("is_company", view.is_company)
            .str("company_name", &view.company_name)
            .string_list("team_members", &view.team_members)
            .finish();
        UpdateClient {
            name: none_if_empty(&view.name),
            email: none_if_empty(&view.email),
            phone: none_if_empty(&view.phone),
            description: none_if_empty(&view.description),
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn sample() -> Client {
        Client {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            email: Some("hello@acme.fr".into()),
            phone: None,
            description: None,
            status: ClientStatus::Active,
            metadata: Metadata::from_map(
                json!({
                    "is_company": true,
                    "company_name": "Acme SARL",
                    "team_members": ["ana", "marc"],
                    "legacy_ref": "X-42",
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn view_defaults_absent_fields() {
        let mut record = sample();
        record.metadata = Metadata::new();
        let view = record.to_view();
        assert_eq!(view.phone, "");
        assert_eq!(view.description, "");
        assert!(!view.is_company);
        assert_eq!(view.company_name, "");
        assert!(view.team_members.is_empty());
    }

    #[test]
    fn round_trip_preserves_exposed_metadata() {
        let record = sample();
        let patch = Client::patch_from_view(&record.to_view(), &record);
        let metadata = patch.metadata.unwrap();
        assert_eq!(metadata.bool_or_default("is_company"), true);
        assert_eq!(metadata.str_or_default("company_name"), "Acme SARL");
        assert_eq!(
            metadata.list_or_default("team_members"),
            vec!["ana", "marc"]
        );
    }

    #[test]
    fn round_trip_preserves_unknown_metadata_keys() {
        let record = sample();
        let patch = Client::patch_from_view(&record.to_view(), &record);
        let metadata = patch.metadata.unwrap();
        assert_eq!(metadata.str_or_default("legacy_ref"), "X-42");
    }

    #[test]
    fn empty_email_is_omitted_from_patch() {
        let record = sample();
        let mut view = record.to_view();
        view.email = String::new();
        let patch = Client::patch_from_view(&view, &record);
        assert!(patch.email.is_none());
    }

    #[test]
    fn name_is_required() {
        let mut view = Client::default_view();
        assert_eq!(Client::validate_view(&view).len(), 1);
        view.name = "Globex".into();
        assert!(Client::validate_view(&view).is_empty());
    }

    #[test]
    fn search_fields_include_company_name() {
        let record = sample();
        assert!(record.search_fields().contains(&"Acme SARL"));
    }

    #[test]
    fn update_patch_serializes_only_set_fields() {
        let patch = UpdateClient {
            name: Some("Globex".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, json!({ "name": "Globex" }));
    }
}
