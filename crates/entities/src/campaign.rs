//! Marketing campaign entity model, DTOs, and view model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::CampaignStatus;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A campaign row from the hosted `campaigns` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing campaign. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCampaign {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized campaign shape for the form and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignView {
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub budget: Option<f64>,
    pub start_date: String,
    pub end_date: String,
    pub status: CampaignStatus,
    pub channels: Vec<String>,
    pub target_audience: String,
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

impl EntityKind for Campaign {
    type Create = CreateCampaign;
    type Update = UpdateCampaign;
    type View = CampaignView;

    const NAME: &'static str = "Campaign";
    const TABLE: &'static str = "campaigns";

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

    fn to_view(&self) -> CampaignView {
        CampaignView {
            id: Some(self.id),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            budget: self.budget,
            start_date: self
                .start_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            end_date: self
                .end_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: self.status,
            channels: self.metadata.list_or_default("channels"),
            target_audience: self.metadata.str_or_default("target_audience"),
        }
    }

    fn default_view() -> CampaignView {
        CampaignView {
            id: None,
            name: String::new(),
            description: String::new(),
            budget: None,
            start_date: String::new(),
            end_date: String::new(),
            status: CampaignStatus::default(),
            channels: Vec::new(),
            target_audience: String::new(),
        }
    }

    fn validate_view(view: &CampaignView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.name.trim().is_empty() {
            errors.push(FieldError::required("name"));
        }
        for (field, value) in [("start_date", &view.start_date), ("end_date", &view.end_date)] {
            if !value.trim().is_empty() && parse_date(value).is_none() {
                errors.push(FieldError {
                    field,
                    message: format!("{field} must be a YYYY-MM-DD date"),
                });
            }
        }
        errors
    }

    fn create_from_view(view: &CampaignView) -> CreateCampaign {
        let metadata = MetadataPatch::empty()
            .string_list("channels", &view.channels)
            .str("target_audience", &view.target_audience)
            .finish();
        CreateCampaign {
            name: view.name.clone(),
            description: none_if_empty(&view.description),
            budget: view.budget,
            start_date: parse_date(&view.start_date),
            end_date: parse_date(&view.end_date),
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &CampaignView, base: &Campaign) -> UpdateCampaign {
        let metadata = MetadataPatch::over(&base.metadata)
            .string_list("channels", &view.channels)
            .str("target_audience", &view.target_audience)
            .finish();
        UpdateCampaign {
            name: none_if_empty(&view.name),
            description: none_if_empty(&view.description),
            budget: view.budget,
            start_date: parse_date(&view.start_date),
            end_date: parse_date(&view.end_date),
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}
