//! Content planning entry model, DTOs, and view model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::ContentPlanStatus;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A content-plan row from the hosted `content_plans` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPlan {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub publish_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ContentPlanStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new content-plan entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContentPlan {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentPlanStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing content-plan entry. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContentPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentPlanStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized content-plan shape for the form and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPlanView {
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub publish_date: String,
    pub status: ContentPlanStatus,
    pub pillar: String,
    pub keywords: Vec<String>,
}

impl EntityKind for ContentPlan {
    type Create = CreateContentPlan;
    type Update = UpdateContentPlan;
    type View = ContentPlanView;

    const NAME: &'static str = "ContentPlan";
    const TABLE: &'static str = "content_plans";

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
        fields.extend(self.metadata.get("pillar").and_then(|v| v.as_str()));
        fields
    }

    fn to_view(&self) -> ContentPlanView {
        ContentPlanView {
            id: Some(self.id),
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            publish_date: self
                .publish_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: self.status,
            pillar: self.metadata.str_or_default("pillar"),
            keywords: self.metadata.list_or_default("keywords"),
        }
    }

    fn default_view() -> ContentPlanView {
        ContentPlanView {
            id: None,
            title: String::new(),
            description: String::new(),
            publish_date: String::new(),
            status: ContentPlanStatus::default(),
            pillar: String::new(),
            keywords: Vec::new(),
        }
    }

    fn validate_view(view: &ContentPlanView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.title.trim().is_empty() {
            errors.push(FieldError::required("title"));
        }
        if !view.publish_date.trim().is_empty()
            && NaiveDate::parse_from_str(view.publish_date.trim(), DATE_FORMAT).is_err()
        {
            errors.push(FieldError {
                field: "publish_date",
                message: "publish_date must be a YYYY-MM-DD date".into(),
            });
        }
        errors
    }

    fn create_from_view(view: &ContentPlanView) -> CreateContentPlan {
        let metadata = MetadataPatch::empty()
            .str("pillar", &view.pillar)
            .string_list("keywords", &view.keywords)
            .finish();
        CreateContentPlan {
            title: view.title.clone(),
            description: none_if_empty(&view.description),
            publish_date: NaiveDate::parse_from_str(view.publish_date.trim(), DATE_FORMAT).ok(),
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &ContentPlanView, base: &ContentPlan) -> UpdateContentPlan {
        let metadata = MetadataPatch::over(&base.metadata)
            .str("pillar", &view.pillar)
            .string_list("keywords", &view.keywords)
            .finish();
        UpdateContentPlan {
            title: none_if_empty(&view.title),
            description: none_if_empty(&view.description),
            publish_date: NaiveDate::parse_from_str(view.publish_date.trim(), DATE_FORMAT).ok(),
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}
