//! Social publication entity model, DTOs, and view model.

use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::SocialPostStatus;

/// A social-post row from the hosted `social_posts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: RecordId,
    pub title: String,
    pub body: Option<String>,
    /// Target network, e.g. `"linkedin"` or `"instagram"`.
    pub channel: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    #[serde(default)]
    pub status: SocialPostStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new social post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSocialPost {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SocialPostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing social post. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSocialPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SocialPostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized social-post shape for the form and calendar screens.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialPostView {
    pub id: Option<RecordId>,
    pub title: String,
    pub body: String,
    pub channel: String,
    pub scheduled_at: Option<Timestamp>,
    pub status: SocialPostStatus,
    pub media_urls: Vec<String>,
}

impl EntityKind for SocialPost {
    type Create = CreateSocialPost;
    type Update = UpdateSocialPost;
    type View = SocialPostView;

    const NAME: &'static str = "SocialPost";
    const TABLE: &'static str = "social_posts";

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
        fields.extend(self.body.as_deref());
        fields.extend(self.channel.as_deref());
        fields
    }

    fn to_view(&self) -> SocialPostView {
        SocialPostView {
            id: Some(self.id),
            title: self.title.clone(),
            body: self.body.clone().unwrap_or_default(),
            channel: self.channel.clone().unwrap_or_default(),
            scheduled_at: self.scheduled_at,
            status: self.status,
            media_urls: self.metadata.list_or_default("media_urls"),
        }
    }

    fn default_view() -> SocialPostView {
        SocialPostView {
            id: None,
            title: String::new(),
            body: String::new(),
            channel: String::new(),
            scheduled_at: None,
            status: SocialPostStatus::default(),
            media_urls: Vec::new(),
        }
    }

    fn validate_view(view: &SocialPostView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.title.trim().is_empty() {
            errors.push(FieldError::required("title"));
        }
        errors
    }

    fn create_from_view(view: &SocialPostView) -> CreateSocialPost {
        let metadata = MetadataPatch::empty()
            .string_list("media_urls", &view.media_urls)
            .finish();
        CreateSocialPost {
            title: view.title.clone(),
            body: none_if_empty(&view.body),
            channel: none_if_empty(&view.channel),
            scheduled_at: view.scheduled_at,
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &SocialPostView, base: &SocialPost) -> UpdateSocialPost {
        let metadata = MetadataPatch::over(&base.metadata)
            .string_list("media_urls", &view.media_urls)
            .finish();
        UpdateSocialPost {
            title: none_if_empty(&view.title),
            body: none_if_empty(&view.body),
            channel: none_if_empty(&view.channel),
            scheduled_at: view.scheduled_at,
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}
