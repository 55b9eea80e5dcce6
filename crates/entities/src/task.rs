//! Task entity model, DTOs, and view model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::TaskStatus;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A task row from the hosted `tasks` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    /// Parent project, when the task was created from a project screen.
    pub project_id: Option<RecordId>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Defaults to `todo` if omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized task shape for the form and detail screens.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskView {
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub project_id: Option<RecordId>,
    pub due_date: String,
    pub status: TaskStatus,
    pub assigned_to: String,
}

impl EntityKind for Task {
    type Create = CreateTask;
    type Update = UpdateTask;
    type View = TaskView;

    const NAME: &'static str = "Task";
    const TABLE: &'static str = "tasks";

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
        fields.extend(self.metadata.get("assigned_to").and_then(|v| v.as_str()));
        fields
    }

    fn to_view(&self) -> TaskView {
        TaskView {
            id: Some(self.id),
            title: self.title.clone(),
            description: self.description.clone().unwrap_or_default(),
            project_id: self.project_id,
            due_date: self
                .due_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: self.status,
            assigned_to: self.metadata.str_or_default("assigned_to"),
        }
    }

    fn default_view() -> TaskView {
        TaskView {
            id: None,
            title: String::new(),
            description: String::new(),
            project_id: None,
            due_date: String::new(),
            status: TaskStatus::default(),
            assigned_to: String::new(),
        }
    }

    fn validate_view(view: &TaskView) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if view.title.trim().is_empty() {
            errors.push(FieldError::required("title"));
        }
        if !view.due_date.trim().is_empty()
            && NaiveDate::parse_from_str(view.due_date.trim(), DATE_FORMAT).is_err()
        {
            errors.push(FieldError {
                field: "due_date",
                message: "due_date must be a YYYY-MM-DD date".into(),
            });
        }
        errors
    }

    fn create_from_view(view: &TaskView) -> CreateTask {
        let metadata = MetadataPatch::empty()
            .str("assigned_to", &view.assigned_to)
            .finish();
        CreateTask {
            title: view.title.clone(),
            description: none_if_empty(&view.description),
            project_id: view.project_id,
            due_date: NaiveDate::parse_from_str(view.due_date.trim(), DATE_FORMAT).ok(),
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &TaskView, base: &Task) -> UpdateTask {
        let metadata = MetadataPatch::over(&base.metadata)
            .str("assigned_to", &view.assigned_to)
            .finish();
        UpdateTask {
            title: none_if_empty(&view.title),
            description: none_if_empty(&view.description),
            project_id: view.project_id,
            due_date: NaiveDate::parse_from_str(view.due_date.trim(), DATE_FORMAT).ok(),
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}
