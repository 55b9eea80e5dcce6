//! Project entity model, DTOs, and view model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bureau_core::metadata::{Metadata, MetadataPatch};
use bureau_core::types::{RecordId, Timestamp};

use crate::kind::{none_if_empty, EntityKind, FieldError};
use crate::status::ProjectStatus;

/// Date format used by the date inputs (ISO 8601 calendar date).
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A project row from the hosted `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub client_id: Option<RecordId>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Defaults to `draft` if omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Normalized project shape for the form and detail screens. Dates are kept
/// as the input strings (`YYYY-MM-DD` or empty) so an in-progress edit is
/// representable; they parse on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub client_id: Option<RecordId>,
    pub budget: Option<f64>,
    pub start_date: String,
    pub end_date: String,
    pub status: ProjectStatus,
    pub team_members: Vec<String>,
    pub tags: Vec<String>,
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

impl EntityKind for Project {
    type Create = CreateProject;
    type Update = UpdateProject;
    type View = ProjectView;

    const NAME: &'static str = "Project";
    const TABLE: &'static str = "projects";

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

    fn to_view(&self) -> ProjectView {
        ProjectView {
            id: Some(self.id),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            client_id: self.client_id,
            budget: self.budget,
            start_date: format_date(self.start_date),
            end_date: format_date(self.end_date),
            status: self.status,
            team_members: self.metadata.list_or_default("team_members"),
            tags: self.metadata.list_or_default("tags"),
        }
    }

    fn default_view() -> ProjectView {
        ProjectView {
            id: None,
            name: String::new(),
            description: String::new(),
            client_id: None,
            budget: None,
            start_date: String::new(),
            end_date: String::new(),
            status: ProjectStatus::default(),
            team_members: Vec::new(),
            tags: Vec::new(),
        }
    }

    fn validate_view(view: &ProjectView) -> Vec<FieldError> {
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

    fn create_from_view(view: &ProjectView) -> CreateProject {
        let metadata = MetadataPatch::empty()
            .string_list("team_members", &view.team_members)
            .string_list("tags", &view.tags)
            .finish();
        CreateProject {
            name: view.name.clone(),
            description: none_if_empty(&view.description),
            client_id: view.client_id,
            budget: view.budget,
            start_date: parse_date(&view.start_date),
            end_date: parse_date(&view.end_date),
            status: Some(view.status),
            metadata: (!metadata.is_empty()).then_some(metadata),
        }
    }

    fn patch_from_view(view: &ProjectView, base: &Project) -> UpdateProject {
        let metadata = MetadataPatch::over(&base.metadata)
            .string_list("team_members", &view.team_members)
            .string_list("tags", &view.tags)
            .finish();
        UpdateProject {
            name: none_if_empty(&view.name),
            description: none_if_empty(&view.description),
            client_id: view.client_id,
            budget: view.budget,
            start_date: parse_date(&view.start_date),
            end_date: parse_date(&view.end_date),
            status: Some(view.status),
            metadata: Some(metadata),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_format_and_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(format_date(Some(date)), "2026-03-15");
        assert_eq!(parse_date("2026-03-15"), Some(date));
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("15/03/2026"), None);
    }

    #[test]
    fn malformed_date_is_a_validation_error_not_a_silent_drop() {
        let mut view = Project::default_view();
        view.name = "Refonte".into();
        view.start_date = "next tuesday".into();
        let errors = Project::validate_view(&view);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "start_date");
    }

    #[test]
    fn empty_budget_never_becomes_zero() {
        let mut view = Project::default_view();
        view.name = "Refonte".into();
        let create = Project::create_from_view(&view);
        assert_eq!(create.budget, None);
    }
}
