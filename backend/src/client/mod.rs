//! Presentation-side logic: talks to the API over HTTP and derives the views
//! the dashboard and project pages render.

pub mod board;
pub mod dashboard;
pub mod editor;
pub mod guard;
pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Course, FieldError, NewCourse, NewNote, NewProject, Project};

pub use board::{PROJECT_PAGE_VIEW, ProjectBoard, ViewEffect};
pub use dashboard::{Dashboard, DashboardView, FilterOptions, SelectionCount};
pub use editor::CourseEditor;
pub use guard::{ConfirmationGuard, DENIAL_MESSAGE};
pub use http::HttpTrackerApi;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded {status}: {message}")]
    Status {
        status: u16,
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("{0}")]
    AccessDenied(&'static str),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

/// One request/response round trip per call. No retries, no de-duplication.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ClientError>;
    async fn get_course(&self, id: &str) -> Result<Course, ClientError>;
    async fn create_course(&self, course: &NewCourse) -> Result<Course, ClientError>;
    async fn update_course(&self, id: &str, changes: &Value) -> Result<Course, ClientError>;
    async fn delete_course(&self, id: &str) -> Result<(), ClientError>;
    async fn add_note(&self, course_id: &str, note: &NewNote) -> Result<Course, ClientError>;
    async fn list_projects(&self) -> Result<Vec<Project>, ClientError>;
    async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError>;
    async fn update_project(&self, project: &Project) -> Result<Project, ClientError>;
    async fn delete_project(&self, id: &str) -> Result<(), ClientError>;
}
