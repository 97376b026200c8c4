use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use super::{ClientError, ConfirmationGuard, Dashboard, TrackerApi};
use crate::models::{Course, NewCourse, NewNote};

/// Course forms: every write is confirmed first, then mirrored into the dashboard.
pub struct CourseEditor {
    api: Arc<dyn TrackerApi>,
    guard: ConfirmationGuard,
}

impl CourseEditor {
    pub fn new(api: Arc<dyn TrackerApi>, guard: ConfirmationGuard) -> Self {
        Self { api, guard }
    }

    pub async fn add(
        &self,
        dashboard: &mut Dashboard,
        stored_secret: Option<&str>,
        course: &NewCourse,
    ) -> Result<Course, ClientError> {
        self.guard.check(stored_secret)?;

        let created = self.api.create_course(course).await.map_err(|e| {
            error!("Error adding course: {}", e);
            e
        })?;
        info!("added course {}", created.id);
        dashboard.upsert(created.clone());
        Ok(created)
    }

    pub async fn update(
        &self,
        dashboard: &mut Dashboard,
        stored_secret: Option<&str>,
        id: &str,
        changes: &Value,
    ) -> Result<Course, ClientError> {
        self.guard.check(stored_secret)?;

        let updated = self.api.update_course(id, changes).await.map_err(|e| {
            error!("Error updating course: {}", e);
            e
        })?;
        dashboard.upsert(updated.clone());
        Ok(updated)
    }

    pub async fn remove(
        &self,
        dashboard: &mut Dashboard,
        stored_secret: Option<&str>,
        id: &str,
    ) -> Result<(), ClientError> {
        self.guard.check(stored_secret)?;

        self.api.delete_course(id).await.map_err(|e| {
            error!("Error deleting course: {}", e);
            e
        })?;
        dashboard.remove(id);
        info!("removed course {}", id);
        Ok(())
    }

    pub async fn add_note(
        &self,
        dashboard: &mut Dashboard,
        stored_secret: Option<&str>,
        course_id: &str,
        note: &NewNote,
    ) -> Result<Course, ClientError> {
        self.guard.check(stored_secret)?;

        let course = self.api.add_note(course_id, note).await.map_err(|e| {
            error!("Error adding note: {}", e);
            e
        })?;
        dashboard.upsert(course.clone());
        Ok(course)
    }
}
