use std::sync::Arc;

use tracing::{error, info};

use super::{ClientError, ConfirmationGuard, TrackerApi};
use crate::models::{NewProject, Project};
use crate::query::{
    FilterSet, GroupKey, PAGE_SIZE, Page, PageSession, clamp_page, distinct_values, paginate,
    sub_category_options,
};

/// Session key under which the project page number is remembered.
pub const PROJECT_PAGE_VIEW: &str = "currentProjectPage";

/// Side effect the view must perform after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    ScrollToTop,
}

/// Project list page: collection, category filters, paging, and guarded mutations.
pub struct ProjectBoard {
    api: Arc<dyn TrackerApi>,
    guard: ConfirmationGuard,
    projects: Vec<Project>,
    filter: FilterSet,
}

impl ProjectBoard {
    pub fn new(api: Arc<dyn TrackerApi>, guard: ConfirmationGuard) -> Self {
        Self {
            api,
            guard,
            projects: Vec::new(),
            filter: FilterSet::default(),
        }
    }

    /// Replaces the local collection with the server's. On failure the old collection stays.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.api.list_projects().await {
            Ok(projects) => {
                self.projects = projects;
                Ok(())
            }
            Err(e) => {
                error!("Error fetching projects: {}", e);
                Err(e)
            }
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn filter(&self) -> &FilterSet {
        &self.filter
    }

    /// Also clears the sub-category choice.
    pub fn select_category(&mut self, category: Option<String>) {
        self.filter.set(GroupKey::Category, category);
    }

    pub fn select_sub_category(&mut self, sub_category: Option<String>) {
        self.filter.set(GroupKey::SubCategory, sub_category);
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_values(&self.projects, GroupKey::Category)
    }

    pub fn sub_categories(&self) -> Vec<String> {
        sub_category_options(&self.projects, &self.filter)
    }

    pub fn filtered(&self) -> Vec<&Project> {
        self.filter.apply(&self.projects)
    }

    /// The page stored in `session`, clamped to what the filtered list can show.
    pub fn page(&self, session: &PageSession) -> Page<&Project> {
        paginate(&self.filtered(), session.current(PROJECT_PAGE_VIEW), PAGE_SIZE)
    }

    pub fn go_to_page(&self, session: &mut PageSession, requested: usize) -> ViewEffect {
        let page = clamp_page(requested, self.filtered().len(), PAGE_SIZE);
        session.set(PROJECT_PAGE_VIEW, page);
        ViewEffect::ScrollToTop
    }

    pub async fn add(
        &mut self,
        stored_secret: Option<&str>,
        project: NewProject,
    ) -> Result<&Project, ClientError> {
        self.guard.check(stored_secret)?;

        let created = self.api.create_project(&project).await.map_err(|e| {
            error!("Error adding project: {}", e);
            e
        })?;
        info!("added project {}", created.id);
        self.projects.push(created);
        Ok(&self.projects[self.projects.len() - 1])
    }

    pub async fn update(
        &mut self,
        stored_secret: Option<&str>,
        project: Project,
    ) -> Result<&Project, ClientError> {
        self.guard.check(stored_secret)?;

        let updated = self.api.update_project(&project).await.map_err(|e| {
            error!("Error updating project: {}", e);
            e
        })?;
        let idx = match self.projects.iter().position(|p| p.id == updated.id) {
            Some(idx) => {
                self.projects[idx] = updated;
                idx
            }
            None => {
                self.projects.push(updated);
                self.projects.len() - 1
            }
        };
        Ok(&self.projects[idx])
    }

    pub async fn remove(&mut self, stored_secret: Option<&str>, id: &str) -> Result<(), ClientError> {
        self.guard.check(stored_secret)?;

        self.api.delete_project(id).await.map_err(|e| {
            error!("Error deleting project: {}", e);
            e
        })?;
        self.projects.retain(|p| p.id != id);
        info!("removed project {}", id);
        Ok(())
    }
}
