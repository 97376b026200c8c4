use serde::Serialize;
use tracing::error;

use super::{ClientError, TrackerApi};
use crate::models::Course;
use crate::query::{
    ChartSeries, FilterSet, GroupKey, chart_series, count_matching, distinct_values,
    sub_category_options,
};

/// Values offered by each filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
    pub important_statuses: Vec<String>,
    pub statuses: Vec<String>,
}

/// Counter card: how many filtered courses hold the selected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionCount {
    pub key: GroupKey,
    pub selected: Option<String>,
    pub count: usize,
}

/// Everything the overview page renders, derived in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub total_courses: usize,
    pub total_hours: f64,
    pub options: FilterOptions,
    pub counters: Vec<SelectionCount>,
    pub charts: Vec<ChartSeries>,
}

/// Course overview: the fetched collection plus the active filter set.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    courses: Vec<Course>,
    filter: FilterSet,
}

impl Dashboard {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            filter: FilterSet::default(),
        }
    }

    pub async fn load(api: &dyn TrackerApi) -> Result<Self, ClientError> {
        let courses = api.list_courses().await.map_err(|e| {
            error!("Error fetching courses: {}", e);
            e
        })?;
        Ok(Self::new(courses))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Replaces the course with the same id, or appends it.
    pub(crate) fn upsert(&mut self, course: Course) {
        match self.courses.iter_mut().find(|c| c.id == course.id) {
            Some(slot) => *slot = course,
            None => self.courses.push(course),
        }
    }

    pub(crate) fn remove(&mut self, id: &str) {
        self.courses.retain(|c| c.id != id);
    }

    pub fn filter(&self) -> &FilterSet {
        &self.filter
    }

    pub fn select(&mut self, key: GroupKey, value: Option<String>) {
        self.filter.set(key, value);
    }

    pub fn filtered(&self) -> Vec<&Course> {
        self.filter.apply(&self.courses)
    }

    pub fn total_courses(&self) -> usize {
        self.courses.len()
    }

    pub fn total_hours(&self) -> f64 {
        self.courses.iter().map(|c| c.duration_in_hours).sum()
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions {
            categories: distinct_values(&self.courses, GroupKey::Category),
            sub_categories: sub_category_options(&self.courses, &self.filter),
            important_statuses: distinct_values(&self.courses, GroupKey::ImportantStatus),
            statuses: distinct_values(&self.courses, GroupKey::Status),
        }
    }

    pub fn counters(&self) -> Vec<SelectionCount> {
        let filtered = self.filtered();
        GroupKey::ALL
            .iter()
            .map(|key| {
                let selected = self.filter.get(*key);
                SelectionCount {
                    key: *key,
                    selected: selected.map(str::to_string),
                    count: count_matching(filtered.iter().copied(), *key, selected),
                }
            })
            .collect()
    }

    pub fn chart(&self, key: GroupKey) -> ChartSeries {
        chart_series(self.filtered(), key, "Courses")
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            total_courses: self.total_courses(),
            total_hours: self.total_hours(),
            options: self.options(),
            counters: self.counters(),
            charts: GroupKey::ALL.iter().map(|key| self.chart(*key)).collect(),
        }
    }
}
