//! Derived views over a fetched collection: equality filters, grouped counts
//! for charts and counters, and fixed-size pagination.
//!
//! Nothing here is cached. Callers recompute from the current collection and
//! filter set on every change.

pub mod aggregate;
pub mod filter;
pub mod pagination;

use serde::{Deserialize, Serialize};

use crate::models::{Course, Project};

pub use aggregate::{CategorySummary, ChartSeries, GroupCount, UNKNOWN, category_summaries, chart_series, count_matching, group_counts};
pub use filter::{FilterSet, distinct_values, sub_category_options};
pub use pagination::{PAGE_SIZE, Page, PageSession, clamp_page, paginate, total_pages};

/// Field a collection can be filtered or bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupKey {
    Category,
    SubCategory,
    ImportantStatus,
    Status,
}

impl GroupKey {
    pub const ALL: [GroupKey; 4] = [
        Self::Category,
        Self::SubCategory,
        Self::ImportantStatus,
        Self::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::SubCategory => "subCategory",
            Self::ImportantStatus => "importantStatus",
            Self::Status => "status",
        }
    }

    /// Capitalised key, as used in chart titles ("Courses by SubCategory").
    pub fn title(&self) -> String {
        let key = self.as_str();
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// A record whose fields can be read by [`GroupKey`].
pub trait Record {
    fn field(&self, key: GroupKey) -> Option<&str>;
}

impl Record for Course {
    fn field(&self, key: GroupKey) -> Option<&str> {
        match key {
            GroupKey::Category => Some(self.category.as_str()),
            GroupKey::SubCategory => self.sub_category.as_deref(),
            GroupKey::ImportantStatus => Some(self.important_status.as_str()),
            GroupKey::Status => Some(self.status.as_str()),
        }
    }
}

impl Record for Project {
    fn field(&self, key: GroupKey) -> Option<&str> {
        match key {
            GroupKey::Category => self.category.as_deref(),
            GroupKey::SubCategory => self.sub_category.as_deref(),
            GroupKey::ImportantStatus | GroupKey::Status => None,
        }
    }
}

impl<R: Record> Record for &R {
    fn field(&self, key: GroupKey) -> Option<&str> {
        (**self).field(key)
    }
}
