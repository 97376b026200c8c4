use serde::{Deserialize, Serialize};

use super::{GroupKey, Record};
use crate::models::Course;

/// Bucket label for records with no value under the grouping key.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

/// Counts records per distinct value of `key`, groups ordered by first encounter.
pub fn group_counts<'a, R, I>(items: I, key: GroupKey) -> Vec<GroupCount>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut groups: Vec<GroupCount> = Vec::new();
    for record in items {
        let label = record.field(key).filter(|v| !v.is_empty()).unwrap_or(UNKNOWN);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.count += 1,
            None => groups.push(GroupCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    groups
}

/// Number of records whose `key` equals `selected`. Nothing selected counts nothing.
pub fn count_matching<'a, R, I>(items: I, key: GroupKey, selected: Option<&str>) -> usize
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let Some(selected) = selected else {
        return 0;
    };
    items
        .into_iter()
        .filter(|r| r.field(key) == Some(selected))
        .count()
}

/// One bar-chart series: parallel label and value vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub key: GroupKey,
    pub labels: Vec<String>,
    pub data: Vec<usize>,
}

pub fn chart_series<'a, R, I>(items: I, key: GroupKey, noun: &str) -> ChartSeries
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let (labels, data): (Vec<String>, Vec<usize>) = group_counts(items, key)
        .into_iter()
        .map(|g| (g.label, g.count))
        .unzip();

    ChartSeries {
        title: format!("{} by {}", noun, key.title()),
        key,
        labels,
        data,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub sub_categories: Vec<String>,
    pub course_count: usize,
    pub total_hours: f64,
}

/// Per-category metadata in first-encounter order.
pub fn category_summaries(courses: &[Course]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();
    for course in courses {
        let idx = match summaries.iter().position(|s| s.category == course.category) {
            Some(idx) => idx,
            None => {
                summaries.push(CategorySummary {
                    category: course.category.clone(),
                    sub_categories: Vec::new(),
                    course_count: 0,
                    total_hours: 0.0,
                });
                summaries.len() - 1
            }
        };

        let summary = &mut summaries[idx];
        summary.course_count += 1;
        summary.total_hours += course.duration_in_hours;
        if let Some(sub) = course.sub_category.as_deref().filter(|s| !s.is_empty()) {
            if !summary.sub_categories.iter().any(|s| s == sub) {
                summary.sub_categories.push(sub.to_string());
            }
        }
    }
    summaries
}
