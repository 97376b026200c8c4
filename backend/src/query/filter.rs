use serde::{Deserialize, Serialize};

use super::{GroupKey, Record};

/// Optional equality constraint per field. An absent key lets every record through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub important_status: Option<String>,
    pub status: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: GroupKey) -> Option<&str> {
        match key {
            GroupKey::Category => self.category.as_deref(),
            GroupKey::SubCategory => self.sub_category.as_deref(),
            GroupKey::ImportantStatus => self.important_status.as_deref(),
            GroupKey::Status => self.status.as_deref(),
        }
    }

    /// Sets one constraint; `None` or an empty string removes it.
    /// Choosing a category always clears the sub-category.
    pub fn set(&mut self, key: GroupKey, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match key {
            GroupKey::Category => {
                self.category = value;
                self.sub_category = None;
            }
            GroupKey::SubCategory => self.sub_category = value,
            GroupKey::ImportantStatus => self.important_status = value,
            GroupKey::Status => self.status = value,
        }
    }

    pub fn with(mut self, key: GroupKey, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        GroupKey::ALL.iter().all(|k| self.get(*k).is_none())
    }

    /// Only the category constraint, used to derive sub-category options.
    pub fn category_only(&self) -> FilterSet {
        FilterSet {
            category: self.category.clone(),
            ..FilterSet::default()
        }
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        GroupKey::ALL.iter().all(|key| match self.get(*key) {
            None => true,
            Some(wanted) => record.field(*key) == Some(wanted),
        })
    }

    /// Matching records in source order.
    pub fn apply<'a, R: Record>(&self, items: &'a [R]) -> Vec<&'a R> {
        items.iter().filter(|r| self.matches(*r)).collect()
    }
}

/// Distinct non-empty values of `key`, in order of first appearance.
pub fn distinct_values<'a, R, I>(items: I, key: GroupKey) -> Vec<String>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let mut seen: Vec<String> = Vec::new();
    for value in items.into_iter().filter_map(|r| r.field(key)) {
        if !value.is_empty() && !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Sub-categories selectable under the current category choice.
pub fn sub_category_options<R: Record>(items: &[R], filter: &FilterSet) -> Vec<String> {
    let scoped = filter.category_only().apply(items);
    distinct_values(scoped, GroupKey::SubCategory)
}
