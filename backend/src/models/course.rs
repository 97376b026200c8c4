use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::note::{NewNote, Note};
use super::validation::{Fields, ValidationErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryPriority {
    #[serde(rename = "High priority")]
    High,
    #[default]
    #[serde(rename = "Medium priority")]
    Medium,
    #[serde(rename = "Low priority")]
    Low,
}

impl CategoryPriority {
    pub const ALL: [CategoryPriority; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High priority",
            Self::Medium => "Medium priority",
            Self::Low => "Low priority",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportantStatus {
    Important,
    #[default]
    Normal,
}

impl ImportantStatus {
    pub const ALL: [ImportantStatus; 2] = [Self::Important, Self::Normal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Important => "Important",
            Self::Normal => "Normal",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseStatus {
    #[default]
    #[serde(rename = "Not Started Yet")]
    NotStartedYet,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 3] = [Self::NotStartedYet, Self::InProgress, Self::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStartedYet => "Not Started Yet",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// Rejected enum input, carrying the accepted spellings for the error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub expected: Vec<&'static str>,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "must be one of: {}", self.expected.join(", "))
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! impl_str_enum {
    ($($ty:ty),*) => {$(
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        expected: <$ty>::ALL.iter().map(|v| v.as_str()).collect(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

impl_str_enum!(CategoryPriority, ImportantStatus, CourseStatus);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub no: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub category_priority: CategoryPriority,
    pub sub_category: Option<String>,
    pub sub_sub_category: Option<String>,
    #[serde(default)]
    pub important_status: ImportantStatus,
    #[serde(default)]
    pub status: CourseStatus,
    pub duration_in_hours: f64,
    #[serde(default)]
    pub sub_learning_skills_set: Vec<String>,
    pub learning_skills_set: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    pub date_added: DateTime<Utc>,
}

impl Course {
    /// Builds the stored record for a validated payload, stamping `dateAdded`.
    pub fn from_new(id: String, req: NewCourse, now: DateTime<Utc>) -> Self {
        Self {
            id,
            no: req.no,
            name: req.name,
            category: req.category,
            category_priority: req.category_priority,
            sub_category: req.sub_category,
            sub_sub_category: req.sub_sub_category,
            important_status: req.important_status,
            status: req.status,
            duration_in_hours: req.duration_in_hours,
            sub_learning_skills_set: req.sub_learning_skills_set,
            learning_skills_set: req.learning_skills_set,
            notes: req
                .notes
                .into_iter()
                .map(|n| Note::new(n, now))
                .collect(),
            date_added: now,
        }
    }

    /// Merges the fields present in `patch`. Identity, `dateAdded` and notes never change here.
    pub fn apply(&mut self, patch: CoursePatch) {
        if let Some(no) = patch.no {
            self.no = no;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(priority) = patch.category_priority {
            self.category_priority = priority;
        }
        if let Some(sub_category) = patch.sub_category {
            self.sub_category = sub_category;
        }
        if let Some(sub_sub_category) = patch.sub_sub_category {
            self.sub_sub_category = sub_sub_category;
        }
        if let Some(important_status) = patch.important_status {
            self.important_status = important_status;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(hours) = patch.duration_in_hours {
            self.duration_in_hours = hours;
        }
        if let Some(skills) = patch.sub_learning_skills_set {
            self.sub_learning_skills_set = skills;
        }
        if let Some(skills) = patch.learning_skills_set {
            self.learning_skills_set = skills;
        }
    }
}

/// A create request that passed validation. Enum fields already carry their defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub no: i64,
    pub name: String,
    pub category: String,
    pub category_priority: CategoryPriority,
    pub sub_category: Option<String>,
    pub sub_sub_category: Option<String>,
    pub important_status: ImportantStatus,
    pub status: CourseStatus,
    pub duration_in_hours: f64,
    pub sub_learning_skills_set: Vec<String>,
    pub learning_skills_set: Option<String>,
    pub notes: Vec<NewNote>,
}

impl NewCourse {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::object(body)?;

        let no = fields.required_integer("no");
        let name = fields.required_string("name");
        let category = fields.required_string("category");
        let category_priority = fields.optional_enum("categoryPriority").unwrap_or_default();
        let sub_category = fields.optional_string("subCategory");
        let sub_sub_category = fields.optional_string("subSubCategory");
        let important_status = fields.optional_enum("importantStatus").unwrap_or_default();
        let status = fields.optional_enum("status").unwrap_or_default();
        let duration_in_hours = fields.required_non_negative("durationInHours");
        let sub_learning_skills_set = fields.string_list("subLearningSkillsSet").unwrap_or_default();
        let learning_skills_set = fields.optional_string("learningSkillsSet");
        let notes = fields.list_of("notes", NewNote::read).unwrap_or_default();
        let errors = fields.into_errors();

        match (no, name, category, duration_in_hours) {
            (Some(no), Some(name), Some(category), Some(duration_in_hours)) if errors.is_empty() => {
                Ok(Self {
                    no,
                    name,
                    category,
                    category_priority,
                    sub_category,
                    sub_sub_category,
                    important_status,
                    status,
                    duration_in_hours,
                    sub_learning_skills_set,
                    learning_skills_set,
                    notes,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Partial update. `None` leaves a field unchanged; `Some(None)` clears an optional one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub no: Option<i64>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub category_priority: Option<CategoryPriority>,
    pub sub_category: Option<Option<String>>,
    pub sub_sub_category: Option<Option<String>>,
    pub important_status: Option<ImportantStatus>,
    pub status: Option<CourseStatus>,
    pub duration_in_hours: Option<f64>,
    pub sub_learning_skills_set: Option<Vec<String>>,
    pub learning_skills_set: Option<Option<String>>,
}

impl CoursePatch {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::object(body)?;

        let patch = Self {
            no: fields.has("no").then(|| fields.required_integer("no")).flatten(),
            name: fields.has("name").then(|| fields.required_string("name")).flatten(),
            category: fields
                .has("category")
                .then(|| fields.required_string("category"))
                .flatten(),
            category_priority: fields.optional_enum("categoryPriority"),
            sub_category: fields.nullable_string("subCategory"),
            sub_sub_category: fields.nullable_string("subSubCategory"),
            important_status: fields.optional_enum("importantStatus"),
            status: fields.optional_enum("status"),
            duration_in_hours: fields
                .has("durationInHours")
                .then(|| fields.required_non_negative("durationInHours"))
                .flatten(),
            sub_learning_skills_set: fields.string_list("subLearningSkillsSet"),
            learning_skills_set: fields.nullable_string("learningSkillsSet"),
        };

        fields.finish(patch)
    }
}
