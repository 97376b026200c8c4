use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{Fields, ValidationErrors};

/// A question/answer pair. Only ever lives inside its course's `notes` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(req: NewNote, now: DateTime<Utc>) -> Self {
        Self {
            question: req.question,
            answer: req.answer,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub question: String,
    pub answer: String,
}

impl NewNote {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::object(body)?;
        let note = Self::read(&mut fields);
        fields.finish_with(note)
    }

    pub(crate) fn read(fields: &mut Fields<'_>) -> Option<Self> {
        let question = fields.required_string("question");
        let answer = fields.required_string("answer");
        Some(Self {
            question: question?,
            answer: answer?,
        })
    }
}

/// A note flattened out of its course for the `/notes` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseNote {
    pub course_id: String,
    pub course_name: String,
    #[serde(flatten)]
    pub note: Note,
}
