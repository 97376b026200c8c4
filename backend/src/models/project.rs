use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{Fields, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    pub link: Option<String>,
    pub live_demo: Option<String>,
}

impl Project {
    pub fn from_new(id: String, req: NewProject) -> Self {
        Self {
            id,
            title: req.title,
            description: req.description,
            category: req.category,
            sub_category: req.sub_category,
            tech: req.tech,
            link: req.link,
            live_demo: req.live_demo,
        }
    }

    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(sub_category) = patch.sub_category {
            self.sub_category = sub_category;
        }
        if let Some(tech) = patch.tech {
            self.tech = tech;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
        if let Some(live_demo) = patch.live_demo {
            self.live_demo = live_demo;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub tech: Vec<String>,
    pub link: Option<String>,
    pub live_demo: Option<String>,
}

impl NewProject {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::object(body)?;

        let title = fields.required_string("title");
        let description = fields.optional_string("description");
        let category = fields.optional_string("category");
        let sub_category = fields.optional_string("subCategory");
        let tech = fields.string_list("tech").unwrap_or_default();
        let link = fields.optional_string("link");
        let live_demo = fields.optional_string("liveDemo");

        let project = title.map(|title| Self {
            title,
            description,
            category,
            sub_category,
            tech,
            link,
            live_demo,
        });
        fields.finish_with(project)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub sub_category: Option<Option<String>>,
    pub tech: Option<Vec<String>>,
    pub link: Option<Option<String>>,
    pub live_demo: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut fields = Fields::object(body)?;

        let patch = Self {
            title: fields.has("title").then(|| fields.required_string("title")).flatten(),
            description: fields.nullable_string("description"),
            category: fields.nullable_string("category"),
            sub_category: fields.nullable_string("subCategory"),
            tech: fields.string_list("tech"),
            link: fields.nullable_string("link"),
            live_demo: fields.nullable_string("liveDemo"),
        };

        fields.finish(patch)
    }
}
