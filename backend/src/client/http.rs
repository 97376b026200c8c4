use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use super::{ClientError, TrackerApi};
use crate::error::ErrorResponse;
use crate::models::{Course, NewCourse, NewNote, NewProject, Project};

pub struct HttpTrackerApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTrackerApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn check(&self, response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (message, fields) = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(parsed) => (parsed.message, parsed.fields),
            Err(_) => (body, Vec::new()),
        };
        error!("API error {}: {}", status, message);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
            fields,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let response = self.check(req.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), ClientError> {
        self.check(req.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl TrackerApi for HttpTrackerApi {
    async fn list_courses(&self) -> Result<Vec<Course>, ClientError> {
        debug!("GET /courses");
        self.send_json(self.client.get(self.url("/courses"))).await
    }

    async fn get_course(&self, id: &str) -> Result<Course, ClientError> {
        self.send_json(self.client.get(self.url(&format!("/courses/{}", id))))
            .await
    }

    async fn create_course(&self, course: &NewCourse) -> Result<Course, ClientError> {
        let req = self.client.post(self.url("/courses")).json(course);
        self.send_json(self.authorized(req)).await
    }

    async fn update_course(&self, id: &str, changes: &Value) -> Result<Course, ClientError> {
        let req = self
            .client
            .put(self.url(&format!("/courses/{}", id)))
            .json(changes);
        self.send_json(self.authorized(req)).await
    }

    async fn delete_course(&self, id: &str) -> Result<(), ClientError> {
        let req = self.client.delete(self.url(&format!("/courses/{}", id)));
        self.send_empty(self.authorized(req)).await
    }

    async fn add_note(&self, course_id: &str, note: &NewNote) -> Result<Course, ClientError> {
        let req = self
            .client
            .post(self.url(&format!("/courses/{}/notes", course_id)))
            .json(note);
        self.send_json(self.authorized(req)).await
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        debug!("GET /project");
        self.send_json(self.client.get(self.url("/project"))).await
    }

    async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        let req = self.client.post(self.url("/project")).json(project);
        self.send_json(self.authorized(req)).await
    }

    async fn update_project(&self, project: &Project) -> Result<Project, ClientError> {
        let req = self
            .client
            .put(self.url(&format!("/project/{}", project.id)))
            .json(project);
        self.send_json(self.authorized(req)).await
    }

    async fn delete_project(&self, id: &str) -> Result<(), ClientError> {
        let req = self.client.delete(self.url(&format!("/project/{}", id)));
        self.send_empty(self.authorized(req)).await
    }
}
