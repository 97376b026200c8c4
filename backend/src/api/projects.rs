use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{NewProject, Project, ProjectPatch};
use crate::state::AppState;

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = repository::fetch_projects(&state.db).await?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    let project = repository::fetch_project(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(project))
}

pub async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let Json(body) = body?;
    let req = NewProject::from_json(&body)?;
    let project = repository::insert_project(&state.db, req).await?;
    info!("created project {} ({})", project.id, project.title);
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Project>, AppError> {
    let Json(body) = body?;
    let patch = ProjectPatch::from_json(&body)?;
    let project = repository::update_project(&state.db, &id, patch)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(project))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ok = repository::delete_project(&state.db, &id).await?;
    if ok {
        info!("deleted project {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
