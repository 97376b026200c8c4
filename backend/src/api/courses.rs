use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::Value;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Course, CourseNote, CoursePatch, NewCourse, NewNote, Note};
use crate::state::AppState;

pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = repository::fetch_course(&state.db, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

pub async fn create_course(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let Json(body) = body?;
    let req = NewCourse::from_json(&body)?;
    let course = repository::insert_course(&state.db, req).await?;
    info!("created course {} ({})", course.id, course.name);
    Ok((StatusCode::CREATED, Json(course)))
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Course>, AppError> {
    let Json(body) = body?;
    let patch = CoursePatch::from_json(&body)?;
    let course = repository::update_course(&state.db, &id, patch)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course))
}

pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if repository::delete_course(&state.db, &id).await? {
        info!("deleted course {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

pub async fn list_course_notes(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<Note>>, AppError> {
    let course = repository::fetch_course(&state.db, &course_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(course.notes))
}

pub async fn add_course_note(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let Json(body) = body?;
    let req = NewNote::from_json(&body)?;
    append(&state, &course_id, req).await
}

pub async fn list_all_notes(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseNote>>, AppError> {
    let notes = repository::fetch_courses(&state.db)
        .await?
        .into_iter()
        .flat_map(|course| {
            let Course { id, name, notes, .. } = course;
            notes.into_iter().map(move |note| CourseNote {
                course_id: id.clone(),
                course_name: name.clone(),
                note,
            })
        })
        .collect();
    Ok(Json(notes))
}

/// `POST /notes` carries the parent course in the body as `courseId`.
pub async fn add_note(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let Json(body) = body?;
    let course_id = body.get("courseId").and_then(Value::as_str).map(str::to_string);
    let note = NewNote::from_json(&body);

    let (course_id, req) = match (course_id, note) {
        (Some(id), Ok(req)) => (id, req),
        (course_id, note) => {
            let mut errors = note.err().unwrap_or_default();
            if course_id.is_none() {
                errors.push("courseId", "is required");
            }
            return Err(AppError::Validation(errors));
        }
    };
    append(&state, &course_id, req).await
}

async fn append(
    state: &AppState,
    course_id: &str,
    req: NewNote,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = repository::append_note(&state.db, course_id, req)
        .await?
        .ok_or(AppError::NotFound)?;
    info!("appended note to course {} ({} notes)", course.id, course.notes.len());
    Ok((StatusCode::CREATED, Json(course)))
}
