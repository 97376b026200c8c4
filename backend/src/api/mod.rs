mod auth;
mod courses;
mod projects;

use axum::http::{Method, header};
use axum::{Json, Router, extract::State, http::StatusCode, middleware, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::repository;
use crate::error::AppError;
use crate::query::{CategorySummary, category_summaries};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/courses", get(courses::list_courses).post(courses::create_course))
        .route(
            "/courses/{id}",
            get(courses::get_course)
                .put(courses::update_course)
                .delete(courses::delete_course),
        )
        .route(
            "/courses/{course_id}/notes",
            get(courses::list_course_notes).post(courses::add_course_note),
        )
        .route("/notes", get(courses::list_all_notes).post(courses::add_note))
        .route("/main-category", get(main_categories))
        .route("/project", get(projects::list_projects).post(projects::create_project))
        .route(
            "/project/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_token))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Welcome to the API!"
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn main_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategorySummary>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(category_summaries(&courses)))
}
