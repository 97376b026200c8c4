use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, SqliteExecutor, SqlitePool};
use uuid::Uuid;

use crate::models::{
    Course, CoursePatch, NewCourse, NewNote, NewProject, Note, Project, ProjectPatch,
};

const COURSE_COLUMNS: &str = r#"
    id, "no", name, category, category_priority, sub_category, sub_sub_category,
    important_status, status, duration_in_hours, sub_learning_skills_set,
    learning_skills_set, notes, date_added
"#;

const PROJECT_COLUMNS: &str = r#"
    id, title, description, category, sub_category, tech, link, live_demo
"#;

#[derive(Debug, FromRow)]
struct CourseRow {
    id: String,
    no: i64,
    name: String,
    category: String,
    category_priority: String,
    sub_category: Option<String>,
    sub_sub_category: Option<String>,
    important_status: String,
    status: String,
    duration_in_hours: f64,
    sub_learning_skills_set: Json<Vec<String>>,
    learning_skills_set: Option<String>,
    notes: Json<Vec<Note>>,
    date_added: DateTime<Utc>,
}

impl TryFrom<CourseRow> for Course {
    type Error = sqlx::Error;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        let decode = |e: crate::models::course::UnknownVariant| sqlx::Error::Decode(Box::new(e));
        Ok(Course {
            id: row.id,
            no: row.no,
            name: row.name,
            category: row.category,
            category_priority: row.category_priority.parse().map_err(decode)?,
            sub_category: row.sub_category,
            sub_sub_category: row.sub_sub_category,
            important_status: row.important_status.parse().map_err(decode)?,
            status: row.status.parse().map_err(decode)?,
            duration_in_hours: row.duration_in_hours,
            sub_learning_skills_set: row.sub_learning_skills_set.0,
            learning_skills_set: row.learning_skills_set,
            notes: row.notes.0,
            date_added: row.date_added,
        })
    }
}

#[derive(Debug, FromRow)]
struct ProjectRow {
    id: String,
    title: String,
    description: Option<String>,
    category: Option<String>,
    sub_category: Option<String>,
    tech: Json<Vec<String>>,
    link: Option<String>,
    live_demo: Option<String>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            sub_category: row.sub_category,
            tech: row.tech.0,
            link: row.link,
            live_demo: row.live_demo,
        }
    }
}

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    let sql = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY rowid");
    sqlx::query_as::<_, CourseRow>(&sql)
        .fetch_all(db)
        .await?
        .into_iter()
        .map(Course::try_from)
        .collect()
}

pub async fn fetch_course<'e>(
    db: impl SqliteExecutor<'e>,
    id: &str,
) -> Result<Option<Course>, sqlx::Error> {
    let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?1");
    sqlx::query_as::<_, CourseRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(Course::try_from)
        .transpose()
}

pub async fn insert_course(db: &SqlitePool, req: NewCourse) -> Result<Course, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let course = Course::from_new(id, req, Utc::now());

    sqlx::query(
        r#"
        INSERT INTO courses
            (id, "no", name, category, category_priority, sub_category, sub_sub_category,
            important_status, status, duration_in_hours, sub_learning_skills_set,
            learning_skills_set, notes, date_added)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        "#,
    )
    .bind(&course.id)
    .bind(course.no)
    .bind(&course.name)
    .bind(&course.category)
    .bind(course.category_priority.as_str())
    .bind(&course.sub_category)
    .bind(&course.sub_sub_category)
    .bind(course.important_status.as_str())
    .bind(course.status.as_str())
    .bind(course.duration_in_hours)
    .bind(Json(&course.sub_learning_skills_set))
    .bind(&course.learning_skills_set)
    .bind(Json(&course.notes))
    .bind(course.date_added)
    .execute(db)
    .await?;

    Ok(course)
}

/// Rewrites every mutable column of an existing course row. `dateAdded` is never touched.
async fn write_course<'e>(db: impl SqliteExecutor<'e>, course: &Course) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE courses
        SET "no" = ?1,
            name = ?2,
            category = ?3,
            category_priority = ?4,
            sub_category = ?5,
            sub_sub_category = ?6,
            important_status = ?7,
            status = ?8,
            duration_in_hours = ?9,
            sub_learning_skills_set = ?10,
            learning_skills_set = ?11,
            notes = ?12
        WHERE id = ?13
        "#,
    )
    .bind(course.no)
    .bind(&course.name)
    .bind(&course.category)
    .bind(course.category_priority.as_str())
    .bind(&course.sub_category)
    .bind(&course.sub_sub_category)
    .bind(course.important_status.as_str())
    .bind(course.status.as_str())
    .bind(course.duration_in_hours)
    .bind(Json(&course.sub_learning_skills_set))
    .bind(&course.learning_skills_set)
    .bind(Json(&course.notes))
    .bind(&course.id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn update_course(
    db: &SqlitePool,
    id: &str,
    patch: CoursePatch,
) -> Result<Option<Course>, sqlx::Error> {
    let mut tx = db.begin_with("BEGIN IMMEDIATE").await?;

    let mut current = match fetch_course(&mut *tx, id).await? {
        Some(c) => c,
        None => return Ok(None),
    };
    current.apply(patch);
    write_course(&mut *tx, &current).await?;

    tx.commit().await?;
    Ok(Some(current))
}

/// Appends one note to the course's embedded list; the whole row is rewritten in one statement.
pub async fn append_note(
    db: &SqlitePool,
    course_id: &str,
    req: NewNote,
) -> Result<Option<Course>, sqlx::Error> {
    let mut tx = db.begin_with("BEGIN IMMEDIATE").await?;

    let mut current = match fetch_course(&mut *tx, course_id).await? {
        Some(c) => c,
        None => return Ok(None),
    };
    current.notes.push(Note::new(req, Utc::now()));
    write_course(&mut *tx, &current).await?;

    tx.commit().await?;
    Ok(Some(current))
}

pub async fn delete_course(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn fetch_projects(db: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY rowid");
    let rows = sqlx::query_as::<_, ProjectRow>(&sql).fetch_all(db).await?;
    Ok(rows.into_iter().map(Project::from).collect())
}

pub async fn fetch_project<'e>(
    db: impl SqliteExecutor<'e>,
    id: &str,
) -> Result<Option<Project>, sqlx::Error> {
    let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1");
    let row = sqlx::query_as::<_, ProjectRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.map(Project::from))
}

pub async fn insert_project(db: &SqlitePool, req: NewProject) -> Result<Project, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let project = Project::from_new(id, req);

    sqlx::query(
        r#"
        INSERT INTO projects
            (id, title, description, category, sub_category, tech, link, live_demo)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&project.id)
    .bind(&project.title)
    .bind(&project.description)
    .bind(&project.category)
    .bind(&project.sub_category)
    .bind(Json(&project.tech))
    .bind(&project.link)
    .bind(&project.live_demo)
    .execute(db)
    .await?;

    Ok(project)
}

pub async fn update_project(
    db: &SqlitePool,
    id: &str,
    patch: ProjectPatch,
) -> Result<Option<Project>, sqlx::Error> {
    let mut tx = db.begin_with("BEGIN IMMEDIATE").await?;

    let mut current = match fetch_project(&mut *tx, id).await? {
        Some(p) => p,
        None => return Ok(None),
    };
    current.apply(patch);

    sqlx::query(
        r#"
        UPDATE projects
        SET title = ?1,
            description = ?2,
            category = ?3,
            sub_category = ?4,
            tech = ?5,
            link = ?6,
            live_demo = ?7
        WHERE id = ?8
        "#,
    )
    .bind(&current.title)
    .bind(&current.description)
    .bind(&current.category)
    .bind(&current.sub_category)
    .bind(Json(&current.tech))
    .bind(&current.link)
    .bind(&current.live_demo)
    .bind(&current.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(current))
}

pub async fn delete_project(db: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
