use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Deserializer};

use super::ApiError;
use crate::db::Database;
use crate::models::*;

// ============================================================
// Parameter extraction
// ============================================================

fn record_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError::invalid("Invalid id", rejection.body_text()))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::invalid("Invalid query parameters", rejection.body_text()))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Departments
// ============================================================

pub async fn list_departments(State(db): State<Database>) -> Result<Json<Vec<Department>>, ApiError> {
    db.get_all_departments()
        .map(Json)
        .map_err(ApiError::query("Failed to fetch departments"))
}

pub async fn get_department(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Department>, ApiError> {
    let id = record_id(path)?;
    db.get_department(id)
        .map_err(ApiError::query("Error retrieving department"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Department not found"))
}

// ============================================================
// Courses
// ============================================================

pub async fn list_courses(State(db): State<Database>) -> Result<Json<Vec<Course>>, ApiError> {
    db.get_all_courses()
        .map(Json)
        .map_err(ApiError::query("Failed to fetch courses"))
}

pub async fn get_course(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Course>, ApiError> {
    let id = record_id(path)?;
    db.get_course(id)
        .map_err(ApiError::query("Error retrieving course"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Course not found"))
}

// ============================================================
// Students
// ============================================================

/// Query parameters for the paginated student listing.
#[derive(Debug, Deserialize)]
pub struct ListStudentsQuery {
    /// 1-indexed page number. Defaults to 1; `page=` counts as absent.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub async fn list_students(
    State(db): State<Database>,
    query: Result<Query<ListStudentsQuery>, QueryRejection>,
) -> Result<Json<StudentPage>, ApiError> {
    let query = query_params(query)?;
    let page = match query.page {
        None => PageRequest::default(),
        Some(n) => PageRequest::page(n)
            .ok_or_else(|| ApiError::invalid("Invalid page", "page must be at least 1"))?,
    };

    tracing::debug!(page = page.number(), offset = page.offset(), "Listing students");

    db.get_students_page(page)
        .map(Json)
        .map_err(ApiError::query("Failed to fetch students"))
}

pub async fn get_student(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Student>, ApiError> {
    let id = record_id(path)?;
    db.get_student(id)
        .map_err(ApiError::query("Error retrieving student"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Student not found"))
}

pub async fn get_student_courses(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudentCourses>, ApiError> {
    let id = record_id(path)?;
    db.get_student_courses(id)
        .map_err(ApiError::query("Error fetching courses"))?
        .map(Json)
        .ok_or(ApiError::NotFound("Student not found"))
}

/// Query parameters for the first-name lookup.
#[derive(Debug, Deserialize)]
pub struct FirstNameQuery {
    #[serde(rename = "firstName")]
    pub first_name: String,
}

pub async fn query_students_by_first_name(
    State(db): State<Database>,
    query: Result<Query<FirstNameQuery>, QueryRejection>,
) -> Result<Json<Vec<StudentProfile>>, ApiError> {
    let query = query_params(query)?;
    tracing::debug!(first_name = %query.first_name, "Querying students by first name");

    db.find_students_by_first_name(&query.first_name)
        .map(Json)
        .map_err(ApiError::query("Error querying students"))
}

/// Query parameters for the first-and-last-name lookup.
#[derive(Debug, Deserialize)]
pub struct FullNameQuery {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

pub async fn query_students_by_full_name(
    State(db): State<Database>,
    query: Result<Query<FullNameQuery>, QueryRejection>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let query = query_params(query)?;
    tracing::debug!(
        first_name = %query.first_name,
        last_name = %query.last_name,
        "Querying students by full name"
    );

    db.find_students_by_name(&query.first_name, &query.last_name)
        .map(Json)
        .map_err(ApiError::query("Error querying students"))
}
