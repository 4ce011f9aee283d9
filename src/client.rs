//! HTTP client for the student information API.
//!
//! Configuration is via environment variables:
//! - `STUDENT_INFO_URL` - Base URL (default: `http://localhost:3100/api`)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::*;

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:3100/api";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client for the student information API.
#[derive(Debug, Clone)]
pub struct StudentInfoClient {
    base_url: String,
    client: Client,
}

impl StudentInfoClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STUDENT_INFO_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Fetching {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send().await?;
        self.handle_response(response).await
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(body)),
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        self.get("/health", &[]).await
    }

    // ============================================================
    // Departments
    // ============================================================

    pub async fn list_departments(&self) -> Result<Vec<Department>, ClientError> {
        self.get("/departments", &[]).await
    }

    pub async fn get_department(&self, id: i64) -> Result<Department, ClientError> {
        self.get(&format!("/departments/{}", id), &[]).await
    }

    // ============================================================
    // Courses
    // ============================================================

    pub async fn list_courses(&self) -> Result<Vec<Course>, ClientError> {
        self.get("/courses", &[]).await
    }

    pub async fn get_course(&self, id: i64) -> Result<Course, ClientError> {
        self.get(&format!("/courses/{}", id), &[]).await
    }

    // ============================================================
    // Students
    // ============================================================

    pub async fn list_students(&self, page: u32) -> Result<StudentPage, ClientError> {
        let page = page.to_string();
        self.get("/students", &[("page", page.as_str())]).await
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, ClientError> {
        self.get(&format!("/students/{}", id), &[]).await
    }

    pub async fn get_student_courses(&self, id: i64) -> Result<StudentCourses, ClientError> {
        self.get(&student_courses_path(id), &[]).await
    }

    pub async fn find_students_by_first_name(
        &self,
        first_name: &str,
    ) -> Result<Vec<StudentProfile>, ClientError> {
        self.get("/students_query_firstName", &[("firstName", first_name)])
            .await
    }

    pub async fn find_students_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Student>, ClientError> {
        self.get(
            "/students_query_first_last",
            &[("firstName", first_name), ("lastName", last_name)],
        )
        .await
    }
}

impl Default for StudentInfoClient {
    fn default() -> Self {
        Self::new(DEFAULT_URL)
    }
}
