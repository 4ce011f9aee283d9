use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course offered by a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    /// Link to the course page, if one is published.
    pub url: Option<String>,
    pub department_id: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a course (seeding and fixtures only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseInput {
    pub name: String,
    pub url: Option<String>,
    pub department_id: Option<i64>,
}
