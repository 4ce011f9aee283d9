use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Course;

/// A student record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Institution-issued identifier, distinct from the row id.
    pub student_id: String,
    pub address: Option<String>,
    pub department_id: Option<i64>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a student (seeding and fixtures only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentInput {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub address: Option<String>,
    pub department_id: Option<i64>,
}

/// Simplified course reference embedded in a paginated student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseLink {
    pub name: String,
    pub url: String,
}

impl CourseLink {
    /// Link pointing at the owning student's course listing.
    pub fn for_student(student_id: i64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: student_courses_path(student_id),
        }
    }
}

/// Path of a student's course listing, relative to the API root.
pub fn student_courses_path(student_id: i64) -> String {
    format!("/students/{}/courses", student_id)
}

/// A student row in a page of results, with its enrolled courses.
///
/// Carries no timestamps and no `department_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub address: Option<String>,
    pub courses: Vec<CourseLink>,
}

/// One page of students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPage {
    pub total_students: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub students: Vec<StudentSummary>,
}

/// A student's first name together with the full course records they take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentCourses {
    /// The student's first name.
    pub student: String,
    pub courses: Vec<Course>,
}

/// Public projection of a student returned by first-name queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub address: Option<String>,
}
