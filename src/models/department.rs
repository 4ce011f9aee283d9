use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An academic department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a department (seeding and fixtures only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentInput {
    pub name: String,
}
