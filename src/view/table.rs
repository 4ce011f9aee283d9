//! Field descriptors and cell values for tabular rendering.

use serde::Serialize;

use crate::models::{Course, Department, StudentPage, StudentSummary};

/// One column of a resource table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Key of the field in the JSON record.
    pub key: &'static str,
    /// Column heading.
    pub label: &'static str,
}

const fn field(key: &'static str, label: &'static str) -> Field {
    Field { key, label }
}

/// A hyperlink rendered inside a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub name: String,
    pub url: String,
}

/// Rendered content of a single table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Cell {
    Text(String),
    /// Sequence-valued field, one link per element, stacked vertically.
    Links(Vec<Link>),
}

impl Cell {
    fn text(value: impl ToString) -> Self {
        Self::Text(value.to_string())
    }

    fn optional(value: Option<impl ToString>) -> Self {
        Self::Text(value.map(|v| v.to_string()).unwrap_or_default())
    }
}

/// A record type that can be shown as a table row.
///
/// `FIELDS` lists the record's serialized keys, in display order, minus the
/// `createdAt`/`updatedAt` timestamps. `cells` returns one cell per field.
pub trait TableRecord {
    const FIELDS: &'static [Field];

    fn cells(&self) -> Vec<Cell>;
}

impl TableRecord for Department {
    const FIELDS: &'static [Field] = &[field("id", "id"), field("name", "name")];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::text(self.id), Cell::text(&self.name)]
    }
}

impl TableRecord for Course {
    const FIELDS: &'static [Field] = &[
        field("id", "id"),
        field("name", "name"),
        field("url", "url"),
        field("department_id", "department id"),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id),
            Cell::text(&self.name),
            Cell::optional(self.url.as_ref()),
            Cell::optional(self.department_id),
        ]
    }
}

impl TableRecord for StudentSummary {
    const FIELDS: &'static [Field] = &[
        field("id", "id"),
        field("first_name", "first name"),
        field("last_name", "last name"),
        field("student_id", "student id"),
        field("address", "address"),
        field("courses", "courses"),
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text(self.id),
            Cell::text(&self.first_name),
            Cell::text(&self.last_name),
            Cell::text(&self.student_id),
            Cell::optional(self.address.as_ref()),
            Cell::Links(
                self.courses
                    .iter()
                    .map(|c| Link {
                        name: c.name.clone(),
                        url: c.url.clone(),
                    })
                    .collect(),
            ),
        ]
    }
}

/// Rows fetched for one resource, ready to be applied to the view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub rows: Vec<Vec<Cell>>,
    /// Page count reported by a paginated resource.
    pub total_pages: Option<u32>,
}

impl Dataset {
    pub fn from_records<R: TableRecord>(records: &[R]) -> Self {
        Self {
            rows: records.iter().map(TableRecord::cells).collect(),
            total_pages: None,
        }
    }

    pub fn from_student_page(page: &StudentPage) -> Self {
        Self {
            total_pages: Some(u32::try_from(page.total_pages).unwrap_or_else(|_| {
                tracing::warn!(
                    total_pages = page.total_pages,
                    "Page count out of range, hiding pagination"
                );
                0
            })),
            ..Self::from_records(&page.students)
        }
    }
}
