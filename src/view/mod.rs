//! Client-side view of the API: resource tabs, a generic table and
//! pagination controls for students.
//!
//! [`ViewState`] holds everything on screen. Every fetch is started with
//! [`ViewState::request`] (or one of the tab/page helpers), which stamps it
//! with a sequence number, and finished with [`ViewState::apply`], which
//! replaces the visible state in one step. Outcomes of fetches that were
//! superseded by a newer request are dropped.

mod browser;
mod render;
mod table;

use std::fmt;
use std::str::FromStr;

use crate::client::ClientError;
use crate::models::{Course, Department, StudentSummary};

pub use browser::{fetch, Browser};
pub use render::render;
pub use table::{Cell, Dataset, Field, Link, TableRecord};

/// Heading shown above the tab bar.
pub const APP_TITLE: &str = "Student Info Database";

/// A resource tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Students,
    Courses,
    Departments,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Self::Students, Self::Courses, Self::Departments];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::Courses => "Courses",
            Self::Departments => "Departments",
        }
    }

    /// API path segment, also used as the tab identifier.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Courses => "courses",
            Self::Departments => "departments",
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Students => StudentSummary::FIELDS,
            Self::Courses => Course::FIELDS,
            Self::Departments => Department::FIELDS,
        }
    }

    pub fn is_paginated(&self) -> bool {
        matches!(self, Self::Students)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.endpoint().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown resource '{}', expected students, courses or departments", s))
    }
}

/// A fetch that has been started but not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub resource: Resource,
    pub page: u32,
    seq: u64,
}

/// A clickable page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub target: u32,
    pub disabled: bool,
}

/// A numbered page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub number: u32,
    pub current: bool,
}

/// Previous / numbered / Next controls under the students table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationControls {
    pub previous: PageControl,
    pub pages: Vec<PageButton>,
    pub next: PageControl,
}

/// Everything currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    title: String,
    active: Resource,
    page: u32,
    total_pages: u32,
    columns: &'static [Field],
    rows: Vec<Vec<Cell>>,
    issued: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            title: Resource::Students.title().to_string(),
            active: Resource::Students,
            page: 1,
            total_pages: 1,
            columns: &[],
            rows: Vec::new(),
            issued: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn active(&self) -> Resource {
        self.active
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn columns(&self) -> &'static [Field] {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Start a fetch. Non-paginated resources always use page 1.
    pub fn request(&mut self, resource: Resource, page: u32) -> FetchRequest {
        self.issued += 1;
        FetchRequest {
            resource,
            page: if resource.is_paginated() { page.max(1) } else { 1 },
            seq: self.issued,
        }
    }

    /// Tab click. Students restart at page 1.
    pub fn select_tab(&mut self, resource: Resource) -> FetchRequest {
        self.request(resource, 1)
    }

    /// Numbered page button. `None` if that button is not on screen.
    pub fn go_to_page(&mut self, page: u32) -> Option<FetchRequest> {
        let controls = self.pagination()?;
        controls
            .pages
            .iter()
            .any(|b| b.number == page)
            .then(|| self.request(Resource::Students, page))
    }

    /// Next button. `None` if hidden or disabled.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        let next = self.pagination()?.next;
        (!next.disabled).then(|| self.request(Resource::Students, next.target))
    }

    /// Previous button. `None` if hidden or disabled.
    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        let previous = self.pagination()?.previous;
        (!previous.disabled).then(|| self.request(Resource::Students, previous.target))
    }

    /// Apply the outcome of `request`. Returns `false` and leaves the state
    /// untouched if a newer request has been started since.
    pub fn apply(&mut self, request: FetchRequest, outcome: Result<Dataset, ClientError>) -> bool {
        if request.seq != self.issued {
            tracing::debug!(
                "Discarding stale response for {} page {}",
                request.resource,
                request.page
            );
            return false;
        }

        match outcome {
            Ok(dataset) => {
                if let Some(total_pages) = dataset.total_pages {
                    self.total_pages = total_pages;
                }
                self.columns = if dataset.rows.is_empty() {
                    &[]
                } else {
                    request.resource.fields()
                };
                self.rows = dataset.rows;
                self.title = request.resource.title().to_string();
                self.active = request.resource;
                self.page = request.page;
            }
            Err(e) => {
                tracing::error!("Error fetching {}: {}", request.resource, e);
                self.rows.clear();
                self.columns = &[];
                self.title = format!("Error loading {}", request.resource.title());
            }
        }

        true
    }

    /// Controls shown under the students table; `None` on other tabs or
    /// when there is nothing to show.
    pub fn pagination(&self) -> Option<PaginationControls> {
        if !self.active.is_paginated() || self.rows.is_empty() {
            return None;
        }

        Some(PaginationControls {
            previous: PageControl {
                target: self.page.saturating_sub(1),
                disabled: self.page <= 1,
            },
            pages: (1..=self.total_pages)
                .map(|number| PageButton {
                    number,
                    current: number == self.page,
                })
                .collect(),
            next: PageControl {
                target: self.page + 1,
                disabled: self.page >= self.total_pages,
            },
        })
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
