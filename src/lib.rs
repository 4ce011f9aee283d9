//! Read-only student, course and department information service.
//!
//! - [`api`]: axum router exposing the JSON endpoints under `/api`.
//! - [`db`]: SQLite storage with embedded migrations.
//! - [`client`]: reqwest client for the API.
//! - [`view`]: tabbed table view of the API with student pagination.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod view;
