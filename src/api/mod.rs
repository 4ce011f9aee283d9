mod error;
mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::db::Database;

use error::ApiError;

/// Router with the default configuration (any CORS origin).
pub fn create_router(db: Database) -> Router {
    create_router_with_config(db, &ServerConfig::default())
}

pub fn create_router_with_config(db: Database, config: &ServerConfig) -> Router {
    let api = Router::new()
        // Departments
        .route("/departments", get(handlers::list_departments))
        .route("/departments/{id}", get(handlers::get_department))
        // Courses
        .route("/courses", get(handlers::list_courses))
        .route("/courses/{id}", get(handlers::get_course))
        // Students
        .route("/students", get(handlers::list_students))
        .route("/students/{id}", get(handlers::get_student))
        .route("/students/{id}/courses", get(handlers::get_student_courses))
        .route(
            "/students_query_firstName",
            get(handlers::query_students_by_first_name),
        )
        .route(
            "/students_query_first_last",
            get(handlers::query_students_by_full_name),
        )
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
        .with_state(db)
}
