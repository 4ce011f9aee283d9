use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use student_info::api::create_router;
use student_info::db::Database;
use student_info::models::*;

fn setup() -> (TestServer, Database) {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(db.clone());
    (TestServer::new(app).expect("Failed to create test server"), db)
}

/// Server whose database has no tables, so every query fails.
fn broken_server() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    TestServer::new(create_router(db)).expect("Failed to create test server")
}

fn create_student(db: &Database, first_name: &str, last_name: &str) -> Student {
    db.create_student(CreateStudentInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        student_id: format!("ID-{}-{}", first_name, last_name),
        address: Some("12 Elm Street".to_string()),
        department_id: None,
    })
    .expect("Failed to create student")
}

fn seed_students(db: &Database, count: usize) -> Vec<Student> {
    (1..=count)
        .map(|n| create_student(db, &format!("First{}", n), &format!("Last{}", n)))
        .collect()
}

fn create_course(db: &Database, name: &str, department_id: Option<i64>) -> Course {
    db.create_course(CreateCourseInput {
        name: name.to_string(),
        url: Some(format!("https://courses.example.edu/{}", name)),
        department_id,
    })
    .expect("Failed to create course")
}

mod departments {
    use super::*;

    #[tokio::test]
    async fn lists_all_departments() {
        let (server, db) = setup();
        for name in ["Mathematics", "History"] {
            db.create_department(CreateDepartmentInput {
                name: name.to_string(),
            })
            .expect("Failed to create department");
        }

        let response = server.get("/api/departments").await;

        response.assert_status_ok();
        let departments: Vec<Department> = response.json();
        assert_eq!(departments.len(), 2);
        assert_eq!(departments[0].name, "Mathematics");
    }

    #[tokio::test]
    async fn returns_empty_array_when_none_exist() {
        let (server, _db) = setup();

        let response = server.get("/api/departments").await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn serializes_timestamps_in_camel_case() {
        let (server, db) = setup();
        let department = db
            .create_department(CreateDepartmentInput {
                name: "Physics".to_string(),
            })
            .expect("Failed to create department");

        let body: Value = server
            .get(&format!("/api/departments/{}", department.id))
            .await
            .json();

        assert_eq!(body["name"], "Physics");
        assert!(body.get("createdAt").is_some());
        assert!(body.get("updatedAt").is_some());
        assert!(body.get("created_at").is_none());
    }

    #[tokio::test]
    async fn missing_department_is_not_found() {
        let (server, _db) = setup();

        let response = server.get("/api/departments/999").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "message": "Department not found" }));
    }

    #[tokio::test]
    async fn non_numeric_id_is_bad_request() {
        let (server, _db) = setup();

        let response = server.get("/api/departments/abc").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid id");
        assert!(body["error"].is_string());
    }
}

mod courses {
    use super::*;

    #[tokio::test]
    async fn lists_all_courses() {
        let (server, db) = setup();
        create_course(&db, "Algorithms", None);
        create_course(&db, "Databases", None);

        let response = server.get("/api/courses").await;

        response.assert_status_ok();
        let courses: Vec<Course> = response.json();
        let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Algorithms", "Databases"]);
    }

    #[tokio::test]
    async fn returns_course_by_id() {
        let (server, db) = setup();
        let course = create_course(&db, "Algorithms", None);

        let response = server.get(&format!("/api/courses/{}", course.id)).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Course>().name, "Algorithms");
    }

    #[tokio::test]
    async fn missing_course_is_not_found() {
        let (server, _db) = setup();

        let response = server.get("/api/courses/5").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "message": "Course not found" }));
    }
}

mod students_pagination {
    use super::*;

    #[tokio::test]
    async fn defaults_to_first_page() {
        let (server, db) = setup();
        seed_students(&db, 12);

        let response = server.get("/api/students").await;

        response.assert_status_ok();
        let page: StudentPage = response.json();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_students, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.students.len(), 10);
    }

    #[tokio::test]
    async fn empty_page_parameter_means_first_page() {
        let (server, db) = setup();
        seed_students(&db, 12);

        let response = server.get("/api/students?page=").await;

        response.assert_status_ok();
        let page: StudentPage = response.json();
        assert_eq!(page.current_page, 1);
        assert_eq!(page.students.len(), 10);
    }

    #[tokio::test]
    async fn last_page_returns_remainder() {
        let (server, db) = setup();
        seed_students(&db, 25);

        let response = server.get("/api/students?page=3").await;

        response.assert_status_ok();
        let page: StudentPage = response.json();
        assert_eq!(page.students.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 3);
    }

    #[tokio::test]
    async fn every_page_in_range_is_full_or_remainder() {
        let (server, db) = setup();
        seed_students(&db, 37);

        for n in 1..=4u32 {
            let page: StudentPage = server
                .get("/api/students")
                .add_query_param("page", n)
                .await
                .json();
            let expected = if n == 4 { 7 } else { 10 };
            assert_eq!(page.students.len(), expected, "page {}", n);
            assert_eq!(page.current_page, n);
            assert_eq!(page.total_pages, 4);
        }
    }

    #[tokio::test]
    async fn uses_wire_field_names() {
        let (server, db) = setup();
        let student = create_student(&db, "Ada", "Lovelace");
        let course = create_course(&db, "Algorithms", None);
        db.enroll(student.id, course.id).expect("Failed to enroll");

        let body: Value = server.get("/api/students").await.json();

        assert_eq!(
            body,
            json!({
                "totalStudents": 1,
                "totalPages": 1,
                "currentPage": 1,
                "students": [{
                    "id": student.id,
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "student_id": "ID-Ada-Lovelace",
                    "address": "12 Elm Street",
                    "courses": [{
                        "name": "Algorithms",
                        "url": format!("/students/{}/courses", student.id),
                    }],
                }],
            })
        );
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let (server, db) = setup();
        seed_students(&db, 3);

        let page: StudentPage = server.get("/api/students?page=9").await.json();

        assert!(page.students.is_empty());
        assert_eq!(page.current_page, 9);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn page_zero_is_bad_request() {
        let (server, _db) = setup();

        let response = server.get("/api/students?page=0").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid page");
    }

    #[tokio::test]
    async fn non_numeric_page_is_bad_request() {
        let (server, _db) = setup();

        let response = server.get("/api/students?page=two").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid query parameters");
    }
}

mod students {
    use super::*;

    #[tokio::test]
    async fn returns_bare_student_by_id() {
        let (server, db) = setup();
        let student = create_student(&db, "Alan", "Turing");

        let body: Value = server
            .get(&format!("/api/students/{}", student.id))
            .await
            .json();

        assert_eq!(body["first_name"], "Alan");
        assert!(body.get("courses").is_none());
    }

    #[tokio::test]
    async fn missing_student_is_not_found() {
        let (server, _db) = setup();

        let response = server.get("/api/students/31").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "message": "Student not found" }));
    }

    #[tokio::test]
    async fn lists_full_courses_of_a_student() {
        let (server, db) = setup();
        let department = db
            .create_department(CreateDepartmentInput {
                name: "Computer Science".to_string(),
            })
            .expect("Failed to create department");
        let student = create_student(&db, "Barbara", "Liskov");
        let course = create_course(&db, "Abstraction", Some(department.id));
        db.enroll(student.id, course.id).expect("Failed to enroll");

        let response = server
            .get(&format!("/api/students/{}/courses", student.id))
            .await;

        response.assert_status_ok();
        let body: StudentCourses = response.json();
        assert_eq!(body.student, "Barbara");
        assert_eq!(body.courses.len(), 1);
        assert_eq!(body.courses[0].department_id, Some(department.id));
        assert_eq!(body.courses[0].url, course.url);
    }

    #[tokio::test]
    async fn courses_of_missing_student_is_not_found() {
        let (server, _db) = setup();

        let response = server.get("/api/students/77/courses").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "message": "Student not found" }));
    }
}

mod student_queries {
    use super::*;

    #[tokio::test]
    async fn first_name_query_returns_projection() {
        let (server, db) = setup();
        create_student(&db, "Grace", "Hopper");
        create_student(&db, "Donald", "Knuth");

        let response = server
            .get("/api/students_query_firstName?firstName=Grace")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([{
            "first_name": "Grace",
            "last_name": "Hopper",
            "student_id": "ID-Grace-Hopper",
            "address": "12 Elm Street",
        }]));
    }

    #[tokio::test]
    async fn first_name_query_is_case_sensitive() {
        let (server, db) = setup();
        create_student(&db, "Grace", "Hopper");

        let response = server
            .get("/api/students_query_firstName?firstName=grace")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn missing_first_name_is_bad_request() {
        let (server, _db) = setup();

        let response = server.get("/api/students_query_firstName").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn first_last_query_requires_both_to_match() {
        let (server, db) = setup();
        create_student(&db, "Grace", "Hopper");
        create_student(&db, "Grace", "Kelly");

        let response = server
            .get("/api/students_query_first_last")
            .add_query_param("firstName", "Grace")
            .add_query_param("lastName", "Kelly")
            .await;

        response.assert_status_ok();
        let students: Vec<Student> = response.json();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].last_name, "Kelly");
    }

    #[tokio::test]
    async fn first_last_query_with_no_match_is_empty() {
        let (server, db) = setup();
        create_student(&db, "Grace", "Hopper");

        let response = server
            .get("/api/students_query_first_last?firstName=Grace&lastName=Turing")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }
}

mod storage_failures {
    use super::*;

    #[tokio::test]
    async fn list_failure_reports_message_and_error() {
        let server = broken_server();

        let response = server.get("/api/departments").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Failed to fetch departments");
        assert!(body["error"]
            .as_str()
            .is_some_and(|e| e.contains("no such table")));
    }

    #[tokio::test]
    async fn lookup_failure_is_not_reported_as_not_found() {
        let server = broken_server();

        let response = server.get("/api/students/1").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Error retrieving student");
    }

    #[tokio::test]
    async fn pagination_failure_is_server_error() {
        let server = broken_server();

        let response = server.get("/api/students?page=2").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Failed to fetch students");
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let (server, _db) = setup();

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}
