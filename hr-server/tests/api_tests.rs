//! End-to-end API tests
//!
//! Each test initializes a fresh state against an isolated temporary
//! data directory and drives the full router with oneshot requests,
//! guard middleware included.

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use hr_server::api::build_app;
use hr_server::{Config, ServerState};

struct TestApp {
    app: Router,
    _data_dir: TempDir,
}

async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("Failed to initialize state");
    TestApp {
        app: build_app(state),
        _data_dir: dir,
    }
}

impl TestApp {
    async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(v) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn signup(&self, email: &str, role: &str) {
        let (status, _) = self
            .request(
                Method::POST,
                "/api/v1/users",
                None,
                Some(json!({"email": email, "password": "password123", "role": role})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/users/login",
                None,
                Some(json!({"email": email, "password": "password123"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["auth"], true);
        body["token"].as_str().expect("login token").to_string()
    }

    async fn signup_and_login(&self, email: &str, role: &str) -> String {
        self.signup(email, role).await;
        self.login(email).await
    }
}

fn employee_json(id: i64, first: &str, last: &str, email: &str) -> Value {
    json!({
        "EmployeeId": id,
        "FirstName": first,
        "LastName": last,
        "Email": email,
        "HireDate": "2020-01-15",
        "JobId": "IT_PROG",
        "Salary": 6000.0
    })
}

// ── Sessions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn session_lifecycle() {
    let app = spawn_app().await;

    let token = app
        .signup_and_login("admin@example.com", "HR_ADMIN")
        .await;

    // Live token grants access
    let (status, _) = app
        .request(Method::GET, "/api/v1/employees", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Logout revokes exactly this token
    let (status, body) = app
        .request(Method::POST, "/api/v1/users/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["auth"], false);

    // The revoked token no longer authenticates, expiry notwithstanding
    let (status, body) = app
        .request(Method::GET, "/api/v1/employees", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Cannot authenticate incoming request");
}

#[tokio::test]
async fn logout_all_revokes_every_session() {
    let app = spawn_app().await;
    app.signup("admin@example.com", "HR_ADMIN").await;

    let token_a = app.login("admin@example.com").await;
    let token_b = app.login("admin@example.com").await;

    let (status, _) = app
        .request(Method::POST, "/api/v1/users/logoutall", Some(&token_a), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    for token in [&token_a, &token_b] {
        let (status, _) = app
            .request(Method::GET, "/api/v1/employees", Some(token), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn missing_or_garbage_credential_is_401() {
    let app = spawn_app().await;

    let (status, body) = app
        .request(Method::GET, "/api/v1/employees", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Cannot authenticate incoming request");

    let (status, _) = app
        .request(Method::GET, "/api/v1/employees", Some("not.a.jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_failures_are_uniform_400() {
    let app = spawn_app().await;
    app.signup("admin@example.com", "HR_ADMIN").await;

    // Unknown email, wrong password, and missing field all give the same
    // message
    for payload in [
        json!({"email": "nobody@example.com", "password": "password123"}),
        json!({"email": "admin@example.com", "password": "wrong-password"}),
        json!({"email": "admin@example.com"}),
    ] {
        let (status, body) = app
            .request(Method::POST, "/api/v1/users/login", None, Some(payload))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[tokio::test]
async fn signup_validation_and_duplicates() {
    let app = spawn_app().await;

    // Bad email
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({"email": "not-an-email", "password": "password123", "role": "HR_ADMIN"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Short password
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({"email": "ok@example.com", "password": "short", "role": "HR_ADMIN"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Valid signup never leaks secrets
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({"email": "ok@example.com", "password": "password123", "role": "HR_ADMIN"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ok@example.com");
    assert!(body.get("password").is_none());
    assert!(body.get("tokens").is_none());

    // Duplicate email, case-insensitively
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/users",
            None,
            Some(json!({"email": "OK@example.com", "password": "password123", "role": "HR_ADMIN"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn account_deletion_is_public() {
    let app = spawn_app().await;
    app.signup("gone@example.com", "HR_EMPLOYEE").await;

    let (status, body) = app
        .request(Method::DELETE, "/api/v1/users/gone@example.com", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "gone@example.com");

    let (status, body) = app
        .request(Method::DELETE, "/api/v1/users/gone@example.com", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// ── Role-to-verb matrix ──────────────────────────────────────────────

#[tokio::test]
async fn role_matrix_governs_entity_verbs() {
    let app = spawn_app().await;
    let admin = app.signup_and_login("admin@example.com", "HR_ADMIN").await;
    let manager = app
        .signup_and_login("manager@example.com", "HR_MANAGER")
        .await;
    let employee = app
        .signup_and_login("employee@example.com", "HR_EMPLOYEE")
        .await;

    let dept = json!({"DepartmentId": 50, "DepartmentName": "Shipping"});

    // Read-only role cannot create
    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/departments",
            Some(&employee),
            Some(dept.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User is not authorized to POST data");

    // Manager can create and patch
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/departments",
            Some(&manager),
            Some(dept),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(
            Method::PATCH,
            "/api/v1/departments/50",
            Some(&manager),
            Some(json!({"DepartmentName": "Logistics"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["DepartmentName"], "Logistics");

    // ...but not delete
    let (status, _) = app
        .request(Method::DELETE, "/api/v1/departments/50", Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Everyone authenticated can read
    let (status, _) = app
        .request(Method::GET, "/api/v1/departments/50", Some(&employee), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    // Admin deletes, and gets the removed record back
    let (status, body) = app
        .request(Method::DELETE, "/api/v1/departments/50", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["DepartmentId"], 50);
}

// ── Entity CRUD ──────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_business_key_is_409() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    let payload = employee_json(100, "Steven", "King", "sking@example.com");
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/employees",
            Some(&token),
            Some(payload.clone()),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(Method::POST, "/api/v1/employees", Some(&token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_create_payload_is_400() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    // Missing required attributes
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/employees",
            Some(&token),
            Some(json!({"EmployeeId": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Invalid email format
    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/employees",
            Some(&token),
            Some(employee_json(1, "No", "Email", "not-an-email")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_allowlist_rejects_whole_patch() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/employees",
            Some(&token),
            Some(employee_json(100, "Steven", "King", "sking@example.com")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Business key is immutable; Salary must not change either
    let (status, _) = app
        .request(
            Method::PATCH,
            "/api/v1/employees/100",
            Some(&token),
            Some(json!({"EmployeeId": 999, "Salary": 9999.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown attribute, same outcome
    let (status, _) = app
        .request(
            Method::PATCH,
            "/api/v1/employees/100",
            Some(&token),
            Some(json!({"NotAnAttribute": true})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // No partial effect: the record is untouched
    let (status, body) = app
        .request(Method::GET, "/api/v1/employees/100", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["EmployeeId"], 100);
    assert_eq!(body["Salary"], 6000.0);
}

#[tokio::test]
async fn missing_records_are_normalized_404() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    for (method, path) in [
        (Method::GET, "/api/v1/employees/424242"),
        (Method::PATCH, "/api/v1/employees/424242"),
        (Method::DELETE, "/api/v1/employees/424242"),
        (Method::GET, "/api/v1/jobs/NO_SUCH_JOB"),
    ] {
        let body = (method == Method::PATCH).then(|| json!({"Salary": 1.0}));
        let (status, response) = app.request(method, path, Some(&token), body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(response["error"].is_string());
    }
}

#[tokio::test]
async fn jobs_crud_with_textual_key() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/jobs",
            Some(&token),
            Some(json!({"JobId": "IT_PROG", "JobTitle": "Programmer", "MinSalary": 4000.0, "MaxSalary": 10000.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(Method::GET, "/api/v1/jobs/IT_PROG", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["JobTitle"], "Programmer");

    let (status, body) = app
        .request(
            Method::PATCH,
            "/api/v1/jobs/IT_PROG",
            Some(&token),
            Some(json!({"MaxSalary": 12000.0})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["MaxSalary"], 12000.0);
    assert_eq!(body["JobTitle"], "Programmer");

    let (status, body) = app
        .request(Method::DELETE, "/api/v1/jobs/IT_PROG", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["JobId"], "IT_PROG");
}

// ── Generic list: sort, filter, pagination ───────────────────────────

async fn seed_employees(app: &TestApp, token: &str) {
    for payload in [
        employee_json(100, "Steven", "King", "sking@example.com"),
        employee_json(101, "Neena", "Kochhar", "nkochhar@example.com"),
        employee_json(102, "Lex", "De Haan", "ldehaan@example.com"),
    ] {
        let (status, _) = app
            .request(Method::POST, "/api/v1/employees", Some(token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

#[tokio::test]
async fn list_sorting_and_pagination() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;
    seed_employees(&app, &token).await;

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/employees?sortBy=EmployeeId:-1",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["EmployeeId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![102, 101, 100]);
    assert_eq!(body["estimatedCount"], 3);

    // limit/skip slice the page; the count stays whole-collection
    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/employees?sortBy=EmployeeId:1&limit=1&skip=1",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["EmployeeId"], 101);
}

#[tokio::test]
async fn unknown_sort_field_is_400() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/employees?sortBy=Password:1",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn free_text_filter_across_attributes() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;
    seed_employees(&app, &token).await;

    // Case-insensitive substring on text attributes
    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/employees?filter=KING",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimatedCount"], 1);
    assert_eq!(body["items"][0]["LastName"], "King");

    // Numeric token matches by exact equality
    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/employees?filter=101",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["EmployeeId"], 101);

    // No match is an empty 200, not a 404
    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/employees?filter=zzz-no-match",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(body["estimatedCount"], 0);
}

// ── Relation expansion ───────────────────────────────────────────────

#[tokio::test]
async fn children_expansion_sorted_by_child_key() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/departments",
            Some(&token),
            Some(json!({"DepartmentId": 60, "DepartmentName": "IT"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Insert out of order to exercise the sort
    for (id, last, email) in [
        (104, "Ernst", "bernst@example.com"),
        (103, "Hunold", "ahunold@example.com"),
    ] {
        let mut payload = employee_json(id, "Dev", last, email);
        payload["DepartmentId"] = json!(60);
        let (status, _) = app
            .request(Method::POST, "/api/v1/employees", Some(&token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/departments/60?children=employees",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let employees = body["employees"].as_array().unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0]["EmployeeId"], 103);
    assert_eq!(employees[1]["EmployeeId"], 104);

    // Unknown relation names are skipped, not errors
    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/departments/60?children=bogus,employees",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("bogus").is_none());
    assert!(body.get("employees").is_some());
}

#[tokio::test]
async fn manager_directs_expansion() {
    let app = spawn_app().await;
    let token = app.signup_and_login("admin@example.com", "HR_ADMIN").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/v1/employees",
            Some(&token),
            Some(employee_json(100, "Steven", "King", "sking@example.com")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut report = employee_json(101, "Neena", "Kochhar", "nkochhar@example.com");
    report["ManagerId"] = json!(100);
    let (status, _) = app
        .request(Method::POST, "/api/v1/employees", Some(&token), Some(report))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(
            Method::GET,
            "/api/v1/employees/100?children=directs",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let directs = body["directs"].as_array().unwrap();
    assert_eq!(directs.len(), 1);
    assert_eq!(directs[0]["EmployeeId"], 101);
}
