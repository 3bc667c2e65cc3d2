//! Sign-up, sign-in and error-shape tests.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_sign_up_returns_user_id() {
    let app = TestApp::new().await;
    let user_id = app.sign_up("alice@example.com", "wonderland").await;
    assert!(uuid::Uuid::parse_str(&user_id).is_ok());
}

#[tokio::test]
async fn test_sign_up_duplicate_email() {
    let app = TestApp::new().await;
    app.sign_up("alice@example.com", "wonderland").await;

    let response = app
        .request(
            "POST",
            "/api/users/signup",
            Some(serde_json::json!({
                "first_name": "Alice",
                "last_name": "Again",
                "email": "Alice@Example.com",
                "password": "looking-glass",
            })),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body["message"],
        "You have already signed up with that email"
    );
}

#[tokio::test]
async fn test_sign_up_validation() {
    let app = TestApp::new().await;

    let short_password = app
        .request(
            "POST",
            "/api/users/signup",
            Some(serde_json::json!({
                "first_name": "Alice",
                "last_name": "Liddell",
                "email": "alice@example.com",
                "password": "short",
            })),
            &[],
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(short_password.body["error"], "VALIDATION");

    let missing_fields = app
        .request(
            "POST",
            "/api/users/signup",
            Some(serde_json::json!({ "email": "alice@example.com" })),
            &[],
        )
        .await;
    assert_eq!(missing_fields.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sign_in_sets_credential_cookies() {
    let app = TestApp::new().await;
    let user_id = app.sign_up("alice@example.com", "wonderland").await;

    let response = app.sign_in("alice@example.com", "wonderland").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["user_id"], user_id.as_str());

    for name in ["access_token", "refresh_token"] {
        let line = response.set_cookie(name).expect("cookie not set");
        assert!(line.contains("HttpOnly"), "{line}");
        assert!(line.contains("Secure"), "{line}");
        assert!(line.contains("Path=/"), "{line}");
        assert!(!response.cookie(name).unwrap().is_empty());
    }
    assert!(response.set_cookie("access_token").unwrap().contains("Max-Age=900"));
    assert!(response.set_cookie("refresh_token").unwrap().contains("Max-Age=604800"));
}

#[tokio::test]
async fn test_sign_in_does_not_enumerate_users() {
    let app = TestApp::new().await;
    app.sign_up("alice@example.com", "wonderland").await;

    let unknown = app.sign_in("nobody@example.com", "wonderland").await;
    let wrong = app.sign_in("alice@example.com", "looking-glass").await;

    assert_eq!(unknown.status, StatusCode::FORBIDDEN);
    assert_eq!(unknown.status, wrong.status);
    assert_eq!(unknown.body, wrong.body);
    assert!(unknown.set_cookies.is_empty());
    assert_eq!(unknown.body["error"], "FORBIDDEN");
    assert_eq!(unknown.body["message"], "Your email or password is incorrect");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, &[]).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.body["session_store"], "connected");
    assert_eq!(detailed.body["user_store"], "connected");
}
