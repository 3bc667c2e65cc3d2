//! Session lifecycle tests: gate, rotation and sign-out.

use axum::http::StatusCode;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;

use taskhub_auth::jwt::Claims;

use std::sync::Arc;

use crate::helpers::{RefusingWrites, TestApp, TestResponse};

struct Credentials {
    access: String,
    refresh: String,
}

impl Credentials {
    fn from_response(response: &TestResponse) -> Self {
        Self {
            access: response.cookie("access_token").expect("no access cookie"),
            refresh: response.cookie("refresh_token").expect("no refresh cookie"),
        }
    }
}

async fn signed_in(app: &TestApp) -> (String, Credentials) {
    let user_id = app.sign_up("alice@example.com", "wonderland").await;
    let response = app.sign_in("alice@example.com", "wonderland").await;
    assert_eq!(response.status, StatusCode::OK);
    (user_id, Credentials::from_response(&response))
}

#[tokio::test]
async fn test_sign_in_use_sign_out_lifecycle() {
    let app = TestApp::new().await;
    let (user_id, creds) = signed_in(&app).await;

    let me = app
        .request("GET", "/api/users/me", None, &[("access_token", &creds.access)])
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], user_id.as_str());
    assert_eq!(me.body["email"], "alice@example.com");
    assert!(me.body.get("password_hash").is_none());

    let out = app
        .request(
            "POST",
            "/api/users/signout",
            None,
            &[("access_token", &creds.access), ("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(out.status, StatusCode::OK);
    for name in ["access_token", "refresh_token"] {
        assert_eq!(out.cookie(name).as_deref(), Some(""));
        assert!(out.set_cookie(name).unwrap().contains("Max-Age=0"));
    }

    let me_again = app
        .request("GET", "/api/users/me", None, &[("access_token", &creds.access)])
        .await;
    assert_eq!(me_again.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_access_recovered_by_refresh() {
    let app = TestApp::new().await;
    let (user_id, creds) = signed_in(&app).await;

    // Same session as the real access token, but already past its expiry.
    let claims = app
        .state
        .jwt_decoder
        .verify(&creds.access, false)
        .unwrap()
        .claims;
    let now = Utc::now().timestamp();
    let expired = app
        .state
        .jwt_encoder
        .sign(&Claims::access(
            &user_id,
            claims.access_uuid.as_deref().unwrap(),
            now - 1800,
            now - 900,
        ))
        .unwrap();

    let rejected = app
        .request("GET", "/api/users/me", None, &[("access_token", &expired)])
        .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);

    let refreshed = app
        .request(
            "POST",
            "/api/users/refreshtoken",
            None,
            &[("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(refreshed.status, StatusCode::CREATED);
    assert_eq!(refreshed.body["user_id"], user_id.as_str());
    let renewed = Credentials::from_response(&refreshed);
    assert_ne!(renewed.refresh, creds.refresh);

    let me = app
        .request("GET", "/api/users/me", None, &[("access_token", &renewed.access)])
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["id"], user_id.as_str());
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    let app = TestApp::new().await;
    let (_, creds) = signed_in(&app).await;

    let first = app
        .request(
            "POST",
            "/api/users/refreshtoken",
            None,
            &[("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let replay = app
        .request(
            "POST",
            "/api/users/refreshtoken",
            None,
            &[("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert!(replay.set_cookies.is_empty());
}

#[tokio::test]
async fn test_failed_rotation_sets_no_cookies() {
    // Sign-in writes both sessions; the rotation's writes are refused.
    let app = TestApp::with_session_store(Arc::new(RefusingWrites::after(2)));
    let (_, creds) = signed_in(&app).await;

    let failed = app
        .request(
            "POST",
            "/api/users/refreshtoken",
            None,
            &[("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(failed.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(failed.set_cookies.is_empty());

    // The old refresh session was consumed before the failure.
    let retry = app
        .request(
            "POST",
            "/api/users/refreshtoken",
            None,
            &[("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(retry.status, StatusCode::UNAUTHORIZED);
    assert!(retry.set_cookies.is_empty());
}

#[tokio::test]
async fn test_refresh_rejects_missing_and_wrong_kind() {
    let app = TestApp::new().await;
    let (_, creds) = signed_in(&app).await;

    let missing = app
        .request("POST", "/api/users/refreshtoken", None, &[])
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let access_as_refresh = app
        .request(
            "POST",
            "/api/users/refreshtoken",
            None,
            &[("refresh_token", &creds.access)],
        )
        .await;
    assert_eq!(access_as_refresh.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(missing.set_cookies.is_empty());
    assert!(access_as_refresh.set_cookies.is_empty());
}

#[tokio::test]
async fn test_sign_out_revokes_refresh_session() {
    let app = TestApp::new().await;
    let (_, creds) = signed_in(&app).await;

    let out = app
        .request(
            "POST",
            "/api/users/signout",
            None,
            &[("access_token", &creds.access), ("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(out.status, StatusCode::OK);

    let refresh = app
        .request(
            "POST",
            "/api/users/refreshtoken",
            None,
            &[("refresh_token", &creds.refresh)],
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_out_without_token_still_clears_cookies() {
    let app = TestApp::new().await;

    let out = app.request("POST", "/api/users/signout", None, &[]).await;

    assert_eq!(out.status, StatusCode::UNAUTHORIZED);
    assert_eq!(out.cookie("access_token").as_deref(), Some(""));
    assert_eq!(out.cookie("refresh_token").as_deref(), Some(""));
}

#[tokio::test]
async fn test_gate_rejects_missing_and_forged_tokens() {
    let app = TestApp::new().await;
    let (_, creds) = signed_in(&app).await;

    let missing = app.request("GET", "/api/users/me", None, &[]).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    // Valid claims under an asymmetric algorithm header.
    let claims = app
        .state
        .jwt_decoder
        .verify(&creds.access, false)
        .unwrap()
        .claims;
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    let forged = format!("{header}.{payload}.c2lnbmF0dXJl");

    let response = app
        .request("GET", "/api/users/me", None, &[("access_token", &forged)])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");

    // The refresh token names no access session.
    let wrong_kind = app
        .request("GET", "/api/users/me", None, &[("access_token", &creds.refresh)])
        .await;
    assert_eq!(wrong_kind.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_revoked_session_rejected_by_gate() {
    let app = TestApp::new().await;
    let (_, creds) = signed_in(&app).await;

    let claims = app
        .state
        .jwt_decoder
        .verify(&creds.access, false)
        .unwrap()
        .claims;
    let removed = app
        .state
        .registry
        .revoke(claims.access_uuid.as_deref().unwrap())
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let response = app
        .request("GET", "/api/users/me", None, &[("access_token", &creds.access)])
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "SESSION");
}
