use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::accounts::auth::AuthService;
use crate::accounts::middleware::require_session;
use crate::accounts::session::SessionToken;
use crate::accounts::account_router;
use crate::listings::tests::read_json_body;

fn gated_app(auth: Arc<AuthService<StubIdentity, MemoryProfiles>>) -> Router {
    let sessions = Arc::clone(auth.sessions());
    account_router(auth)
        .route("/listings", get(|| async { "listings page" }))
        .layer(axum::middleware::from_fn_with_state(sessions, require_session))
}

fn post_json(uri: &str, body: Value, cookie: Option<&SessionToken>) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("__session={}", token.0));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get_with(uri: &str, cookie: Option<&SessionToken>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = cookie {
        builder = builder.header(header::COOKIE, format!("__session={}", token.0));
    }
    builder.body(Body::empty()).expect("request builds")
}

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default()
}

#[tokio::test]
async fn sign_up_sets_session_cookie_and_reports_pending() {
    let app = gated_app(auth_service(repository_with_admin()));

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/sign-up",
            json!({
                "email": "sam@uwo.ca",
                "password": "hunter22",
                "confirm_password": "hunter22",
            }),
            None,
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("__session="), "cookie was {cookie}");
    assert!(cookie.contains("Max-Age=3600"));

    let payload = read_json_body(response).await;
    assert_eq!(payload["access"]["state"], "pending");
    assert_eq!(payload["profile"]["approval_status"], "pending");
}

#[tokio::test]
async fn sign_up_validation_failures_are_unprocessable() {
    let app = gated_app(auth_service(repository_with_admin()));

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/sign-up",
            json!({
                "email": "sam@uwo.ca",
                "password": "abc",
                "confirm_password": "abc",
            }),
            None,
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Password must be at least 6 characters.");
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let app = gated_app(auth_service(repository_with_admin()));

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/sign-in",
            json!({ "email": "nobody@uwo.ca", "password": "whatever" }),
            None,
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Invalid email or password.");
}

#[tokio::test]
async fn gate_rejects_api_and_redirects_pages_without_session() {
    let app = gated_app(auth_service(repository_with_admin()));

    let api = app
        .clone()
        .oneshot(get_with("/api/v1/me", None))
        .await
        .expect("router responds");
    assert_eq!(api.status(), StatusCode::UNAUTHORIZED);

    let page = app
        .oneshot(get_with("/listings", None))
        .await
        .expect("router responds");
    assert_eq!(page.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        page.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/signin?redirect=%2Flistings")
    );
}

#[tokio::test]
async fn me_reports_banner_and_registration_need() {
    let auth = auth_service(repository_with_admin());
    let (session, _) = auth
        .sign_up(sign_up_form("sam@uwo.ca", "hunter22"))
        .await
        .expect("sign up");
    let app = gated_app(Arc::clone(&auth));

    let response = app
        .clone()
        .oneshot(get_with("/api/v1/me", Some(&session.token)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["needs_registration"], true);
    assert!(payload["banner"]["message"]
        .as_str()
        .unwrap_or_default()
        .contains("pending admin approval"));

    let response = app
        .oneshot(post_json(
            "/api/v1/me/registration",
            json!({
                "display_name": "Sam Lee",
                "student_number": "300123456",
                "phone": "613-555-0100",
            }),
            Some(&session.token),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["registration_complete"], true);
}

#[tokio::test]
async fn administrators_approve_pending_users_once() {
    let auth = auth_service(repository_with_admin());
    let (student, _) = auth
        .sign_up(sign_up_form("sam@uwo.ca", "hunter22"))
        .await
        .expect("sign up");
    let admin = auth.sessions().issue(admin_id());
    let app = gated_app(Arc::clone(&auth));

    let response = app
        .clone()
        .oneshot(get_with("/api/v1/admin/users?status=pending", Some(&admin.token)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["users"][0]["uid"], student.uid.0.as_str());

    let approval_uri = format!("/api/v1/admin/users/{}/approval", student.uid.0);
    let response = app
        .clone()
        .oneshot(post_json(
            &approval_uri,
            json!({ "decision": "approved" }),
            Some(&admin.token),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["approval_status"], "approved");

    let response = app
        .clone()
        .oneshot(post_json(
            &approval_uri,
            json!({ "decision": "rejected" }),
            Some(&admin.token),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(get_with("/api/v1/admin/users", Some(&student.token)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn sign_out_clears_cookie_and_revokes_session() {
    let auth = auth_service(repository_with_admin());
    let (session, _) = auth
        .sign_up(sign_up_form("sam@uwo.ca", "hunter22"))
        .await
        .expect("sign up");
    let app = gated_app(Arc::clone(&auth));

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/auth/sign-out", json!({}), Some(&session.token)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(set_cookie(&response).contains("Max-Age=0"));

    let response = app
        .oneshot(get_with("/api/v1/me", Some(&session.token)))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
