use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::auth::{AuthFlowError, AuthService};
use super::domain::{AccountId, ApprovalDecision, ApprovalStatus, Credentials, RegistrationDetails};
use super::gate::{AccessState, StatusBanner};
use super::identity::{AuthError, IdentityProvider};
use super::repository::{ProfileRepository, RepositoryError};
use super::service::AccountServiceError;
use super::session::{cleared_session_cookie, token_from_headers, AuthSession};

/// Router exposing sign-up/sign-in, the current user's profile, and the admin approval queue.
pub fn account_router<I, R>(service: Arc<AuthService<I, R>>) -> Router
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    Router::new()
        .route("/api/v1/auth/sign-up", post(sign_up_handler::<I, R>))
        .route("/api/v1/auth/sign-in", post(sign_in_handler::<I, R>))
        .route("/api/v1/auth/sign-out", post(sign_out_handler::<I, R>))
        .route("/api/v1/me", get(me_handler::<I, R>))
        .route("/api/v1/me/registration", post(registration_handler::<I, R>))
        .route("/api/v1/admin/users", get(admin_users_handler::<I, R>))
        .route(
            "/api/v1/admin/users/:uid/approval",
            post(decision_handler::<I, R>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct StatusQuery {
    #[serde(default)]
    pub status: Option<ApprovalStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DecisionRequest {
    pub decision: ApprovalDecision,
}

pub(crate) async fn sign_up_handler<I, R>(
    State(service): State<Arc<AuthService<I, R>>>,
    axum::Json(credentials): axum::Json<Credentials>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    match service.sign_up(credentials).await {
        Ok((session, profile)) => {
            let cookie = service.sessions().cookie_for(&session);
            let access = AccessState::from_profile(Some(&profile));
            let payload = json!({
                "uid": session.uid.0,
                "access": access,
                "profile": profile,
            });
            (
                StatusCode::CREATED,
                [(header::SET_COOKIE, cookie)],
                axum::Json(payload),
            )
                .into_response()
        }
        Err(error) => auth_error_response(error),
    }
}

pub(crate) async fn sign_in_handler<I, R>(
    State(service): State<Arc<AuthService<I, R>>>,
    axum::Json(credentials): axum::Json<Credentials>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    let session = match service.sign_in(credentials).await {
        Ok(session) => session,
        Err(error) => return auth_error_response(error),
    };

    let access = match service.accounts().access_state(Some(&session.uid)) {
        Ok(access) => access,
        Err(error) => return account_error_response(error),
    };
    let cookie = service.sessions().cookie_for(&session);
    let payload = json!({
        "uid": session.uid.0,
        "access": access,
    });
    (StatusCode::OK, [(header::SET_COOKIE, cookie)], axum::Json(payload)).into_response()
}

pub(crate) async fn sign_out_handler<I, R>(
    State(service): State<Arc<AuthService<I, R>>>,
    headers: HeaderMap,
) -> Response
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    if let Some(token) = token_from_headers(&headers) {
        service.sign_out(&token);
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, cleared_session_cookie())],
    )
        .into_response()
}

pub(crate) async fn me_handler<I, R>(
    State(service): State<Arc<AuthService<I, R>>>,
    session: Option<Extension<AuthSession>>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    let Some(Extension(session)) = session else {
        return sign_in_required();
    };

    match service.accounts().profile(&session.uid) {
        Ok(profile) => {
            let access = AccessState::from_profile(Some(&profile));
            let payload = json!({
                "profile": profile,
                "access": access,
                "banner": StatusBanner::for_status(profile.approval_status),
                "needs_registration": !profile.registration_complete,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn registration_handler<I, R>(
    State(service): State<Arc<AuthService<I, R>>>,
    session: Option<Extension<AuthSession>>,
    axum::Json(details): axum::Json<RegistrationDetails>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    let Some(Extension(session)) = session else {
        return sign_in_required();
    };

    match service
        .accounts()
        .complete_registration(&session.uid, details)
    {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn admin_users_handler<I, R>(
    State(service): State<Arc<AuthService<I, R>>>,
    session: Option<Extension<AuthSession>>,
    Query(query): Query<StatusQuery>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    let Some(Extension(session)) = session else {
        return sign_in_required();
    };

    let status = query.status.unwrap_or_default();
    match service.accounts().users_by_status(&session.uid, status) {
        Ok(users) => {
            let payload = json!({
                "status": status,
                "count": users.len(),
                "users": users,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => account_error_response(error),
    }
}

pub(crate) async fn decision_handler<I, R>(
    State(service): State<Arc<AuthService<I, R>>>,
    session: Option<Extension<AuthSession>>,
    Path(uid): Path<String>,
    axum::Json(request): axum::Json<DecisionRequest>,
) -> Response
where
    I: IdentityProvider + 'static,
    R: ProfileRepository + 'static,
{
    let Some(Extension(session)) = session else {
        return sign_in_required();
    };

    let target = AccountId(uid);
    match service
        .accounts()
        .decide(&session.uid, &target, request.decision)
    {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => account_error_response(error),
    }
}

pub(crate) fn auth_error_response(error: AuthFlowError) -> Response {
    let status = match &error {
        AuthFlowError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AuthFlowError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        AuthFlowError::Auth(AuthError::DuplicateAccount) => StatusCode::CONFLICT,
        AuthFlowError::Auth(AuthError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        AuthFlowError::Account(inner) => account_error_status(inner),
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) fn account_error_response(error: AccountServiceError) -> Response {
    let status = account_error_status(&error);
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

fn account_error_status(error: &AccountServiceError) -> StatusCode {
    match error {
        AccountServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AccountServiceError::Forbidden => StatusCode::FORBIDDEN,
        AccountServiceError::InvalidTransition { .. }
        | AccountServiceError::RegistrationAlreadyComplete
        | AccountServiceError::Repository(RepositoryError::Conflict)
        | AccountServiceError::Repository(RepositoryError::StatusChanged { .. }) => {
            StatusCode::CONFLICT
        }
        AccountServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AccountServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

fn sign_in_required() -> Response {
    let payload = json!({ "error": "sign in required" });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}
