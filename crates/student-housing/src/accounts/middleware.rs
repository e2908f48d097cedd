use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::json;
use tracing::debug;

use super::repository::ProfileRepository;
use super::service::AccountService;
use super::session::{token_from_headers, AuthSession, SessionRegistry};

const SIGN_IN_PATH: &str = "/signin";

const PUBLIC_PREFIXES: &[&str] = &[
    "/signin",
    "/register",
    "/api/v1/auth",
    "/health",
    "/ready",
    "/metrics",
    "/images",
    "/icons",
];

/// Paths reachable without a session: auth pages, probes, static assets, and any file path.
pub fn is_public_path(path: &str) -> bool {
    path.contains('.')
        || PUBLIC_PREFIXES.iter().any(|prefix| {
            path == *prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
}

/// Coarse session gate applied ahead of every route.
///
/// Protected API calls without a live session receive 401; page requests are redirected to the
/// sign-in page with the original path preserved.
pub async fn require_session(
    State(sessions): State<Arc<SessionRegistry>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let session = token_from_headers(request.headers()).and_then(|token| sessions.resolve(&token));

    match session {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None if is_public_path(&path) => next.run(request).await,
        None if path.starts_with("/api/") => {
            debug!(path = %path, "rejecting request without session");
            unauthorized()
        }
        None => {
            let location = sign_in_location(&path);
            (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
        }
    }
}

/// Sign-in URL carrying `path` as an encoded `redirect` parameter.
pub fn sign_in_location(path: &str) -> String {
    let encoded = utf8_percent_encode(path, NON_ALPHANUMERIC);
    format!("{SIGN_IN_PATH}?redirect={encoded}")
}

/// Browsing gate for listing routes, enforced only when the access policy restricts
/// unapproved accounts.
pub async fn require_browse_access<R>(
    State(accounts): State<AccountService<R>>,
    request: Request,
    next: Next,
) -> Response
where
    R: ProfileRepository + 'static,
{
    let session = request.extensions().get::<AuthSession>().cloned();
    let state = match accounts.access_state(session.as_ref().map(|session| &session.uid)) {
        Ok(state) => state,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response();
        }
    };

    if session.is_none() {
        return unauthorized();
    }
    if !accounts.policy().can_browse(state) {
        let payload = json!({
            "error": "account approval required",
            "access": state,
        });
        return (StatusCode::FORBIDDEN, axum::Json(payload)).into_response();
    }
    next.run(request).await
}

fn unauthorized() -> Response {
    let payload = json!({ "error": "sign in required" });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

#[cfg(test)]
mod tests {
    use super::{is_public_path, sign_in_location};

    #[test]
    fn public_paths_cover_auth_probes_and_assets() {
        for path in [
            "/signin",
            "/register",
            "/api/v1/auth/sign-in",
            "/health",
            "/images/annex.jpg",
            "/favicon.ico",
        ] {
            assert!(is_public_path(path), "{path} should be public");
        }
    }

    #[test]
    fn everything_else_is_protected() {
        for path in ["/", "/listings", "/api/v1/listings", "/admin", "/signinx", "/api/v1/me"] {
            assert!(!is_public_path(path), "{path} should be protected");
        }
    }

    #[test]
    fn redirect_target_is_percent_encoded() {
        assert_eq!(sign_in_location("/listings"), "/signin?redirect=%2Flistings");
        assert_eq!(
            sign_in_location("/listings/a&b=c#top"),
            "/signin?redirect=%2Flistings%2Fa%26b%3Dc%23top"
        );
    }
}
