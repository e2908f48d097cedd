use std::collections::HashMap;
use std::sync::Mutex;

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use super::domain::AccountId;

/// Name of the cookie mirroring the signed-in session.
pub const SESSION_COOKIE: &str = "__session";

const EVENT_BUFFER: usize = 64;

/// Opaque bearer value stored in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SessionToken(pub String);

impl SessionToken {
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }
}

/// Signed-in context handed to handlers through request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: SessionToken,
    pub uid: AccountId,
    pub expires_at: DateTime<Utc>,
}

/// Change notifications for listeners interested in who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(AccountId),
    SignedOut(AccountId),
}

/// Explicit session context replacing ambient auth state.
///
/// Issues short-lived tokens, resolves them back to account ids, and broadcasts sign-in and
/// sign-out events to subscribers.
pub struct SessionRegistry {
    ttl: Duration,
    sessions: Mutex<HashMap<SessionToken, AuthSession>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionRegistry {
    pub fn new(ttl_minutes: u32) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            ttl: Duration::minutes(i64::from(ttl_minutes)),
            sessions: Mutex::new(HashMap::new()),
            events,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn issue(&self, uid: AccountId) -> AuthSession {
        self.issue_at(uid, Utc::now())
    }

    /// Issue a session for `uid`, pruning sessions that expired before `now`.
    pub fn issue_at(&self, uid: AccountId, now: DateTime<Utc>) -> AuthSession {
        let session = AuthSession {
            token: SessionToken::generate(),
            uid: uid.clone(),
            expires_at: now + self.ttl,
        };
        {
            let mut sessions = self.sessions.lock().expect("session mutex poisoned");
            let before = sessions.len();
            sessions.retain(|_, existing| existing.expires_at > now);
            let pruned = before - sessions.len();
            if pruned > 0 {
                debug!(pruned, "expired sessions pruned");
            }
            sessions.insert(session.token.clone(), session.clone());
        }
        // No subscribers is fine.
        let _ = self.events.send(SessionEvent::SignedIn(uid));
        session
    }

    pub fn resolve(&self, token: &SessionToken) -> Option<AuthSession> {
        self.resolve_at(token, Utc::now())
    }

    /// Look up a live session, dropping it if it has expired.
    pub fn resolve_at(&self, token: &SessionToken, now: DateTime<Utc>) -> Option<AuthSession> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let session = sessions.get(token)?.clone();
        if session.expires_at <= now {
            debug!(uid = %session.uid.0, "session expired");
            sessions.remove(token);
            return None;
        }
        Some(session)
    }

    pub fn revoke(&self, token: &SessionToken) -> Option<AccountId> {
        let removed = self
            .sessions
            .lock()
            .expect("session mutex poisoned")
            .remove(token)?;
        let _ = self.events.send(SessionEvent::SignedOut(removed.uid.clone()));
        Some(removed.uid)
    }

    /// `Set-Cookie` value carrying a freshly issued session.
    pub fn cookie_for(&self, session: &AuthSession) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            session.token.0,
            self.ttl.num_seconds()
        )
    }
}

/// `Set-Cookie` value that clears the session marker.
pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0")
}

/// Extract the session token from the request's `Cookie` headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(|value| SessionToken(value.to_string()))
}
