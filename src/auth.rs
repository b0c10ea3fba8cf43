//! Client-side route gate.
//!
//! A convenience gate only: it decides whether to show a guarded view based
//! on the presence of the access-token cookie. The API still authorizes
//! every request on its own.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{info, instrument, warn};
use url::form_urlencoded;

use crate::api::cookies::{ACCESS_TOKEN_COOKIE, CookieStore};
use crate::api::endpoints::LOGOUT_PATH;
use crate::api::ApiClient;
use crate::cache::{QueryCache, mutex_lock};
use crate::error::ApiError;

const SOURCE: &str = "auth";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Send the user to sign-in; `location` carries the original path.
    Redirect { location: String },
}

pub struct AuthGate {
    cookies: Arc<dyn CookieStore>,
    sign_in_path: String,
    state: Mutex<AuthState>,
}

impl fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthGate")
            .field("sign_in_path", &self.sign_in_path)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(cookies: Arc<dyn CookieStore>, sign_in_path: impl Into<String>) -> Self {
        Self {
            cookies,
            sign_in_path: sign_in_path.into(),
            state: Mutex::new(AuthState::Unauthenticated),
        }
    }

    /// State as of the last check.
    pub fn state(&self) -> AuthState {
        *mutex_lock(&self.state, SOURCE, "state")
    }

    /// Re-reads the access-token cookie; nothing is cached between checks.
    pub fn check(&self) -> AuthState {
        let next = match self.cookies.get(ACCESS_TOKEN_COOKIE) {
            Some(token) if !token.is_empty() => AuthState::Authenticated,
            _ => AuthState::Unauthenticated,
        };
        self.transition(next, "cookie check");
        next
    }

    /// Decides whether navigating to `path` may proceed.
    pub fn guard(&self, path: &str) -> GuardDecision {
        match self.check() {
            AuthState::Authenticated => GuardDecision::Allow,
            AuthState::Unauthenticated => {
                let location = self.sign_in_location(path);
                info!(path, %location, "guarded navigation redirected to sign-in");
                GuardDecision::Redirect { location }
            }
        }
    }

    pub fn sign_in_location(&self, path: &str) -> String {
        let redirect: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
        format!("{}?redirect={redirect}", self.sign_in_path)
    }

    /// Logs out server-side, then clears the auth cookies and the query cache.
    ///
    /// Local state is cleared even when the logout request fails; the error is
    /// still returned so the caller can report it.
    #[instrument(skip_all)]
    pub async fn sign_out(&self, client: &ApiClient, cache: &QueryCache) -> Result<(), ApiError> {
        let result = client.post_empty(LOGOUT_PATH).await;
        if let Err(err) = &result {
            warn!(error = %err, "logout request failed; clearing local session anyway");
        }

        self.cookies.clear_auth();
        cache.clear();
        self.transition(AuthState::Unauthenticated, "sign-out");
        result
    }

    fn transition(&self, next: AuthState, reason: &'static str) {
        let mut state = mutex_lock(&self.state, SOURCE, "transition");
        if *state != next {
            info!(from = %*state, to = %next, reason, "auth state changed");
            *state = next;
        }
    }
}
