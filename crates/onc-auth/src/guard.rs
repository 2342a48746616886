//! Declarative access control over the session state.
//!
//! The guard is a pure state machine with states
//! {loading, unauthenticated, wrong-role, authorized}; the only input is a
//! [`SessionState`] snapshot and the only output is a [`Decision`]. It never
//! errors and never mutates — navigation is a declarative path intent the
//! caller executes.

use onc_core::role::{LOGIN_PATH, Role};

use crate::session::SessionState;

/// Outcome of evaluating a guard against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Hydration has not finished: render a neutral placeholder, leak nothing.
    Loading,
    /// No session: navigate to the login entry point.
    RedirectToLogin,
    /// Authenticated with a non-matching role: navigate to that role's own
    /// dashboard — never the requested path, so redirects cannot loop.
    Redirect(&'static str),
    /// Role matches: render the protected content.
    Allow,
}

impl Decision {
    /// Path intent carried by a redirecting decision.
    #[must_use]
    pub const fn redirect_path(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::Redirect(path) => Some(*path),
            Self::Loading | Self::Allow => None,
        }
    }
}

/// Gate for role-restricted views.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    required: Vec<Role>,
}

impl RouteGuard {
    /// Guard admitting a single role.
    #[must_use]
    pub fn require(role: Role) -> Self {
        Self {
            required: vec![role],
        }
    }

    /// Guard admitting any of the given roles.
    #[must_use]
    pub fn require_any(roles: &[Role]) -> Self {
        Self {
            required: roles.to_vec(),
        }
    }

    /// Evaluate the guard against a session snapshot.
    #[must_use]
    pub fn evaluate(&self, state: &SessionState) -> Decision {
        if state.is_loading {
            return Decision::Loading;
        }
        let Some(identity) = &state.identity else {
            return Decision::RedirectToLogin;
        };
        let role = identity.role();
        if self.required.contains(&role) {
            Decision::Allow
        } else {
            Decision::Redirect(role.dashboard_path())
        }
    }
}
