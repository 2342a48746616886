use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the credentials (HTTP 400/401-class).
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request never reached the backend. Distinct from
    /// [`AuthError::InvalidCredentials`] so the caller can suggest a
    /// connectivity check instead of a password retry.
    #[error("cannot reach the OnControl backend — check your connection ({0})")]
    NetworkUnavailable(String),

    /// Registration rejected with field-level messages (duplicate email,
    /// malformed fields).
    #[error("registration rejected: {}", .issues.join("; "))]
    Validation { issues: Vec<String> },

    /// The login response matched none of the known identity shapes.
    /// Fatal for this attempt; never silently coerced.
    #[error("login response did not match any known identity shape")]
    UnrecognizedIdentityShape,

    /// Durable session storage failed on the write side. Read-side
    /// corruption is swallowed by hydration and never surfaces here.
    #[error("session store error: {0}")]
    SessionStore(String),

    /// The session changed while the login response was in flight; the
    /// stale identity was discarded and no session was established.
    #[error("login superseded by a newer session change — not established")]
    SupersededLogin,
}
