//! # onc-auth
//!
//! Identity and session handling for the OnControl client.
//!
//! Provides the authentication gateway (`reqwest` round trips for login,
//! organization registration, and logout), the identity normalizer (raw
//! payload → role-tagged [`onc_core::Identity`]), the durable session store
//! (`keyring` + session key files), and the route guard gating
//! role-restricted views.
//!
//! Control flow: gateway produces raw payloads → normalizer maps them into
//! the identity sum type → session store holds and persists it → guard and
//! pages consume the store's read-only state.

pub mod error;
pub mod gateway;
pub mod guard;
pub mod normalize;
pub mod session;

pub use error::AuthError;
pub use gateway::{AuthGateway, OrganizationRegistration};
pub use guard::{Decision, RouteGuard};
pub use session::{SessionState, SessionStore};

use onc_core::Identity;

/// Full login flow: round trip, normalize, persist.
///
/// The store's epoch is captured before the request goes out; if the session
/// changes while the response is in flight (a logout, another login), the
/// stale identity is discarded.
///
/// # Errors
///
/// Surfaces gateway and normalizer failures unchanged; returns
/// [`AuthError::SupersededLogin`] when the epoch guard discarded the result.
pub async fn sign_in(
    gateway: &AuthGateway,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Identity, AuthError> {
    let observed = store.epoch();
    let payload = gateway.login(email, password).await?;
    let identity = normalize::normalize(&payload)?;
    if store.set_identity_if_current(observed, &identity)? {
        Ok(identity)
    } else {
        Err(AuthError::SupersededLogin)
    }
}

/// Full registration flow: round trip, normalize, persist.
///
/// # Errors
///
/// Same policy as [`sign_in`].
pub async fn register_organization(
    gateway: &AuthGateway,
    store: &SessionStore,
    registration: &OrganizationRegistration,
) -> Result<Identity, AuthError> {
    let observed = store.epoch();
    let payload = gateway.register_organization(registration).await?;
    let identity = normalize::normalize(&payload)?;
    if store.set_identity_if_current(observed, &identity)? {
        Ok(identity)
    } else {
        Err(AuthError::SupersededLogin)
    }
}

/// Full logout flow: local teardown first, then best-effort server notice.
///
/// The server notification failing (timeout, offline) never blocks the
/// teardown — by the time the notice goes out the local session is gone.
///
/// # Errors
///
/// Returns [`AuthError::SessionStore`] only if the local key space could
/// not be cleared.
pub async fn sign_out(gateway: &AuthGateway, store: &SessionStore) -> Result<(), AuthError> {
    let token = store.state().identity.map(|i| i.token().to_string());
    store.clear()?;

    if let Some(token) = token
        && let Err(error) = gateway.logout(&token).await
    {
        tracing::warn!(%error, "server logout notification failed; local session already cleared");
    }
    Ok(())
}
