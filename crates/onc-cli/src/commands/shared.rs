//! Guard evaluation shared by protected commands.

use onc_auth::{Decision, RouteGuard};
use onc_core::{Identity, Role};

use crate::context::AppContext;

/// Evaluate a role guard against the session before touching the network.
///
/// Returns the signed-in identity on [`Decision::Allow`]. Every other
/// decision becomes an error carrying the guard's navigation intent as the
/// next step for the user.
///
/// # Errors
///
/// Returns an error when the session is loading, absent, or the wrong role.
pub fn authorize(ctx: &AppContext, roles: &[Role]) -> anyhow::Result<Identity> {
    let state = ctx.session.state();
    let guard = RouteGuard::require_any(roles);
    match guard.evaluate(&state) {
        Decision::Allow => state
            .identity
            .ok_or_else(|| anyhow::anyhow!("session state out of sync")),
        Decision::Loading => anyhow::bail!("session is still loading — retry"),
        Decision::RedirectToLogin => {
            anyhow::bail!("not signed in — run `onc auth login`")
        }
        Decision::Redirect(dashboard) => {
            anyhow::bail!(
                "this command is not available to your role — your dashboard is {dashboard}"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use onc_config::OncConfig;

    use super::*;

    fn empty_ctx() -> AppContext {
        let tmp = std::env::temp_dir().join(format!("onc-cli-test-{}", std::process::id()));
        let ctx = AppContext {
            config: OncConfig::default(),
            session: onc_auth::SessionStore::with_dir(tmp),
        };
        ctx.session.load_from_disk();
        ctx
    }

    #[test]
    fn unauthenticated_points_to_login() {
        let err = authorize(&empty_ctx(), &[Role::Doctor]).unwrap_err();
        assert!(err.to_string().contains("onc auth login"));
    }
}
