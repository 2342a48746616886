use serde::Serialize;

use onc_core::role::LOGIN_PATH;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    navigate_to: &'static str,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    // Local teardown never waits on the backend; the server notice inside
    // sign_out is best-effort. A missing backend URL shouldn't block it either.
    match ctx.gateway() {
        Ok(gateway) => onc_auth::sign_out(&gateway, &ctx.session).await?,
        Err(error) => {
            tracing::warn!(%error, "backend not configured; clearing the local session only");
            ctx.session.clear()?;
        }
    }

    output(
        &AuthLogoutResponse {
            cleared: true,
            navigate_to: LOGIN_PATH,
        },
        flags.format,
    )
}
