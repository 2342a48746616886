use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    role: String,
    /// Where the client lands after this login.
    navigate_to: &'static str,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let gateway = ctx.gateway()?;
    let identity = onc_auth::sign_in(&gateway, &ctx.session, &args.email, &args.password).await?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            role: identity.role().to_string(),
            navigate_to: identity.dashboard_path(),
        },
        flags.format,
    )
}
