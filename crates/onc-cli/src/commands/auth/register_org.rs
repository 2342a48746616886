use serde::Serialize;

use onc_auth::OrganizationRegistration;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RegisterOrgArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct RegisterOrgResponse {
    authenticated: bool,
    organization: String,
    navigate_to: &'static str,
}

pub async fn handle(
    args: &RegisterOrgArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let gateway = ctx.gateway()?;
    let registration = OrganizationRegistration {
        email: args.email.clone(),
        password: args.password.clone(),
        organization_name: args.name.clone(),
        country: args.country.clone(),
        city: args.city.clone(),
    };
    let identity = onc_auth::register_organization(&gateway, &ctx.session, &registration).await?;

    output(
        &RegisterOrgResponse {
            authenticated: true,
            organization: args.name.clone(),
            navigate_to: identity.dashboard_path(),
        },
        flags.format,
    )
}
