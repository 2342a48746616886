//! `onc doctor` — organization-side doctor management.

use onc_api::NewDoctor;
use onc_core::{Identity, Role};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{
    AvailabilityArgs, DoctorCommands, DoctorListArgs, DoctorRegisterArgs,
};
use crate::commands::shared::authorize;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &DoctorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        DoctorCommands::Register(args) => register(args, ctx, flags).await,
        DoctorCommands::List(args) => list(args, ctx, flags).await,
        DoctorCommands::Get { id } => get(*id, ctx, flags).await,
        DoctorCommands::Availability(args) => availability(args, ctx, flags).await,
    }
}

async fn register(
    args: &DoctorRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Organization])?;
    let Identity::Organization(org) = &identity else {
        anyhow::bail!("session state out of sync");
    };

    let client = ctx.platform(identity.token())?;
    let profile = client
        .register_doctor(
            org.id,
            &NewDoctor {
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                specialization: args.specialization.clone(),
                license_number: args.license_number.clone(),
                email: args.email.clone(),
                phone: args.phone.clone(),
            },
        )
        .await?;
    output(&profile, flags.format)
}

async fn list(args: &DoctorListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Organization])?;
    let Identity::Organization(org) = &identity else {
        anyhow::bail!("session state out of sync");
    };

    let client = ctx.platform(identity.token())?;
    let doctors = client
        .list_doctors(
            org.id,
            args.specialization.as_deref(),
            ctx.limit(flags.limit),
        )
        .await?;
    output(&doctors, flags.format)
}

async fn get(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Organization, Role::Doctor])?;
    let client = ctx.platform(identity.token())?;
    let doctor = client.get_doctor(id).await?;
    output(&doctor, flags.format)
}

async fn availability(
    args: &AvailabilityArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor])?;
    let Identity::Doctor(doc) = &identity else {
        anyhow::bail!("session state out of sync");
    };

    let client = ctx.platform(identity.token())?;
    let profile = client
        .set_doctor_availability(doc.profile.id, args.available)
        .await?;
    output(&profile, flags.format)
}
