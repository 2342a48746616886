//! `onc patient` — doctor-side patient management.

use onc_api::NewPatient;
use onc_core::{Identity, Role};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{PatientCommands, PatientRegisterArgs};
use crate::commands::shared::authorize;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &PatientCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PatientCommands::Register(args) => register(args, ctx, flags).await,
        PatientCommands::List => list(ctx, flags).await,
        PatientCommands::Get { id } => get(*id, ctx, flags).await,
    }
}

async fn register(
    args: &PatientRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor])?;
    let Identity::Doctor(doc) = &identity else {
        anyhow::bail!("session state out of sync");
    };

    let client = ctx.platform(identity.token())?;
    let profile = client
        .register_patient(
            doc.profile.id,
            &NewPatient {
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                email: args.email.clone(),
                birth_date: args.birth_date,
                gender: args.gender.clone(),
                diagnosis: args.diagnosis.clone(),
                treatment_stage: args.treatment_stage.clone(),
                phone: args.phone.clone(),
            },
        )
        .await?;
    output(&profile, flags.format)
}

async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor])?;
    let Identity::Doctor(doc) = &identity else {
        anyhow::bail!("session state out of sync");
    };

    let client = ctx.platform(identity.token())?;
    let patients = client
        .list_patients(doc.profile.id, ctx.limit(flags.limit))
        .await?;
    output(&patients, flags.format)
}

async fn get(id: i64, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor, Role::Organization])?;
    let client = ctx.platform(identity.token())?;
    let patient = client.get_patient(id).await?;
    output(&patient, flags.format)
}
