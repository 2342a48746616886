//! `onc appointment` — listing for doctors and patients, scheduling for
//! doctors.

use onc_api::NewAppointment;
use onc_core::{Identity, Role};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AppointmentCommands, AppointmentCreateArgs};
use crate::commands::shared::authorize;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &AppointmentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AppointmentCommands::List => list(ctx, flags).await,
        AppointmentCommands::Create(args) => create(args, ctx, flags).await,
    }
}

async fn list(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor, Role::Patient])?;
    let client = ctx.platform(identity.token())?;
    let limit = ctx.limit(flags.limit);

    let appointments = match &identity {
        Identity::Doctor(doc) => client.list_doctor_appointments(doc.profile.id, limit).await?,
        Identity::Patient(pat) => {
            client
                .list_patient_appointments(pat.profile.id, limit)
                .await?
        }
        Identity::Organization(_) => anyhow::bail!("session state out of sync"),
    };
    output(&appointments, flags.format)
}

async fn create(
    args: &AppointmentCreateArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor])?;
    let Identity::Doctor(doc) = &identity else {
        anyhow::bail!("session state out of sync");
    };

    let client = ctx.platform(identity.token())?;
    let appointment = client
        .create_appointment(&NewAppointment {
            doctor_id: doc.profile.id,
            patient_id: args.patient_id,
            scheduled_at: args.at,
            location: args.location.clone(),
            notes: args.notes.clone(),
        })
        .await?;
    output(&appointment, flags.format)
}
