//! `onc vitals` — edge service readings with threshold badges.

use serde::Serialize;

use onc_core::{Identity, Role};
use onc_edge::VitalsReading;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{ClaimArgs, VitalsCommands, VitalsTargetArgs};
use crate::commands::shared::authorize;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &VitalsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        VitalsCommands::Latest(args) => latest(args, ctx, flags).await,
        VitalsCommands::History(args) => history(args, ctx, flags).await,
        VitalsCommands::Claim(args) => claim(args, ctx, flags).await,
    }
}

/// A reading as rendered: raw vitals plus the display badges.
#[derive(Serialize)]
struct ReadingView {
    recorded_at: String,
    device_id: String,
    heart_rate_bpm: u32,
    spo2_pct: f64,
    temperature_c: f64,
    heart_rate_badge: &'static str,
    spo2_badge: &'static str,
    temperature_badge: &'static str,
    severity: &'static str,
}

impl From<&VitalsReading> for ReadingView {
    fn from(reading: &VitalsReading) -> Self {
        Self {
            recorded_at: reading.recorded_at.to_rfc3339(),
            device_id: reading.device_id.clone(),
            heart_rate_bpm: reading.heart_rate_bpm,
            spo2_pct: reading.spo2_pct,
            temperature_c: reading.temperature_c,
            heart_rate_badge: reading.heart_rate_severity().as_str(),
            spo2_badge: reading.spo2_severity().as_str(),
            temperature_badge: reading.temperature_severity().as_str(),
            severity: reading.severity().as_str(),
        }
    }
}

#[derive(Serialize)]
struct LatestResponse {
    patient_id: i64,
    reading: Option<ReadingView>,
}

async fn latest(
    args: &VitalsTargetArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor, Role::Patient])?;
    let patient_id = target_patient(&identity, args.patient_id)?;

    let edge = ctx.edge(identity.token())?;
    let reading = edge.latest_reading(patient_id).await?;
    output(
        &LatestResponse {
            patient_id,
            reading: reading.as_ref().map(ReadingView::from),
        },
        flags.format,
    )
}

async fn history(
    args: &VitalsTargetArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor, Role::Patient])?;
    let patient_id = target_patient(&identity, args.patient_id)?;

    let edge = ctx.edge(identity.token())?;
    let timeline = edge.timeline(patient_id).await?;
    let views: Vec<ReadingView> = timeline.iter().map(ReadingView::from).collect();
    output(&views, flags.format)
}

async fn claim(args: &ClaimArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let identity = authorize(ctx, &[Role::Doctor])?;
    let edge = ctx.edge(identity.token())?;
    let claim = edge.claim_device(&args.device_id, args.patient_id).await?;
    output(&claim, flags.format)
}

/// Which patient's readings to fetch: patients read their own, doctors name
/// one of theirs explicitly.
fn target_patient(identity: &Identity, flag: Option<i64>) -> anyhow::Result<i64> {
    match identity {
        Identity::Patient(pat) => {
            if let Some(id) = flag
                && id != pat.profile.id
            {
                anyhow::bail!("patients can only read their own vitals");
            }
            Ok(pat.profile.id)
        }
        Identity::Doctor(_) => {
            flag.ok_or_else(|| anyhow::anyhow!("--patient-id is required for doctors"))
        }
        Identity::Organization(_) => anyhow::bail!("session state out of sync"),
    }
}
