pub mod appointment;
pub mod auth;
pub mod doctor;
pub mod patient;
pub mod shared;
pub mod vitals;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: &Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(action, ctx, flags).await,
        Commands::Doctor { action } => doctor::handle(action, ctx, flags).await,
        Commands::Patient { action } => patient::handle(action, ctx, flags).await,
        Commands::Appointment { action } => appointment::handle(action, ctx, flags).await,
        Commands::Vitals { action } => vitals::handle(action, ctx, flags).await,
    }
}
