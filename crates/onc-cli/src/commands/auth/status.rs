use serde::Serialize;

use onc_core::Identity;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dashboard: Option<&'static str>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let state = ctx.session.state();
    let response = match &state.identity {
        Some(identity) => AuthStatusResponse {
            authenticated: true,
            role: Some(identity.role().to_string()),
            subject: Some(subject(identity)),
            dashboard: Some(identity.dashboard_path()),
        },
        None => AuthStatusResponse {
            authenticated: false,
            role: None,
            subject: None,
            dashboard: None,
        },
    };
    output(&response, flags.format)
}

fn subject(identity: &Identity) -> String {
    match identity {
        Identity::Organization(org) => org.name.clone(),
        Identity::Doctor(doc) => {
            format!("{} {}", doc.profile.first_name, doc.profile.last_name)
        }
        Identity::Patient(pat) => {
            format!("{} {}", pat.profile.first_name, pat.profile.last_name)
        }
    }
}
