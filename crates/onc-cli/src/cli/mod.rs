use clap::Parser;

pub mod global;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use subcommands::Commands;

/// Top-level CLI parser for the `onc` binary.
#[derive(Debug, Parser)]
#[command(name = "onc", version, about = "OnControl - oncology care-coordination client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::AuthCommands;
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "onc", "--format", "table", "--limit", "10", "--verbose", "auth", "status",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["onc", "auth", "status", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["onc", "--format", "xml", "auth", "status"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn login_requires_email_and_password() {
        assert!(Cli::try_parse_from(["onc", "auth", "login", "--email", "a@b.c"]).is_err());
        let cli = Cli::try_parse_from([
            "onc", "auth", "login", "--email", "a@b.c", "--password", "secret",
        ])
        .expect("cli should parse");
        let Commands::Auth {
            action: AuthCommands::Login(args),
        } = cli.command
        else {
            panic!("expected auth login");
        };
        assert_eq!(args.email, "a@b.c");
    }

    #[test]
    fn availability_takes_an_explicit_value() {
        let cli = Cli::try_parse_from(["onc", "doctor", "availability", "--available", "false"])
            .expect("cli should parse");
        let Commands::Doctor {
            action: super::subcommands::DoctorCommands::Availability(args),
        } = cli.command
        else {
            panic!("expected doctor availability");
        };
        assert!(!args.available);
    }

    #[test]
    fn appointment_create_parses_rfc3339() {
        let cli = Cli::try_parse_from([
            "onc",
            "appointment",
            "create",
            "--patient-id",
            "19",
            "--at",
            "2026-08-10T15:30:00Z",
        ])
        .expect("cli should parse");
        let Commands::Appointment {
            action: super::subcommands::AppointmentCommands::Create(args),
        } = cli.command
        else {
            panic!("expected appointment create");
        };
        assert_eq!(args.patient_id, 19);
        assert_eq!(args.at.to_rfc3339(), "2026-08-10T15:30:00+00:00");
    }
}
