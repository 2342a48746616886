//! Clap definitions for every `onc` subcommand.

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, inspect the session, register an organization
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Manage an organization's doctors
    Doctor {
        #[command(subcommand)]
        action: DoctorCommands,
    },
    /// Manage a doctor's patients
    Patient {
        #[command(subcommand)]
        action: PatientCommands,
    },
    /// List and schedule appointments
    Appointment {
        #[command(subcommand)]
        action: AppointmentCommands,
    },
    /// Device vitals from the edge service
    Vitals {
        #[command(subcommand)]
        action: VitalsCommands,
    },
}

// --- auth ---

#[derive(Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password
    Login(AuthLoginArgs),
    /// Tear down the session (server notice is best-effort)
    Logout,
    /// Show who is signed in
    Status,
    /// Self-register an organization account and sign in
    RegisterOrg(RegisterOrgArgs),
}

#[derive(Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterOrgArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Organization display name
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub city: String,
}

// --- doctor ---

#[derive(Debug, Subcommand)]
pub enum DoctorCommands {
    /// Register a doctor under the signed-in organization
    Register(DoctorRegisterArgs),
    /// List the signed-in organization's doctors
    List(DoctorListArgs),
    /// Fetch one doctor by id
    Get { id: i64 },
    /// Set whether the signed-in doctor accepts new appointments
    Availability(AvailabilityArgs),
}

#[derive(Debug, Args)]
pub struct DoctorRegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub specialization: String,
    #[arg(long)]
    pub license_number: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct DoctorListArgs {
    /// Filter by specialization
    #[arg(long)]
    pub specialization: Option<String>,
}

#[derive(Debug, Args)]
pub struct AvailabilityArgs {
    /// true to accept new appointments, false to pause
    #[arg(long, action = clap::ArgAction::Set)]
    pub available: bool,
}

// --- patient ---

#[derive(Debug, Subcommand)]
pub enum PatientCommands {
    /// Register a patient under the signed-in doctor
    Register(PatientRegisterArgs),
    /// List the signed-in doctor's patients
    List,
    /// Fetch one patient by id
    Get { id: i64 },
}

#[derive(Debug, Args)]
pub struct PatientRegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<chrono::NaiveDate>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub diagnosis: Option<String>,
    #[arg(long)]
    pub treatment_stage: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

// --- appointment ---

#[derive(Debug, Subcommand)]
pub enum AppointmentCommands {
    /// List appointments for the signed-in doctor or patient
    List,
    /// Schedule an appointment for one of the signed-in doctor's patients
    Create(AppointmentCreateArgs),
}

#[derive(Debug, Args)]
pub struct AppointmentCreateArgs {
    #[arg(long)]
    pub patient_id: i64,
    /// Scheduled time, RFC 3339 (e.g. 2026-08-10T15:30:00Z)
    #[arg(long)]
    pub at: chrono::DateTime<chrono::Utc>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

// --- vitals ---

#[derive(Debug, Subcommand)]
pub enum VitalsCommands {
    /// Most recent reading (patients: own; doctors: --patient-id)
    Latest(VitalsTargetArgs),
    /// Merged reading timeline, newest first
    History(VitalsTargetArgs),
    /// Claim a device for a patient
    Claim(ClaimArgs),
}

#[derive(Debug, Args)]
pub struct VitalsTargetArgs {
    /// Patient to read; defaults to the signed-in patient
    #[arg(long)]
    pub patient_id: Option<i64>,
}

#[derive(Debug, Args)]
pub struct ClaimArgs {
    #[arg(long)]
    pub device_id: String,
    #[arg(long)]
    pub patient_id: i64,
}
