//! # onc-api
//!
//! Typed REST client for the OnControl platform backend.
//!
//! The backend owns all persistence and business rules; this crate is the
//! thin fetch layer over its doctor, patient, and appointment endpoints.
//! Requests authenticate with the session token, read through from the
//! session store — this crate never writes session state.

pub mod appointments;
pub mod client;
pub mod doctors;
pub mod error;
pub mod http;
pub mod patients;

pub use appointments::NewAppointment;
pub use client::PlatformClient;
pub use doctors::NewDoctor;
pub use error::ApiError;
pub use patients::NewPatient;
