//! # onc-edge
//!
//! Client for the external IoT edge vitals service.
//!
//! A separate HTTP service from the platform backend, reached with the same
//! bearer token: device claim, latest reading, full history. The crate also
//! owns the display logic the vitals views share — merging the point-in-time
//! reading into the historical timeline and flagging readings against
//! clinical thresholds.

pub mod client;
pub mod error;
pub mod readings;

pub use client::{DeviceClaim, EdgeClient};
pub use error::EdgeError;
pub use readings::{Severity, VitalsReading, merge_readings};
