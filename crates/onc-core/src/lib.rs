//! # onc-core
//!
//! Core types for the OnControl client workspace.
//!
//! This crate provides the foundational types shared across all OnControl
//! crates:
//! - The role-tagged [`identity::Identity`] sum type and its per-role records
//! - The [`role::Role`] enum and navigation path constants
//! - Domain entities consumed by the platform REST client

pub mod entities;
pub mod identity;
pub mod role;

pub use identity::Identity;
pub use role::Role;
