//! Vitals readings: merge rules and critical-threshold badges.
//!
//! The edge service exposes a point-in-time "latest" reading and a
//! historical list per patient. The client merges the two into one
//! timeline — union by timestamp, the point-in-time reading wins a
//! collision, newest first — and flags each reading against fixed clinical
//! bounds for display.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display severity of a reading or a single vital.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One measurement from a claimed device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VitalsReading {
    pub device_id: String,
    pub patient_id: i64,
    pub recorded_at: DateTime<Utc>,
    pub heart_rate_bpm: u32,
    pub spo2_pct: f64,
    pub temperature_c: f64,
}

impl VitalsReading {
    #[must_use]
    pub const fn heart_rate_severity(&self) -> Severity {
        match self.heart_rate_bpm {
            0..40 | 131.. => Severity::Critical,
            40..50 | 111..=130 => Severity::Warning,
            _ => Severity::Normal,
        }
    }

    #[must_use]
    pub fn spo2_severity(&self) -> Severity {
        if self.spo2_pct < 90.0 {
            Severity::Critical
        } else if self.spo2_pct < 94.0 {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    #[must_use]
    pub fn temperature_severity(&self) -> Severity {
        if self.temperature_c >= 39.0 || self.temperature_c < 35.0 {
            Severity::Critical
        } else if self.temperature_c >= 38.0 {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    /// Overall badge: the worst of the per-vital severities.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.heart_rate_severity()
            .max(self.spo2_severity())
            .max(self.temperature_severity())
    }
}

/// Merge a historical list with an optional point-in-time reading.
///
/// Union by `recorded_at`; the point-in-time reading wins a timestamp
/// collision (it is the fresher sample of the same tick). Result is sorted
/// newest first.
#[must_use]
pub fn merge_readings(
    history: Vec<VitalsReading>,
    latest: Option<VitalsReading>,
) -> Vec<VitalsReading> {
    let mut merged: Vec<VitalsReading> = Vec::with_capacity(history.len() + 1);
    if let Some(latest) = latest {
        merged.push(latest);
    }
    for reading in history {
        if !merged
            .iter()
            .any(|existing| existing.recorded_at == reading.recorded_at)
        {
            merged.push(reading);
        }
    }
    merged.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    merged
}
