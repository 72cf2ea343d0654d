use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use patient_cell::models::Patient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Triage {
    pub id: i64,
    pub patient: Patient,
    pub triage_date: NaiveDateTime,
    pub symptoms: String,
    pub temperature: f64,
    pub blood_pressure: String,
    pub heart_rate: i32,
    pub respiratory_rate: i32,
    pub oxygen_saturation: i32,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub attended_by: String,
}

/// Closed urgency scale assigned at triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Emergencia,
    Urgente,
    MenosUrgente,
    NoUrgente,
}

impl Priority {
    /// Worklist order, most urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Emergencia => 1,
            Priority::Urgente => 2,
            Priority::MenosUrgente => 3,
            Priority::NoUrgente => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Emergencia => "Emergencia",
            Priority::Urgente => "Urgente",
            Priority::MenosUrgente => "Menos Urgente",
            Priority::NoUrgente => "No Urgente",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageCreateInput {
    pub patient_id: i64,
    pub triage_date: NaiveDateTime,
    pub symptoms: String,
    pub temperature: f64,
    pub blood_pressure: String,
    pub heart_rate: i32,
    pub respiratory_rate: i32,
    pub oxygen_saturation: i32,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}
