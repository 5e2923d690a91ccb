use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::validation::{validate_blood_pressure, validate_heart_rate, validate_weight, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vital {
    pub id: Uuid,
    pub user_id: String,
    pub measured_at: DateTime<Utc>,
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub weight_kg: Option<f64>,
    pub source: VitalSource,
}

#[derive(Debug, Clone)]
pub struct CreateVital {
    pub user_id: String,
    pub measured_at: DateTime<Utc>,
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub weight_kg: Option<f64>,
    pub source: VitalSource,
}

/// Where a measurement came from. API submissions are always manual.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VitalSource {
    Manual,
}

impl VitalSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VitalSource::Manual => "MANUAL",
        }
    }
}

impl fmt::Display for VitalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VitalSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUAL" => Ok(VitalSource::Manual),
            other => Err(format!("Unknown vital source: {}", other)),
        }
    }
}

/// Body of a vitals submission. Every measurement is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VitalSubmission {
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub weight_kg: Option<f64>,
}

impl VitalSubmission {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_blood_pressure(self.systolic, self.diastolic)?;
        if let Some(hr) = self.heart_rate {
            validate_heart_rate(hr)?;
        }
        if let Some(weight_kg) = self.weight_kg {
            validate_weight(weight_kg)?;
        }
        Ok(())
    }
}
