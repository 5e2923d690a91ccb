use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub total_weeks: i32,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateProgram {
    pub name: String,
    pub description: Option<String>,
    pub total_weeks: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: Uuid,
    pub program_id: Uuid,
    pub phase_number: i32,
    pub label: String,
    pub start_week: i32,
    pub end_week: i32,
}

#[derive(Debug, Clone)]
pub struct CreatePhase {
    pub program_id: Uuid,
    pub phase_number: i32,
    pub label: String,
    pub start_week: i32,
    pub end_week: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,
    pub user_id: String,
    pub program_id: Uuid,
    pub phase_number: i32,
    pub week_number: i32,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub modality: Modality,
    pub planned_duration_min: i32,
    pub intensity_hint: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A session about to be written by the program initializer.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: String,
    pub program_id: Uuid,
    pub phase_number: i32,
    pub week_number: i32,
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    pub modality: Modality,
    pub planned_duration_min: i32,
    pub intensity_hint: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Cardio,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    Walk,
    Treadmill,
    Bike,
    PoolWalk,
    PoolSwim,
    Aquabike,
    Run,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Cardio => "CARDIO",
        }
    }
}

impl Modality {
    pub const ALL: [Modality; 7] = [
        Modality::Walk,
        Modality::Treadmill,
        Modality::Bike,
        Modality::PoolWalk,
        Modality::PoolSwim,
        Modality::Aquabike,
        Modality::Run,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Walk => "WALK",
            Modality::Treadmill => "TREADMILL",
            Modality::Bike => "BIKE",
            Modality::PoolWalk => "POOL_WALK",
            Modality::PoolSwim => "POOL_SWIM",
            Modality::Aquabike => "AQUABIKE",
            Modality::Run => "RUN",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CARDIO" => Ok(ActivityType::Cardio),
            other => Err(format!("Unknown activity type: {}", other)),
        }
    }
}

impl FromStr for Modality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modality::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Unknown modality: {}", s))
    }
}
