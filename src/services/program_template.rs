//! The fixed 12-week cardio progression.
//!
//! Weeks are grouped into four phase bands of three weeks. Each band has its
//! own weekly schedule of sessions expressed as day offsets from the first
//! day of the week. Everything here is static data plus pure lookups.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::models::{ActivityType, Modality};

pub const TOTAL_WEEKS: i32 = 12;
pub const DAYS_PER_WEEK: i64 = 7;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Week {week} is outside the program (weeks 1 to 12)")]
    WeekOutOfRange { week: i32 },
}

/// A contiguous block of weeks sharing one weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseBand {
    pub phase_number: i32,
    pub label: &'static str,
    pub start_week: i32,
    pub end_week: i32,
}

/// One planned session within a week, before it is given a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTemplate {
    pub day_offset: i64,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub modality: Modality,
    pub duration_min: i32,
    pub intensity_hint: &'static str,
}

pub const PHASE_BANDS: [PhaseBand; 4] = [
    PhaseBand {
        phase_number: 1,
        label: "Phase 1 - Gentle restart",
        start_week: 1,
        end_week: 3,
    },
    PhaseBand {
        phase_number: 2,
        label: "Phase 2 - Cardio progression",
        start_week: 4,
        end_week: 6,
    },
    PhaseBand {
        phase_number: 3,
        label: "Phase 3 - Consolidation",
        start_week: 7,
        end_week: 9,
    },
    PhaseBand {
        phase_number: 4,
        label: "Phase 4 - Return to active life",
        start_week: 10,
        end_week: 12,
    },
];

const fn cardio(day_offset: i64, modality: Modality, duration_min: i32, intensity_hint: &'static str) -> SessionTemplate {
    SessionTemplate {
        day_offset,
        activity_type: ActivityType::Cardio,
        modality,
        duration_min,
        intensity_hint,
    }
}

// Slow base building
const GENTLE_RESTART: [SessionTemplate; 3] = [
    cardio(0, Modality::Walk, 15, "Very easy walk, you should be able to talk."),
    cardio(2, Modality::Bike, 10, "Very light cycling, no breathlessness."),
    cardio(4, Modality::Walk, 15, "Comfortable walk, no pain."),
];

// More cardio plus gentle pool work
const CARDIO_PROGRESSION: [SessionTemplate; 4] = [
    cardio(0, Modality::Walk, 20, "Brisk but still comfortable walk."),
    cardio(2, Modality::Bike, 15, "Easy cycling, steady cadence."),
    cardio(4, Modality::Treadmill, 20, "Flat treadmill, no incline."),
    cardio(6, Modality::PoolWalk, 15, "Pool walking, very gentle on the joints."),
];

const CONSOLIDATION: [SessionTemplate; 4] = [
    cardio(0, Modality::Treadmill, 25, "Treadmill at a comfortable pace."),
    cardio(2, Modality::Bike, 20, "Moderate cycling."),
    cardio(4, Modality::PoolSwim, 20, "Easy swimming, frequent breaks."),
    cardio(6, Modality::Walk, 30, "Outdoor walk if possible."),
];

// Running only once the cardiologist has cleared it
const RETURN_TO_ACTIVE_LIFE: [SessionTemplate; 4] = [
    cardio(
        0,
        Modality::Run,
        10,
        "Very light jogging alternated with walking, if cleared by your cardiologist.",
    ),
    cardio(2, Modality::Bike, 25, "Moderate cycling."),
    cardio(4, Modality::PoolSwim, 25, "Continuous easy swimming."),
    cardio(6, Modality::Walk, 35, "Long walk, still comfortable."),
];

/// Phase band containing `week`.
pub fn phase_for_week(week: i32) -> Result<&'static PhaseBand, TemplateError> {
    PHASE_BANDS
        .iter()
        .find(|band| (band.start_week..=band.end_week).contains(&week))
        .ok_or(TemplateError::WeekOutOfRange { week })
}

/// Ordered session templates for `week`.
pub fn weekly_template(week: i32) -> Result<Vec<SessionTemplate>, TemplateError> {
    let band = phase_for_week(week)?;
    let schedule: &[SessionTemplate] = match band.phase_number {
        1 => &GENTLE_RESTART,
        2 => &CARDIO_PROGRESSION,
        3 => &CONSOLIDATION,
        _ => &RETURN_TO_ACTIVE_LIFE,
    };
    Ok(schedule.to_vec())
}

/// Calendar date of a session, counting the program's first day as week 1, offset 0.
pub fn session_date(start: NaiveDate, week: i32, day_offset: i64) -> NaiveDate {
    start + Duration::days(DAYS_PER_WEEK * (week as i64 - 1) + day_offset)
}

/// Number of sessions the full program plans.
pub fn total_sessions() -> usize {
    (1..=TOTAL_WEEKS)
        .filter_map(|week| weekly_template(week).ok())
        .map(|templates| templates.len())
        .sum()
}
