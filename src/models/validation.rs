use serde_json::{Map, Value};
use thiserror::Error;

pub const SCORE_MIN: i32 = 1;
pub const SCORE_MAX: i32 = 5;

/// Upper bound accepted for look-back queries.
pub const MAX_LOOK_BACK_DAYS: i64 = 365;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("mood, fatigue and sleepQuality must be numbers")]
    MissingScores,
    #[error("{field} must be a whole number")]
    NotWholeNumber { field: &'static str },
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{field} must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Daily scores extracted from a journal submission.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalScores {
    pub mood: i32,
    pub fatigue: i32,
    pub sleep_quality: i32,
}

/// Check the three required journal scores.
///
/// All three must be JSON numbers before range checks are applied, so a
/// body missing any of them gets the same message regardless of which one.
pub fn validate_journal_scores(body: &Map<String, Value>) -> Result<JournalScores, ValidationError> {
    let fields = ["mood", "fatigue", "sleepQuality"];
    let numbers: Vec<f64> = fields
        .iter()
        .filter_map(|field| body.get(*field).and_then(Value::as_f64))
        .collect();

    if numbers.len() != fields.len() {
        return Err(ValidationError::MissingScores);
    }

    Ok(JournalScores {
        mood: validate_score(numbers[0], "mood")?,
        fatigue: validate_score(numbers[1], "fatigue")?,
        sleep_quality: validate_score(numbers[2], "sleepQuality")?,
    })
}

/// Validate a 1-5 wellbeing score
pub fn validate_score(value: f64, field: &'static str) -> Result<i32, ValidationError> {
    if value.fract() != 0.0 {
        return Err(ValidationError::NotWholeNumber { field });
    }
    if value < SCORE_MIN as f64 || value > SCORE_MAX as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            min: SCORE_MIN as f64,
            max: SCORE_MAX as f64,
            value,
        });
    }
    Ok(value as i32)
}

/// Read an optional free-text field. Absent and `null` both map to `None`.
pub fn optional_text(body: &Map<String, Value>, field: &'static str) -> Result<Option<String>, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

/// Validate heart rate values
pub fn validate_heart_rate(hr: i32) -> Result<(), ValidationError> {
    check_range("heartRate", hr as f64, 30.0, 220.0)
}

/// Validate systolic and diastolic pressure, each only when present.
pub fn validate_blood_pressure(systolic: Option<i32>, diastolic: Option<i32>) -> Result<(), ValidationError> {
    if let Some(systolic) = systolic {
        check_range("systolic", systolic as f64, 50.0, 260.0)?;
    }
    if let Some(diastolic) = diastolic {
        check_range("diastolic", diastolic as f64, 30.0, 160.0)?;
    }
    Ok(())
}

/// Validate body weight in kilograms
pub fn validate_weight(weight_kg: f64) -> Result<(), ValidationError> {
    check_range("weightKg", weight_kg, 20.0, 400.0)
}

/// Validate the `days` window of a look-back query
pub fn validate_look_back_days(days: i64) -> Result<(), ValidationError> {
    check_range("days", days as f64, 0.0, MAX_LOOK_BACK_DAYS as f64)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange { field, min, max, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_journal_scores_accepts_valid_body() {
        let body = object(json!({"mood": 4, "fatigue": 2, "sleepQuality": 5}));
        let scores = validate_journal_scores(&body).unwrap();
        assert_eq!(
            scores,
            JournalScores {
                mood: 4,
                fatigue: 2,
                sleep_quality: 5
            }
        );
    }

    #[test]
    fn test_journal_scores_rejects_missing_or_string_fields() {
        let missing = object(json!({"mood": 4, "fatigue": 2}));
        assert_eq!(validate_journal_scores(&missing), Err(ValidationError::MissingScores));

        let stringly = object(json!({"mood": "4", "fatigue": 2, "sleepQuality": 3}));
        assert_eq!(validate_journal_scores(&stringly), Err(ValidationError::MissingScores));
    }

    #[test]
    fn test_score_range_and_whole_numbers() {
        assert_eq!(validate_score(1.0, "mood"), Ok(1));
        assert_eq!(validate_score(5.0, "mood"), Ok(5));
        assert!(matches!(
            validate_score(0.0, "mood"),
            Err(ValidationError::OutOfRange { field: "mood", .. })
        ));
        assert!(matches!(
            validate_score(6.0, "fatigue"),
            Err(ValidationError::OutOfRange { field: "fatigue", .. })
        ));
        assert_eq!(
            validate_score(2.5, "sleepQuality"),
            Err(ValidationError::NotWholeNumber { field: "sleepQuality" })
        );
    }

    #[test]
    fn test_optional_text() {
        let body = object(json!({"notes": "slept well", "symptoms": null, "other": 3}));
        assert_eq!(optional_text(&body, "notes"), Ok(Some("slept well".to_string())));
        assert_eq!(optional_text(&body, "symptoms"), Ok(None));
        assert_eq!(optional_text(&body, "missing"), Ok(None));
        assert!(optional_text(&body, "other").is_err());
    }

    #[test]
    fn test_vitals_ranges() {
        assert!(validate_heart_rate(62).is_ok());
        assert!(validate_heart_rate(10).is_err());
        assert!(validate_blood_pressure(Some(120), Some(80)).is_ok());
        assert!(validate_blood_pressure(None, None).is_ok());
        assert!(validate_blood_pressure(Some(300), None).is_err());
        assert!(validate_blood_pressure(None, Some(10)).is_err());
        assert!(validate_weight(72.5).is_ok());
        assert!(validate_weight(0.0).is_err());
    }

    #[test]
    fn test_look_back_days() {
        assert!(validate_look_back_days(0).is_ok());
        assert!(validate_look_back_days(365).is_ok());
        assert!(validate_look_back_days(-1).is_err());
        assert!(validate_look_back_days(366).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = validate_score(7.0, "mood").unwrap_err();
        assert_eq!(err.to_string(), "mood must be between 1 and 5, got 7");
    }
}
