use serde::{Deserialize, Serialize};

use crate::models::{validate_look_back_days, ValidationError};
use crate::services::calendar::DEFAULT_LOOK_BACK_DAYS;

#[derive(Debug, Default, Deserialize)]
pub struct LookBackQuery {
    /// Number of past days to include besides today (default: 7, max: 365)
    pub days: Option<i64>,
}

impl LookBackQuery {
    pub fn get_days(&self) -> Result<i64, ValidationError> {
        let days = self.days.unwrap_or(DEFAULT_LOOK_BACK_DAYS);
        validate_look_back_days(days)?;
        Ok(days)
    }
}

/// Either a record or a message explaining why there is none.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MaybeFound<T> {
    Found(T),
    Missing { message: String },
}

impl<T> MaybeFound<T> {
    pub fn from_option(value: Option<T>, message: &str) -> Self {
        match value {
            Some(value) => MaybeFound::Found(value),
            None => MaybeFound::Missing {
                message: message.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_back_defaults_to_a_week() {
        assert_eq!(LookBackQuery::default().get_days(), Ok(7));
        assert_eq!(LookBackQuery { days: Some(0) }.get_days(), Ok(0));
        assert!(LookBackQuery { days: Some(-2) }.get_days().is_err());
    }

    #[test]
    fn test_maybe_found_serialization() {
        let found = serde_json::to_value(MaybeFound::from_option(Some(3), "none")).unwrap();
        assert_eq!(found, serde_json::json!(3));

        let missing = serde_json::to_value(MaybeFound::<i32>::from_option(None, "none")).unwrap();
        assert_eq!(missing, serde_json::json!({"message": "none"}));
    }
}
