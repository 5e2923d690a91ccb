use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::ValidationError;
use crate::services::program_template::TemplateError;
use crate::services::ProgramError;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("DEMO_USER_ID not configured")]
    UserNotConfigured,
    #[error("Invalid JSON body")]
    InvalidBody,
    #[error("Invalid request parameters: {0}")]
    InvalidParameters(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("No default program found. Call /api/v1/program/init first.")]
    ProgramNotInitialized,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ProgramError> for ApiError {
    fn from(err: ProgramError) -> Self {
        match err {
            ProgramError::NotInitialized => ApiError::ProgramNotInitialized,
            ProgramError::Template(err) => ApiError::Template(err),
            ProgramError::Store(err) => ApiError::Store(err),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Rejected JSON body");
        ApiError::InvalidBody
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidParameters(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidParameters(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UserNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::InvalidParameters(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Template(_) => StatusCode::BAD_REQUEST,
            ApiError::ProgramNotInitialized => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error, message) = match &self {
            ApiError::UserNotConfigured => ("configuration_error", self.to_string()),
            ApiError::InvalidBody => ("invalid_body", self.to_string()),
            ApiError::InvalidParameters(_) => ("invalid_parameters", self.to_string()),
            ApiError::Validation(_) => ("validation_error", self.to_string()),
            ApiError::Template(_) => ("invalid_week", self.to_string()),
            ApiError::ProgramNotInitialized => ("program_not_initialized", self.to_string()),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "Store operation failed");
                ("internal_error", "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error,
            "message": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::UserNotConfigured.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::InvalidBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::ProgramNotInitialized.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ValidationError::MissingScores).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(TemplateError::WeekOutOfRange { week: 13 }).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_program_error_mapping() {
        assert!(matches!(
            ApiError::from(ProgramError::NotInitialized),
            ApiError::ProgramNotInitialized
        ));
        assert!(matches!(
            ApiError::from(ProgramError::Template(TemplateError::WeekOutOfRange { week: 0 })),
            ApiError::Template(_)
        ));
    }

    #[test]
    fn test_store_errors_hide_details() {
        let err = ApiError::Store(StoreError::CorruptRow {
            entity: "vital",
            reason: "Unknown vital source: X".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
