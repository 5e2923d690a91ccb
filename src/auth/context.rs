use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::api::{error::ApiError, state::AppState};

/// The user every record of a request is scoped to.
///
/// Resolved from request extensions when an upstream layer has already
/// identified the caller, otherwise from the configured demo user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(context) = parts.extensions.get::<UserContext>() {
            return Ok(context.clone());
        }

        let state = AppState::from_ref(state);
        match state.demo_user_id.as_deref() {
            Some(user_id) if !user_id.is_empty() => Ok(UserContext::new(user_id)),
            _ => Err(ApiError::UserNotConfigured),
        }
    }
}
