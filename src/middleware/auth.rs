//! Session extractors for Axum handlers.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::errors::AppError;
use crate::services::session::{Identity, Session};
use crate::AppState;

/// The request's session, anonymous when no valid bearer token is present.
impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(session_from_parts(parts, state))
    }
}

/// Authenticated caller; rejects anonymous sessions with 401.
///
/// ```ignore
/// async fn handler(CurrentUser(identity): CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state)
            .identity()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}

fn session_from_parts(parts: &Parts, state: &AppState) -> Session {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    Session::from_authorization(header, &state.config.jwt_secret)
}
