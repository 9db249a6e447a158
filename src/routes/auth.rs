//! Session routes: login, logout, check, identity, permissions.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{ApiResponse, AppError};
use crate::services::session::{
    self, AuthCheck, Identity, LogoutOutcome, Permissions, Session, TokenPair,
};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token fields plus the identity the new session belongs to.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub identity: Option<Identity>,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let (session, tokens) = session::login(
        &state.db,
        &body.email,
        &body.password,
        &state.config.jwt_secret,
        state.config.jwt_access_token_expiry_secs,
    )
    .await?;

    Ok(ApiResponse::success(LoginResponse {
        tokens,
        identity: session.identity().cloned(),
    }))
}

/// POST /api/v1/auth/logout: stateless; the client discards its token.
pub async fn logout(mut session: Session) -> Json<ApiResponse<LogoutOutcome>> {
    ApiResponse::success(session.logout())
}

/// GET /api/v1/auth/check
pub async fn check(session: Session) -> Json<ApiResponse<AuthCheck>> {
    ApiResponse::success(session.check())
}

/// GET /api/v1/auth/identity: `data: null` when anonymous.
pub async fn identity(session: Session) -> Json<ApiResponse<Option<Identity>>> {
    ApiResponse::success(session.identity().cloned())
}

/// GET /api/v1/auth/permissions: `data: null` when anonymous.
pub async fn permissions(session: Session) -> Json<ApiResponse<Option<Permissions>>> {
    ApiResponse::success(session.permissions())
}
