//! Dashboard routes: the aggregated view-model for the overview page.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::services::dashboard::{self, DashboardView};
use crate::AppState;

/// GET /api/v1/dashboard: aggregated dashboard view.
///
/// Collections that fail to load are reported as empty, never as an error.
pub async fn view(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardView>>, AppError> {
    let snapshot = dashboard::load_snapshot(&state.db).await;

    let view = if state.config.dashboard_memoize {
        state.dashboard_cache.get_or_assemble(&snapshot)?
    } else {
        dashboard::assemble(&snapshot)
    };

    Ok(ApiResponse::success(view))
}
