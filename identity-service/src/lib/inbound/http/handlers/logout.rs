use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::presented_token;
use crate::inbound::http::router::AppState;

/// Revoke the presented token. Not behind the auth middleware: expired or
/// already revoked tokens are accepted and revoked again.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let raw = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::BadRequest("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::BadRequest("Invalid Authorization header".to_string()))?;

    let token = presented_token(raw).ok_or_else(|| {
        ApiError::BadRequest(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })?;

    state.auth_service.logout(token).await;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Logged out successfully".to_string(),
        },
    ))
}
