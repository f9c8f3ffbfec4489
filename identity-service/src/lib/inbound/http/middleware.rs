use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Resolved caller, stored in request extensions by `authenticate`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    /// Raw token without the scheme label
    pub token: String,
}

/// Middleware that resolves the bearer token to a stored user.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?.to_string();

    let user = state
        .auth_service
        .resolve_identity(&token)
        .await
        .map_err(|e| {
            tracing::warn!(reason = %e, "Token rejected");
            ApiError::from(e)
        })?;

    req.extensions_mut()
        .insert(AuthenticatedUser { user, token });

    Ok(next.run(req).await)
}

/// Token carried by a `Bearer <token>` credential. The scheme name is
/// matched case-insensitively.
pub fn bearer_credential(raw: &str) -> Option<&str> {
    let (scheme, token) = raw.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    single_token(token.trim())
}

/// Token from either a `Bearer` credential or a bare token.
pub fn presented_token(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    if raw.contains(char::is_whitespace) {
        return bearer_credential(raw);
    }
    if raw.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    single_token(raw)
}

fn single_token(token: &str) -> Option<&str> {
    (!token.is_empty() && !token.contains(char::is_whitespace)).then_some(token)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_str = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    bearer_credential(auth_str).ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
