use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, VerifyResponse,
};
use crate::auth::jwt::AuthClaims;
use crate::auth::services;
use crate::error::{ApiError, ApiJson};
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verify", get(verify))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let user_id = services::register(&state, payload).await?;
    info!(user_id = %user_id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".into(),
            user_id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (token, user) = services::login(&state, payload).await?;
    info!(user_id = %user.user_id, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        token,
        user,
    }))
}

/// Stateless check: the claims come from the token alone, with no store
/// lookup. A user changed after issuance stays valid until expiry.
#[instrument(skip_all)]
pub async fn verify(AuthClaims(claims): AuthClaims) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        success: true,
        message: "Token is valid".into(),
        user: claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::Claims;

    #[test]
    fn verify_response_shape() {
        let body = VerifyResponse {
            success: true,
            message: "Token is valid".into(),
            user: Claims {
                sub: "USR1700000000000abc123def".into(),
                user_name: "alice".into(),
                iat: 0,
                exp: 86400,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""user_name":"alice""#));
    }
}
