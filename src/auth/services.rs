use axum::extract::FromRef;
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use time::OffsetDateTime;
use tracing::warn;

use crate::auth::dto::{LoginRequest, PublicUser, RegisterRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::password;
use crate::auth::repo::User;
use crate::error::ApiError;
use crate::state::AppState;

// Shared by the not-found and wrong-password paths so a caller cannot tell
// which field was wrong.
const INVALID_CREDENTIALS: &str = "Invalid username or password";
const DUPLICATE_IDENTITY: &str = "User with this email or username already exists";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Externally-visible user identifier: fixed prefix, millisecond timestamp,
/// nine random base36 characters.
pub fn generate_user_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("USR{}{}", millis, suffix)
}

pub async fn register(state: &AppState, payload: RegisterRequest) -> Result<String, ApiError> {
    let user_name = payload.user_name.as_deref().unwrap_or("").trim().to_string();
    let email = payload
        .email
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let plain_password = payload.password.unwrap_or_default();
    let phone_number = payload
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    if user_name.is_empty() || email.is_empty() || plain_password.is_empty() {
        return Err(ApiError::Validation(
            "User name, email, and password are required".into(),
        ));
    }
    if plain_password.len() < 6 {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters long".into(),
        ));
    }
    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email address".into()));
    }

    if User::identity_taken(&state.db, &user_name, &email).await? {
        warn!(user_name = %user_name, "registration rejected, identity taken");
        return Err(ApiError::Conflict(DUPLICATE_IDENTITY.into()));
    }

    let hash = password::hash_password(&plain_password).map_err(ApiError::Storage)?;
    let user_id = generate_user_id();

    let user = User::create(
        &state.db,
        &user_id,
        &user_name,
        &email,
        phone_number,
        &hash,
    )
    .await
    .map_err(|e| match e {
        // Concurrent duplicate registration loses the race here, not at the
        // advisory pre-check.
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            warn!(user_name = %user_name, "registration lost uniqueness race");
            ApiError::Conflict(DUPLICATE_IDENTITY.into())
        }
        other => ApiError::Storage(other.into()),
    })?;

    Ok(user.user_id)
}

pub async fn login(
    state: &AppState,
    payload: LoginRequest,
) -> Result<(String, PublicUser), ApiError> {
    let user_name = payload.user_name.as_deref().unwrap_or("").trim().to_string();
    let plain_password = payload.password.unwrap_or_default();
    if user_name.is_empty() || plain_password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".into(),
        ));
    }

    let user = User::find_by_user_name(&state.db, &user_name)
        .await?
        .ok_or_else(|| {
            warn!(user_name = %user_name, "login for unknown username");
            ApiError::Authentication(INVALID_CREDENTIALS.into())
        })?;

    let ok = password::verify_password(&plain_password, &user.password_hash)
        .map_err(ApiError::Storage)?;
    if !ok {
        warn!(user_name = %user_name, "login with wrong password");
        return Err(ApiError::Authentication(INVALID_CREDENTIALS.into()));
    }

    let keys = JwtKeys::from_ref(state);
    let token = keys
        .sign(&user.user_id, &user.user_name)
        .map_err(ApiError::Storage)?;

    let profile = PublicUser {
        user_id: user.user_id,
        user_name: user.user_name,
        email: user.email,
        phone_number: user.phone_number,
    };
    Ok((token, profile))
}
