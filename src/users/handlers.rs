use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{jwt::JwtKeys, password, AuthUser},
    avatar::avatar_url,
    error::ApiError,
    state::AppState,
    users::{
        dto::{CurrentUser, LoginRequest, LoginResponse, RegisterRequest, TestResponse},
        validation, User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(test))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/current", get(current))
}

pub async fn test() -> Json<TestResponse> {
    Json(TestResponse { msg: "Users Works" })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    validation::validate_register(&payload)?;
    payload.email = payload.email.trim().to_lowercase();

    // Ensure email is not taken
    match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(_)) => {
            warn!(email = %payload.email, "email already registered");
            return Err(ApiError::DuplicateEmail);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Internal(e));
        }
    }

    let avatar = avatar_url(&payload.email);
    let hash = password::hash_password(&payload.password)?;

    let user = match User::create(&state.db, payload.name.trim(), &payload.email, &avatar, &hash)
        .await
    {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(ApiError::Internal(e));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validation::validate_login(&payload)?;
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::UserNotFound);
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Internal(e));
        }
    };

    let ok = password::verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.name, &user.avatar)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        token: format!("Bearer {}", token),
    }))
}

#[instrument(skip(state))]
pub async fn current(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CurrentUser>, ApiError> {
    let user = match User::find_by_id(&state.db, user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(user_id = %user_id, "token subject no longer exists");
            return Err(ApiError::Unauthorized("User not found".into()));
        }
        Err(e) => {
            error!(error = %e, user_id = %user_id, "find_by_id failed");
            return Err(ApiError::Internal(e));
        }
    };

    Ok(Json(CurrentUser {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}
