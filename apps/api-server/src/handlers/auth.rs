//! Authentication handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use quill_core::domain::User;
use quill_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use quill_shared::dto::{AuthUser, LoginRequest, ProfileUser, RegisterRequest, UserData};
use quill_shared::{AuthEnvelope, DataEnvelope};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = RegisterRequest {
        username: body.username.trim().to_string(),
        email: body.email.trim().to_lowercase(),
        password: body.password.clone(),
    };
    req.validate()?;

    // Duplicate check across both unique fields.
    if state
        .users
        .find_by_username_or_email(&req.username, &req.email)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Username or email is already registered".to_string(),
        ));
    }

    // The one place a plaintext password is turned into its stored form.
    let password_hash = state.passwords.hash(&req.password)?;

    let user = state
        .users
        .insert(User::new(req.username, req.email, password_hash))
        .await?;

    let token = state.tokens.issue(user.id)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(AuthEnvelope::new(
        token,
        UserData {
            user: AuthUser::from(&user),
        },
    )))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let email = body.email.trim().to_lowercase();

    // Unknown email and wrong password answer identically.
    let rejected = || AppError::Unauthorized("Incorrect email or password".to_string());

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(rejected)?;

    if !state.passwords.verify(&body.password, &user.password_hash)? {
        return Err(rejected());
    }

    let token = state.tokens.issue(user.id)?;

    Ok(HttpResponse::Ok().json(AuthEnvelope::new(
        token,
        UserData {
            user: AuthUser::from(&user),
        },
    )))
}

/// GET /api/auth/me - requires a bearer token.
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(DataEnvelope::new(UserData {
        user: ProfileUser::from(&identity.user),
    })))
}
