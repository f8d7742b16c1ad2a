//! Identity resolution - the authenticated-user extractor.
//!
//! Resolution is a live lookup, not a token snapshot: after the bearer
//! token verifies, the user record is fetched fresh, so a role change
//! is effective on the very next request and a deleted user's token is
//! dead immediately.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::domain::{Role, User};
use quill_core::ports::{AuthError, BaseRepository, TokenService};
use quill_shared::ErrorBody;

use crate::state::AppState;

/// Resolved identity of the requesting user.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

impl Identity {
    pub fn id(&self) -> uuid::Uuid {
        self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::UserGone => {
                actix_web::http::StatusCode::UNAUTHORIZED
            }
            AuthError::Internal(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let message = match &self.0 {
            AuthError::MissingToken => "You are not logged in. Please log in first.",
            // One message for every verification failure mode.
            AuthError::InvalidToken => "Invalid token or token has expired.",
            AuthError::UserGone => "The user belonging to this token no longer exists.",
            AuthError::Internal(detail) => {
                tracing::error!("Identity resolution failed: {}", detail);
                "Internal server error"
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(ErrorBody::new(message))
    }
}

/// Pull the raw token out of the `Authorization` header. Anything that
/// is not `Bearer <token>` counts as no token at all.
fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AuthenticationError(AuthError::Internal(
                    "Server configuration error".to_string(),
                ))
            })?;

            let token = token.ok_or(AuthenticationError(AuthError::MissingToken))?;

            let claims = state
                .tokens
                .verify(&token)
                .map_err(AuthenticationError)?;

            let user = state
                .users
                .find_by_id(claims.user_id)
                .await
                .map_err(|e| AuthenticationError(AuthError::Internal(e.to_string())))?
                .ok_or(AuthenticationError(AuthError::UserGone))?;

            Ok(Identity { user })
        })
    }
}
