//! Authentication Middleware
//!
//! Resolves the access token in front of protected routes and stores the
//! authenticated user in request extensions.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use platform::cookie;

use crate::application::AuthorizeUseCase;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::AccountError;
use crate::presentation::handlers::AccountsAppState;

/// Authenticated user stored in request extensions
#[derive(Clone)]
pub struct CurrentUser {
    pub user: User,
}

/// Middleware that requires a valid access token
///
/// The token is read from the access cookie first, then from the
/// `Authorization: Bearer` header.
pub async fn require_access_token<R>(
    State(state): State<AccountsAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let token = cookie::extract_cookie(headers, &state.config.access_cookie_name)
        .or_else(|| cookie::extract_bearer(headers))
        .ok_or_else(|| AccountError::MissingToken.into_response())?;

    let use_case = AuthorizeUseCase::new(state.repo.clone(), state.codec.clone());

    let user = use_case
        .execute(&token)
        .await
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(req).await)
}
