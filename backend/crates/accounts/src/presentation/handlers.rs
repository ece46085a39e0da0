//! HTTP Handlers
//!
//! Session tokens travel both ways as cookies and in the JSON body, so
//! browser and non-browser clients get the same surface.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};
use std::sync::Arc;

use platform::cookie::{self, CookieConfig};
use platform::token::TokenCodec;

use crate::application::config::AccountsConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase, LogoutUseCase,
    RefreshSessionUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, RefreshRequest,
    RefreshResponse, RegisterRequest, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountsAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
    pub codec: Arc<TokenCodec>,
}

impl<R> AccountsAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AccountsConfig) -> Self {
        let codec = Arc::new(config.codec());
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            codec,
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/users
pub async fn register<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        user_name: req.user_name,
        email: req.email,
        full_name: req.full_name,
        password: req.password,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/users/login
pub async fn login<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.codec.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        identifier: req.identifier(),
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    let access_cookie = access_cookie_config(&state.config).build_set_cookie(&output.access_token);
    let refresh_cookie =
        refresh_cookie_config(&state.config).build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        Json(LoginResponse {
            user: UserResponse::from(&output.user),
            access_token: output.access_token,
            refresh_token: output.refresh_token,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/users/logout
///
/// Requires a valid access token; clears the session anchor and both
/// cookies. Safe to call repeatedly.
pub async fn logout<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current_user): Extension<CurrentUser>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone());
    use_case.execute(&current_user.user.user_id).await?;

    let access_cookie = access_cookie_config(&state.config).build_delete_cookie();
    let refresh_cookie = refresh_cookie_config(&state.config).build_delete_cookie();

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        Json(MessageResponse::new("Logged out")),
    ))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/users/refresh-token
///
/// The refresh token comes from the cookie when present, otherwise from
/// the request body.
pub async fn refresh_session<R>(
    State(state): State<AccountsAppState<R>>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let presented = cookie::extract_cookie(&headers, &state.config.refresh_cookie_name)
        .or_else(|| body.and_then(|Json(req)| req.refresh_token))
        .ok_or(AccountError::MissingToken)?;

    let use_case = RefreshSessionUseCase::new(state.repo.clone(), state.codec.clone());
    let output = use_case.execute(&presented).await?;

    let access_cookie = access_cookie_config(&state.config).build_set_cookie(&output.access_token);
    let refresh_cookie =
        refresh_cookie_config(&state.config).build_set_cookie(&output.refresh_token);

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, access_cookie),
            (header::SET_COOKIE, refresh_cookie),
        ]),
        Json(RefreshResponse {
            access_token: output.access_token,
            refresh_token: output.refresh_token,
        }),
    ))
}

// ============================================================================
// Change Password
// ============================================================================

/// PUT /api/users/password
pub async fn change_password<R>(
    State(state): State<AccountsAppState<R>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());

    let input = ChangePasswordInput {
        old_password: req.old_password,
        new_password: req.new_password,
    };

    use_case.execute(&current_user.user.user_id, input).await?;

    Ok(Json(MessageResponse::new("Password changed")))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/users/me
pub async fn current_user(
    Extension(current_user): Extension<CurrentUser>,
) -> Json<UserResponse> {
    Json(UserResponse::from(&current_user.user))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn access_cookie_config(config: &AccountsConfig) -> CookieConfig {
    CookieConfig {
        name: config.access_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.access_cookie_max_age()),
    }
}

fn refresh_cookie_config(config: &AccountsConfig) -> CookieConfig {
    CookieConfig {
        name: config.refresh_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: Some(config.refresh_cookie_max_age()),
    }
}
