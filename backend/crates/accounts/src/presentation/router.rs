//! Accounts Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::application::config::AccountsConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AccountsAppState};
use crate::presentation::middleware::require_access_token;

/// Create the accounts router with the PostgreSQL repository
pub fn accounts_router(repo: PgUserRepository, config: AccountsConfig) -> Router {
    accounts_router_generic(repo, config)
}

/// Create the accounts router for any repository implementation
pub fn accounts_router_generic<R>(repo: R, config: AccountsConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AccountsAppState::new(repo, config);

    let protected = Router::new()
        .route("/logout", post(handlers::logout::<R>))
        .route("/password", put(handlers::change_password::<R>))
        .route("/me", get(handlers::current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_access_token::<R>,
        ));

    Router::new()
        .route("/", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh-token", post(handlers::refresh_session::<R>))
        .merge(protected)
        .with_state(state)
}
