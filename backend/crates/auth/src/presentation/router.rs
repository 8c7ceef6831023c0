//! Auth Router

use axum::{Router, middleware, routing::get};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::load_session;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
    };

    Router::new()
        .route(
            "/login",
            get(handlers::get_login::<R>).post(handlers::post_login::<R>),
        )
        .route(
            "/signup",
            get(handlers::get_signup::<R>).post(handlers::post_signup::<R>),
        )
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}

/// Wrap `router` so every request carries a resolved `CurrentUser`
pub fn with_session<R>(router: Router, repo: R, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
    };

    router.layer(middleware::from_fn_with_state(state, load_session::<R>))
}
