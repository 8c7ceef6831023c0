//! Posts Router
//!
//! Every route requires a signed-in user. The router must be served inside
//! `auth::with_session` so the user is resolved before the guard runs.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use auth::AuthConfig;
use auth::middleware::require_auth;

use crate::application::config::PostsConfig;
use crate::domain::media::MediaGateway;
use crate::domain::repository::PostRepository;
use crate::infra::{cloudinary::CloudinaryGateway, postgres::PgPostRepository};
use crate::presentation::handlers::{self, PostsAppState};

/// Create the Posts router with PostgreSQL and Cloudinary
pub fn posts_router(
    repo: PgPostRepository,
    media: CloudinaryGateway,
    auth: Arc<AuthConfig>,
    config: PostsConfig,
) -> Router {
    posts_router_generic(repo, media, auth, config)
}

/// Create a generic Posts router for any store and gateway
pub fn posts_router_generic<P, M>(
    repo: P,
    media: M,
    auth: Arc<AuthConfig>,
    config: PostsConfig,
) -> Router
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let state = PostsAppState {
        posts: Arc::new(repo),
        media: Arc::new(media),
        auth: auth.clone(),
    };

    Router::new()
        .route("/profile", get(handlers::get_profile::<P, M>))
        .route("/feed", get(handlers::get_feed::<P, M>))
        .route("/post", post(handlers::create_post::<P, M>))
        .route(
            "/post/{id}",
            get(handlers::get_post::<P, M>).delete(handlers::delete_post::<P, M>),
        )
        .route("/post/{id}/like", post(handlers::like_post::<P, M>))
        .route("/post/{id}/delete", post(handlers::delete_post::<P, M>))
        .route_layer(middleware::from_fn_with_state(auth, require_auth))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}
