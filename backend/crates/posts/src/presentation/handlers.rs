//! HTTP Handlers
//!
//! Page handlers return `PostResult` so store failures become a 500.
//! Form actions always redirect, flashing the outcome.

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use std::sync::Arc;

use auth::AuthConfig;
use auth::middleware::AuthUser;
use auth::models::User;
use kernel::id::{PostId, UserId};
use platform::flash::Flash;

use crate::application::{CreatePostUseCase, DeletePostUseCase, LikePostUseCase, ViewPostsUseCase};
use crate::domain::entity::post::Post;
use crate::domain::media::MediaGateway;
use crate::domain::repository::PostRepository;
use crate::error::{PostError, PostResult};
use crate::presentation::dto::CreatePostForm;
use crate::presentation::views;

pub const PROFILE_PATH: &str = "/profile";
pub const FEED_PATH: &str = "/feed";
pub const POST_ADDED_MESSAGE: &str = "Post has been added!";
pub const POST_DELETED_MESSAGE: &str = "Deleted Post";

/// Shared state for post handlers
#[derive(Clone)]
pub struct PostsAppState<P, M>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    pub posts: Arc<P>,
    pub media: Arc<M>,
    /// Signing secret and cookie attributes for flash messages
    pub auth: Arc<AuthConfig>,
}

// ============================================================================
// Pages
// ============================================================================

/// GET /profile
pub async fn get_profile<P, M>(
    State(state): State<PostsAppState<P, M>>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
) -> PostResult<Response>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let posts = ViewPostsUseCase::new(state.posts.clone())
        .profile(&user.user_id)
        .await?;

    Ok(state.auth.flash().render(&headers, |flash| {
        views::profile_page(user.user_name.as_str(), user.email.as_str(), &posts, flash)
    }))
}

/// GET /feed
pub async fn get_feed<P, M>(
    State(state): State<PostsAppState<P, M>>,
    AuthUser(user): AuthUser,
    headers: HeaderMap,
) -> PostResult<Response>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let posts = ViewPostsUseCase::new(state.posts.clone()).feed().await?;

    Ok(state.auth.flash().render(&headers, |flash| {
        views::feed_page(user.user_name.as_str(), &posts, flash)
    }))
}

/// GET /post/{id}
pub async fn get_post<P, M>(
    State(state): State<PostsAppState<P, M>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> PostResult<Response>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let Ok(post_id) = id.parse::<PostId>() else {
        return Ok(not_found(&user, None));
    };

    let Some(post) = ViewPostsUseCase::new(state.posts.clone())
        .post(&post_id)
        .await?
    else {
        return Ok(not_found(&user, Some(&post_id)));
    };

    let is_owner = post.is_owned_by(&user.user_id);
    Ok(state.auth.flash().render(&headers, |flash| {
        views::post_page(user.user_name.as_str(), &post, is_owner, flash)
    }))
}

fn not_found(user: &User, post_id: Option<&PostId>) -> Response {
    let page = views::not_found_page(user.user_name.as_str(), post_id);
    (StatusCode::NOT_FOUND, Html(page)).into_response()
}

// ============================================================================
// Actions
// ============================================================================

/// POST /post (multipart: title, caption, file)
pub async fn create_post<P, M>(
    State(state): State<PostsAppState<P, M>>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Response
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let flash = state.auth.flash();

    match create(&state, user.user_id, multipart).await {
        Ok(_) => flash.redirect(PROFILE_PATH, Flash::success(POST_ADDED_MESSAGE)),
        Err(e) => {
            e.log();
            flash.redirect(PROFILE_PATH, Flash::error(e.flash_message()))
        }
    }
}

async fn create<P, M>(
    state: &PostsAppState<P, M>,
    user_id: UserId,
    multipart: Multipart,
) -> PostResult<Post>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let form = CreatePostForm::from_multipart(multipart).await?;
    CreatePostUseCase::new(state.posts.clone(), state.media.clone())
        .execute(form.into_input(user_id))
        .await
}

/// POST /post/{id}/like
pub async fn like_post<P, M>(
    State(state): State<PostsAppState<P, M>>,
    AuthUser(_user): AuthUser,
    Path(id): Path<String>,
) -> Response
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let result = match id.parse::<PostId>() {
        Ok(post_id) => LikePostUseCase::new(state.posts.clone())
            .execute(&post_id)
            .await
            .map(|_| post_id),
        Err(_) => Err(PostError::NotFound),
    };

    match result {
        Ok(post_id) => Redirect::to(&format!("/post/{}", post_id)).into_response(),
        Err(e) => {
            e.log();
            state
                .auth
                .flash()
                .redirect(FEED_PATH, Flash::error(e.flash_message()))
        }
    }
}

/// DELETE /post/{id} and POST /post/{id}/delete
pub async fn delete_post<P, M>(
    State(state): State<PostsAppState<P, M>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Response
where
    P: PostRepository + Clone + Send + Sync + 'static,
    M: MediaGateway + Clone + Send + Sync + 'static,
{
    let result = match id.parse::<PostId>() {
        Ok(post_id) => {
            DeletePostUseCase::new(state.posts.clone(), state.media.clone())
                .execute(&post_id, &user.user_id)
                .await
        }
        Err(_) => Err(PostError::NotFound),
    };

    let flash = match result {
        Ok(()) => Flash::success(POST_DELETED_MESSAGE),
        Err(e) => {
            e.log();
            Flash::error(e.flash_message())
        }
    };
    state.auth.flash().redirect(PROFILE_PATH, flash)
}
