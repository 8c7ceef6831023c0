//! HTTP Handlers
//!
//! Form flows never fail the request: rejections and store errors alike end
//! in a redirect carrying flash messages.

use axum::Form;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::{append_set_cookie, extract_cookie};
use platform::flash::Flash;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{SignInUseCase, SignOutUseCase, SignUpUseCase};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::dto::{LoginForm, SignupForm};
use crate::presentation::middleware::{LOGIN_PATH, MaybeUser, return_to};
use crate::presentation::views;

pub const PROFILE_PATH: &str = "/profile";
pub const SIGNUP_PATH: &str = "/signup";
pub const LOGGED_IN_MESSAGE: &str = "Success! You are logged in.";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn get_login<R>(
    State(state): State<AuthAppState<R>>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if user.is_some() {
        return Redirect::to(PROFILE_PATH).into_response();
    }
    state.config.flash().render(&headers, views::login_page)
}

/// POST /login
pub async fn post_login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let flash = state.config.flash();

    match use_case.execute(form.into()).await {
        Ok(output) => {
            let target = return_to(&state.config, &headers);
            let mut response = flash.redirect(
                target.as_deref().unwrap_or(PROFILE_PATH),
                Flash::success(LOGGED_IN_MESSAGE),
            );
            set_session_cookie(&mut response, &state.config, &output.session_token);
            if target.is_some() {
                let cleared = state.config.return_to_cookie().build_delete_cookie();
                append_set_cookie(response.headers_mut(), &cleared);
            }
            response
        }
        Err(e) => {
            e.log();
            flash.redirect(LOGIN_PATH, Flash::errors(e.flash_messages()))
        }
    }
}

// ============================================================================
// Signup
// ============================================================================

/// GET /signup
pub async fn get_signup<R>(
    State(state): State<AuthAppState<R>>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if user.is_some() {
        return Redirect::to(PROFILE_PATH).into_response();
    }
    state.config.flash().render(&headers, views::signup_page)
}

/// POST /signup
pub async fn post_signup<R>(
    State(state): State<AuthAppState<R>>,
    Form(form): Form<SignupForm>,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case.execute(form.into()).await {
        Ok(output) => {
            let mut response = Redirect::to(PROFILE_PATH).into_response();
            set_session_cookie(&mut response, &state.config, &output.session_token);
            response
        }
        Err(e) => {
            e.log();
            state
                .config
                .flash()
                .redirect(SIGNUP_PATH, Flash::errors(e.flash_messages()))
        }
    }
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case =
            SignOutUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Failed to destroy the session during logout");
        }
    }

    let mut response = Redirect::to("/").into_response();
    let cleared = state.config.session_cookie().build_delete_cookie();
    append_set_cookie(response.headers_mut(), &cleared);
    response
}

// ============================================================================
// Helper Functions
// ============================================================================

fn set_session_cookie(response: &mut Response, config: &AuthConfig, token: &str) {
    let cookie = config.session_cookie().build_set_cookie(token);
    append_set_cookie(response.headers_mut(), &cookie);
}
