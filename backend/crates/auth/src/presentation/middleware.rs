//! Auth Middleware
//!
//! `load_session` resolves the session cookie for every request and stores a
//! [`CurrentUser`] in the request extensions. `require_auth` guards protected
//! routes, remembering the requested page in the return-path cookie.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::{append_set_cookie, extract_cookie};
use platform::crypto;

use crate::application::config::AuthConfig;
use crate::application::session_binding::SessionBinding;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::presentation::handlers::AuthAppState;

pub const LOGIN_PATH: &str = "/login";

/// Principal resolved for the current request
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

/// Resolve the session cookie into a [`CurrentUser`]
///
/// Store failures end the request with a 500. A cookie that no longer maps
/// to a session is cleared on the response.
pub async fn load_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let Some(token) = token else {
        req.extensions_mut().insert(CurrentUser(None));
        return next.run(req).await;
    };

    let binding = SessionBinding::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match binding.resolve(&token).await {
        Ok(Some(user)) => {
            req.extensions_mut().insert(CurrentUser(Some(user)));
            next.run(req).await
        }
        Ok(None) => {
            req.extensions_mut().insert(CurrentUser(None));
            let mut response = next.run(req).await;
            // A handler that issued a fresh session (login, signup) wins
            if !sets_cookie(response.headers(), &state.config.session_cookie_name) {
                let stale = state.config.session_cookie().build_delete_cookie();
                append_set_cookie(response.headers_mut(), &stale);
            }
            response
        }
        Err(e) => e.into_response(),
    }
}

/// Whether `headers` already carry a Set-Cookie for `name`
fn sets_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|cookie| {
            cookie
                .split_once('=')
                .is_some_and(|(cookie_name, _)| cookie_name.trim() == name)
        })
}

/// Redirect anonymous requests to the login page
///
/// Must run inside [`load_session`].
pub async fn require_auth(
    State(config): State<Arc<AuthConfig>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(CurrentUser(Some(_))) = req.extensions().get::<CurrentUser>() {
        return next.run(req).await;
    }

    let mut response = Redirect::to(LOGIN_PATH).into_response();

    // Only GETs can be replayed by the post-login redirect
    if req.method() == Method::GET {
        if let Some(path) = req.uri().path_and_query().map(|pq| pq.as_str()) {
            if is_local_path(path) {
                let encoded = crypto::to_base64url(path.as_bytes());
                let cookie = config.return_to_cookie().build_set_cookie(&encoded);
                append_set_cookie(response.headers_mut(), &cookie);
            }
        }
    }

    response
}

/// Read the remembered return path, if one is set and safe
pub fn return_to(config: &AuthConfig, headers: &HeaderMap) -> Option<String> {
    let encoded = extract_cookie(headers, &config.return_to_cookie_name)?;
    let bytes = crypto::from_base64url(&encoded).ok()?;
    let path = String::from_utf8(bytes).ok()?;
    is_local_path(&path).then_some(path)
}

/// Same-origin absolute path (no scheme, no `//host`)
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

/// Extractor for handlers that need a signed-in user
///
/// Anonymous requests are redirected to the login page.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CurrentUser>() {
            Some(CurrentUser(Some(user))) => Ok(AuthUser(user.clone())),
            _ => Err(Redirect::to(LOGIN_PATH)),
        }
    }
}

/// Extractor for pages that render for both states
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .and_then(|current| current.0.clone());
        Ok(MaybeUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("/feed"));
        assert!(is_local_path("/post/abc?x=1"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path(""));
    }

    #[test]
    fn test_return_to_roundtrip() {
        let config = AuthConfig::development();
        let mut headers = HeaderMap::new();
        let cookie = format!(
            "{}={}",
            config.return_to_cookie_name,
            crypto::to_base64url(b"/post/123")
        );
        headers.insert(axum::http::header::COOKIE, cookie.parse().unwrap());
        assert_eq!(return_to(&config, &headers).as_deref(), Some("/post/123"));
    }

    #[test]
    fn test_return_to_rejects_foreign_target() {
        let config = AuthConfig::development();
        let mut headers = HeaderMap::new();
        let cookie = format!(
            "{}={}",
            config.return_to_cookie_name,
            crypto::to_base64url(b"//evil.example")
        );
        headers.insert(axum::http::header::COOKIE, cookie.parse().unwrap());
        assert_eq!(return_to(&config, &headers), None);
    }
}
