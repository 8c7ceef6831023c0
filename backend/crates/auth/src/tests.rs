//! Unit tests for Auth crate
//!
//! Use cases and routes are driven against an in-memory repository that
//! implements the same traits as `PgAuthRepository`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_id::{SessionId, UserId},
    user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    sessions: HashMap<SessionId, Session>,
}

/// Shared in-memory store; clones see the same data
#[derive(Clone, Default)]
pub(crate) struct InMemoryAuthRepository {
    store: Arc<Mutex<Store>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryAuthRepository {
    fn check(&self) -> AuthResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AuthError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    pub(crate) fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn user_count(&self) -> usize {
        self.store.lock().unwrap().users.len()
    }

    pub(crate) fn session_count(&self) -> usize {
        self.store.lock().unwrap().sessions.len()
    }

    pub(crate) fn insert_user(&self, user: User) {
        self.store.lock().unwrap().users.push(user);
    }

    pub(crate) fn insert_session(&self, session: Session) {
        self.store
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session);
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.check()?;
        let mut store = self.store.lock().unwrap();
        if store
            .users
            .iter()
            .any(|u| u.email == user.email || u.user_name == user.user_name)
        {
            return Err(AuthError::AccountExists);
        }
        store.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        self.check()?;
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| &u.user_id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.check()?;
        let store = self.store.lock().unwrap();
        Ok(store.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn find_by_email_or_user_name(
        &self,
        email: &Email,
        user_name: &UserName,
    ) -> AuthResult<Option<User>> {
        self.check()?;
        let store = self.store.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| &u.email == email || &u.user_name == user_name)
            .cloned())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        self.check()?;
        self.insert_session(session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<Session>> {
        self.check()?;
        Ok(self.store.lock().unwrap().sessions.get(session_id).cloned())
    }

    async fn touch(&self, session_id: &SessionId) -> AuthResult<()> {
        self.check()?;
        if let Some(session) = self.store.lock().unwrap().sessions.get_mut(session_id) {
            session.touch();
        }
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.check()?;
        self.store.lock().unwrap().sessions.remove(session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.check()?;
        let mut store = self.store.lock().unwrap();
        let before = store.sessions.len();
        store.sessions.retain(|_, s| !s.is_expired());
        Ok((before - store.sessions.len()) as u64)
    }
}

fn local_user(user_name: &str, email: &str, password: &str) -> User {
    let clear = platform::password::ClearTextPassword::new(password);
    User::new(
        UserName::new(user_name).unwrap(),
        Email::new(email).unwrap(),
        Some(UserPassword::from_clear_text(&clear, None).unwrap()),
    )
}

fn provider_user(user_name: &str, email: &str) -> User {
    User::new(
        UserName::new(user_name).unwrap(),
        Email::new(email).unwrap(),
        None,
    )
}

#[cfg(test)]
mod strategy_tests {
    use super::*;
    use crate::application::{AuthConfig, LocalStrategy};
    use platform::password::ClearTextPassword;

    fn strategy(repo: &InMemoryAuthRepository) -> LocalStrategy<InMemoryAuthRepository> {
        LocalStrategy::new(Arc::new(repo.clone()), Arc::new(AuthConfig::development()))
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let repo = InMemoryAuthRepository::default();
        let email = Email::new("nobody@example.com").unwrap();

        let err = strategy(&repo)
            .authenticate(&email, &ClearTextPassword::new("whatever1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailNotFound(_)));
        assert_eq!(err.to_string(), "Email nobody@example.com not found.");
    }

    #[tokio::test]
    async fn test_provider_account_rejects_any_password() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(provider_user("oauth", "oauth@example.com"));
        let email = Email::new("oauth@example.com").unwrap();

        for password in ["", "password123", "anything at all"] {
            let err = strategy(&repo)
                .authenticate(&email, &ClearTextPassword::new(password))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::NoLocalPassword));
            assert!(err.to_string().starts_with(
                "Your account was registered using a sign-in provider."
            ));
        }
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));
        let email = Email::new("ada@example.com").unwrap();

        let err = strategy(&repo)
            .authenticate(&email, &ClearTextPassword::new("wrong-horse"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid email or password.");
    }

    #[tokio::test]
    async fn test_correct_password() {
        let repo = InMemoryAuthRepository::default();
        let user = local_user("ada", "ada@example.com", "correct-horse");
        let user_id = user.user_id;
        repo.insert_user(user);

        let email = Email::new("ADA@example.com").unwrap();
        let found = strategy(&repo)
            .authenticate(&email, &ClearTextPassword::new("correct-horse"))
            .await
            .unwrap();

        assert_eq!(found.user_id, user_id);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let repo = InMemoryAuthRepository::default();
        repo.fail_all();
        let email = Email::new("ada@example.com").unwrap();

        let err = strategy(&repo)
            .authenticate(&email, &ClearTextPassword::new("correct-horse"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Database(_)));
    }
}

#[cfg(test)]
mod session_binding_tests {
    use super::*;
    use crate::application::{AuthConfig, SessionBinding};
    use chrono::Duration;

    type Binding = SessionBinding<InMemoryAuthRepository, InMemoryAuthRepository>;

    fn binding(repo: &InMemoryAuthRepository) -> Binding {
        let repo = Arc::new(repo.clone());
        SessionBinding::new(repo.clone(), repo, Arc::new(AuthConfig::with_secret([9u8; 32])))
    }

    #[tokio::test]
    async fn test_establish_then_resolve() {
        let repo = InMemoryAuthRepository::default();
        let user = local_user("ada", "ada@example.com", "correct-horse");
        repo.insert_user(user.clone());

        let token = binding(&repo).establish(&user).await.unwrap();
        let resolved = binding(&repo).resolve(&token).await.unwrap().unwrap();

        assert_eq!(resolved.user_id, user.user_id);
        assert_eq!(repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_tampered_token_is_anonymous() {
        let repo = InMemoryAuthRepository::default();
        let user = local_user("ada", "ada@example.com", "correct-horse");
        repo.insert_user(user.clone());

        let token = binding(&repo).establish(&user).await.unwrap();
        let (id, _) = token.split_once('.').unwrap();
        let forged = format!("{}.AAAA", id);

        assert!(binding(&repo).resolve(&forged).await.unwrap().is_none());
        assert!(binding(&repo).resolve("not-a-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_anonymous() {
        let repo = InMemoryAuthRepository::default();
        let user = local_user("ada", "ada@example.com", "correct-horse");
        repo.insert_user(user.clone());
        let token = binding(&repo).establish(&user).await.unwrap();

        let other = SessionBinding::new(
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
            Arc::new(AuthConfig::with_secret([8u8; 32])),
        );
        assert!(other.resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let repo = InMemoryAuthRepository::default();
        let user = local_user("ada", "ada@example.com", "correct-horse");
        repo.insert_user(user.clone());

        let session = Session::new(user.user_id, Duration::seconds(-10));
        let token = platform::crypto::sign(&[9u8; 32], &session.session_id.to_string());
        repo.insert_session(session);

        assert!(binding(&repo).resolve(&token).await.unwrap().is_none());
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_user_is_anonymous() {
        let repo = InMemoryAuthRepository::default();
        let ghost = local_user("ghost", "ghost@example.com", "correct-horse");

        let token = binding(&repo).establish(&ghost).await.unwrap();
        assert!(binding(&repo).resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_is_error() {
        let repo = InMemoryAuthRepository::default();
        let user = local_user("ada", "ada@example.com", "correct-horse");
        repo.insert_user(user.clone());
        let token = binding(&repo).establish(&user).await.unwrap();

        repo.fail_all();
        assert!(binding(&repo).resolve(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_destroy() {
        let repo = InMemoryAuthRepository::default();
        let user = local_user("ada", "ada@example.com", "correct-horse");
        repo.insert_user(user.clone());
        let token = binding(&repo).establish(&user).await.unwrap();

        binding(&repo).destroy(&token).await.unwrap();
        assert_eq!(repo.session_count(), 0);
        assert!(binding(&repo).resolve(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let repo = InMemoryAuthRepository::default();
        let user_id = UserId::new();
        repo.insert_session(Session::new(user_id, Duration::seconds(-1)));
        repo.insert_session(Session::new(user_id, Duration::hours(1)));

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.session_count(), 1);
    }
}

#[cfg(test)]
mod sign_up_tests {
    use super::*;
    use crate::application::{AuthConfig, SessionBinding, SignUpInput, SignUpUseCase};

    fn use_case(repo: &InMemoryAuthRepository) -> SignUpUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        let repo = Arc::new(repo.clone());
        SignUpUseCase::new(repo.clone(), repo, Arc::new(AuthConfig::with_secret([5u8; 32])))
    }

    fn input(user_name: &str, email: &str, password: &str, confirm: &str) -> SignUpInput {
        SignUpInput {
            user_name: user_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_creates_and_authenticates() {
        let repo = InMemoryAuthRepository::default();

        let output = use_case(&repo)
            .execute(input("ada", "Ada@Example.com", "correct-horse", "correct-horse"))
            .await
            .unwrap();

        assert_eq!(repo.user_count(), 1);
        assert_eq!(output.user.email.as_str(), "ada@example.com");
        assert!(output.user.has_local_password());

        let shared = Arc::new(repo.clone());
        let binding = SessionBinding::new(
            shared.clone(),
            shared,
            Arc::new(AuthConfig::with_secret([5u8; 32])),
        );
        let resolved = binding.resolve(&output.session_token).await.unwrap().unwrap();
        assert_eq!(resolved.user_id, output.user.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_email_any_case() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "user@example.com", "correct-horse"));

        let err = use_case(&repo)
            .execute(input("someone", "User@Example.com", "correct-horse", "correct-horse"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::AccountExists));
        assert_eq!(
            err.to_string(),
            "Account with that email address or username already exists."
        );
        assert_eq!(repo.user_count(), 1);
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_user_name() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));

        let err = use_case(&repo)
            .execute(input("ada", "other@example.com", "correct-horse", "correct-horse"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::AccountExists));
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_validation_collects_all_violations() {
        let repo = InMemoryAuthRepository::default();

        let err = use_case(&repo)
            .execute(input("", "not-an-email", "short", "different"))
            .await
            .unwrap_err();

        let AuthError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            messages,
            vec![
                "Please enter a valid email address.",
                "Password must be at least 8 characters long",
                "Passwords do not match",
                "User name cannot be blank.",
            ]
        );
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_password_upper_bound_and_control_characters() {
        let repo = InMemoryAuthRepository::default();
        let long = "a".repeat(129);

        let err = use_case(&repo)
            .execute(input("ada", "ada@example.com", &long, &long))
            .await
            .unwrap_err();
        let AuthError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(messages, vec!["Password must be at most 128 characters long"]);

        let err = use_case(&repo)
            .execute(input("ada", "ada@example.com", "correct\u{7}horse", "correct\u{7}horse"))
            .await
            .unwrap_err();
        let AuthError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(messages, vec!["Password contains invalid control characters"]);
        assert_eq!(repo.user_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure() {
        let repo = InMemoryAuthRepository::default();
        repo.fail_all();

        let err = use_case(&repo)
            .execute(input("ada", "ada@example.com", "correct-horse", "correct-horse"))
            .await
            .unwrap_err();

        assert!(err.is_internal());
        assert_eq!(
            err.flash_messages(),
            vec![crate::error::GENERIC_ERROR_MESSAGE.to_string()]
        );
    }
}

#[cfg(test)]
mod sign_in_tests {
    use super::*;
    use crate::application::{AuthConfig, SignInInput, SignInUseCase};

    fn use_case(repo: &InMemoryAuthRepository) -> SignInUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        let repo = Arc::new(repo.clone());
        SignInUseCase::new(repo.clone(), repo, Arc::new(AuthConfig::development()))
    }

    fn input(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_validation_collects_all_violations() {
        let repo = InMemoryAuthRepository::default();

        let err = use_case(&repo).execute(input("nope", "")).await.unwrap_err();

        let AuthError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            messages,
            vec!["Please enter a valid email address.", "Password cannot be blank."]
        );
    }

    #[tokio::test]
    async fn test_wrong_password_creates_no_session() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));

        let err = use_case(&repo)
            .execute(input("ada@example.com", "battery-staple"))
            .await
            .unwrap_err();

        assert_eq!(err.flash_messages(), vec!["Invalid email or password."]);
        assert_eq!(repo.session_count(), 0);
    }

    #[tokio::test]
    async fn test_success_uses_normalized_email() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada.lovelace@gmail.com", "correct-horse"));

        let output = use_case(&repo)
            .execute(input("Ada.Lovelace+feed@googlemail.com", "correct-horse"))
            .await
            .unwrap();

        assert_eq!(output.user.user_name.as_str(), "ada");
        assert_eq!(repo.session_count(), 1);
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;
    use axum::http::StatusCode;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_status_codes() {
        let cases: Vec<(AuthError, StatusCode, ErrorKind)> = vec![
            (
                AuthError::Validation(vec![]),
                StatusCode::BAD_REQUEST,
                ErrorKind::BadRequest,
            ),
            (
                AuthError::EmailNotFound("a@b.co".into()),
                StatusCode::UNAUTHORIZED,
                ErrorKind::Unauthorized,
            ),
            (
                AuthError::InvalidCredentials,
                StatusCode::UNAUTHORIZED,
                ErrorKind::Unauthorized,
            ),
            (
                AuthError::AccountExists,
                StatusCode::CONFLICT,
                ErrorKind::Conflict,
            ),
            (
                AuthError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::InternalServerError,
            ),
        ];

        for (err, status, kind) in cases {
            assert_eq!(err.status_code(), status, "{err}");
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = AuthError::Database(sqlx::Error::Protocol(
            "connection string leaked".into(),
        ));
        assert_eq!(err.to_app_error().message(), crate::error::GENERIC_ERROR_MESSAGE);
    }
}

#[cfg(test)]
mod router_tests {
    use super::*;
    use crate::application::AuthConfig;
    use crate::presentation::router::{auth_router_generic, with_session};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use tower::ServiceExt;

    fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig {
            cookie_secure: false,
            ..AuthConfig::with_secret([7u8; 32])
        })
    }

    fn app(repo: &InMemoryAuthRepository) -> Router {
        let config = config();
        with_session(
            auth_router_generic(repo.clone(), config.clone()),
            repo.clone(),
            config,
        )
    }

    fn form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    /// `name=value` pair of the first Set-Cookie named `name`
    fn cookie_pair(response: &Response, name: &str) -> Option<String> {
        set_cookies(response)
            .into_iter()
            .find(|c| c.starts_with(&format!("{name}=")))
            .and_then(|c| c.split(';').next().map(str::to_string))
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    fn flash_of(response: &Response) -> platform::flash::Flash {
        let pair = cookie_pair(response, "flash").expect("flash cookie");
        let value = pair.trim_start_matches("flash=");
        config().flash().decode(value).expect("valid flash")
    }

    #[tokio::test]
    async fn test_get_login_renders_form() {
        let repo = InMemoryAuthRepository::default();
        let response = app(&repo).oneshot(get("/login", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(r#"action="/login""#));
    }

    #[tokio::test]
    async fn test_invalid_login_flashes_errors() {
        let repo = InMemoryAuthRepository::default();
        let response = app(&repo)
            .oneshot(form("/login", "email=bad&password=", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/login");
        assert_eq!(
            flash_of(&response).errors,
            vec!["Please enter a valid email address.", "Password cannot be blank."]
        );
        assert!(cookie_pair(&response, "session").is_none());
    }

    #[tokio::test]
    async fn test_signup_then_login_page_redirects_to_profile() {
        let repo = InMemoryAuthRepository::default();
        let response = app(&repo)
            .oneshot(form(
                "/signup",
                "userName=ada&email=ada%40example.com&password=correct-horse&confirmPassword=correct-horse",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/profile");
        let session = cookie_pair(&response, "session").expect("session cookie");

        let response = app(&repo).oneshot(get("/login", Some(&session))).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/profile");
    }

    #[tokio::test]
    async fn test_duplicate_signup_flashes_conflict() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));

        let response = app(&repo)
            .oneshot(form(
                "/signup",
                "userName=ada&email=ADA%40example.com&password=correct-horse&confirmPassword=correct-horse",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), "/signup");
        assert_eq!(
            flash_of(&response).errors,
            vec!["Account with that email address or username already exists."]
        );
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_login_success_flashes_and_sets_session() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));

        let response = app(&repo)
            .oneshot(form(
                "/login",
                "email=ada%40example.com&password=correct-horse",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), "/profile");
        assert_eq!(flash_of(&response).success, vec!["Success! You are logged in."]);
        assert!(cookie_pair(&response, "session").is_some());
        assert_eq!(repo.session_count(), 1);
    }

    #[tokio::test]
    async fn test_login_returns_to_remembered_page() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));
        let return_to = format!(
            "return_to={}",
            platform::crypto::to_base64url(b"/post/42")
        );

        let response = app(&repo)
            .oneshot(form(
                "/login",
                "email=ada%40example.com&password=correct-horse",
                Some(&return_to),
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), "/post/42");
        let cleared = set_cookies(&response)
            .into_iter()
            .find(|c| c.starts_with("return_to="))
            .unwrap();
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_store_failure_flashes_generic_error() {
        let repo = InMemoryAuthRepository::default();
        repo.fail_all();

        let response = app(&repo)
            .oneshot(form(
                "/login",
                "email=ada%40example.com&password=correct-horse",
                None,
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), "/login");
        assert_eq!(
            flash_of(&response).errors,
            vec![crate::error::GENERIC_ERROR_MESSAGE]
        );
    }

    #[tokio::test]
    async fn test_logout_destroys_session() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));
        let response = app(&repo)
            .oneshot(form(
                "/login",
                "email=ada%40example.com&password=correct-horse",
                None,
            ))
            .await
            .unwrap();
        let session = cookie_pair(&response, "session").unwrap();

        let response = app(&repo).oneshot(get("/logout", Some(&session))).await.unwrap();

        assert_eq!(location(&response), "/");
        assert_eq!(repo.session_count(), 0);
        let cleared = cookie_pair(&response, "session").unwrap();
        assert_eq!(cleared, "session=");
    }

    #[tokio::test]
    async fn test_stale_session_cookie_is_cleared() {
        let repo = InMemoryAuthRepository::default();
        let response = app(&repo)
            .oneshot(get("/login", Some("session=forged.token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cookie_pair(&response, "session").as_deref(), Some("session="));
    }

    #[tokio::test]
    async fn test_login_over_stale_cookie_keeps_new_session() {
        let repo = InMemoryAuthRepository::default();
        repo.insert_user(local_user("ada", "ada@example.com", "correct-horse"));

        let response = app(&repo)
            .oneshot(form(
                "/login",
                "email=ada%40example.com&password=correct-horse",
                Some("session=forged.token"),
            ))
            .await
            .unwrap();

        assert_eq!(location(&response), "/profile");
        let sessions: Vec<String> = set_cookies(&response)
            .into_iter()
            .filter(|c| c.starts_with("session="))
            .collect();
        assert_eq!(sessions.len(), 1, "{sessions:?}");
        assert!(!sessions[0].contains("Max-Age=0"));

        // The issued cookie authenticates the next request
        let session = cookie_pair(&response, "session").unwrap();
        let response = app(&repo).oneshot(get("/login", Some(&session))).await.unwrap();
        assert_eq!(location(&response), "/profile");
    }

    #[tokio::test]
    async fn test_signup_over_stale_cookie_keeps_new_session() {
        let repo = InMemoryAuthRepository::default();

        let response = app(&repo)
            .oneshot(form(
                "/signup",
                "userName=ada&email=ada%40example.com&password=correct-horse&confirmPassword=correct-horse",
                Some("session=forged.token"),
            ))
            .await
            .unwrap();

        let session = cookie_pair(&response, "session").expect("session cookie");
        assert_ne!(session, "session=");
        let deletes = set_cookies(&response)
            .into_iter()
            .filter(|c| c.starts_with("session=") && c.contains("Max-Age=0"))
            .count();
        assert_eq!(deletes, 0);
    }
}
