//! Flash Messages
//!
//! One-time notices that survive a redirect. The payload is JSON, base64url
//! encoded and HMAC signed, carried in a cookie and cleared by the response
//! that displays it.

use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::{Deserialize, Serialize};

use crate::cookie::{CookieConfig, append_set_cookie};
use crate::crypto;

/// Default flash cookie name
pub const FLASH_COOKIE_NAME: &str = "flash";

/// Pending messages, grouped by severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success: Vec<String>,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            ..Self::default()
        }
    }

    pub fn errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            errors: messages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: vec![message.into()],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.success.is_empty()
    }
}

/// Signs, reads and clears the flash cookie
#[derive(Clone)]
pub struct FlashCookies {
    cookie: CookieConfig,
    secret: [u8; 32],
}

impl FlashCookies {
    pub fn new(secret: [u8; 32], secure: bool) -> Self {
        Self {
            cookie: CookieConfig {
                secure,
                ..CookieConfig::named(FLASH_COOKIE_NAME)
            },
            secret,
        }
    }

    /// Encode and sign a flash for the cookie value
    pub fn encode(&self, flash: &Flash) -> Option<String> {
        let json = serde_json::to_vec(flash).ok()?;
        Some(crypto::sign(&self.secret, &crypto::to_base64url(&json)))
    }

    /// Decode a cookie value; tampered or malformed values yield `None`
    pub fn decode(&self, value: &str) -> Option<Flash> {
        let payload = crypto::verify(&self.secret, value)?;
        let json = crypto::from_base64url(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Read the pending flash from a request, if any
    pub fn peek(&self, headers: &HeaderMap) -> Option<Flash> {
        let value = self.cookie.extract(headers)?;
        self.decode(&value).filter(|flash| !flash.is_empty())
    }

    /// Set-Cookie value carrying `flash`
    pub fn set_cookie(&self, flash: &Flash) -> Option<String> {
        self.encode(flash)
            .map(|value| self.cookie.build_set_cookie(&value))
    }

    pub fn clear_cookie(&self) -> String {
        self.cookie.build_delete_cookie()
    }

    /// Whether the request carries a flash cookie that must be cleared
    pub fn is_present(&self, headers: &HeaderMap) -> bool {
        self.cookie.extract(headers).is_some()
    }

    /// Redirect (303) to `to`, attaching `flash` for the next page
    pub fn redirect(&self, to: &str, flash: Flash) -> Response {
        let mut response = Redirect::to(to).into_response();
        self.attach(&mut response, &flash);
        response
    }

    /// Attach `flash` to an already built response
    pub fn attach(&self, response: &mut Response, flash: &Flash) {
        if flash.is_empty() {
            return;
        }
        match self.set_cookie(flash) {
            Some(cookie) => append_set_cookie(response.headers_mut(), &cookie),
            None => tracing::warn!("Failed to encode flash message"),
        }
    }

    /// Mark a rendered response as having consumed the request's flash
    pub fn consume(&self, request_headers: &HeaderMap, response: &mut Response) {
        if self.is_present(request_headers) {
            append_set_cookie(response.headers_mut(), &self.clear_cookie());
        }
    }

    /// Render an HTML page showing (and consuming) the pending flash
    pub fn render<F>(&self, request_headers: &HeaderMap, render: F) -> Response
    where
        F: FnOnce(Option<&Flash>) -> String,
    {
        let flash = self.peek(request_headers);
        let mut response = Html(render(flash.as_ref())).into_response();
        self.consume(request_headers, &mut response);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode, header};

    fn cookies() -> FlashCookies {
        FlashCookies::new([3u8; 32], false)
    }

    fn request_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", FLASH_COOKIE_NAME, value)).unwrap(),
        );
        headers
    }

    #[test]
    fn test_encode_decode() {
        let flash = Flash::errors(["Please enter a valid email address.", "Password cannot be blank."]);
        let encoded = cookies().encode(&flash).unwrap();
        assert_eq!(cookies().decode(&encoded), Some(flash));
    }

    #[test]
    fn test_decode_rejects_other_secret() {
        let encoded = cookies().encode(&Flash::success("ok")).unwrap();
        let other = FlashCookies::new([4u8; 32], false);
        assert_eq!(other.decode(&encoded), None);
    }

    #[test]
    fn test_peek_reads_request_cookie() {
        let encoded = cookies().encode(&Flash::error("Email x not found.")).unwrap();
        let headers = request_with_cookie(&encoded);
        let flash = cookies().peek(&headers).unwrap();
        assert_eq!(flash.errors, vec!["Email x not found.".to_string()]);
    }

    #[test]
    fn test_peek_ignores_garbage() {
        assert_eq!(cookies().peek(&request_with_cookie("garbage")), None);
        assert_eq!(cookies().peek(&HeaderMap::new()), None);
    }

    #[test]
    fn test_redirect_sets_location_and_cookie() {
        let response = cookies().redirect("/login", Flash::error("nope"));
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("flash="));
    }

    #[test]
    fn test_redirect_without_messages_sets_no_cookie() {
        let response = cookies().redirect("/profile", Flash::default());
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn test_consume_clears_cookie() {
        let encoded = cookies().encode(&Flash::success("hi")).unwrap();
        let headers = request_with_cookie(&encoded);
        let mut response = axum::response::Html("page").into_response();
        cookies().consume(&headers, &mut response);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_render_passes_flash_and_clears_it() {
        let encoded = cookies().encode(&Flash::success("Deleted Post")).unwrap();
        let headers = request_with_cookie(&encoded);
        let response = cookies().render(&headers, |flash| {
            format!("{}", flash.map(|f| f.success.len()).unwrap_or(0))
        });
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }

    #[test]
    fn test_render_without_flash_sets_no_cookie() {
        let response = cookies().render(&HeaderMap::new(), |flash| {
            assert!(flash.is_none());
            String::new()
        });
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
