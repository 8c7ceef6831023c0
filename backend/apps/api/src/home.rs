//! Landing page

use std::sync::Arc;

use auth::AuthConfig;
use auth::middleware::MaybeUser;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::{Router, routing::get};
use platform::flash::Flash;
use platform::html::{self, Nav};

pub fn home_router(config: Arc<AuthConfig>) -> Router {
    Router::new().route("/", get(index)).with_state(config)
}

async fn index(
    State(config): State<Arc<AuthConfig>>,
    MaybeUser(user): MaybeUser,
    headers: HeaderMap,
) -> Response {
    let user_name = user.as_ref().map(|u| u.user_name.as_str());
    config
        .flash()
        .render(&headers, |flash| index_page(user_name, flash))
}

fn index_page(user_name: Option<&str>, flash: Option<&Flash>) -> String {
    match user_name {
        Some(user_name) => html::layout(
            "Snapfeed",
            Nav::SignedIn { user_name },
            flash,
            maud::html! {
                h1 { "Snapfeed" }
                p {
                    a href="/feed" { "See what everyone has posted" }
                    " or "
                    a href="/profile" { "add your own" }
                    "."
                }
            },
        ),
        None => html::layout(
            "Snapfeed",
            Nav::Anonymous,
            flash,
            maud::html! {
                h1 { "Snapfeed" }
                p {
                    "Share your pictures. "
                    a href="/signup" { "Create an account" }
                    " or "
                    a href="/login" { "log in" }
                    "."
                }
            },
        ),
    }
}
