//! HTML Helpers
//!
//! Server-side rendering with maud: a shared page layout and flash display.
//! Feature crates build page bodies as [`Markup`] and hand them to [`layout`];
//! every interpolated value is escaped by the template macro.

use maud::{DOCTYPE, Markup, html};

use crate::flash::Flash;

/// Navigation state shown in the page header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav<'a> {
    Anonymous,
    SignedIn { user_name: &'a str },
}

fn render_flash(flash: Option<&Flash>) -> Markup {
    html! {
        @if let Some(flash) = flash {
            @for message in &flash.errors {
                div class="alert alert-danger" { (message) }
            }
            @for message in &flash.success {
                div class="alert alert-success" { (message) }
            }
        }
    }
}

fn render_nav(nav: Nav<'_>) -> Markup {
    html! {
        nav {
            @match nav {
                Nav::Anonymous => {
                    a href="/login" { "Login" } " "
                    a href="/signup" { "Sign Up" }
                }
                Nav::SignedIn { user_name } => {
                    span { (user_name) } " "
                    a href="/profile" { "Profile" } " "
                    a href="/feed" { "Feed" } " "
                    a href="/logout" { "Logout" }
                }
            }
        }
    }
}

/// Wrap a page body in the common layout
pub fn layout(title: &str, nav: Nav<'_>, flash: Option<&Flash>, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                header {
                    a href="/" { "Snapfeed" } " "
                    (render_nav(nav))
                }
                main {
                    (render_flash(flash))
                    (body)
                }
            }
        }
    }
    .into_string()
}
