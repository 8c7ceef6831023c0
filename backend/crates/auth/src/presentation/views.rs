//! Login and signup pages

use maud::html;
use platform::flash::Flash;
use platform::html::{Nav, layout};

pub fn login_page(flash: Option<&Flash>) -> String {
    let body = html! {
        h1 { "Login" }
        form action="/login" method="POST" {
            label for="email" { "Email" }
            input type="email" id="email" name="email" required;
            label for="password" { "Password" }
            input type="password" id="password" name="password" required;
            button type="submit" { "Login" }
        }
        p { "No account yet? " a href="/signup" { "Sign up" } }
    };

    layout("Login", Nav::Anonymous, flash, body)
}

pub fn signup_page(flash: Option<&Flash>) -> String {
    let body = html! {
        h1 { "Create Account" }
        form action="/signup" method="POST" {
            label for="userName" { "User name" }
            input type="text" id="userName" name="userName" required;
            label for="email" { "Email" }
            input type="email" id="email" name="email" required;
            label for="password" { "Password" }
            input type="password" id="password" name="password" minlength="8" required;
            label for="confirmPassword" { "Confirm password" }
            input type="password" id="confirmPassword" name="confirmPassword" required;
            button type="submit" { "Sign Up" }
        }
    };

    layout("Create Account", Nav::Anonymous, flash, body)
}
