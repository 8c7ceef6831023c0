//! Form DTOs
//!
//! Missing fields deserialize as empty strings so validation, not the
//! extractor, reports them.

use serde::Deserialize;

use crate::application::{SignInInput, SignUpInput};

/// POST /login body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl From<LoginForm> for SignInInput {
    fn from(form: LoginForm) -> Self {
        Self {
            email: form.email,
            password: form.password,
        }
    }
}

/// POST /signup body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupForm {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl From<SignupForm> for SignUpInput {
    fn from(form: SignupForm) -> Self {
        Self {
            user_name: form.user_name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
        }
    }
}
