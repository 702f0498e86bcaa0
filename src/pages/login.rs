//! Login and logout.

use super::{Notification, Notifier, SubmitOutcome};
use crate::api::ApiClient;
use crate::errors::{AppError, FormErrors};
use crate::models::LoginRequest;
use crate::routes::{HOME_PATH, LOGIN_PATH};

const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require("email", &self.email, "Please Enter your email");
        errors.require("password", &self.password, "Please input your Password!");
        errors
    }

    fn request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.trim().to_string(),
        }
    }
}

/// Sign in with `form`.
///
/// On success the token is stored in the session context, every cached query
/// is dropped and the console moves to the dashboard home.
pub async fn submit_login(
    api: &ApiClient,
    notifier: &dyn Notifier,
    form: &LoginForm,
) -> SubmitOutcome {
    let errors = form.validate();
    if !errors.is_empty() {
        return SubmitOutcome::Invalid(errors);
    }

    let request = form.request();
    tracing::info!("Signing in as {}", request.email);

    let stored = match api.login(&request).await {
        Ok(token) => api.session().sign_in(token),
        Err(e) => Err(e),
    };

    match stored {
        Ok(_) => {
            api.cache().clear().await;
            SubmitOutcome::Completed {
                navigate: Some(HOME_PATH),
            }
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            notifier.notify(Notification::error(e.user_message(LOGIN_FAILED)));
            SubmitOutcome::Failed
        }
    }
}

/// Forget the current session and return the page to show next.
pub async fn logout(api: &ApiClient) -> Result<&'static str, AppError> {
    api.session().sign_out()?;
    api.cache().clear().await;
    Ok(LOGIN_PATH)
}
