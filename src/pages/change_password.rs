//! Change-password page.

use super::{Notification, Notifier, SubmitOutcome, GENERIC_ERROR};
use crate::api::ApiClient;
use crate::errors::FormErrors;
use crate::models::ChangePasswordRequest;
use crate::routes::LOGIN_PATH;

pub const SIMILAR_PASSWORD: &str = "The New password is similar to the old Password";
pub const PASSWORD_MISMATCH: &str = "New Password and Confirm Password Don't Match";
const PASSWORD_UPDATED: &str = "Password updated successfully";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub current_pass: String,
    pub new_pass: String,
    pub confirm_pass: String,
}

impl ChangePasswordForm {
    pub fn new(
        current_pass: impl Into<String>,
        new_pass: impl Into<String>,
        confirm_pass: impl Into<String>,
    ) -> Self {
        Self {
            current_pass: current_pass.into(),
            new_pass: new_pass.into(),
            confirm_pass: confirm_pass.into(),
        }
    }

    /// Required-field checks, then the reuse and confirmation rules.
    ///
    /// The two rules are independent and may both be reported.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require(
            "currentPass",
            &self.current_pass,
            "Please Enter Current Password!",
        );
        errors.require("newPass", &self.new_pass, "Please Enter New Password!");
        errors.require(
            "confirmPass",
            &self.confirm_pass,
            "Please Enter Confirm Password!",
        );

        if self.new_pass == self.current_pass {
            errors.add("newPass", SIMILAR_PASSWORD);
        }
        if self.new_pass != self.confirm_pass {
            errors.add("confirmPass", PASSWORD_MISMATCH);
        }
        errors
    }
}

#[derive(Debug, Default)]
pub struct ChangePasswordPage {
    pub form: ChangePasswordForm,
    errors: FormErrors,
}

impl ChangePasswordPage {
    pub fn new(form: ChangePasswordForm) -> Self {
        Self {
            form,
            errors: FormErrors::new(),
        }
    }

    /// Errors from the last submission attempt.
    #[cfg(test)]
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub async fn submit(&mut self, api: &ApiClient, notifier: &dyn Notifier) -> SubmitOutcome {
        self.errors = self.form.validate();
        if !self.errors.is_empty() {
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        let request = ChangePasswordRequest {
            current_password: self.form.current_pass.clone(),
            new_password: self.form.new_pass.clone(),
        };

        match api.change_password(&request).await {
            Ok(envelope) => {
                let message = envelope
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| PASSWORD_UPDATED.to_string());
                notifier.notify(Notification::success(message));
                self.form = ChangePasswordForm::default();

                // The server has revoked the old token.
                if let Err(e) = api.session().sign_out() {
                    tracing::warn!("Could not clear session after password change: {}", e);
                }
                SubmitOutcome::Completed {
                    navigate: Some(LOGIN_PATH),
                }
            }
            Err(e) => {
                tracing::warn!("Password change failed: {}", e);
                notifier.notify(Notification::error(e.user_message(GENERIC_ERROR)));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reused_password_is_blocked_regardless_of_confirmation() {
        for confirm in ["old-pass", "other", ""] {
            let errors = ChangePasswordForm::new("old-pass", "old-pass", confirm).validate();
            assert_eq!(errors.get("newPass"), Some(SIMILAR_PASSWORD));
        }
    }

    #[test]
    fn test_mismatch_is_blocked() {
        let errors = ChangePasswordForm::new("old-pass", "new-pass", "new-pas").validate();
        assert_eq!(errors.get("confirmPass"), Some(PASSWORD_MISMATCH));
        assert_eq!(errors.get("newPass"), None);
    }

    #[test]
    fn test_both_rules_fire_together() {
        let errors = ChangePasswordForm::new("same", "same", "different").validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("newPass"), Some(SIMILAR_PASSWORD));
        assert_eq!(errors.get("confirmPass"), Some(PASSWORD_MISMATCH));
    }

    #[test]
    fn test_valid_change_passes() {
        let errors = ChangePasswordForm::new("old-pass", "new-pass", "new-pass").validate();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = ChangePasswordForm::new("", "new-pass", "new-pass").validate();
        assert_eq!(errors.get("currentPass"), Some("Please Enter Current Password!"));
    }
}
