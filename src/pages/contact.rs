//! Contact settings page.

use super::{report, Notifier, SubmitOutcome};
use crate::api::ApiClient;
use crate::errors::FormErrors;
use crate::models::ContactSettings;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ContactForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.email.is_none() && self.phone.is_none() && self.address.is_none() {
            errors.add("email", "Please enter at least one contact field");
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                errors.add("email", "Please enter a valid email");
            }
        }
        errors
    }

    /// Only the fields that were filled are sent.
    fn settings(&self) -> ContactSettings {
        ContactSettings {
            email: self.email.as_deref().map(|v| v.trim().to_string()),
            phone: self.phone.as_deref().map(|v| v.trim().to_string()),
            address: self.address.as_deref().map(|v| v.trim().to_string()),
            other: Default::default(),
        }
    }
}

pub async fn submit_contact(
    api: &ApiClient,
    notifier: &dyn Notifier,
    form: &ContactForm,
) -> SubmitOutcome {
    let errors = form.validate();
    if !errors.is_empty() {
        return SubmitOutcome::Invalid(errors);
    }
    let result = api.update_contact(&form.settings()).await;
    report(notifier, result, "Contact updated successfully")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_is_rejected() {
        assert!(!ContactForm::default().validate().is_empty());
    }

    #[test]
    fn test_settings_only_carry_filled_fields() {
        let form = ContactForm {
            phone: Some(" +3557 000 447 ".to_string()),
            ..Default::default()
        };
        assert!(form.validate().is_empty());

        let json = serde_json::to_value(form.settings()).unwrap();
        assert_eq!(json, serde_json::json!({ "phone": "+3557 000 447" }));
    }
}
