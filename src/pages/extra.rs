//! Extras page: add, edit and remove extra services.

use super::{Notification, Notifier, SubmitOutcome, GENERIC_ERROR};
use crate::api::{ApiClient, MutationResult};
use crate::errors::FormErrors;
use crate::models::ExtraServiceInput;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraForm {
    pub name: String,
    pub description: String,
    /// Price as typed; parsed on submit
    pub price: String,
}

impl ExtraForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        errors.require("name", &self.name, "Please enter name");
        errors.require("price", &self.price, "Please enter price");
        if !self.price.trim().is_empty() && self.parsed_price().is_none() {
            errors.add("price", "Please enter a valid price");
        }
        errors
    }

    fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
    }

    fn input(&self) -> ExtraServiceInput {
        let description = self.description.trim();
        ExtraServiceInput {
            name: Some(self.name.trim().to_string()),
            description: (!description.is_empty()).then(|| description.to_string()),
            price: self.parsed_price(),
        }
    }
}

/// Create a new extra service, or update `id` when given.
pub async fn submit_extra(
    api: &ApiClient,
    notifier: &dyn Notifier,
    id: Option<&str>,
    form: &ExtraForm,
) -> SubmitOutcome {
    let errors = form.validate();
    if !errors.is_empty() {
        return SubmitOutcome::Invalid(errors);
    }

    let input = form.input();
    let (result, fallback) = match id {
        Some(id) => (
            api.update_extra(id, &input).await,
            "Extra updated successfully",
        ),
        None => (api.create_extra(&input).await, "Extra added successfully"),
    };
    report(notifier, result, fallback)
}

pub async fn delete_extra(api: &ApiClient, notifier: &dyn Notifier, id: &str) -> SubmitOutcome {
    let result = api.delete_extra(id).await;
    report(notifier, result, "Extra deleted successfully")
}

/// Turn a mutation result into a notification.
pub fn report(
    notifier: &dyn Notifier,
    result: MutationResult,
    success_fallback: &str,
) -> SubmitOutcome {
    match result {
        Ok(envelope) => {
            let message = envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| success_fallback.to_string());
            notifier.notify(Notification::success(message));
            SubmitOutcome::Completed { navigate: None }
        }
        Err(e) => {
            tracing::warn!("Request failed: {}", e);
            notifier.notify(Notification::error(e.user_message(GENERIC_ERROR)));
            SubmitOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_must_be_a_number() {
        let form = ExtraForm {
            name: "Child seat".to_string(),
            description: String::new(),
            price: "ten".to_string(),
        };
        assert_eq!(form.validate().get("price"), Some("Please enter a valid price"));
    }

    #[test]
    fn test_input_drops_blank_description() {
        let form = ExtraForm {
            name: " Child seat ".to_string(),
            description: "  ".to_string(),
            price: "12.5".to_string(),
        };
        assert!(form.validate().is_empty());

        let input = form.input();
        assert_eq!(input.name.as_deref(), Some("Child seat"));
        assert_eq!(input.description, None);
        assert_eq!(input.price, Some(12.5));
    }
}
