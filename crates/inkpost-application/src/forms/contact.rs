//! The contact form.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use inkpost_core::account::model::ContactMessage;
use inkpost_core::account::repository::AccountApi;
use inkpost_core::error::{InkpostError, Result};
use inkpost_core::feedback::{FeedbackBoard, FeedbackTimings, Severity};
use inkpost_core::form::FormGuard;
use inkpost_core::validation;

const FIELDS: &[&str] = &["name", "email", "phone", "message"];

/// Controller for the contact form.
pub struct ContactForm {
    guard: FormGuard,
    feedback: FeedbackBoard,
    timings: FeedbackTimings,
}

impl ContactForm {
    pub fn new(timings: FeedbackTimings) -> Self {
        Self {
            guard: FormGuard::new(FIELDS),
            feedback: FeedbackBoard::new(),
            timings,
        }
    }

    pub fn set_field(&mut self, field: &str, value: &str) {
        self.guard.set_value(field, value);
        self.feedback.clear_field(field);
    }

    pub fn can_submit(&self) -> bool {
        self.guard.can_submit()
    }

    pub fn feedback(&self) -> &FeedbackBoard {
        &self.feedback
    }

    /// Submits the message. Returns `true` when it was accepted.
    pub async fn submit(
        &mut self,
        account: &Arc<dyn AccountApi>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        if !self.guard.begin_submit() {
            return Ok(false);
        }
        self.feedback.clear_all();

        if let Err(message) = validation::check_email(self.guard.value("email")) {
            self.feedback
                .set_field_error("email", message, now, &self.timings);
            self.guard.finish_submit();
            return Ok(false);
        }

        let message = ContactMessage {
            name: self.guard.value("name").to_string(),
            email: self.guard.value("email").to_string(),
            phone: self.guard.value("phone").to_string(),
            message: self.guard.value("message").to_string(),
        };

        let result = account.send_contact(&message).await;
        self.guard.finish_submit();

        match result {
            Ok(acknowledgement) => {
                self.feedback
                    .set_notice(acknowledgement, Severity::Success, now, &self.timings);
                Ok(true)
            }
            Err(InkpostError::FieldErrors { errors }) => {
                for (field, text) in errors {
                    if FIELDS.contains(&field.as_str()) {
                        self.feedback
                            .set_field_error(field, text, now, &self.timings);
                    } else {
                        self.feedback
                            .set_notice(text, Severity::Error, now, &self.timings);
                    }
                }
                Ok(false)
            }
            Err(InkpostError::Server { message }) => {
                self.feedback
                    .set_notice(message, Severity::Error, now, &self.timings);
                Ok(false)
            }
            Err(err) if err.is_transport() => {
                self.feedback
                    .set_notice(err.user_message(), Severity::Error, now, &self.timings);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use inkpost_core::account::model::{Profile, Registration};
    use inkpost_core::post::model::Attachment;

    struct ScriptedAccountApi {
        contact_result: Mutex<Option<Result<String>>>,
        contact_calls: Mutex<u32>,
    }

    impl ScriptedAccountApi {
        fn with(result: Result<String>) -> Arc<Self> {
            Arc::new(Self {
                contact_result: Mutex::new(Some(result)),
                contact_calls: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl AccountApi for ScriptedAccountApi {
        async fn register(
            &self,
            _registration: &Registration,
            _photo: Option<&Attachment>,
        ) -> Result<()> {
            Ok(())
        }

        async fn profile(&self) -> Result<Profile> {
            Err(InkpostError::internal("not scripted"))
        }

        async fn send_contact(&self, _message: &ContactMessage) -> Result<String> {
            *self.contact_calls.lock().unwrap() += 1;
            self.contact_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(InkpostError::internal("no scripted response")))
        }

        async fn request_password_reset(&self, _email: &str) -> Result<()> {
            Ok(())
        }

        async fn reset_password(
            &self,
            _token: &str,
            _new_password: &str,
            _confirm_password: &str,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::new(FeedbackTimings::default());
        form.set_field("name", "Ann");
        form.set_field("email", "ann@example.com");
        form.set_field("phone", "555-0100");
        form.set_field("message", "Hello there");
        form
    }

    #[tokio::test]
    async fn test_success_shows_server_acknowledgement() {
        let api = ScriptedAccountApi::with(Ok(
            "Thanks for sending your details, we will get back to you soon".to_string(),
        ));
        let account: Arc<dyn AccountApi> = api.clone();

        let mut form = filled_form();
        assert!(form.submit(&account, now()).await.unwrap());
        assert!(
            form.feedback()
                .notice(now())
                .unwrap()
                .text
                .starts_with("Thanks")
        );
    }

    #[tokio::test]
    async fn test_incomplete_form_is_blocked() {
        let api = ScriptedAccountApi::with(Ok("Thanks".to_string()));
        let account: Arc<dyn AccountApi> = api.clone();

        let mut form = ContactForm::new(FeedbackTimings::default());
        form.set_field("name", "Ann");
        assert!(!form.submit(&account, now()).await.unwrap());
        assert_eq!(*api.contact_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_field_errors_land_on_fields() {
        let mut errors = BTreeMap::new();
        errors.insert("phone".to_string(), "Invalid phone number".to_string());
        let api = ScriptedAccountApi::with(Err(InkpostError::FieldErrors { errors }));
        let account: Arc<dyn AccountApi> = api.clone();

        let mut form = filled_form();
        assert!(!form.submit(&account, now()).await.unwrap());
        assert_eq!(
            form.feedback().field_error("phone", now()).unwrap().text,
            "Invalid phone number"
        );
    }
}
