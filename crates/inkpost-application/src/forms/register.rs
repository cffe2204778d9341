//! The registration form.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use inkpost_core::account::model::Registration;
use inkpost_core::account::repository::AccountApi;
use inkpost_core::error::{InkpostError, Result};
use inkpost_core::feedback::{FeedbackBoard, FeedbackTimings, Severity};
use inkpost_core::form::FormGuard;
use inkpost_core::post::model::Attachment;
use inkpost_core::validation;
use inkpost_core::view::{Nav, View};

const FIELDS: &[&str] = &["name", "dob", "place", "address", "email", "password", "image"];

/// Controller for the registration form: all profile fields plus a
/// profile image, submitted as one multipart request.
pub struct RegisterForm {
    guard: FormGuard,
    photo: Option<Attachment>,
    feedback: FeedbackBoard,
    timings: FeedbackTimings,
    redirect_delay: Duration,
}

impl RegisterForm {
    pub fn new(timings: FeedbackTimings, redirect_delay: Duration) -> Self {
        Self {
            guard: FormGuard::new(FIELDS),
            photo: None,
            feedback: FeedbackBoard::new(),
            timings,
            redirect_delay,
        }
    }

    /// Records an edit to one of the tracked text fields.
    pub fn set_field(&mut self, field: &str, value: &str) {
        self.guard.set_value(field, value);
        self.feedback.clear_field(field);
    }

    /// Attaches the profile image; the file name fills the tracked
    /// `image` field.
    pub fn set_photo(&mut self, photo: Attachment) {
        self.guard.set_value("image", photo.file_name.clone());
        self.feedback.clear_field("image");
        self.photo = Some(photo);
    }

    pub fn can_submit(&self) -> bool {
        self.guard.can_submit()
    }

    pub fn feedback(&self) -> &FeedbackBoard {
        &self.feedback
    }

    pub async fn submit(
        &mut self,
        account: &Arc<dyn AccountApi>,
        now: DateTime<Utc>,
    ) -> Result<Option<Nav>> {
        if !self.guard.begin_submit() {
            return Ok(None);
        }
        self.feedback.clear_all();

        let mut blocked = false;
        if let Err(message) = validation::check_email(self.guard.value("email")) {
            self.feedback
                .set_field_error("email", message, now, &self.timings);
            blocked = true;
        }
        if let Err(message) = validation::check_password(self.guard.value("password")) {
            self.feedback
                .set_field_error("password", message, now, &self.timings);
            blocked = true;
        }
        if blocked {
            self.guard.finish_submit();
            return Ok(None);
        }

        let registration = Registration {
            name: self.guard.value("name").to_string(),
            dob: self.guard.value("dob").to_string(),
            place: self.guard.value("place").to_string(),
            address: self.guard.value("address").to_string(),
            email: self.guard.value("email").to_string(),
            password: self.guard.value("password").to_string(),
        };

        let result = account.register(&registration, self.photo.as_ref()).await;
        self.guard.finish_submit();

        match result {
            Ok(()) => {
                self.feedback.set_notice(
                    "Registration successful! Redirecting...",
                    Severity::Success,
                    now,
                    &self.timings,
                );
                Ok(Some(Nav::ToAfter(View::Login, self.redirect_delay)))
            }
            Err(InkpostError::FieldErrors { errors }) => {
                for (field, message) in errors {
                    if FIELDS.contains(&field.as_str()) {
                        self.feedback
                            .set_field_error(field, message, now, &self.timings);
                    } else {
                        self.feedback
                            .set_notice(message, Severity::Error, now, &self.timings);
                    }
                }
                Ok(None)
            }
            Err(InkpostError::Server { message }) => {
                self.feedback
                    .set_notice(message, Severity::Error, now, &self.timings);
                Ok(None)
            }
            Err(err) if err.is_transport() => {
                self.feedback
                    .set_notice(err.user_message(), Severity::Error, now, &self.timings);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
