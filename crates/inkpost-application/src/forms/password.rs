//! Password recovery: the forgot-password and reset-password forms.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use inkpost_core::account::repository::AccountApi;
use inkpost_core::error::{InkpostError, Result};
use inkpost_core::feedback::{FeedbackBoard, FeedbackTimings, Severity};
use inkpost_core::form::FormGuard;
use inkpost_core::validation;
use inkpost_core::view::{Nav, View};

/// Controller for the forgot-password form.
pub struct ForgotPasswordForm {
    guard: FormGuard,
    feedback: FeedbackBoard,
    timings: FeedbackTimings,
}

impl ForgotPasswordForm {
    pub fn new(timings: FeedbackTimings) -> Self {
        Self {
            guard: FormGuard::new(&["email"]),
            feedback: FeedbackBoard::new(),
            timings,
        }
    }

    pub fn set_email(&mut self, value: &str) {
        self.guard.set_value("email", value);
        self.feedback.clear_field("email");
    }

    pub fn can_submit(&self) -> bool {
        self.guard.can_submit()
    }

    pub fn feedback(&self) -> &FeedbackBoard {
        &self.feedback
    }

    /// Requests the reset email. Returns `true` when the request was
    /// accepted.
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

        let result = account
            .request_password_reset(self.guard.value("email"))
            .await;
        self.guard.finish_submit();

        match result {
            Ok(()) => {
                self.feedback.set_notice(
                    "Password reset email sent!",
                    Severity::Info,
                    now,
                    &self.timings,
                );
                Ok(true)
            }
            Err(InkpostError::Server { message }) => {
                if message.to_lowercase().contains("email") {
                    self.feedback
                        .set_field_error("email", message, now, &self.timings);
                } else {
                    self.feedback
                        .set_notice(message, Severity::Error, now, &self.timings);
                }
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

/// Controller for the reset-password form reached through the emailed
/// link; the link's token scopes the reset.
pub struct ResetPasswordForm {
    token: String,
    guard: FormGuard,
    feedback: FeedbackBoard,
    timings: FeedbackTimings,
    redirect_delay: Duration,
}

impl ResetPasswordForm {
    pub fn new(
        token: impl Into<String>,
        timings: FeedbackTimings,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            token: token.into(),
            guard: FormGuard::new(&["new_password", "confirm_password"]),
            feedback: FeedbackBoard::new(),
            timings,
            redirect_delay,
        }
    }

    pub fn set_new_password(&mut self, value: &str) {
        self.guard.set_value("new_password", value);
        self.feedback.clear_field("new_password");
    }

    pub fn set_confirm_password(&mut self, value: &str) {
        self.guard.set_value("confirm_password", value);
        self.feedback.clear_field("confirm_password");
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

        let new_password = self.guard.value("new_password").to_string();
        let confirm_password = self.guard.value("confirm_password").to_string();

        if let Err(message) = validation::check_password(&new_password) {
            self.feedback
                .set_field_error("new_password", message, now, &self.timings);
            self.guard.finish_submit();
            return Ok(None);
        }
        if let Err(message) = validation::check_confirmation(&new_password, &confirm_password) {
            self.feedback
                .set_field_error("confirm_password", message, now, &self.timings);
            self.guard.finish_submit();
            return Ok(None);
        }

        let result = account
            .reset_password(&self.token, &new_password, &confirm_password)
            .await;
        self.guard.finish_submit();

        match result {
            Ok(()) => {
                self.feedback.set_notice(
                    "Password reset successful! Redirecting to login...",
                    Severity::Success,
                    now,
                    &self.timings,
                );
                Ok(Some(Nav::ToAfter(View::Login, self.redirect_delay)))
            }
            Err(InkpostError::Server { message }) => {
                if message.to_lowercase().contains("password") {
                    self.feedback
                        .set_field_error("new_password", message, now, &self.timings);
                } else {
                    self.feedback
                        .set_notice(message, Severity::Error, now, &self.timings);
                }
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
