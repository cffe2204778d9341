//! The login form.

use chrono::{DateTime, Utc};

use inkpost_core::error::{InkpostError, Result};
use inkpost_core::feedback::{FeedbackBoard, FeedbackTimings, Severity};
use inkpost_core::form::FormGuard;
use inkpost_core::validation;
use inkpost_core::view::Nav;

use crate::session_usecase::SessionUseCase;

/// Controller for the login form.
pub struct LoginForm {
    guard: FormGuard,
    feedback: FeedbackBoard,
    timings: FeedbackTimings,
}

impl LoginForm {
    pub fn new(timings: FeedbackTimings) -> Self {
        Self {
            guard: FormGuard::new(&["email", "password"]),
            feedback: FeedbackBoard::new(),
            timings,
        }
    }

    pub fn set_email(&mut self, value: &str) {
        self.guard.set_value("email", value);
        self.feedback.clear_field("email");
    }

    pub fn set_password(&mut self, value: &str) {
        self.guard.set_value("password", value);
        self.feedback.clear_field("password");
    }

    pub fn can_submit(&self) -> bool {
        self.guard.can_submit()
    }

    pub fn feedback(&self) -> &FeedbackBoard {
        &self.feedback
    }

    /// Submits the credentials. Returns the navigation on success, `None`
    /// when the submission was blocked or rejected (the feedback board
    /// carries the details).
    pub async fn submit(
        &mut self,
        session: &SessionUseCase,
        now: DateTime<Utc>,
    ) -> Result<Option<Nav>> {
        if !self.guard.begin_submit() {
            return Ok(None);
        }
        self.feedback.clear_all();

        if let Err(message) = validation::check_email(self.guard.value("email")) {
            self.feedback
                .set_field_error("email", message, now, &self.timings);
            self.guard.finish_submit();
            return Ok(None);
        }

        let result = session
            .login(self.guard.value("email"), self.guard.value("password"))
            .await;
        self.guard.finish_submit();

        match result {
            Ok(nav) => {
                self.feedback.set_notice(
                    "Login successful! Redirecting...",
                    Severity::Success,
                    now,
                    &self.timings,
                );
                Ok(Some(nav))
            }
            Err(InkpostError::Server { message }) => {
                self.route_server_error(message, now);
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

    /// The backend reports credential problems as one message; messages
    /// naming a field are rendered next to it, everything else becomes the
    /// form-level notice.
    fn route_server_error(&mut self, message: String, now: DateTime<Utc>) {
        let lower = message.to_lowercase();
        if lower.contains("email") {
            self.feedback
                .set_field_error("email", message, now, &self.timings);
        } else if lower.contains("password") {
            self.feedback
                .set_field_error("password", message, now, &self.timings);
        } else {
            self.feedback
                .set_notice(message, Severity::Error, now, &self.timings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use inkpost_core::session::SessionStore;
    use inkpost_core::view::View;

    use crate::session_usecase::tests::{MockAuthApi, MockSessionStore};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn session(auth: MockAuthApi) -> (Arc<MockSessionStore>, SessionUseCase) {
        let store = Arc::new(MockSessionStore::empty());
        let session = SessionUseCase::new(store.clone(), Arc::new(auth), Duration::from_secs(2));
        (store, session)
    }

    #[tokio::test]
    async fn test_incomplete_form_never_submits() {
        let auth = MockAuthApi::ok("tok");
        let calls = Arc::new(auth);
        let store = Arc::new(MockSessionStore::empty());
        let session = SessionUseCase::new(store, calls.clone(), Duration::from_secs(2));

        let mut form = LoginForm::new(FeedbackTimings::default());
        form.set_email("author@example.com");
        assert!(!form.can_submit());

        let nav = form.submit(&session, now()).await.unwrap();
        assert_eq!(nav, None);
        assert_eq!(*calls.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bad_email_blocks_before_network() {
        let auth = Arc::new(MockAuthApi::ok("tok"));
        let store = Arc::new(MockSessionStore::empty());
        let session = SessionUseCase::new(store, auth.clone(), Duration::from_secs(2));

        let mut form = LoginForm::new(FeedbackTimings::default());
        form.set_email("not-an-email");
        form.set_password("Secret123");

        let nav = form.submit(&session, now()).await.unwrap();
        assert_eq!(nav, None);
        assert_eq!(*auth.calls.lock().unwrap(), 0);
        assert!(form.feedback().field_error("email", now()).is_some());
    }

    #[tokio::test]
    async fn test_successful_login_navigates_home() {
        let (store, session) = session(MockAuthApi::ok("fresh"));

        let mut form = LoginForm::new(FeedbackTimings::default());
        form.set_email("author@example.com");
        form.set_password("Secret123");

        let nav = form.submit(&session, now()).await.unwrap().unwrap();
        assert!(matches!(nav, Nav::ToAfter(View::Home, _)));
        assert_eq!(store.get().await.unwrap().reveal(), "fresh");
        assert_eq!(
            form.feedback().notice(now()).unwrap().severity,
            Severity::Success
        );
    }

    #[tokio::test]
    async fn test_server_error_naming_email_lands_on_field() {
        let (_store, session) = session(MockAuthApi::failing("Email not registered"));

        let mut form = LoginForm::new(FeedbackTimings::default());
        form.set_email("author@example.com");
        form.set_password("Secret123");

        let nav = form.submit(&session, now()).await.unwrap();
        assert_eq!(nav, None);
        let error = form.feedback().field_error("email", now()).unwrap();
        assert_eq!(error.text, "Email not registered");
    }

    #[tokio::test]
    async fn test_unrouted_server_error_becomes_notice() {
        let (_store, session) = session(MockAuthApi::failing("Invalid credentials"));

        let mut form = LoginForm::new(FeedbackTimings::default());
        form.set_email("author@example.com");
        form.set_password("Secret123");

        form.submit(&session, now()).await.unwrap();
        let notice = form.feedback().notice(now()).unwrap();
        assert_eq!(notice.text, "Invalid credentials");
        assert_eq!(notice.severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_editing_a_field_clears_its_error() {
        let (_store, session) = session(MockAuthApi::failing("Email not registered"));

        let mut form = LoginForm::new(FeedbackTimings::default());
        form.set_email("author@example.com");
        form.set_password("Secret123");
        form.submit(&session, now()).await.unwrap();
        assert!(form.feedback().field_error("email", now()).is_some());

        form.set_email("other@example.com");
        assert!(form.feedback().field_error("email", now()).is_none());
    }
}
