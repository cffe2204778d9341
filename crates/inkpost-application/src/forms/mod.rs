//! Form controllers.
//!
//! Each form combines the same three pieces: a [`FormGuard`] for
//! required-field completeness and the submit-in-flight flag, the
//! client-side validators, and a [`FeedbackBoard`] for transient messages.
//! Client-side checks run first and block the request entirely; server
//! field errors are applied only after a request was actually sent and
//! rejected.
//!
//! [`FormGuard`]: inkpost_core::form::FormGuard
//! [`FeedbackBoard`]: inkpost_core::feedback::FeedbackBoard

pub mod contact;
pub mod login;
pub mod password;
pub mod post_form;
pub mod register;

pub use contact::ContactForm;
pub use login::LoginForm;
pub use password::{ForgotPasswordForm, ResetPasswordForm};
pub use post_form::{EditorMode, PostForm};
pub use register::RegisterForm;
