//! Application layer for the Inkpost client.
//!
//! This crate provides the use cases that coordinate the domain and
//! infrastructure layers: the session gate and its global auth-failure
//! policy, the paginated list controller shared by every list view, the
//! post mutation flows, and the form controllers.

pub mod dashboard_usecase;
pub mod forms;
pub mod home_usecase;
pub mod list_controller;
pub mod post_usecase;
pub mod session_usecase;

pub use dashboard_usecase::{DashboardUseCase, DashboardView};
pub use home_usecase::{HomeUseCase, HomeView};
pub use list_controller::{ListBrowser, ListContent, ListController, ListViewModel};
pub use post_usecase::{MutationOutcome, PostUseCase};
pub use session_usecase::{Gated, SessionUseCase};
