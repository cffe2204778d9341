//! Client configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackTimings;

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_per_page() -> u32 {
    4
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_notice_ttl_secs() -> i64 {
    3
}

fn default_field_error_ttl_secs() -> i64 {
    5
}

fn default_redirect_delay_secs() -> u64 {
    2
}

/// Settings loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the blog backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Items per list page. Fixed per view, not user-adjustable.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Upper bound for any single request; an elapsed timeout renders as a
    /// load error instead of leaving the view loading forever.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How long region-level notices stay visible.
    #[serde(default = "default_notice_ttl_secs")]
    pub notice_ttl_secs: i64,

    /// How long field-level error markers stay visible.
    #[serde(default = "default_field_error_ttl_secs")]
    pub field_error_ttl_secs: i64,

    /// Delay before navigating away after a confirmed update, so the user
    /// sees the confirmation first.
    #[serde(default = "default_redirect_delay_secs")]
    pub redirect_delay_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            request_timeout_secs: default_request_timeout_secs(),
            notice_ttl_secs: default_notice_ttl_secs(),
            field_error_ttl_secs: default_field_error_ttl_secs(),
            redirect_delay_secs: default_redirect_delay_secs(),
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    pub fn redirect_delay(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.redirect_delay_secs)
    }

    pub fn feedback_timings(&self) -> FeedbackTimings {
        FeedbackTimings {
            notice_ttl: Duration::seconds(self.notice_ttl_secs),
            field_error_ttl: Duration::seconds(self.field_error_ttl_secs),
        }
    }
}
