//! Transient user feedback with explicit expiry.
//!
//! Every message carries its own deadline and is replaced wholesale when a
//! new message for the same field or region is issued, so an overlapping
//! older timer can never resurrect stale text.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient message with an explicit expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub severity: Severity,
    pub expires_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        text: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            text: text.into(),
            severity,
            expires_at: now + ttl,
        }
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Display durations for transient feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTimings {
    /// Region-level success/info/error notices.
    pub notice_ttl: Duration,
    /// Field-level error markers.
    pub field_error_ttl: Duration,
}

impl Default for FeedbackTimings {
    fn default() -> Self {
        Self {
            notice_ttl: Duration::seconds(3),
            field_error_ttl: Duration::seconds(5),
        }
    }
}

/// Per-form feedback state: one region-level notice plus at most one error
/// per field.
///
/// A field error clears on its timer or on the next edit to that field,
/// whichever comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackBoard {
    notice: Option<Feedback>,
    fields: BTreeMap<String, Feedback>,
}

impl FeedbackBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the region-level notice.
    pub fn set_notice(
        &mut self,
        text: impl Into<String>,
        severity: Severity,
        now: DateTime<Utc>,
        timings: &FeedbackTimings,
    ) {
        self.notice = Some(Feedback::new(text, severity, now, timings.notice_ttl));
    }

    /// Replaces the error for one field.
    pub fn set_field_error(
        &mut self,
        field: impl Into<String>,
        text: impl Into<String>,
        now: DateTime<Utc>,
        timings: &FeedbackTimings,
    ) {
        self.fields.insert(
            field.into(),
            Feedback::new(text, Severity::Error, now, timings.field_error_ttl),
        );
    }

    /// Clears the error for one field; called on the field's next edit.
    pub fn clear_field(&mut self, field: &str) {
        self.fields.remove(field);
    }

    /// Clears everything; called when a form is (re)submitted.
    pub fn clear_all(&mut self) {
        self.notice = None;
        self.fields.clear();
    }

    /// The region-level notice, if still visible.
    pub fn notice(&self, now: DateTime<Utc>) -> Option<&Feedback> {
        self.notice.as_ref().filter(|f| f.is_visible(now))
    }

    /// The error for one field, if still visible. A visible error also
    /// implies the field's error marker (border) is shown.
    pub fn field_error(&self, field: &str, now: DateTime<Utc>) -> Option<&Feedback> {
        self.fields.get(field).filter(|f| f.is_visible(now))
    }

    /// All currently visible field errors.
    pub fn visible_field_errors(&self, now: DateTime<Utc>) -> Vec<(&str, &Feedback)> {
        self.fields
            .iter()
            .filter(|(_, f)| f.is_visible(now))
            .map(|(k, f)| (k.as_str(), f))
            .collect()
    }
}
