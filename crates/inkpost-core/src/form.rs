//! Form completeness and submission guard.

use std::collections::BTreeMap;

/// Tracks the required fields of one form and its submit-in-flight flag.
///
/// The submit control is enabled only when every tracked field is non-empty
/// after trimming, and a single outstanding submission disables it for the
/// duration of the request to prevent duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormGuard {
    fields: BTreeMap<String, String>,
    in_flight: bool,
}

impl FormGuard {
    /// Creates a guard tracking the given required fields, all empty.
    pub fn new(required: &[&str]) -> Self {
        Self {
            fields: required
                .iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
            in_flight: false,
        }
    }

    /// Records an edit to a tracked field. Edits to unknown fields are
    /// ignored.
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) {
        if let Some(slot) = self.fields.get_mut(field) {
            *slot = value.into();
        }
    }

    /// The trimmed value of a tracked field.
    pub fn value(&self, field: &str) -> &str {
        self.fields.get(field).map(|v| v.trim()).unwrap_or("")
    }

    /// True when every tracked field is non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        self.fields.values().all(|v| !v.trim().is_empty())
    }

    /// True when the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.is_complete() && !self.in_flight
    }

    /// Marks a submission as started. Returns `false` (and does nothing)
    /// when the form is incomplete or a submission is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Marks the outstanding submission as finished.
    pub fn finish_submit(&mut self) {
        self.in_flight = false;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_disabled_until_complete() {
        let mut guard = FormGuard::new(&["email", "password"]);
        assert!(!guard.can_submit());

        guard.set_value("email", "author@example.com");
        assert!(!guard.can_submit());

        guard.set_value("password", "   ");
        assert!(!guard.can_submit()); // whitespace-only does not count

        guard.set_value("password", "Secret123");
        assert!(guard.can_submit());
    }

    #[test]
    fn test_in_flight_blocks_duplicate_submission() {
        let mut guard = FormGuard::new(&["email"]);
        guard.set_value("email", "author@example.com");

        assert!(guard.begin_submit());
        assert!(!guard.begin_submit()); // already in flight

        guard.finish_submit();
        assert!(guard.begin_submit());
    }

    #[test]
    fn test_value_is_trimmed() {
        let mut guard = FormGuard::new(&["title"]);
        guard.set_value("title", "  Hello  ");
        assert_eq!(guard.value("title"), "Hello");
    }
}
