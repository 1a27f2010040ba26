//! # Form State Manager
//!
//! Generic form state for the admin dashboard: current values, per-field
//! error messages, per-field "touched" flags, and submission state.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Per-Field Lifecycle                                 │
//! │                                                                         │
//! │   untouched ──── blur ────► touched                                    │
//! │       │                        │                                        │
//! │       │ set_value              │ set_value                              │
//! │       ▼                        ▼                                        │
//! │   (no validation)        validate immediately                          │
//! │                          first failing rule → error                    │
//! │                          all rules pass     → error cleared            │
//! │                                                                         │
//! │                     Whole-Form Lifecycle                                │
//! │                                                                         │
//! │   idle ── submit ──► touch all ──► validate all                        │
//! │                          │                                              │
//! │            invalid ◄─────┴─────► valid                                 │
//! │            (callback never       submitting = true                     │
//! │             invoked)             await callback                        │
//! │                                  submitting = false  (ok AND err path) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures are never errors in the `Result` sense: they are
//! recorded as field strings and surfaced inline. Only the submit callback's
//! own failure propagates to the caller.
//!
//! ## Usage
//! ```rust
//! use freshmart_core::form::{FieldRule, FormState};
//! use serde_json::json;
//!
//! let mut form = FormState::new(serde_json::Map::from_iter([(
//!     "price".to_string(),
//!     json!(0),
//! )]))
//! .rule(
//!     "price",
//!     FieldRule::new("Price must be greater than 0", |v| {
//!         v.as_i64().is_some_and(|n| n > 0)
//!     }),
//! );
//!
//! form.blur("price");
//! assert_eq!(form.error("price"), Some("Price must be greater than 0"));
//!
//! form.set_value("price", json!(5));
//! assert_eq!(form.error("price"), None);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

use serde_json::{Map, Value};

/// The value bag a form manages: field name to current value.
///
/// Dynamic JSON values keep the manager generic over any admin form
/// (products, banners, sign-in) the way the dashboard reuses it.
pub type FormValues = Map<String, Value>;

// =============================================================================
// Field Rules
// =============================================================================

/// A single validation rule: a predicate over the field's value plus the
/// message recorded when the predicate fails.
///
/// Rules run in declaration order; the first failure wins.
pub struct FieldRule {
    message: String,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl FieldRule {
    /// Creates a rule from a message and a predicate.
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        FieldRule {
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Rule: the value is a non-empty string after trimming.
    ///
    /// Covers the "X is required" rules every admin form starts with.
    pub fn required(message: impl Into<String>) -> Self {
        FieldRule::new(message, |v| {
            v.as_str().is_some_and(|s| !s.trim().is_empty())
        })
    }

    fn check(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Submit Outcome
// =============================================================================

/// What happened to a submit attempt that did not itself fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the callback ran to completion.
    Submitted,
    /// Validation failed; the callback was never invoked.
    Invalid,
}

impl SubmitOutcome {
    /// True when the callback actually ran.
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

// =============================================================================
// Form State
// =============================================================================

/// Long-lived state for one controlled form.
///
/// Each instance owns its state exclusively; nothing is shared between
/// forms. All transitions are synchronous except [`FormState::submit`],
/// which awaits the supplied callback.
pub struct FormState {
    initial: FormValues,
    values: FormValues,
    rules: BTreeMap<String, Vec<FieldRule>>,
    errors: BTreeMap<String, String>,
    touched: BTreeSet<String>,
    submitting: bool,
}

impl FormState {
    /// Creates a form seeded with the given initial values and no rules.
    pub fn new(initial: FormValues) -> Self {
        FormState {
            values: initial.clone(),
            initial,
            rules: BTreeMap::new(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            submitting: false,
        }
    }

    /// Appends a rule to a field's ordered rule list (builder style).
    pub fn rule(mut self, field: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.entry(field.into()).or_default().push(rule);
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Current value of one field, if present.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// Current error message for one field, if any.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// All current field errors.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Whether the field has been touched (blurred at least once).
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Whether a submit callback is currently in flight.
    ///
    /// Nothing here prevents a second overlapping submit; disabling the
    /// trigger while this is true is the caller's job.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Replaces a field's value.
    ///
    /// If the field was previously touched, its rules re-run immediately so
    /// the inline error tracks every keystroke after first blur.
    pub fn set_value(&mut self, field: impl Into<String>, value: Value) {
        let field = field.into();
        self.values.insert(field.clone(), value);
        if self.touched.contains(&field) {
            self.validate_field(&field);
        }
    }

    /// Merges several values at once, preserving untouched fields.
    pub fn set_values(&mut self, values: FormValues) {
        for (field, value) in values {
            self.set_value(field, value);
        }
    }

    /// Marks a field touched and validates it, whether or not the value
    /// changed.
    pub fn blur(&mut self, field: &str) {
        self.touched.insert(field.to_string());
        self.validate_field(field);
    }

    /// Explicitly sets a field's touched flag. Touching validates; untouching
    /// leaves any recorded error in place.
    pub fn set_touched(&mut self, field: &str, touched: bool) {
        if touched {
            self.blur(field);
        } else {
            self.touched.remove(field);
        }
    }

    /// Runs one field's rules in order, recording the first failing rule's
    /// message or clearing the error when all pass. Fields without rules are
    /// left alone.
    pub fn validate_field(&mut self, field: &str) {
        let Some(rules) = self.rules.get(field) else {
            return;
        };

        let value = self.values.get(field).cloned().unwrap_or(Value::Null);
        let failure = rules
            .iter()
            .find(|rule| !rule.check(&value))
            .map(|rule| rule.message.clone());

        match failure {
            Some(message) => {
                self.errors.insert(field.to_string(), message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }

    /// Validates every field that has rules, first failure per field.
    ///
    /// Rebuilds the error map from scratch and returns whether the form is
    /// entirely valid.
    pub fn validate_all(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        for (field, rules) in &self.rules {
            let value = self.values.get(field).cloned().unwrap_or(Value::Null);
            if let Some(rule) = rules.iter().find(|rule| !rule.check(&value)) {
                errors.insert(field.clone(), rule.message.clone());
            }
        }

        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    /// Attempts to submit the form.
    ///
    /// Marks every field touched and validates the whole form. When invalid,
    /// returns [`SubmitOutcome::Invalid`] without invoking the callback and
    /// with the submitting flag still false. When valid, flips the
    /// submitting flag true, awaits the callback with a snapshot of the
    /// current values, and clears the flag again on BOTH the success and the
    /// failure path before returning.
    pub async fn submit<F, Fut, E>(&mut self, callback: F) -> Result<SubmitOutcome, E>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let fields: Vec<String> = self.values.keys().cloned().collect();
        for field in fields {
            self.touched.insert(field);
        }

        if !self.validate_all() {
            return Ok(SubmitOutcome::Invalid);
        }

        self.submitting = true;
        let result = callback(self.values.clone()).await;
        self.submitting = false;

        result.map(|()| SubmitOutcome::Submitted)
    }

    /// Restores the original initial values and clears all errors, touched
    /// flags, and the submitting flag.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.submitting = false;
    }

    /// Re-seeds the form from a new initial-values object.
    ///
    /// Only acts when the new object differs from the current initial
    /// values. Lets the same form be reused for "create" (empty seed) and
    /// "edit" (record seed) flows.
    pub fn reinitialize(&mut self, initial: FormValues) {
        if initial == self.initial {
            return;
        }
        self.initial = initial;
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
    }
}

impl std::fmt::Debug for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormState")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("touched", &self.touched)
            .field("submitting", &self.submitting)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn values(entries: &[(&str, Value)]) -> FormValues {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn price_form() -> FormState {
        FormState::new(values(&[("price", json!(0))])).rule(
            "price",
            FieldRule::new("Price must be greater than 0", |v| {
                v.as_i64().is_some_and(|n| n > 0)
            }),
        )
    }

    #[test]
    fn test_untouched_field_does_not_validate_on_change() {
        let mut form = price_form();

        form.set_value("price", json!(0));
        assert_eq!(form.error("price"), None);
        assert!(!form.is_touched("price"));
    }

    #[test]
    fn test_blur_sets_touched_and_validates() {
        let mut form = price_form();

        form.blur("price");
        assert!(form.is_touched("price"));
        assert_eq!(form.error("price"), Some("Price must be greater than 0"));
    }

    #[test]
    fn test_touched_field_revalidates_on_change() {
        let mut form = price_form();

        form.blur("price");
        assert!(form.error("price").is_some());

        form.set_value("price", json!(5));
        assert_eq!(form.error("price"), None);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let mut form = FormState::new(values(&[("link", json!(""))]))
            .rule("link", FieldRule::required("Link is required"))
            .rule(
                "link",
                FieldRule::new("Link must be a valid internal path", |v| {
                    v.as_str().is_some_and(|s| s.starts_with('/'))
                }),
            );

        form.blur("link");
        assert_eq!(form.error("link"), Some("Link is required"));

        form.set_value("link", json!("products/rice"));
        assert_eq!(
            form.error("link"),
            Some("Link must be a valid internal path")
        );

        form.set_value("link", json!("/products/rice"));
        assert_eq!(form.error("link"), None);
    }

    #[test]
    fn test_validate_all_reports_one_error_per_field() {
        let mut form = FormState::new(values(&[("name", json!("")), ("price", json!(0))]))
            .rule("name", FieldRule::required("Name is required"))
            .rule(
                "price",
                FieldRule::new("Price must be greater than 0", |v| {
                    v.as_i64().is_some_and(|n| n > 0)
                }),
            );

        assert!(!form.validate_all());
        assert_eq!(form.errors().len(), 2);

        form.set_value("name", json!("Rice"));
        form.set_value("price", json!(5));
        assert!(form.validate_all());
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submit_never_invokes_callback_and_touches_all() {
        let mut form = FormState::new(values(&[("name", json!("")), ("price", json!(0))]))
            .rule("name", FieldRule::required("Name is required"));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let outcome: Result<SubmitOutcome, String> = form
            .submit(|_| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await;

        assert_eq!(outcome.unwrap(), SubmitOutcome::Invalid);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!form.is_submitting());

        // Every field is touched, including the one without rules
        assert!(form.is_touched("name"));
        assert!(form.is_touched("price"));
    }

    #[tokio::test]
    async fn test_valid_submit_invokes_callback_once_with_values() {
        let mut form = price_form();
        form.set_value("price", json!(5));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let outcome: Result<SubmitOutcome, String> = form
            .submit(|values| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                assert_eq!(values.get("price"), Some(&json!(5)));
                Ok(())
            })
            .await;

        assert!(outcome.unwrap().is_submitted());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submitting_flag_clears_when_callback_fails() {
        let mut form = price_form();
        form.set_value("price", json!(5));

        let outcome: Result<SubmitOutcome, String> = form
            .submit(|_| async { Err("upstream rejected".to_string()) })
            .await;

        assert_eq!(outcome.unwrap_err(), "upstream rejected");
        // The flag is cleared on the rejection path too
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut form = price_form();

        form.blur("price");
        form.set_value("price", json!(42));
        assert!(form.is_touched("price"));

        form.reset();
        assert_eq!(form.value("price"), Some(&json!(0)));
        assert!(form.errors().is_empty());
        assert!(!form.is_touched("price"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_reinitialize_reseeds_for_edit_flow() {
        let mut form = price_form();
        form.blur("price");
        assert!(form.error("price").is_some());

        // Swap to "edit" seed data: everything re-seeds
        form.reinitialize(values(&[("price", json!(1299))]));
        assert_eq!(form.value("price"), Some(&json!(1299)));
        assert!(form.errors().is_empty());
        assert!(!form.is_touched("price"));

        // Same initial object again is a no-op
        form.blur("price");
        form.set_value("price", json!(7));
        form.reinitialize(values(&[("price", json!(1299))]));
        assert_eq!(form.value("price"), Some(&json!(7)));
    }

    #[test]
    fn test_banner_link_scenario() {
        let mut form = FormState::new(values(&[("link", json!(""))])).rule(
            "link",
            FieldRule::new(
                "Link must be a valid internal path (e.g., /products/rice)",
                |v| {
                    v.as_str().is_some_and(|s| {
                        s.starts_with('/')
                            && s[1..]
                                .chars()
                                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '/')
                    })
                },
            ),
        );

        form.set_value("link", json!("products/rice"));
        form.blur("link");
        assert!(form.error("link").is_some());

        form.set_value("link", json!("/products/rice"));
        assert_eq!(form.error("link"), None);
    }
}
