//! Contact form submission lifecycle.
//!
//! ```text
//! Idle --submit--> Validating --invalid--> Idle
//!                      |
//!                    valid
//!                      v
//!                 Submitting --resolved--> Succeeded --> Idle
//!                      |
//!                      +------rejected--> Failed ----> Idle
//! ```
//!
//! The controller records every externally visible change as a [`FormEvent`].
//! The host drains them with [`FormController::take_events`].

use std::collections::BTreeMap;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::SubmitError;
use crate::field::{FieldKind, FieldSpec, ValidationResult};
use crate::notify::{Notification, NotificationKind};
use crate::phone::format_phone;
use crate::validate::{FieldError, validate, validate_form};

const SUCCESS_MESSAGE: &str =
    "Your message has been sent! We will get back to you as soon as possible.";

/// Field name to value mapping handed to the submit operation.
pub type FormPayload = BTreeMap<String, String>;

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Submit button labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitLabels {
    pub idle: String,
    /// Shown while the submission is in flight.
    pub busy: String,
}

impl Default for SubmitLabels {
    fn default() -> Self {
        Self {
            idle: "Send Message".to_string(),
            busy: "Sending...".to_string(),
        }
    }
}

/// Rendered state of the submit button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

/// A change the host must apply to the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    /// The lifecycle moved to a new state.
    Phase { state: SubmissionState },
    /// The submit button changed.
    Control { control: SubmitControl },
    /// A field's error styling changed.
    FieldValidity {
        field: String,
        result: ValidationResult,
    },
    /// A field's value was rewritten (phone formatting, reset after success).
    FieldValue { field: String, value: String },
    /// Show a toast.
    Notify { notification: Notification },
}

/// Result of [`FormController::request_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// A submission is already underway.
    Ignored,
    /// Validation failed; the form is back to idle.
    Rejected(Vec<FieldError>),
    /// Validation passed; deliver this payload and report back through
    /// [`FormController::complete`].
    Ready(FormPayload),
}

/// Result of the [`FormController::submit`] driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Invalid(Vec<FieldError>),
    Delivered,
    Failed(SubmitError),
}

/// The asynchronous delivery of a validated form.
///
/// Implemented for any `Fn(FormPayload) -> impl Future<Output = Result<(), SubmitError>>`.
pub trait SubmitOperation {
    fn submit(&self, payload: FormPayload) -> impl Future<Output = Result<(), SubmitError>>;
}

impl<F, Fut> SubmitOperation for F
where
    F: Fn(FormPayload) -> Fut,
    Fut: Future<Output = Result<(), SubmitError>>,
{
    fn submit(&self, payload: FormPayload) -> impl Future<Output = Result<(), SubmitError>> {
        self(payload)
    }
}

/// Owns the form's fields and its submission state.
#[derive(Debug, Clone)]
pub struct FormController {
    fields: Vec<FieldSpec>,
    state: SubmissionState,
    labels: SubmitLabels,
    events: Vec<FormEvent>,
}

impl FormController {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            state: SubmissionState::Idle,
            labels: SubmitLabels::default(),
            events: Vec::new(),
        }
    }

    /// The site's contact form: name, email, optional phone, subject, message.
    pub fn contact_form() -> Self {
        Self::new(vec![
            FieldSpec::new("name", FieldKind::Name, true),
            FieldSpec::new("email", FieldKind::Email, true),
            FieldSpec::new("phone", FieldKind::Tel, false),
            FieldSpec::new("subject", FieldKind::Subject, true),
            FieldSpec::new("message", FieldKind::Message, true),
        ])
    }

    #[must_use]
    pub fn with_labels(mut self, labels: SubmitLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Current submit button state.
    pub fn control(&self) -> SubmitControl {
        if self.state == SubmissionState::Submitting {
            SubmitControl {
                enabled: false,
                label: self.labels.busy.clone(),
            }
        } else {
            SubmitControl {
                enabled: true,
                label: self.labels.idle.clone(),
            }
        }
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.events)
    }

    /// The user typed into a field.
    ///
    /// Clears the field's error. Phone values are reformatted and the
    /// formatted value is echoed back. Returns `false` for an unknown field.
    pub fn input(&mut self, name: &str, raw: &str) -> bool {
        let Some(index) = self.index_of(name) else {
            tracing::warn!(field = name, "Input for unknown form field");
            return false;
        };

        let field = &mut self.fields[index];
        if field.kind == FieldKind::Tel {
            let formatted = format_phone(raw);
            field.value = formatted.clone();
            self.events.push(FormEvent::FieldValue {
                field: name.to_string(),
                value: formatted,
            });
        } else {
            field.value = raw.to_string();
        }
        self.events.push(FormEvent::FieldValidity {
            field: name.to_string(),
            result: ValidationResult::Valid,
        });
        true
    }

    /// A field lost focus: validate it and report the verdict.
    pub fn blur(&mut self, name: &str) -> Option<ValidationResult> {
        let index = self.index_of(name)?;
        let result = validate(&self.fields[index]);
        self.events.push(FormEvent::FieldValidity {
            field: name.to_string(),
            result: result.clone(),
        });
        Some(result)
    }

    /// First phase of a submission: validate and, if everything passes,
    /// enter `Submitting` and hand back the payload to deliver.
    pub fn request_submit(&mut self) -> SubmitRequest {
        if self.state != SubmissionState::Idle {
            tracing::debug!(state = %self.state, "Submit ignored while busy");
            return SubmitRequest::Ignored;
        }

        self.transition(SubmissionState::Validating);
        let errors = validate_form(&self.fields);

        for field in &self.fields {
            let result = errors
                .iter()
                .find(|error| error.field == field.name)
                .map_or(ValidationResult::Valid, |error| {
                    ValidationResult::invalid(error.message.clone())
                });
            self.events.push(FormEvent::FieldValidity {
                field: field.name.clone(),
                result,
            });
        }

        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "Form validation failed");
            let lines = errors.iter().map(|error| error.message.clone()).collect();
            self.events.push(FormEvent::Notify {
                notification: Notification::new(NotificationKind::Danger, lines),
            });
            self.transition(SubmissionState::Idle);
            return SubmitRequest::Rejected(errors);
        }

        let payload = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect();
        self.transition(SubmissionState::Submitting);
        self.events.push(FormEvent::Control {
            control: self.control(),
        });
        SubmitRequest::Ready(payload)
    }

    /// Second phase: the submit operation settled.
    ///
    /// Returns the terminal state that was surfaced (the controller is back to
    /// `Idle` afterwards), or `None` if no submission was in flight.
    pub fn complete(&mut self, result: Result<(), SubmitError>) -> Option<SubmissionState> {
        if self.state != SubmissionState::Submitting {
            tracing::warn!(state = %self.state, "Submission result arrived while not submitting");
            return None;
        }

        let terminal = match result {
            Ok(()) => {
                self.transition(SubmissionState::Succeeded);
                self.restore_control();
                self.clear_fields();
                self.events.push(FormEvent::Notify {
                    notification: Notification::success(SUCCESS_MESSAGE),
                });
                SubmissionState::Succeeded
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    suggestion = err.suggestion().unwrap_or_default(),
                    "Contact form submission failed"
                );
                self.transition(SubmissionState::Failed);
                self.restore_control();
                self.events.push(FormEvent::Notify {
                    notification: Notification::danger(err.user_message()),
                });
                SubmissionState::Failed
            }
        };

        self.transition(SubmissionState::Idle);
        Some(terminal)
    }

    /// Abandon any submission in progress and return to `Idle`.
    ///
    /// Fields keep their values. Does nothing when already idle.
    pub fn reset(&mut self) {
        if self.state == SubmissionState::Idle {
            return;
        }
        tracing::debug!(state = %self.state, "Resetting form");
        self.transition(SubmissionState::Idle);
        self.restore_control();
    }

    /// Validate, deliver through `operation`, and settle.
    ///
    /// Dropping the returned future before the operation settles resets the
    /// form to `Idle`.
    pub async fn submit<O: SubmitOperation>(&mut self, operation: &O) -> SubmitOutcome {
        let payload = match self.request_submit() {
            SubmitRequest::Ignored => return SubmitOutcome::Ignored,
            SubmitRequest::Rejected(errors) => return SubmitOutcome::Invalid(errors),
            SubmitRequest::Ready(payload) => payload,
        };

        let guard = InFlight { form: self };
        match operation.submit(payload).await {
            Ok(()) => {
                guard.form.complete(Ok(()));
                SubmitOutcome::Delivered
            }
            Err(err) => {
                guard.form.complete(Err(err.clone()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!(from = %self.state, to = %next, "Form state transition");
        self.state = next;
        self.events.push(FormEvent::Phase { state: next });
    }

    fn restore_control(&mut self) {
        self.events.push(FormEvent::Control {
            control: SubmitControl {
                enabled: true,
                label: self.labels.idle.clone(),
            },
        });
    }

    fn clear_fields(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            self.events.push(FormEvent::FieldValue {
                field: field.name.clone(),
                value: String::new(),
            });
        }
    }
}

/// Resets the form if a submission is dropped mid-flight.
struct InFlight<'a> {
    form: &'a mut FormController,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.form.state == SubmissionState::Submitting {
            tracing::warn!("Submission dropped before it settled");
            self.form.reset();
        }
    }
}
