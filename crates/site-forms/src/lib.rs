//! Contact form validation and submission.
//!
//! This crate owns the behavior behind the site's contact form:
//!
//! - `field` - field kinds, field state and validation verdicts
//! - `validate` - per-field rules and the whole-form check run at submit time
//! - `phone` - live formatting of phone inputs
//! - `controller` - the submission state machine around an injected async
//!   [`SubmitOperation`]
//! - `notify` - the toast notifications the form raises
//! - `error` - submission errors with user-facing messages
//!
//! The controller never touches the page. It records [`FormEvent`]s which the
//! host drains and applies (field error styling, button state, toasts).

mod controller;
mod error;
mod field;
mod notify;
mod phone;
mod validate;

pub use controller::{
    FormController, FormEvent, FormPayload, SubmissionState, SubmitControl, SubmitLabels,
    SubmitOperation, SubmitOutcome, SubmitRequest,
};
pub use error::SubmitError;
pub use field::{FieldKind, FieldSpec, ValidationResult};
pub use notify::{Notification, NotificationKind};
pub use phone::{digits_only, format_phone};
pub use validate::{FieldError, validate, validate_form};
