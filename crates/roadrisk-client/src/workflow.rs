//! Risk submission workflow
//!
//! Owns one form and the outcome of its latest submission, and drives a
//! [`RiskScorer`] through the cycle
//! `Idle → Submitting → {Succeeded, Failed} → Idle`.
//!
//! `submit` borrows the workflow mutably, so a second submission cannot start
//! while one is in flight. Incomplete forms are rejected before the scorer is
//! contacted.

use roadrisk_domain::{
    normalize, Assessment, FormError, FormField, FormInput, InvalidInputError, RiskScorer,
};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Where the workflow is in its submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Editing; nothing in flight
    Idle,
    /// A request is in flight
    Submitting,
    /// The latest submission produced an assessment
    Succeeded,
    /// The latest submission failed
    Failed,
}

impl SubmissionState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }
}

/// Why a submission produced no assessment
#[derive(Debug, Error)]
pub enum WorkflowError<E> {
    /// Some fields are empty; nothing was sent
    #[error("Please fill in all fields (missing: {})", join_fields(.missing))]
    Incomplete {
        /// Empty fields in declaration order
        missing: Vec<FormField>,
    },

    /// A field failed normalization; nothing was sent
    #[error("{0}")]
    InvalidInput(InvalidInputError),

    /// The scorer failed
    #[error("{0}")]
    Scoring(E),
}

impl<E: fmt::Display> WorkflowError<E> {
    /// The single message shown to the user for this failure
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

fn join_fields(fields: &[FormField]) -> String {
    fields.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
}

/// One form, one scorer, and the outcome of the latest submission
pub struct RiskWorkflow<S> {
    scorer: S,
    form: FormInput,
    state: SubmissionState,
    assessment: Option<Assessment>,
    last_error: Option<String>,
}

impl<S: RiskScorer> RiskWorkflow<S> {
    /// Start a workflow with an empty form
    pub fn new(scorer: S) -> Self {
        Self::with_form(scorer, FormInput::new())
    }

    /// Start a workflow with a prepared form
    pub fn with_form(scorer: S, form: FormInput) -> Self {
        Self {
            scorer,
            form,
            state: SubmissionState::Idle,
            assessment: None,
            last_error: None,
        }
    }

    /// The form being edited
    pub fn form(&self) -> &FormInput {
        &self.form
    }

    /// The scorer
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Current state
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Assessment of the latest successful submission
    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    /// Message of the latest failed submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True iff every field holds a value
    pub fn is_complete(&self) -> bool {
        self.form.is_complete()
    }

    /// True iff a submission would contact the scorer
    pub fn can_submit(&self) -> bool {
        self.is_complete() && self.state != SubmissionState::Submitting
    }

    /// Replace one field's raw value
    pub fn set_field(&mut self, field: FormField, raw: impl Into<String>) {
        self.form.set_field(field, raw);
        self.after_edit();
    }

    /// Replace a field's raw value by name
    pub fn set_named(&mut self, name: &str, raw: impl Into<String>) -> Result<FormField, FormError> {
        let field = self.form.set_named(name, raw)?;
        self.after_edit();
        Ok(field)
    }

    /// Apply `delta` to a counter field
    pub fn adjust_counter(&mut self, field: FormField, delta: i64) -> Result<u32, FormError> {
        let value = self.form.adjust_counter(field, delta)?;
        self.after_edit();
        Ok(value)
    }

    /// Apply `delta` to a counter field looked up by name
    pub fn adjust_named(&mut self, name: &str, delta: i64) -> Result<u32, FormError> {
        let value = self.form.adjust_named(name, delta)?;
        self.after_edit();
        Ok(value)
    }

    /// Empty one field
    pub fn clear_field(&mut self, field: FormField) {
        self.form.clear(field);
        self.after_edit();
    }

    /// Replace the whole form
    pub fn replace_form(&mut self, form: FormInput) {
        self.form = form;
        self.after_edit();
    }

    /// Normalize the form and score it
    ///
    /// Clears the previous assessment and error before the request is sent.
    /// Exactly one of assessment or error is recorded afterwards, and the
    /// workflow is ready for another submission either way.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::Incomplete`] if any field is empty; the scorer is not called
    ///   and the previous outcome is kept
    /// - [`WorkflowError::InvalidInput`] if a value fails normalization; the scorer is not called
    /// - [`WorkflowError::Scoring`] if the scorer fails
    pub async fn submit(&mut self) -> Result<Assessment, WorkflowError<S::Error>> {
        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            debug!(missing = missing.len(), "Submission rejected: form incomplete");
            return Err(WorkflowError::Incomplete { missing });
        }

        self.assessment = None;
        self.last_error = None;

        let request = match normalize(&self.form) {
            Ok(request) => request,
            Err(e) => {
                warn!(field = e.field.as_str(), "Submission rejected: {}", e);
                self.fail(e.to_string());
                return Err(WorkflowError::InvalidInput(e));
            }
        };

        self.state = SubmissionState::Submitting;
        match self.scorer.score(&request).await {
            Ok(result) => {
                let assessment = Assessment::new(request, result);
                self.assessment = Some(assessment.clone());
                self.state = SubmissionState::Succeeded;
                Ok(assessment)
            }
            Err(e) => {
                self.fail(e.to_string());
                Err(WorkflowError::Scoring(e))
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.last_error = Some(message);
        self.state = SubmissionState::Failed;
    }

    // A dropped submit future can leave `Submitting` behind; editing clears it.
    fn after_edit(&mut self) {
        self.state = SubmissionState::Idle;
    }
}
