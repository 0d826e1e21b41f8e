use crate::core::form_state::FormState;
use crate::core::value::Value;
use crate::error::TransportError;
use crate::net::HttpResponse;
use crate::task::RunState;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Registration,
    Preference,
}

impl FormKind {
    pub fn profile(self) -> &'static SubmitProfile {
        match self {
            Self::Registration => &REGISTRATION,
            Self::Preference => &PREFERENCE,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration => f.write_str("registration"),
            Self::Preference => f.write_str("preference"),
        }
    }
}

/// Where an outcome is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStyle {
    /// Banner under the still-populated form.
    Inline,
    /// Modal notice the user dismisses.
    Alert,
}

/// Per-form endpoint and outcome wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitProfile {
    pub path: &'static str,
    pub submit_label: &'static str,
    pub success_message: &'static str,
    pub failure_fallback: &'static str,
    pub failure_prefix: Option<&'static str>,
    pub transport_message: &'static str,
    pub reset_on_success: bool,
    pub notice_style: NoticeStyle,
}

pub const SUBMITTING_LABEL: &str = "Submitting...";

pub static REGISTRATION: SubmitProfile = SubmitProfile {
    path: "/users",
    submit_label: "Register",
    success_message: "Registration successful!",
    failure_fallback: "Registration failed",
    failure_prefix: None,
    transport_message: "An error occurred. Please try again.",
    reset_on_success: false,
    notice_style: NoticeStyle::Inline,
};

pub static PREFERENCE: SubmitProfile = SubmitProfile {
    path: "/preference",
    submit_label: "Submit Preferences",
    success_message: "Preferences submitted successfully!",
    failure_fallback: "Failed to submit preferences.",
    failure_prefix: Some("Error: "),
    transport_message: "Failed to submit preferences.",
    reset_on_success: true,
    notice_style: NoticeStyle::Alert,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(String),
    Failure(String),
}

impl SubmissionOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message.as_str(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl SubmitProfile {
    /// Maps a finished round-trip to the user-visible outcome.
    ///
    /// Any 2xx is a success whatever the body. Otherwise the body's `message`
    /// field is used when it is a non-empty string.
    pub fn interpret(&self, result: &Result<HttpResponse, TransportError>) -> SubmissionOutcome {
        match result {
            Ok(response) if response.is_success() => {
                SubmissionOutcome::Success(self.success_message.to_string())
            }
            Ok(response) => {
                let message = response
                    .server_message()
                    .unwrap_or_else(|| self.failure_fallback.to_string());
                match self.failure_prefix {
                    Some(prefix) => SubmissionOutcome::Failure(format!("{prefix}{message}")),
                    None => SubmissionOutcome::Failure(message),
                }
            }
            Err(_) => SubmissionOutcome::Failure(self.transport_message.to_string()),
        }
    }
}

/// Form fields followed by `extras`, merged at the top level. Nothing is
/// renamed or dropped; an extra with a form field's name replaces it.
pub fn request_body<I>(form: &FormState, extras: I) -> serde_json::Value
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut body = form.to_json();
    for (key, value) in extras {
        body.insert(key, value.to_json());
    }
    serde_json::Value::Object(body)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Submit state machine of one form instance.
///
/// `Idle -> Submitting -> {Succeeded, Failed}`; `begin` from any state but
/// `Submitting` starts a new attempt, `reset` returns to `Idle`.
#[derive(Debug, Clone, Default)]
pub struct SubmissionController {
    phase: SubmissionPhase,
    outcome: Option<SubmissionOutcome>,
    runs: RunState,
    pending_run: Option<u64>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn in_flight(&self) -> usize {
        self.runs.running_count()
    }

    /// Starts an attempt and returns its run id, or `None` while one is
    /// already in flight.
    pub fn begin(&mut self) -> Option<u64> {
        if self.is_loading() {
            return None;
        }
        let run_id = self.runs.next_run_id();
        self.runs.on_started();
        self.pending_run = Some(run_id);
        self.phase = SubmissionPhase::Submitting;
        self.outcome = None;
        Some(run_id)
    }

    /// Records the outcome of `run_id`. Returns `false` for a run that is not
    /// the pending one.
    pub fn complete(&mut self, run_id: u64, outcome: SubmissionOutcome) -> bool {
        if self.pending_run != Some(run_id) {
            return false;
        }
        self.runs.on_finished();
        self.pending_run = None;
        self.phase = if outcome.is_success() {
            SubmissionPhase::Succeeded
        } else {
            SubmissionPhase::Failed
        };
        self.outcome = Some(outcome);
        true
    }

    /// Back to `Idle`. A response still in flight is discarded when it lands.
    pub fn reset(&mut self) {
        if self.pending_run.take().is_some() {
            self.runs.on_finished();
        }
        self.phase = SubmissionPhase::Idle;
        self.outcome = None;
    }

    pub fn button_label(&self, profile: &SubmitProfile) -> &'static str {
        if self.is_loading() {
            SUBMITTING_LABEL
        } else {
            profile.submit_label
        }
    }
}
