use crate::core::form_state::{FieldChange, FormState};
use crate::core::geolocation::{Coordinates, GeolocationError, LocationCapture};
use crate::core::schema::FormSchema;
use crate::core::submission::{
    FormKind, NoticeStyle, SubmissionController, SubmissionOutcome, request_body,
};
use crate::core::value::Value;
use crate::error::{FormError, TransportError};
use crate::net::HttpResponse;
use crate::session::{SessionStore, USER_ID_KEY};
use crate::task::{RunState, TaskInvocation};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Failure,
}

/// A message that must reach the user right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub tone: NoticeTone,
}

impl Notice {
    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: NoticeTone::Failure,
        }
    }
}

impl From<&SubmissionOutcome> for Notice {
    fn from(outcome: &SubmissionOutcome) -> Self {
        Self {
            text: outcome.message().to_string(),
            tone: if outcome.is_success() {
                NoticeTone::Success
            } else {
                NoticeTone::Failure
            },
        }
    }
}

/// One mounted form: its values, derived location and submit state.
pub struct FormInstance {
    kind: FormKind,
    initial: FormState,
    state: FormState,
    location: Option<LocationCapture>,
    locate_runs: RunState,
    pending_locate: Option<u64>,
    submission: SubmissionController,
}

impl FormInstance {
    pub fn new(kind: FormKind) -> Self {
        let (schema, location) = match kind {
            FormKind::Registration => (FormSchema::registration(), Some(LocationCapture::default())),
            FormKind::Preference => (FormSchema::preference(), None),
        };
        let initial = FormState::from_schema(schema);
        Self {
            kind,
            state: initial.clone(),
            initial,
            location,
            locate_runs: RunState::default(),
            pending_locate: None,
            submission: SubmissionController::new(),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn initial(&self) -> &FormState {
        &self.initial
    }

    pub fn location(&self) -> Option<&LocationCapture> {
        self.location.as_ref()
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn is_locating(&self) -> bool {
        self.pending_locate.is_some()
    }

    pub fn apply(&mut self, change: FieldChange) -> Result<(), FormError> {
        self.state = self.state.apply(change)?;
        Ok(())
    }

    pub fn toggle(&mut self, field: &str, item: &str) -> Result<(), FormError> {
        self.state = self.state.toggle_item(field, item)?;
        Ok(())
    }

    pub fn select_tri_state(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        self.state = self.state.select_tri_state(field, raw)?;
        Ok(())
    }

    /// Asks for the device position once. `None` when this form has no
    /// location or a request is already pending.
    pub fn begin_locate(&mut self) -> Option<TaskInvocation> {
        if self.location.is_none() || self.pending_locate.is_some() {
            return None;
        }
        let run_id = self.locate_runs.next_run_id();
        self.locate_runs.on_started();
        self.pending_locate = Some(run_id);
        Some(TaskInvocation::locate(self.kind, run_id))
    }

    /// On success the capture is replaced whole; on failure nothing changes
    /// and the returned notice describes why.
    pub fn on_located(
        &mut self,
        run_id: u64,
        result: Result<Coordinates, GeolocationError>,
    ) -> Option<Notice> {
        if self.pending_locate != Some(run_id) {
            debug!(form = %self.kind, run_id, "dropping stale location result");
            return None;
        }
        self.pending_locate = None;
        self.locate_runs.on_finished();

        match result {
            Ok(coordinates) => {
                self.location = Some(LocationCapture::captured(coordinates));
                None
            }
            Err(err) => Some(Notice::failure(err.notice())),
        }
    }

    /// Starts a submission. `None` while one is already in flight.
    pub fn begin_submit(&mut self, session: &dyn SessionStore) -> Option<TaskInvocation> {
        let run_id = self.submission.begin()?;
        let body = request_body(&self.state, self.extras(session));
        let path = self.kind.profile().path;
        info!(form = %self.kind, run_id, path, in_flight = self.submission.in_flight(), "submitting");
        Some(TaskInvocation::submit(self.kind, run_id, path, body))
    }

    pub fn on_submitted(
        &mut self,
        run_id: u64,
        result: Result<HttpResponse, TransportError>,
    ) -> Option<Notice> {
        let profile = self.kind.profile();
        let outcome = profile.interpret(&result);
        let success = outcome.is_success();
        let notice = Notice::from(&outcome);
        if !self.submission.complete(run_id, outcome) {
            debug!(form = %self.kind, run_id, "dropping stale submission result");
            return None;
        }
        info!(form = %self.kind, run_id, success, "submission finished");

        if success && profile.reset_on_success {
            self.reset_fields();
        }
        match profile.notice_style {
            NoticeStyle::Alert => Some(notice),
            NoticeStyle::Inline => None,
        }
    }

    /// Clears the submit outcome and loading flag; field values stay.
    pub fn reset_submission(&mut self) {
        self.submission.reset();
    }

    fn reset_fields(&mut self) {
        self.state = self.state.reset_to(&self.initial);
        if self.location.is_some() {
            self.location = Some(LocationCapture::default());
        }
    }

    fn extras(&self, session: &dyn SessionStore) -> Vec<(String, Value)> {
        match self.kind {
            FormKind::Registration => {
                let capture = self.location.clone().unwrap_or_default();
                vec![
                    ("latitude".to_string(), capture.latitude()),
                    ("longitude".to_string(), capture.longitude()),
                ]
            }
            FormKind::Preference => {
                let user_id = session.get(USER_ID_KEY).map(Value::Text).unwrap_or_default();
                vec![(USER_ID_KEY.to_string(), user_id)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FormInstance, NoticeTone};
    use crate::core::form_state::FieldChange;
    use crate::core::geolocation::{Coordinates, GeolocationError};
    use crate::core::submission::{FormKind, SubmissionOutcome};
    use crate::core::value::Value;
    use crate::session::MemorySessionStore;
    use crate::task::execution::testing::{ScriptedTransport, capabilities};
    use crate::task::{TaskResult, execute_invocation};

    fn submit_through(
        form: &mut FormInstance,
        transport: std::sync::Arc<ScriptedTransport>,
        session: &MemorySessionStore,
    ) -> Option<super::Notice> {
        let caps = capabilities(transport, Err(GeolocationError::Unsupported));
        let invocation = form.begin_submit(session).expect("submission should start");
        let completion = execute_invocation(invocation, &caps);
        let TaskResult::Submitted(result) = completion.result else {
            panic!("expected a submission result");
        };
        form.on_submitted(completion.run_id, result)
    }

    fn filled_preferences() -> FormInstance {
        let mut form = FormInstance::new(FormKind::Preference);
        form.apply(FieldChange::text("age_min", "30")).expect("apply");
        form.apply(FieldChange::text("age_max", "25")).expect("apply");
        form.toggle("preferred_hobbies", "Music").expect("toggle");
        form.select_tri_state("smoking_preference", "false")
            .expect("select");
        form
    }

    #[test]
    fn registration_created_shows_inline_success() {
        let mut form = FormInstance::new(FormKind::Registration);
        form.apply(FieldChange::text("username", "kasia")).expect("apply");
        let transport = ScriptedTransport::replying(201, r#"{"id":1}"#);

        let notice = submit_through(&mut form, transport.clone(), &MemorySessionStore::new());

        assert_eq!(notice, None);
        assert_eq!(
            form.submission().outcome(),
            Some(&SubmissionOutcome::Success(
                "Registration successful!".to_string()
            ))
        );
        assert!(!form.submission().is_loading());
        assert_eq!(form.state().get("username"), Some(&Value::from("kasia")));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn registration_body_carries_coordinates() {
        let mut form = FormInstance::new(FormKind::Registration);
        let invocation = form.begin_locate().expect("locate");
        form.on_located(invocation.run_id, Ok(Coordinates::new(12.34, 56.78)));
        let transport = ScriptedTransport::replying(201, "{}");

        submit_through(&mut form, transport.clone(), &MemorySessionStore::new());

        let body = transport.last_body().expect("body sent");
        assert_eq!(body["latitude"], serde_json::json!(12.34));
        assert_eq!(body["longitude"], serde_json::json!(56.78));
        assert_eq!(body["bio"], serde_json::json!(""));
        assert!(body.get("location").is_none());
    }

    #[test]
    fn registration_without_location_sends_nulls() {
        let mut form = FormInstance::new(FormKind::Registration);
        let transport = ScriptedTransport::replying(201, "{}");
        submit_through(&mut form, transport.clone(), &MemorySessionStore::new());
        let body = transport.last_body().expect("body sent");
        assert_eq!(body["latitude"], serde_json::Value::Null);
        assert_eq!(body["longitude"], serde_json::Value::Null);
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut form = FormInstance::new(FormKind::Registration);
        let session = MemorySessionStore::new();
        let first = form.begin_submit(&session);
        assert!(first.is_some());
        assert!(form.begin_submit(&session).is_none());
        assert_eq!(form.submission().in_flight(), 1);
        assert!(form.submission().is_loading());
    }

    #[test]
    fn transport_failure_keeps_fields() {
        let mut form = FormInstance::new(FormKind::Registration);
        form.apply(FieldChange::text("email", "a@b.c")).expect("apply");
        submit_through(
            &mut form,
            ScriptedTransport::unreachable(),
            &MemorySessionStore::new(),
        );
        assert_eq!(
            form.submission().outcome(),
            Some(&SubmissionOutcome::Failure(
                "An error occurred. Please try again.".to_string()
            ))
        );
        assert_eq!(form.state().get("email"), Some(&Value::from("a@b.c")));
        assert!(!form.submission().is_loading());
    }

    #[test]
    fn preference_rejection_alerts_and_keeps_state() {
        let mut form = filled_preferences();
        let before = form.state().clone();
        let transport =
            ScriptedTransport::replying(400, r#"{"message":"age_min must be <= age_max"}"#);

        let notice = submit_through(&mut form, transport, &MemorySessionStore::new())
            .expect("alert notice");

        assert_eq!(notice.text, "Error: age_min must be <= age_max");
        assert_eq!(notice.tone, NoticeTone::Failure);
        assert_eq!(form.state(), &before);
    }

    #[test]
    fn preference_success_resets_to_defaults() {
        let mut form = filled_preferences();
        let session = MemorySessionStore::new().with("user_id", "42");
        let transport = ScriptedTransport::replying(200, "anything");

        let notice = submit_through(&mut form, transport.clone(), &session).expect("alert");

        assert_eq!(notice.tone, NoticeTone::Success);
        assert_eq!(form.state(), form.initial());
        assert_eq!(form.state().get("preferred_hobbies"), Some(&Value::List(Vec::new())));
        assert_eq!(form.state().get("age_min"), Some(&Value::from("")));
        assert_eq!(form.state().get("smoking_preference"), Some(&Value::None));
        let body = transport.last_body().expect("body");
        assert_eq!(body["user_id"], serde_json::json!("42"));
        assert_eq!(body["preferred_hobbies"], serde_json::json!(["Music"]));
        assert_eq!(body["smoking_preference"], serde_json::json!(false));
    }

    #[test]
    fn preference_without_session_sends_null_user() {
        let mut form = FormInstance::new(FormKind::Preference);
        let transport = ScriptedTransport::replying(200, "{}");
        submit_through(&mut form, transport.clone(), &MemorySessionStore::new());
        let body = transport.last_body().expect("body");
        assert_eq!(body["user_id"], serde_json::Value::Null);
    }

    #[test]
    fn location_success_updates_capture_at_once() {
        let mut form = FormInstance::new(FormKind::Registration);
        let invocation = form.begin_locate().expect("locate");
        assert!(form.begin_locate().is_none());

        let notice = form.on_located(invocation.run_id, Ok(Coordinates::new(12.34, 56.78)));

        assert_eq!(notice, None);
        let capture = form.location().expect("capture");
        assert_eq!(capture.coordinates(), Some(Coordinates::new(12.34, 56.78)));
        assert_eq!(capture.display(), "12.34, 56.78");
        assert!(!form.is_locating());
    }

    #[test]
    fn location_failure_leaves_previous_capture() {
        let mut form = FormInstance::new(FormKind::Registration);
        let first = form.begin_locate().expect("locate");
        form.on_located(first.run_id, Ok(Coordinates::new(1.0, 2.0)));
        let before = form.location().cloned();

        let second = form.begin_locate().expect("locate again");
        let notice = form
            .on_located(
                second.run_id,
                Err(GeolocationError::Failed("denied".to_string())),
            )
            .expect("notice");

        assert!(!notice.text.is_empty());
        assert_eq!(form.location().cloned(), before);
    }

    #[test]
    fn unsupported_location_has_its_own_notice() {
        let mut form = FormInstance::new(FormKind::Registration);
        let run = form.begin_locate().expect("locate").run_id;
        let unsupported = form
            .on_located(run, Err(GeolocationError::Unsupported))
            .expect("notice");
        let run = form.begin_locate().expect("locate").run_id;
        let failed = form
            .on_located(run, Err(GeolocationError::Failed("timeout".to_string())))
            .expect("notice");
        assert_ne!(unsupported.text, failed.text);
        assert!(form.location().is_some_and(|capture| capture.coordinates().is_none()));
    }

    #[test]
    fn preference_form_has_no_location() {
        let mut form = FormInstance::new(FormKind::Preference);
        assert!(form.begin_locate().is_none());
    }

    #[test]
    fn outcome_survives_field_edits() {
        let mut form = FormInstance::new(FormKind::Registration);
        submit_through(
            &mut form,
            ScriptedTransport::replying(409, r#"{"message":"taken"}"#),
            &MemorySessionStore::new(),
        );
        form.apply(FieldChange::text("username", "other")).expect("apply");
        assert_eq!(
            form.submission().outcome(),
            Some(&SubmissionOutcome::Failure("taken".to_string()))
        );
        form.reset_submission();
        assert_eq!(form.submission().outcome(), None);
    }
}
