use super::AppState;
use crate::core::submission::FormKind;
use crate::error::FormError;
use crate::state::screen::Screen;
use crate::terminal::KeyEvent;
use crate::widgets::traits::{InteractionResult, Interactive, WidgetAction};
use tracing::{debug, warn};

impl AppState {
    pub fn focus_next(&mut self) {
        if self.alert.is_some() {
            return;
        }
        if let Some(kind) = self.active_form() {
            self.view_mut(kind).focus_next();
        }
    }

    pub fn focus_prev(&mut self) {
        if self.alert.is_some() {
            return;
        }
        if let Some(kind) = self.active_form() {
            self.view_mut(kind).focus_prev();
        }
    }

    /// Moves to the following screen. Form state of the screen left behind
    /// is kept.
    pub fn next_screen(&mut self) -> bool {
        if self.alert.is_some() {
            return false;
        }
        self.screen = self.screen.next();
        debug!(screen = %self.screen, "screen changed");
        true
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    /// Closes the open alert, or else clears a settled submit outcome on the
    /// current form. A submission still in flight is left alone.
    pub fn dismiss(&mut self) -> bool {
        if self.dismiss_alert() {
            return true;
        }
        let Some(kind) = self.active_form() else {
            return false;
        };
        let form = self.view_mut(kind).form_mut();
        if form.submission().is_loading() || form.submission().outcome().is_none() {
            return false;
        }
        form.reset_submission();
        true
    }

    /// Sends `key` to the focused widget and applies whatever it emits.
    /// Swallowed while an alert is open.
    pub fn dispatch_key_to_focused(&mut self, key: KeyEvent) -> InteractionResult {
        if self.alert.is_some() {
            return InteractionResult::ignored();
        }
        let result = match self.active_form() {
            None => self.welcome.on_key(key, &Default::default()),
            Some(kind) => self.view_mut(kind).dispatch_key(key),
        };
        for action in result.actions.iter().cloned() {
            self.handle_widget_action(action);
        }
        result
    }

    fn handle_widget_action(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::Continue => {
                self.screen = Screen::Register;
            }
            WidgetAction::InputDone => self.focus_next(),
            other => {
                let Some(kind) = self.active_form() else {
                    return;
                };
                if let Err(err) = self.apply_form_action(kind, other) {
                    warn!(form = %kind, error = %err, "rejected field change");
                }
            }
        }
    }

    fn apply_form_action(&mut self, kind: FormKind, action: WidgetAction) -> Result<(), FormError> {
        match action {
            WidgetAction::Change(change) => self.view_mut(kind).form_mut().apply(change),
            WidgetAction::SelectTriState { field, raw } => self
                .view_mut(kind)
                .form_mut()
                .select_tri_state(field.as_str(), raw.as_str()),
            WidgetAction::Toggle { field, item } => self
                .view_mut(kind)
                .form_mut()
                .toggle(field.as_str(), item.as_str()),
            WidgetAction::Locate => {
                if let Some(invocation) = self.view_mut(kind).form_mut().begin_locate() {
                    self.runtime.pending_task_invocations.push(invocation);
                }
                Ok(())
            }
            WidgetAction::Submit => {
                let session = self.session.clone();
                let view = self.view_mut(kind);
                view.reveal_required();
                if let Some(invocation) = view.form_mut().begin_submit(session.as_ref()) {
                    self.runtime.pending_task_invocations.push(invocation);
                }
                Ok(())
            }
            WidgetAction::Continue | WidgetAction::InputDone => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::submission::FormKind;
    use crate::core::value::Value;
    use crate::net::HttpResponse;
    use crate::session::MemorySessionStore;
    use crate::state::app_state::AppState;
    use crate::state::form::Notice;
    use crate::state::screen::Screen;
    use crate::terminal::{KeyCode, KeyEvent};
    use std::sync::Arc;

    fn app() -> AppState {
        AppState::new(Arc::new(MemorySessionStore::new()))
    }

    fn press(state: &mut AppState, code: KeyCode) {
        state.dispatch_key_to_focused(KeyEvent::plain(code));
    }

    #[test]
    fn continue_leads_from_welcome_to_register() {
        let mut state = app();
        assert_eq!(state.screen(), Screen::Welcome);
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.screen(), Screen::Register);
    }

    #[test]
    fn typed_text_lands_in_focused_field() {
        let mut state = app().with_screen(Screen::Register);
        for ch in "kasia".chars() {
            press(&mut state, KeyCode::Char(ch));
        }
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Char('k'));

        let form = state.view(FormKind::Registration).form().state();
        assert_eq!(form.get("username"), Some(&Value::from("kasia")));
        assert_eq!(form.get("email"), Some(&Value::from("k")));
    }

    #[test]
    fn submit_queues_one_invocation_and_reveals_required() {
        let mut state = app().with_screen(Screen::Preferences);
        state
            .view_mut(FormKind::Preference)
            .focus("submit");
        press(&mut state, KeyCode::Enter);
        press(&mut state, KeyCode::Enter);

        let invocations = state.take_pending_task_invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].form, FormKind::Preference);
        let view = state.view(FormKind::Preference);
        let empty = Value::from("");
        assert!(view.render_context("age_min", &empty).reveal_required);
        assert!(view.form().submission().is_loading());
    }

    #[test]
    fn alert_blocks_input_until_dismissed() {
        let mut state = app().with_screen(Screen::Register);
        state.alert = Some(Notice::failure("Unable to retrieve location. Please allow location access."));

        press(&mut state, KeyCode::Char('x'));
        assert!(!state.next_screen());
        assert_eq!(
            state.view(FormKind::Registration).form().state().get("username"),
            Some(&Value::from(""))
        );

        assert!(state.dismiss_alert());
        assert!(!state.dismiss_alert());
        press(&mut state, KeyCode::Char('x'));
        assert_eq!(
            state.view(FormKind::Registration).form().state().get("username"),
            Some(&Value::from("x"))
        );
    }

    #[test]
    fn dismiss_clears_settled_registration_outcome() {
        let mut state = app().with_screen(Screen::Register);
        assert!(!state.dismiss());

        state.view_mut(FormKind::Registration).focus("submit");
        press(&mut state, KeyCode::Enter);
        let run_id = state.take_pending_task_invocations()[0].run_id;
        assert!(!state.dismiss());

        state
            .view_mut(FormKind::Registration)
            .form_mut()
            .on_submitted(run_id, Ok(HttpResponse::new(409, r#"{"message":"Username taken"}"#)));
        assert!(state.dismiss());

        let form = state.view(FormKind::Registration).form();
        assert_eq!(form.submission().outcome(), None);
        assert!(!form.submission().is_loading());
        assert!(!state.dismiss());
    }

    #[test]
    fn screens_keep_their_form_state() {
        let mut state = app().with_screen(Screen::Register);
        press(&mut state, KeyCode::Char('a'));
        assert!(state.next_screen());
        assert!(state.next_screen());
        assert!(state.next_screen());
        assert_eq!(state.screen(), Screen::Register);
        assert_eq!(
            state.view(FormKind::Registration).form().state().get("username"),
            Some(&Value::from("a"))
        );
    }
}
