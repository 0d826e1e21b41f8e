mod navigation;
mod task_runtime;

use crate::core::submission::FormKind;
use crate::session::SessionStore;
use crate::state::form::Notice;
use crate::state::form_view::FormView;
use crate::state::screen::Screen;
use crate::task::TaskInvocation;
use crate::widgets::inputs::Button;
use crate::widgets::layout::welcome_button;
use std::sync::Arc;

struct Forms {
    register: FormView,
    preferences: FormView,
}

#[derive(Default)]
struct RuntimeState {
    pending_task_invocations: Vec<TaskInvocation>,
}

pub struct AppState {
    screen: Screen,
    welcome: Button,
    forms: Forms,
    alert: Option<Notice>,
    session: Arc<dyn SessionStore>,
    runtime: RuntimeState,
    should_exit: bool,
}

impl AppState {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            screen: Screen::Welcome,
            welcome: welcome_button(),
            forms: Forms {
                register: FormView::new(FormKind::Registration),
                preferences: FormView::new(FormKind::Preference),
            },
            alert: None,
            session,
            runtime: RuntimeState::default(),
            should_exit: false,
        }
    }

    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screen = screen;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn welcome(&self) -> &Button {
        &self.welcome
    }

    pub fn view(&self, kind: FormKind) -> &FormView {
        match kind {
            FormKind::Registration => &self.forms.register,
            FormKind::Preference => &self.forms.preferences,
        }
    }

    pub(crate) fn view_mut(&mut self, kind: FormKind) -> &mut FormView {
        match kind {
            FormKind::Registration => &mut self.forms.register,
            FormKind::Preference => &mut self.forms.preferences,
        }
    }

    /// Form shown on the current screen, if any.
    pub fn active_form(&self) -> Option<FormKind> {
        match self.screen {
            Screen::Welcome => None,
            Screen::Register => Some(FormKind::Registration),
            Screen::Preferences => Some(FormKind::Preference),
        }
    }

    pub fn alert(&self) -> Option<&Notice> {
        self.alert.as_ref()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }
}
