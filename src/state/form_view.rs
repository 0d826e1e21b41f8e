use crate::core::submission::FormKind;
use crate::core::value::Value;
use crate::state::focus::FocusState;
use crate::state::form::FormInstance;
use crate::terminal::KeyEvent;
use crate::widgets::layout::{LOCATION_BUTTON_ID, SUBMIT_BUTTON_ID, form_widgets};
use crate::widgets::traits::{InteractionResult, RenderContext, Widget};

/// A form instance together with the widgets that edit it.
pub struct FormView {
    form: FormInstance,
    widgets: Vec<Box<dyn Widget>>,
    focus: FocusState,
    reveal_required: bool,
}

impl FormView {
    pub fn new(kind: FormKind) -> Self {
        let form = FormInstance::new(kind);
        let widgets = form_widgets(kind, form.state().schema());
        let focus = FocusState::from_ids(widgets.iter().map(|widget| widget.id().to_string()));
        Self {
            form,
            widgets,
            focus,
            reveal_required: false,
        }
    }

    pub fn form(&self) -> &FormInstance {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormInstance {
        &mut self.form
    }

    pub fn widgets(&self) -> &[Box<dyn Widget>] {
        self.widgets.as_slice()
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.current_id()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus.current_index()
    }

    pub fn focus_next(&mut self) {
        self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus.prev();
    }

    pub fn focus(&mut self, id: &str) {
        self.focus.set_focus_by_id(id);
    }

    /// Required markers stay hidden until the first submit attempt.
    pub fn reveal_required(&mut self) {
        self.reveal_required = true;
    }

    pub fn dispatch_key(&mut self, key: KeyEvent) -> InteractionResult {
        let Some(index) = self.focus.current_index() else {
            return InteractionResult::ignored();
        };
        let Some(widget) = self.widgets.get(index) else {
            return InteractionResult::ignored();
        };
        let value = self.bound_value(widget.id());
        match self.widgets.get_mut(index) {
            Some(widget) => widget.on_key(key, &value),
            None => InteractionResult::ignored(),
        }
    }

    /// Value a widget draws: the field value, or the location display
    /// next to the location button.
    pub fn bound_value(&self, widget_id: &str) -> Value {
        if widget_id == LOCATION_BUTTON_ID {
            return self
                .form
                .location()
                .map(|capture| Value::Text(capture.display().to_string()))
                .unwrap_or_default();
        }
        self.form.state().get(widget_id).cloned().unwrap_or_default()
    }

    pub fn is_busy(&self, widget_id: &str) -> bool {
        match widget_id {
            LOCATION_BUTTON_ID => self.form.is_locating(),
            SUBMIT_BUTTON_ID => self.form.submission().is_loading(),
            _ => false,
        }
    }

    pub fn render_context<'a>(&self, widget_id: &str, value: &'a Value) -> RenderContext<'a> {
        RenderContext {
            focused: self.focus.current_id() == Some(widget_id),
            value,
            reveal_required: self.reveal_required,
            busy: self.is_busy(widget_id),
        }
    }
}
