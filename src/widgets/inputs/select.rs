use crate::core::form_state::FieldChange;
use crate::core::schema::FieldSpec;
use crate::core::tri_state::{TRI_STATE_OPTIONS, tri_state_label};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::Style;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
    focus_prefix, label_line, required_line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectMode {
    /// Emits the chosen option as text.
    Choice,
    /// Emits `""`/`"true"`/`"false"` for the tri-state adapter.
    TriState,
}

/// Left/Right cycles through the options; the empty option shows the
/// placeholder.
pub struct SelectInput {
    id: String,
    label: String,
    placeholder: String,
    required: bool,
    options: Vec<String>,
    mode: SelectMode,
}

impl SelectInput {
    pub fn choice(spec: &FieldSpec) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            placeholder: spec.placeholder.clone(),
            required: spec.required,
            options: spec.kind.options().to_vec(),
            mode: SelectMode::Choice,
        }
    }

    pub fn tri_state(spec: &FieldSpec) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            placeholder: spec.placeholder.clone(),
            required: spec.required,
            options: TRI_STATE_OPTIONS.iter().map(|o| o.to_string()).collect(),
            mode: SelectMode::TriState,
        }
    }

    fn raw_of<'a>(&self, value: &'a Value) -> &'a str {
        match self.mode {
            SelectMode::Choice => value.as_text().unwrap_or_default(),
            SelectMode::TriState => tri_state_label(value.as_bool()),
        }
    }

    fn display<'a>(&'a self, raw: &'a str) -> &'a str {
        match (self.mode, raw) {
            (_, "") => self.placeholder.as_str(),
            (SelectMode::TriState, "true") => "Yes",
            (SelectMode::TriState, "false") => "No",
            (_, other) => other,
        }
    }

    fn step(&self, value: &Value, forward: bool) -> Option<&str> {
        if self.options.is_empty() {
            return None;
        }
        let len = self.options.len();
        let raw = self.raw_of(value);
        let current = self.options.iter().position(|option| option == raw).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.options.get(next).map(String::as_str)
    }

    fn emit(&self, raw: &str) -> InteractionResult {
        let action = match self.mode {
            SelectMode::Choice => WidgetAction::Change(FieldChange::text(self.id.as_str(), raw)),
            SelectMode::TriState => WidgetAction::SelectTriState {
                field: self.id.clone(),
                raw: raw.to_string(),
            },
        };
        InteractionResult::with_action(action)
    }
}

impl Drawable for SelectInput {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> &str {
        self.label.as_str()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let raw = self.raw_of(ctx.value);
        let shown = self.display(raw);
        let style = if raw.is_empty() {
            Style::new().dim()
        } else {
            Style::default()
        };
        let mut lines = vec![
            label_line(&self.label, self.required, ctx.focused),
            vec![
                focus_prefix(ctx.focused),
                Span::new("‹ "),
                Span::styled(shown.to_string(), style),
                Span::new(" ›"),
            ],
        ];
        if ctx.reveal_required && self.required && raw.is_empty() {
            lines.push(required_line(&self.label));
        }
        DrawOutput { lines }
    }
}

impl Interactive for SelectInput {
    fn on_key(&mut self, key: KeyEvent, value: &Value) -> InteractionResult {
        match key.code {
            KeyCode::Left | KeyCode::Right => {
                let forward = key.code == KeyCode::Right;
                match self.step(value, forward).map(ToOwned::to_owned) {
                    Some(raw) => self.emit(raw.as_str()),
                    None => InteractionResult::ignored(),
                }
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }
}
