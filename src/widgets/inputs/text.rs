use crate::core::form_state::FieldChange;
use crate::core::schema::{FieldKind, FieldSpec};
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
    focus_prefix, is_plain_char, label_line, required_line,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextMode {
    Plain,
    Masked,
    Numeric,
}

/// Single-line text field. Edits are appended at the end of the value.
pub struct TextInput {
    id: String,
    label: String,
    placeholder: String,
    required: bool,
    mode: TextMode,
}

impl TextInput {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        let mode = match spec.kind {
            FieldKind::Secret => TextMode::Masked,
            FieldKind::Number => TextMode::Numeric,
            _ => TextMode::Plain,
        };
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            placeholder: spec.placeholder.clone(),
            required: spec.required,
            mode,
        }
    }

    fn accepts(&self, ch: char, current: &str) -> bool {
        match self.mode {
            TextMode::Numeric => ch.is_ascii_digit() || (ch == '-' && current.is_empty()),
            TextMode::Plain | TextMode::Masked => !ch.is_control(),
        }
    }

    fn shown(&self, text: &str) -> String {
        match self.mode {
            TextMode::Masked => "•".repeat(text.chars().count()),
            TextMode::Plain | TextMode::Numeric => text.to_string(),
        }
    }

    fn change(&self, text: String) -> InteractionResult {
        InteractionResult::with_action(WidgetAction::Change(FieldChange::text(
            self.id.as_str(),
            text,
        )))
    }
}

impl Drawable for TextInput {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> &str {
        self.label.as_str()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let text = ctx.value.as_text().unwrap_or_default();
        let mut value_line = vec![focus_prefix(ctx.focused)];
        if text.is_empty() {
            if !self.placeholder.is_empty() {
                value_line.push(Span::styled(self.placeholder.as_str(), Style::new().dim()));
            }
        } else {
            value_line.push(Span::new(self.shown(text)));
        }
        if ctx.focused {
            value_line.push(Span::styled("▏", Style::new().color(Color::Cyan)));
        }

        let mut lines = vec![label_line(&self.label, self.required, ctx.focused), value_line];
        if ctx.reveal_required && self.required && text.is_empty() {
            lines.push(required_line(&self.label));
        }
        DrawOutput { lines }
    }
}

impl Interactive for TextInput {
    fn on_key(&mut self, key: KeyEvent, value: &Value) -> InteractionResult {
        let current = value.as_text().unwrap_or_default();
        if let Some(ch) = is_plain_char(&key) {
            if !self.accepts(ch, current) {
                return InteractionResult::handled();
            }
            let mut next = current.to_string();
            next.push(ch);
            return self.change(next);
        }
        match key.code {
            KeyCode::Backspace => {
                if current.is_empty() {
                    return InteractionResult::handled();
                }
                let mut next = current.to_string();
                next.pop();
                self.change(next)
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TextInput;
    use crate::core::form_state::FieldChange;
    use crate::core::schema::{FieldKind, FieldSpec};
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::line_text;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext, WidgetAction};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    #[test]
    fn typing_appends_to_current_value() {
        let mut input = TextInput::from_spec(&FieldSpec::new("username", "Username", FieldKind::Text));
        let result = input.on_key(key(KeyCode::Char('a')), &Value::from("kasi"));
        assert_eq!(
            result.actions,
            vec![WidgetAction::Change(FieldChange::text("username", "kasia"))]
        );
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut input = TextInput::from_spec(&FieldSpec::new("bio", "Bio", FieldKind::Text));
        let result = input.on_key(key(KeyCode::Backspace), &Value::from("hi!"));
        assert_eq!(
            result.actions,
            vec![WidgetAction::Change(FieldChange::text("bio", "hi"))]
        );
    }

    #[test]
    fn numeric_input_drops_letters() {
        let mut input = TextInput::from_spec(&FieldSpec::new("age_min", "Min Age", FieldKind::Number));
        let result = input.on_key(key(KeyCode::Char('x')), &Value::from("2"));
        assert!(result.handled);
        assert!(result.actions.is_empty());
        let result = input.on_key(key(KeyCode::Char('5')), &Value::from("2"));
        assert_eq!(
            result.actions,
            vec![WidgetAction::Change(FieldChange::text("age_min", "25"))]
        );
    }

    #[test]
    fn secret_is_masked_and_required_is_revealed() {
        let input = TextInput::from_spec(
            &FieldSpec::new("password", "Password", FieldKind::Secret).required(),
        );
        let secret = Value::from("abc");
        let drawn = input.draw(&RenderContext {
            focused: false,
            value: &secret,
            reveal_required: true,
            busy: false,
        });
        assert_eq!(line_text(&drawn.lines[1]).trim(), "•••");
        assert_eq!(drawn.lines.len(), 2);

        let empty = Value::from("");
        let drawn = input.draw(&RenderContext {
            focused: false,
            value: &empty,
            reveal_required: true,
            busy: false,
        });
        assert_eq!(line_text(&drawn.lines[2]).trim(), "Password is required");
    }
}
