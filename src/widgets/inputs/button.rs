use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
    focus_prefix, label_line,
};

/// Activated with Enter or Space. While `busy` it draws `busy_text`; the form
/// owning the action decides whether a repeat activation is ignored.
pub struct Button {
    id: String,
    label: String,
    text: String,
    busy_text: String,
    action: WidgetAction,
}

impl Button {
    pub fn new(id: impl Into<String>, text: impl Into<String>, action: WidgetAction) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            label: String::new(),
            busy_text: text.clone(),
            text,
            action,
        }
    }

    /// Caption drawn above the button, with the context value beside it.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_busy_text(mut self, busy_text: impl Into<String>) -> Self {
        self.busy_text = busy_text.into();
        self
    }
}

impl Drawable for Button {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> &str {
        self.label.as_str()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let (text, style) = if ctx.busy {
            (&self.busy_text, Style::new().color(Color::DarkGrey))
        } else if ctx.focused {
            (&self.text, Style::new().color(Color::Blue).reverse().bold())
        } else {
            (&self.text, Style::new().color(Color::Blue))
        };

        let mut lines = Vec::new();
        if !self.label.is_empty() {
            lines.push(label_line(&self.label, false, ctx.focused));
        }
        let mut row = vec![focus_prefix(ctx.focused)];
        if let Some(shown) = ctx.value.as_text() {
            if shown.is_empty() {
                row.push(Span::styled("Latitude, Longitude", Style::new().dim()));
            } else {
                row.push(Span::new(shown.to_string()));
            }
            row.push(Span::new("  "));
        }
        row.push(Span::styled(format!(" {text} "), style));
        lines.push(row);
        DrawOutput { lines }
    }
}

impl Interactive for Button {
    fn on_key(&mut self, key: KeyEvent, _value: &Value) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                InteractionResult::with_action(self.action.clone())
            }
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Button;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::ui::span::line_text;
    use crate::widgets::traits::{Drawable, Interactive, RenderContext, WidgetAction};

    #[test]
    fn enter_emits_action() {
        let mut button = Button::new("submit", "Register", WidgetAction::Submit);
        let result = button.on_key(KeyEvent::plain(KeyCode::Enter), &Value::None);
        assert_eq!(result.actions, vec![WidgetAction::Submit]);
    }

    #[test]
    fn busy_button_shows_busy_text() {
        let button = Button::new("submit", "Register", WidgetAction::Submit)
            .with_busy_text("Submitting...");
        let drawn = button.draw(&RenderContext {
            focused: true,
            value: &Value::None,
            reveal_required: false,
            busy: true,
        });
        assert!(line_text(&drawn.lines[0]).contains("Submitting..."));
    }

    #[test]
    fn location_button_shows_display_string() {
        let button = Button::new("locate", "Get Location", WidgetAction::Locate)
            .with_label("Location");
        let shown = Value::from("12.34, 56.78");
        let drawn = button.draw(&RenderContext {
            focused: false,
            value: &shown,
            reveal_required: false,
            busy: false,
        });
        assert_eq!(line_text(&drawn.lines[0]), "Location");
        assert!(line_text(&drawn.lines[1]).contains("12.34, 56.78"));
    }
}
