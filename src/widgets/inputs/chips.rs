use crate::core::schema::FieldSpec;
use crate::core::value::Value;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, WidgetAction,
    focus_prefix, label_line,
};

/// Row of toggle buttons over a fixed option list.
pub struct ChipSelect {
    id: String,
    label: String,
    options: Vec<String>,
    cursor: usize,
}

impl ChipSelect {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            options: spec.kind.options().to_vec(),
            cursor: 0,
        }
    }

    fn move_cursor(&mut self, forward: bool) -> bool {
        if self.options.is_empty() {
            return false;
        }
        let len = self.options.len();
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
        true
    }
}

impl Drawable for ChipSelect {
    fn id(&self) -> &str {
        self.id.as_str()
    }

    fn label(&self) -> &str {
        self.label.as_str()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let selected = ctx.value.as_list().unwrap_or_default();
        let mut chips: SpanLine = vec![focus_prefix(ctx.focused)];
        for (idx, option) in self.options.iter().enumerate() {
            let on = selected.iter().any(|item| item == option);
            let mut style = if on {
                Style::new().color(Color::Blue).reverse()
            } else {
                Style::new()
            };
            if ctx.focused && idx == self.cursor {
                style = style.bold();
            }
            let text = if ctx.focused && idx == self.cursor {
                format!("[{option}]")
            } else {
                format!(" {option} ")
            };
            chips.push(Span::styled(text, style));
            chips.push(Span::new(" "));
        }
        DrawOutput {
            lines: vec![label_line(&self.label, false, ctx.focused), chips],
        }
    }
}

impl Interactive for ChipSelect {
    fn on_key(&mut self, key: KeyEvent, _value: &Value) -> InteractionResult {
        match key.code {
            KeyCode::Left | KeyCode::Right => {
                if self.move_cursor(key.code == KeyCode::Right) {
                    InteractionResult::handled()
                } else {
                    InteractionResult::ignored()
                }
            }
            KeyCode::Char(' ') => match self.options.get(self.cursor) {
                Some(item) => InteractionResult::with_action(WidgetAction::Toggle {
                    field: self.id.clone(),
                    item: item.clone(),
                }),
                None => InteractionResult::ignored(),
            },
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChipSelect;
    use crate::core::schema::FormSchema;
    use crate::core::value::Value;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::{Interactive, WidgetAction};

    #[test]
    fn space_toggles_item_under_cursor() {
        let schema = FormSchema::preference();
        let spec = schema.get("preferred_hobbies").expect("hobbies");
        let mut chips = ChipSelect::from_spec(spec);
        let empty = Value::List(Vec::new());

        chips.on_key(KeyEvent::plain(KeyCode::Right), &empty);
        chips.on_key(KeyEvent::plain(KeyCode::Right), &empty);
        let result = chips.on_key(KeyEvent::plain(KeyCode::Char(' ')), &empty);

        assert_eq!(
            result.actions,
            vec![WidgetAction::Toggle {
                field: "preferred_hobbies".to_string(),
                item: "Cooking".to_string(),
            }]
        );
    }

    #[test]
    fn cursor_wraps_to_last_option() {
        let schema = FormSchema::preference();
        let spec = schema.get("preferred_hobbies").expect("hobbies");
        let mut chips = ChipSelect::from_spec(spec);
        let empty = Value::List(Vec::new());
        chips.on_key(KeyEvent::plain(KeyCode::Left), &empty);
        let result = chips.on_key(KeyEvent::plain(KeyCode::Char(' ')), &empty);
        assert_eq!(
            result.actions,
            vec![WidgetAction::Toggle {
                field: "preferred_hobbies".to_string(),
                item: "Art".to_string(),
            }]
        );
    }
}
