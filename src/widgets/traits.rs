use crate::core::form_state::FieldChange;
use crate::core::value::Value;
use crate::terminal::KeyEvent;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};

/// Actions emitted by widgets in `InteractionResult`.
/// These flow upward from widgets to the form that owns the values.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetAction {
    Change(FieldChange),
    /// Raw selection of a three-option select; coerced by the form.
    SelectTriState { field: String, raw: String },
    Toggle { field: String, item: String },
    Locate,
    Submit,
    Continue,
    /// Widget is done with its value; focus moves on.
    InputDone,
}

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub focused: bool,
    /// Current value of the bound field, or the text a button shows next to it.
    pub value: &'a Value,
    /// Show "… is required" under empty required fields.
    pub reveal_required: bool,
    /// The operation behind a button is in flight.
    pub busy: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
}

pub trait Drawable: Send {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput;
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionResult {
    pub handled: bool,
    pub actions: Vec<WidgetAction>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            actions: Vec::new(),
        }
    }

    pub fn with_action(action: WidgetAction) -> Self {
        Self {
            handled: true,
            actions: vec![action],
        }
    }

    pub fn input_done() -> Self {
        Self::with_action(WidgetAction::InputDone)
    }
}

pub trait Interactive {
    /// `value` is the bound field's current value; widgets keep no copy.
    fn on_key(&mut self, key: KeyEvent, value: &Value) -> InteractionResult;
}

pub trait Widget: Drawable + Interactive {}

impl<T: Drawable + Interactive> Widget for T {}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

pub(crate) fn label_line(label: &str, required: bool, focused: bool) -> SpanLine {
    let style = if focused {
        Style::new().color(Color::Cyan).bold()
    } else {
        Style::new().bold()
    };
    let mut line = vec![Span::styled(label.to_string(), style)];
    if required {
        line.push(Span::styled(" *", Style::new().color(Color::Red)));
    }
    line
}

pub(crate) fn focus_prefix(focused: bool) -> Span {
    if focused {
        Span::styled("› ", Style::new().color(Color::Cyan))
    } else {
        Span::new("  ")
    }
}

pub(crate) fn required_line(label: &str) -> SpanLine {
    vec![
        Span::new("  "),
        Span::styled(
            format!("{label} is required"),
            Style::new().color(Color::Red),
        ),
    ]
}

pub(crate) fn is_plain_char(key: &KeyEvent) -> Option<char> {
    use crate::terminal::{KeyCode, KeyModifiers};
    match key.code {
        KeyCode::Char(ch)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(ch)
        }
        _ => None,
    }
}
