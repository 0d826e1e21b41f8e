use crate::core::submission::{FormKind, SubmissionOutcome};
use crate::state::form::NoticeTone;
use crate::state::{AppState, FormView, Notice, Screen};
use crate::terminal::TerminalSize;
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::{Drawable, RenderContext};
use unicode_width::UnicodeWidthStr;

pub const WELCOME_TITLE: &str = "Welcome to Duospace...";
pub const WELCOME_TAGLINE: &str =
    "Discover friendship, share your space, and connect with like-minded people.";
const KEY_HELP: &str =
    "Tab/Shift+Tab move · ←/→ choose · Space toggle · Enter activate · Esc dismiss · Ctrl+N next screen · Ctrl+C quit";
const CARD_MAX_WIDTH: usize = 64;

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    /// Row the terminal keeps on screen when scrolling.
    pub focus_row: Option<usize>,
}

#[derive(Debug, Default, Clone)]
pub struct Renderer;

impl Renderer {
    pub fn render(&self, state: &AppState, terminal_size: TerminalSize) -> RenderFrame {
        let width = terminal_size.width.max(1) as usize;
        let mut frame = RenderFrame::default();
        frame.lines.push(header_line(state.screen()));
        frame.lines.push(Vec::new());

        match state.active_form() {
            None => render_welcome(state, width, &mut frame),
            Some(kind) => render_form(state.view(kind), width, &mut frame),
        }

        if let Some(alert) = state.alert() {
            frame.lines.push(Vec::new());
            frame.focus_row = Some(frame.lines.len());
            frame.lines.extend(alert_box(alert, width));
        }

        frame.lines.push(Vec::new());
        for line in wrap_text(KEY_HELP, width.saturating_sub(1)) {
            frame
                .lines
                .push(vec![Span::styled(line, Style::new().color(Color::DarkGrey))]);
        }
        frame
    }
}

fn header_line(current: Screen) -> SpanLine {
    let mut line = vec![
        Span::styled("Duospace", Style::new().color(Color::Cyan).bold()),
        Span::new("  "),
    ];
    for screen in Screen::ALL {
        let style = if screen == current {
            Style::new().color(Color::Cyan).reverse()
        } else {
            Style::new().color(Color::DarkGrey)
        };
        line.push(Span::styled(format!(" {} ", screen.title()), style));
        line.push(Span::new(" "));
    }
    line
}

fn render_welcome(state: &AppState, width: usize, frame: &mut RenderFrame) {
    let inner = width.saturating_sub(4).clamp(1, CARD_MAX_WIDTH);
    let mut body: Vec<SpanLine> = vec![
        vec![Span::styled(WELCOME_TITLE, Style::new().bold())],
        Vec::new(),
    ];
    for line in wrap_text(WELCOME_TAGLINE, inner) {
        body.push(vec![Span::new(line)]);
    }
    body.push(Vec::new());
    let continue_button = state.welcome().draw(&RenderContext {
        focused: state.alert().is_none(),
        value: &Default::default(),
        reveal_required: false,
        busy: false,
    });
    body.extend(continue_button.lines);

    frame.focus_row = Some(frame.lines.len());
    frame
        .lines
        .extend(boxed(&body, inner, Style::new().color(Color::Blue)));
}

fn render_form(view: &FormView, width: usize, frame: &mut RenderFrame) {
    let kind = view.form().kind();
    frame.lines.push(vec![Span::styled(
        form_title(kind),
        Style::new().bold(),
    )]);
    frame.lines.push(Vec::new());

    for widget in view.widgets() {
        let value = view.bound_value(widget.id());
        let ctx = view.render_context(widget.id(), &value);
        if ctx.focused {
            frame.focus_row = Some(frame.lines.len());
        }
        frame.lines.extend(widget.draw(&ctx).lines);
        frame.lines.push(Vec::new());
    }

    // Preference outcomes are shown as alerts instead.
    if kind == FormKind::Registration {
        if let Some(outcome) = view.form().submission().outcome() {
            let style = match outcome {
                SubmissionOutcome::Success(_) => Style::new().color(Color::Green).bold(),
                SubmissionOutcome::Failure(_) => Style::new().color(Color::Red).bold(),
            };
            for line in wrap_text(outcome.message(), width.saturating_sub(3)) {
                frame
                    .lines
                    .push(vec![Span::new("  "), Span::styled(line, style)]);
            }
        }
    }
}

fn form_title(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Registration => "Register",
        FormKind::Preference => "Preferences",
    }
}

fn alert_box(alert: &Notice, width: usize) -> Vec<SpanLine> {
    let inner = width.saturating_sub(4).clamp(1, CARD_MAX_WIDTH);
    let color = match alert.tone {
        NoticeTone::Success => Color::Green,
        NoticeTone::Failure => Color::Red,
    };
    let mut body: Vec<SpanLine> = wrap_text(&alert.text, inner)
        .into_iter()
        .map(|line| vec![Span::styled(line, Style::new().color(color).bold())])
        .collect();
    body.push(Vec::new());
    body.push(vec![Span::styled(
        "Press Esc to dismiss",
        Style::new().color(Color::DarkGrey),
    )]);
    boxed(&body, inner, Style::new().color(color))
}

/// Frames `body` in a single-line border `inner` columns wide.
fn boxed(body: &[SpanLine], inner: usize, border: Style) -> Vec<SpanLine> {
    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(vec![Span::styled(
        format!("┌{}┐", "─".repeat(inner + 2)),
        border,
    )]);
    for line in body {
        let pad = inner.saturating_sub(line_width(line));
        let mut row = vec![Span::styled("│ ", border)];
        row.extend(line.iter().cloned());
        row.push(Span::new(" ".repeat(pad)));
        row.push(Span::styled(" │", border));
        out.push(row);
    }
    out.push(vec![Span::styled(
        format!("└{}┘", "─".repeat(inner + 2)),
        border,
    )]);
    out
}

/// Greedy word wrap by display width. Words wider than `width` get a line
/// of their own and are clipped by the terminal.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.width()
        } else {
            current.width() + 1 + word.width()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
