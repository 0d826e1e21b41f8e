use crate::core::schema::{FieldKind, FieldSpec, FormSchema};
use crate::core::submission::{FormKind, SUBMITTING_LABEL};
use crate::widgets::inputs::{Button, ChipSelect, SelectInput, TextInput};
use crate::widgets::traits::{Widget, WidgetAction};

pub const LOCATION_BUTTON_ID: &str = "location";
pub const SUBMIT_BUTTON_ID: &str = "submit";
pub const CONTINUE_BUTTON_ID: &str = "continue";

/// One widget per schema field in schema order, then the form's buttons.
pub fn form_widgets(kind: FormKind, schema: &FormSchema) -> Vec<Box<dyn Widget>> {
    let mut widgets: Vec<Box<dyn Widget>> = schema.fields().iter().map(field_widget).collect();
    if kind == FormKind::Registration {
        widgets.push(Box::new(
            Button::new(LOCATION_BUTTON_ID, "Get Location", WidgetAction::Locate)
                .with_label("Location")
                .with_busy_text("Locating..."),
        ));
    }
    widgets.push(Box::new(
        Button::new(
            SUBMIT_BUTTON_ID,
            kind.profile().submit_label,
            WidgetAction::Submit,
        )
        .with_busy_text(SUBMITTING_LABEL),
    ));
    widgets
}

pub fn welcome_button() -> Button {
    Button::new(CONTINUE_BUTTON_ID, "Continue", WidgetAction::Continue)
}

fn field_widget(spec: &FieldSpec) -> Box<dyn Widget> {
    match spec.kind {
        FieldKind::Text | FieldKind::Secret | FieldKind::Number => {
            Box::new(TextInput::from_spec(spec))
        }
        FieldKind::Choice(_) => Box::new(SelectInput::choice(spec)),
        FieldKind::TriState => Box::new(SelectInput::tri_state(spec)),
        FieldKind::MultiSelect(_) => Box::new(ChipSelect::from_spec(spec)),
    }
}
