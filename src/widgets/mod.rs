pub mod inputs;
pub mod layout;
pub mod traits;

pub use layout::{form_widgets, welcome_button};
pub use traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, Widget, WidgetAction,
};
