pub mod app_state;
pub mod focus;
pub mod form;
pub mod form_view;
pub mod screen;

pub use app_state::AppState;
pub use form::{FormInstance, Notice, NoticeTone};
pub use form_view::FormView;
pub use screen::Screen;
