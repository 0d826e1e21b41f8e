pub mod button;
pub mod chips;
pub mod select;
pub mod text;

pub use button::Button;
pub use chips::ChipSelect;
pub use select::SelectInput;
pub use text::TextInput;
