pub mod config;
pub mod core;
pub mod error;
pub mod net;
pub mod runtime;
pub mod session;
pub mod state;
pub mod task;
pub mod terminal;
pub mod ui;
pub mod widgets;
