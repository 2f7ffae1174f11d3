//! Ratatui front-end. `App` is the controller and owns every piece of UI
//! state; `run_app` drives it from crossterm events.

mod app;
pub mod forms;
mod helpers;
pub mod table;
mod terminal;

pub use app::{App, ViewState, EDIT_UNSUPPORTED, NO_ROW_SELECTED};
pub use terminal::run_app;
