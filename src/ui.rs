//! Terminal interface: one screen with the ingredient form, the results list
//! and a recipe overlay.
mod app;
mod helpers;
mod terminal;

pub use app::{App, Focus};
pub use terminal::run_app;
