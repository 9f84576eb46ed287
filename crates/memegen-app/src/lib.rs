//! Memegen Application
//!
//! Headless application shell: applies UI actions to an editor and writes
//! exported images.

mod actions;
mod app;
mod config;
mod script;

pub use actions::UiAction;
pub use app::{App, AppError};
pub use config::AppConfig;
pub use script::{Script, run_script};
