//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Home, login and registration
//! - Diagnosis form and results with the confidence donut
//! - Administrator patient list and history
//! - Personal data settings

mod app;
mod styles;
mod ui;
mod worker;

pub use app::{App, Screen};
pub use styles::HeartTheme;
pub use worker::{ApiEvent, RequestWorker};
