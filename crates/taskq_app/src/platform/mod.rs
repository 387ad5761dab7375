//! Terminal platform: logging, effect execution, input and rendering around the core controller.
pub mod app;
pub mod effects;
pub mod input;
pub mod logging;
pub mod ui;

pub use app::{Inbound, Outcome, Session};
pub use ui::render::{Renderer, TerminalRenderer};
