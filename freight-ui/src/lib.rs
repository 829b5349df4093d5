pub mod app;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod view;

pub use app::{Flow, apply, build_registry, connect, run};
pub use commands::{Command, CommandError};
pub use settings::{Overrides, Settings};
pub use view::render;
