// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod cue;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod sequence;
pub mod ui;

pub use error::{KeyrushError, Result};
pub use game::{GameSessionController, Phase, Session};
