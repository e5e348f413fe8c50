pub mod assets;
pub mod burrow;
pub mod command;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod files;
pub mod game;
pub mod key;
pub mod logger;
pub mod path;
#[cfg(target_arch = "wasm32")]
pub mod persist;
pub mod progress;
pub mod save;
pub mod scene;
pub mod scenes;
pub mod screen;
pub mod session;
pub mod style;
pub mod system;
pub mod terminal;
pub mod widgets;

pub use config::Config;
pub use error::{GameError, SaveError};
pub use game::Game;
pub use key::Key;
pub use save::{MemoryStore, SaveStore};
pub use system::SeedOs;
pub use terminal::{ScriptedTerminal, Terminal};
