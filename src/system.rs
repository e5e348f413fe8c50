use wasm_bindgen::prelude::*;

use crate::config::Config;
use crate::game::Game;
use crate::key::Key;
use crate::logger;
use crate::save::SaveStore;

/// The browser-facing handle. The page forwards key presses and paints
/// whatever frame comes back.
#[wasm_bindgen]
pub struct SeedOs {
    game: Game,
}

impl Default for SeedOs {
    fn default() -> Self {
        Self::new(100, 35)
    }
}

#[cfg(target_arch = "wasm32")]
fn save_store(config: &Config) -> Box<dyn SaveStore> {
    Box::new(crate::persist::BrowserStore::new(&config.save_key_prefix))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_store(_config: &Config) -> Box<dyn SaveStore> {
    Box::new(crate::save::MemoryStore::new())
}

#[wasm_bindgen]
impl SeedOs {
    #[wasm_bindgen(constructor)]
    pub fn new(columns: u16, rows: u16) -> SeedOs {
        SeedOs::from_config(Config::default(), columns, rows)
    }

    /// Build from a (possibly partial) JSON config object.
    pub fn with_config(json: &str, columns: u16, rows: u16) -> Result<SeedOs, JsValue> {
        let config = Config::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(SeedOs::from_config(config, columns, rows))
    }

    /// Enter the startup scene and return the first frame.
    pub fn boot(&mut self) -> String {
        if let Err(e) = self.game.start() {
            log::error!("{}", e);
        }
        self.game.take_frame()
    }

    /// Feed a DOM `KeyboardEvent.key` name. Unknown names are ignored.
    pub fn key(&mut self, name: &str) -> String {
        if let Some(key) = Key::from_dom(name) {
            self.press(key);
        }
        self.game.take_frame()
    }

    /// Feed raw terminal bytes (escape sequences included).
    pub fn input(&mut self, raw: &str) -> String {
        for key in Key::decode(raw) {
            self.press(key);
        }
        self.game.take_frame()
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.game.resize(columns, rows);
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    pub fn active_scene(&self) -> Option<String> {
        self.game.active_scene().map(|s| s.to_string())
    }
}

impl SeedOs {
    pub fn from_config(config: Config, columns: u16, rows: u16) -> SeedOs {
        logger::init(config.level_filter());
        let saves = save_store(&config);
        SeedOs {
            game: Game::new(config, (columns, rows), saves),
        }
    }

    fn press(&mut self, key: Key) {
        if let Err(e) = self.game.press(key) {
            log::error!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::{MAIN_MENU, STARTUP};
    use crate::style::strip_ansi;

    fn seeded() -> SeedOs {
        let config = Config {
            rng_seed: Some(2),
            ..Config::default()
        };
        SeedOs::from_config(config, 100, 35)
    }

    #[test]
    fn test_boot_shows_startup() {
        let mut os = seeded();
        let frame = strip_ansi(&os.boot());
        assert!(frame.contains("100"));
        assert_eq!(os.active_scene().as_deref(), Some(STARTUP));
        assert!(os.is_running());
    }

    #[test]
    fn test_dom_keys_drive_game() {
        let mut os = seeded();
        os.boot();
        os.key("y");
        os.key("Shift");
        os.key("Enter");
        assert_eq!(os.active_scene().as_deref(), Some(MAIN_MENU));
        os.key("ArrowDown");
        let frame = strip_ansi(&os.key("Enter"));
        assert!(frame.contains("See you next time!"));
        assert!(!os.is_running());
    }

    #[test]
    fn test_raw_input() {
        let mut os = seeded();
        os.boot();
        os.input("n\r");
        assert!(!os.is_running());
    }

    #[test]
    fn test_keys_before_boot_are_ignored() {
        let mut os = seeded();
        assert_eq!(os.input("y\r"), "");
        assert_eq!(os.active_scene(), None);
    }
}
