use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::key::Key;
use crate::progress::Progress;
use crate::save::SaveStore;
use crate::screen::Screen;
use crate::session::SeedSystem;

/// What a scene wants after handling a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Stay in this scene and wait for the next key.
    Wait,
    Goto(String),
    /// Stop the game.
    Quit,
}

impl Flow {
    pub fn goto(scene: &str) -> Flow {
        Flow::Goto(scene.to_string())
    }
}

/// Everything scenes share. Owned by the game, lent to one scene at a time.
pub struct GameState {
    pub config: Config,
    pub screen: Screen,
    pub seed_system: Option<SeedSystem>,
    pub progress: Progress,
    pub saves: Box<dyn SaveStore>,
    pub rng: SmallRng,
}

impl GameState {
    pub fn new(config: Config, size: (u16, u16), saves: Box<dyn SaveStore>) -> Self {
        let rng = SmallRng::seed_from_u64(config.rng_seed.unwrap_or_else(entropy));
        GameState {
            config,
            screen: Screen::new(size.0, size.1),
            seed_system: None,
            progress: Progress::new(),
            saves,
            rng,
        }
    }

    /// Drop the session and all progress, as after the aphid's death.
    pub fn reset_session(&mut self) {
        self.seed_system = None;
        self.progress.clear();
    }
}

#[cfg(target_arch = "wasm32")]
fn entropy() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy() -> u64 {
    0x5eed_05
}

/// A screen of the game. `update` is called with `None` right after `open`
/// and then once per key until it returns something other than `Wait`.
pub trait Scene {
    fn open(&mut self, _state: &mut GameState) {}
    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow;
    fn exit(&mut self, _state: &mut GameState) {}
}

#[derive(Default)]
pub struct SceneRegistry {
    scenes: HashMap<String, Box<dyn Scene>>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, scene: Box<dyn Scene>) {
        self.scenes.insert(name.to_string(), scene);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Box<dyn Scene>> {
        self.scenes.get_mut(name)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}
