use crate::config::Config;
use crate::error::GameError;
use crate::key::Key;
use crate::save::SaveStore;
use crate::scene::{Flow, GameState, SceneRegistry};
use crate::scenes::{self, STARTUP};
use crate::terminal::Terminal;

/// Drives the active scene's open → update → exit cycle.
pub struct Game {
    pub state: GameState,
    registry: SceneRegistry,
    active: Option<String>,
    previous: Option<String>,
    running: bool,
}

impl Game {
    /// A game with every built-in scene registered.
    pub fn new(config: Config, size: (u16, u16), saves: Box<dyn SaveStore>) -> Self {
        Self::with_registry(config, size, saves, scenes::registry())
    }

    pub fn with_registry(
        config: Config,
        size: (u16, u16),
        saves: Box<dyn SaveStore>,
        registry: SceneRegistry,
    ) -> Self {
        Game {
            state: GameState::new(config, size, saves),
            registry,
            active: None,
            previous: None,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn active_scene(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn previous_scene(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn take_frame(&mut self) -> String {
        self.state.screen.take()
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.state.screen.resize(columns, rows);
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        self.start_at(STARTUP)
    }

    pub fn start_at(&mut self, scene: &str) -> Result<(), GameError> {
        self.running = true;
        self.active = None;
        self.follow(Flow::goto(scene))
    }

    /// Hand one key to the active scene.
    pub fn press(&mut self, key: Key) -> Result<(), GameError> {
        if !self.running {
            return Ok(());
        }
        let flow = match self.active.as_deref().and_then(|n| self.registry.get_mut(n)) {
            Some(scene) => scene.update(&mut self.state, Some(key)),
            None => Flow::Quit,
        };
        self.follow(flow)
    }

    fn exit_active(&mut self) {
        if let Some(scene) = self.active.as_deref().and_then(|n| self.registry.get_mut(n)) {
            scene.exit(&mut self.state);
        }
    }

    fn follow(&mut self, mut flow: Flow) -> Result<(), GameError> {
        loop {
            let next = match flow {
                Flow::Wait => return Ok(()),
                Flow::Quit => {
                    self.exit_active();
                    self.running = false;
                    log::info!("game finished");
                    return Ok(());
                }
                Flow::Goto(next) => next,
            };
            self.exit_active();
            if !self.registry.contains(&next) {
                log::error!("Scene is not defined: {}", next);
                self.running = false;
                return Err(GameError::UnknownScene(next));
            }
            log::info!(
                "scene {} -> {}",
                self.active.as_deref().unwrap_or("none"),
                next
            );
            self.previous = self.active.replace(next.clone());
            flow = match self.registry.get_mut(&next) {
                Some(scene) => {
                    scene.open(&mut self.state);
                    scene.update(&mut self.state, None)
                }
                None => Flow::Quit,
            };
        }
    }

    /// Blocking loop for hosts that own a key source. Ends when the game
    /// quits or the input closes.
    pub fn run(&mut self, terminal: &mut impl Terminal) -> Result<(), GameError> {
        let (columns, rows) = terminal.screen_size();
        self.resize(columns, rows);
        self.start()?;
        while self.running {
            let Some(key) = terminal.poll_key_press() else {
                break;
            };
            let (columns, rows) = terminal.screen_size();
            self.resize(columns, rows);
            self.press(key)?;
        }
        Ok(())
    }
}
