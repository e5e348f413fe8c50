//! The game's scenes, registered by name.

mod burrow;
mod console;
mod login;
mod look;
mod menu;
mod shutdown;
mod signup;
mod startup;
mod unlock;

pub use burrow::BurrowScene;
pub use console::ConsoleScene;
pub use login::LoginScene;
pub use look::LookScene;
pub use menu::{MainMenuScene, QuitScene};
pub use shutdown::ShutdownScene;
pub use signup::SignupScene;
pub use startup::StartupScene;
pub use unlock::UnlockScene;

use crate::scene::{Flow, SceneRegistry};

pub const STARTUP: &str = "startup";
pub const MAIN_MENU: &str = "main_menu";
pub const QUIT: &str = "quit";
pub const SEEDOS_LOGIN: &str = "seedos_login";
pub const SEEDOS_SIGNUP: &str = "seedos_signup";
pub const SEEDOS_CONSOLE: &str = "seedos_console";
pub const SEEDOS_SHUTDOWN: &str = "seedos_shutdown";
pub const SEEDOS_LOOK: &str = "seedos_look";
pub const SEEDOS_UNLOCK: &str = "seedos_unlock";
pub const SEEDOS_BURROW: &str = "seedos_burrow";

/// Scenes past login need a loaded session. Reaching one without it is a
/// routing bug; fall back to the main menu.
fn without_session(scene: &str) -> Flow {
    log::error!("{} reached without a session", scene);
    Flow::goto(MAIN_MENU)
}

pub fn registry() -> SceneRegistry {
    let mut registry = SceneRegistry::new();
    registry.register(STARTUP, Box::new(StartupScene::new()));
    registry.register(MAIN_MENU, Box::new(MainMenuScene::new()));
    registry.register(QUIT, Box::new(QuitScene));
    registry.register(SEEDOS_LOGIN, Box::new(LoginScene::new()));
    registry.register(SEEDOS_SIGNUP, Box::new(SignupScene::new()));
    registry.register(SEEDOS_CONSOLE, Box::new(ConsoleScene::new()));
    registry.register(SEEDOS_SHUTDOWN, Box::new(ShutdownScene::new()));
    registry.register(SEEDOS_LOOK, Box::new(LookScene::new()));
    registry.register(SEEDOS_UNLOCK, Box::new(UnlockScene::new()));
    registry.register(SEEDOS_BURROW, Box::new(BurrowScene::new()));
    registry
}
