use crate::console;
use crate::key::Key;
use crate::save::{save_status, SaveData};
use crate::scene::{Flow, GameState, Scene};
use crate::style::{style, Style};
use crate::widgets::{yes_or_no, Prompt};

use super::{without_session, MAIN_MENU, SEEDOS_CONSOLE, SEEDOS_SHUTDOWN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    AskSave,
    AskShutdown,
}

/// Offer a save, then confirm leaving seedOS.
pub struct ShutdownScene {
    step: Step,
    prompt: Prompt,
}

impl ShutdownScene {
    pub fn new() -> Self {
        ShutdownScene {
            step: Step::AskSave,
            prompt: console::prompt((100, 35), yes_or_no),
        }
    }
}

impl Default for ShutdownScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ShutdownScene {
    fn open(&mut self, state: &mut GameState) {
        self.step = Step::AskSave;
        self.prompt = console::prompt(state.screen.size(), yes_or_no);
        if let Some(system) = state.seed_system.as_mut() {
            system.send_messages([
                "Getting ready to shutdown system...".to_string(),
                style(
                    "Save game to file (this will overwrite the existing save data)? (yes/no)",
                    &[Style::Red],
                ),
            ]);
        }
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        let Some(system) = state.seed_system.as_mut() else {
            return without_session(SEEDOS_SHUTDOWN);
        };
        if let Some(answer) = key.and_then(|k| self.prompt.update(k, &mut system.message_history)) {
            let yes = answer.trim().eq_ignore_ascii_case("yes");
            system.send_message(&format!("> {}", answer.trim()));
            match self.step {
                Step::AskSave => {
                    let status = if yes {
                        let data = SaveData {
                            seed_system: system.clone(),
                            progress: state.progress.clone(),
                        };
                        save_status(state.saves.as_mut(), &data)
                    } else {
                        "Did not save data.".to_string()
                    };
                    system.send_messages([
                        status,
                        "Choice confirmed.".to_string(),
                        style("Are you sure you want to shut down SeedOS? (yes/no)", &[Style::Red]),
                    ]);
                    self.step = Step::AskShutdown;
                }
                Step::AskShutdown if yes => {
                    log::info!("seedOS shut down");
                    return Flow::goto(MAIN_MENU);
                }
                Step::AskShutdown => {
                    system.send_messages(["Canceling shutdown...", "Done!"]);
                    return Flow::goto(SEEDOS_CONSOLE);
                }
            }
        }
        console::draw(&mut state.screen, &system.message_history, &self.prompt);
        Flow::Wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::save::MemoryStore;
    use crate::session::SeedSystem;

    fn state() -> GameState {
        let mut state = GameState::new(Config::default(), (100, 35), Box::new(MemoryStore::new()));
        state.seed_system = Some(SeedSystem::new("Clippy", 100));
        state
    }

    fn feed(scene: &mut ShutdownScene, state: &mut GameState, raw: &str) -> Flow {
        let mut flow = Flow::Wait;
        for key in Key::decode(raw) {
            flow = scene.update(state, Some(key));
        }
        flow
    }

    fn last(state: &GameState) -> String {
        let history = &state.seed_system.as_ref().unwrap().message_history;
        history.last().unwrap_or_default().to_string()
    }

    #[test]
    fn test_invalid_answer_reprompts() {
        let mut state = state();
        let mut scene = ShutdownScene::new();
        scene.open(&mut state);
        assert_eq!(feed(&mut scene, &mut state, "maybe\r"), Flow::Wait);
        assert_eq!(last(&state), "Invalid Input");
        assert_eq!(scene.step, Step::AskSave);
    }

    #[test]
    fn test_save_then_shutdown() {
        let mut state = state();
        let mut scene = ShutdownScene::new();
        scene.open(&mut state);
        assert_eq!(feed(&mut scene, &mut state, "YES\r"), Flow::Wait);
        assert_eq!(state.saves.list(), vec!["Clippy"]);
        assert_eq!(feed(&mut scene, &mut state, "yes\r"), Flow::goto(MAIN_MENU));
    }

    #[test]
    fn test_cancel_shutdown() {
        let mut state = state();
        let mut scene = ShutdownScene::new();
        scene.open(&mut state);
        feed(&mut scene, &mut state, "no\r");
        let history = &state.seed_system.as_ref().unwrap().message_history;
        assert!(history.all().any(|m| m == "Did not save data."));
        assert_eq!(feed(&mut scene, &mut state, "no\r"), Flow::goto(SEEDOS_CONSOLE));
        assert_eq!(last(&state), "Done!");
        assert!(state.saves.list().is_empty());
    }
}
