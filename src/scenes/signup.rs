use crate::console;
use crate::key::Key;
use crate::progress::{JUST_LOADED, NEW_USER};
use crate::save::{save_status, SaveData};
use crate::scene::{Flow, GameState, Scene};
use crate::session::{Aphid, SeedSystem};
use crate::style::{style, Style};
use crate::widgets::{valid_name, Menu, Prompt};

use super::{without_session, SEEDOS_CONSOLE, SEEDOS_SIGNUP};

const SAVE_OPTIONS: [&str; 2] = ["Yes", "No need, I'm beating this in one go"];

const BOOT_MESSAGES: [&str; 12] = [
    "Initializing seedOS ecosystem, this may take a while...",
    "Polishing tools... ",
    "Plucking weeds...",
    "Digging holes...",
    "Planting the seed drive...",
    "Feeding the APHID...",
    "Refilling nectar...",
    "Spinning webs...",
    "Letting in sun...",
    "Watching grass grow...",
    "Building ShellSpace...",
    "Done!",
];

enum Step {
    Name(Prompt),
    SaveChoice(Menu),
    PressKey,
}

/// New aphid: name it, optionally save, watch it boot.
pub struct SignupScene {
    step: Step,
}

impl SignupScene {
    pub fn new() -> Self {
        SignupScene {
            step: Step::PressKey,
        }
    }

    fn draw(&self, state: &mut GameState) {
        let Some(system) = state.seed_system.as_ref() else {
            return;
        };
        match &self.step {
            Step::Name(prompt) => console::draw(&mut state.screen, &system.message_history, prompt),
            Step::SaveChoice(menu) => {
                state.screen.clear();
                console::display_message_history(&mut state.screen, &system.message_history);
                console::draw_user_prompt(&mut state.screen);
                menu.draw(&mut state.screen);
            }
            Step::PressKey => {
                state.screen.clear();
                console::display_message_history(&mut state.screen, &system.message_history);
                console::draw_user_prompt(&mut state.screen);
            }
        }
    }
}

impl Default for SignupScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for SignupScene {
    fn open(&mut self, state: &mut GameState) {
        state.progress.clear();
        let mut system = SeedSystem::new("", state.config.message_history_limit);
        system.send_messages([
            "Installing seedOS...".to_string(),
            "Hatching APHID...".to_string(),
            style("Done!", &[Style::Green]),
            "Enter your name:".to_string(),
        ]);
        state.seed_system = Some(system);
        self.step = Step::Name(console::prompt(state.screen.size(), valid_name));
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        let size = state.screen.size();
        let Some(system) = state.seed_system.as_mut() else {
            return without_session(SEEDOS_SIGNUP);
        };
        if let Some(key) = key {
            match &mut self.step {
                Step::Name(prompt) => {
                    if let Some(name) = prompt.update(key, &mut system.message_history) {
                        let name = name.trim();
                        system.aphid = Aphid::new(name);
                        log::info!("registered aphid {}", name);
                        system.send_messages([
                            style(&format!("Successfully registered APHID: {}", name), &[Style::Green]),
                            "Save game data to file (this will overwrite existing files of the same name)?"
                                .to_string(),
                        ]);
                        let options = SAVE_OPTIONS.iter().map(|s| s.to_string()).collect();
                        self.step = Step::SaveChoice(console::inline_menu(
                            size,
                            &mut system.message_history,
                            options,
                        ));
                    }
                }
                Step::SaveChoice(menu) => {
                    if let Some(choice) = menu.update(key) {
                        let choice = choice.min(SAVE_OPTIONS.len() - 1);
                        system.send_message(SAVE_OPTIONS[choice]);
                        if choice == 0 {
                            // Saved before `exit` flags the new user, so flag the copy here.
                            let mut progress = state.progress.clone();
                            progress.add(NEW_USER);
                            let data = SaveData {
                                seed_system: system.clone(),
                                progress,
                            };
                            let status = save_status(state.saves.as_mut(), &data);
                            system.send_messages([status.as_str(), "Starting SeedOS..."]);
                        }
                        system.send_messages(BOOT_MESSAGES);
                        console::press_any_key(&mut system.message_history);
                        self.step = Step::PressKey;
                    }
                }
                Step::PressKey => return Flow::goto(SEEDOS_CONSOLE),
            }
        }
        self.draw(state);
        Flow::Wait
    }

    fn exit(&mut self, state: &mut GameState) {
        state.progress.add(JUST_LOADED);
        state.progress.add(NEW_USER);
    }
}
