use std::collections::BTreeSet;

use crate::key::Key;
use crate::progress::JUST_LOADED;
use crate::scene::{Flow, GameState, Scene};
use crate::style::{style, Style};
use crate::widgets::Menu;

use super::{MAIN_MENU, SEEDOS_CONSOLE, SEEDOS_SIGNUP};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Choice {
    Back,
    New,
    Save(String),
}

/// Pick a save to load, or start a new aphid.
pub struct LoginScene {
    choices: Vec<Choice>,
    corrupted: BTreeSet<String>,
    menu: Menu,
}

impl LoginScene {
    pub fn new() -> Self {
        LoginScene {
            choices: Vec::new(),
            corrupted: BTreeSet::new(),
            menu: Menu::new(1, 1, Vec::new()),
        }
    }

    fn build_menu(&mut self, state: &mut GameState) {
        let saves: Vec<String> = state
            .saves
            .list()
            .into_iter()
            .filter(|s| !self.corrupted.contains(s))
            .collect();
        self.choices = vec![Choice::Back];
        if saves.len() <= state.config.max_saves_for_new {
            self.choices.push(Choice::New);
        }
        self.choices.extend(saves.into_iter().map(Choice::Save));
        let labels = self
            .choices
            .iter()
            .map(|c| match c {
                Choice::Back => style("Back to main menu", &[Style::Bold]),
                Choice::New => style("NEW", &[Style::Bold]),
                Choice::Save(name) => name.clone(),
            })
            .collect();
        self.menu = Menu::centered(state.screen.size(), labels);
    }

    fn draw(&self, state: &mut GameState) {
        state.screen.clear();
        let (column, row) = self.menu.position();
        state.screen.cursor_set(column, row.saturating_sub(1));
        state.screen.print("Choose a save:");
        self.menu.draw(&mut state.screen);
    }
}

impl Default for LoginScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LoginScene {
    fn open(&mut self, state: &mut GameState) {
        self.build_menu(state);
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        let selected = key
            .and_then(|k| self.menu.update(k))
            .and_then(|i| self.choices.get(i).cloned());
        match selected {
            Some(Choice::Back) => return Flow::goto(MAIN_MENU),
            Some(Choice::New) => return Flow::goto(SEEDOS_SIGNUP),
            Some(Choice::Save(name)) => match state.saves.load(&name) {
                Ok(data) => {
                    log::info!("loaded save {}", name);
                    let mut system = data.seed_system;
                    system
                        .message_history
                        .set_limit(state.config.message_history_limit);
                    state.seed_system = Some(system);
                    state.progress = data.progress;
                    state.progress.add(JUST_LOADED);
                    return Flow::goto(SEEDOS_CONSOLE);
                }
                Err(e) => {
                    log::warn!("hiding save {}: {}", name, e);
                    self.corrupted.insert(name);
                    self.build_menu(state);
                }
            },
            None => {}
        }
        self.draw(state);
        Flow::Wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::progress::Progress;
    use crate::save::{MemoryStore, SaveData, SaveStore};
    use crate::session::SeedSystem;

    fn state_with(store: MemoryStore) -> GameState {
        let config = Config {
            rng_seed: Some(3),
            max_saves_for_new: 1,
            ..Config::default()
        };
        GameState::new(config, (100, 35), Box::new(store))
    }

    fn saved(name: &str) -> SaveData {
        SaveData {
            seed_system: SeedSystem::new(name, 100),
            progress: Progress::new(),
        }
    }

    #[test]
    fn test_new_hidden_when_too_many_saves() {
        let mut store = MemoryStore::new();
        store.save(&saved("a")).unwrap();
        store.save(&saved("b")).unwrap();
        let mut state = state_with(store);
        let mut scene = LoginScene::new();
        scene.open(&mut state);
        assert_eq!(
            scene.choices,
            vec![Choice::Back, Choice::Save("a".into()), Choice::Save("b".into())]
        );
    }

    #[test]
    fn test_corrupted_save_is_hidden() {
        let mut store = MemoryStore::new();
        store.insert_raw("broken", "%%%");
        let mut state = state_with(store);
        let mut scene = LoginScene::new();
        scene.open(&mut state);
        assert_eq!(scene.choices.len(), 3);
        scene.update(&mut state, Some(Key::Down));
        scene.update(&mut state, Some(Key::Down));
        let flow = scene.update(&mut state, Some(Key::Enter));
        assert_eq!(flow, Flow::Wait);
        assert_eq!(scene.choices, vec![Choice::Back, Choice::New]);
    }

    #[test]
    fn test_loading_flags_just_loaded() {
        let mut store = MemoryStore::new();
        store.save(&saved("a")).unwrap();
        let mut state = state_with(store);
        let mut scene = LoginScene::new();
        scene.open(&mut state);
        scene.update(&mut state, Some(Key::Down));
        scene.update(&mut state, Some(Key::Down));
        let flow = scene.update(&mut state, Some(Key::Enter));
        assert_eq!(flow, Flow::goto(SEEDOS_CONSOLE));
        assert!(state.progress.contains(JUST_LOADED));
        assert_eq!(state.seed_system.as_ref().unwrap().aphid.name, "a");
    }
}
