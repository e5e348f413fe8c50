use crate::assets;
use crate::console;
use crate::files::Payload;
use crate::key::Key;
use crate::progress::{did_flag, unlock_privilege};
use crate::scene::{Flow, GameState, Scene};
use crate::style::{style, Style};

use super::{without_session, SEEDOS_CONSOLE, SEEDOS_UNLOCK};

/// Runs a clearance sprout: shows its text and raises the aphid's privilege.
pub struct UnlockScene {
    name: Option<String>,
    failed: bool,
}

impl UnlockScene {
    pub fn new() -> Self {
        UnlockScene {
            name: None,
            failed: false,
        }
    }
}

impl Default for UnlockScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for UnlockScene {
    fn open(&mut self, state: &mut GameState) {
        self.name = None;
        let Some(system) = state.seed_system.as_mut() else {
            return;
        };
        let file = system.active_file.clone();
        self.name = file.as_ref().map(|f| f.name.clone());
        let unlock = match file.as_ref().map(|f| &f.payload) {
            Some(Payload::Unlock { text_src, privilege }) => {
                assets::text(text_src).map(|text| (text, *privilege))
            }
            _ => None,
        };
        self.failed = unlock.is_none();
        match unlock {
            Some((text, privilege)) => {
                system.send_messages(text.lines());
                unlock_privilege(system, privilege);
                console::press_any_key(&mut system.message_history);
            }
            None => {
                log::warn!("cannot unlock from {:?}", self.name);
                system.send_messages([style("|An error occurred|", &[Style::Red]), String::new()]);
            }
        }
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        let Some(system) = state.seed_system.as_ref() else {
            return without_session(SEEDOS_UNLOCK);
        };
        if self.failed || key.is_some() {
            return Flow::goto(SEEDOS_CONSOLE);
        }
        state.screen.clear();
        console::display_message_history(&mut state.screen, &system.message_history);
        console::draw_user_prompt(&mut state.screen);
        Flow::Wait
    }

    fn exit(&mut self, state: &mut GameState) {
        if let Some(name) = self.name.take() {
            state.progress.add(did_flag(&name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::files::FileNode;
    use crate::save::MemoryStore;
    use crate::session::SeedSystem;

    fn state_with(file: Option<FileNode>) -> GameState {
        let mut state = GameState::new(Config::default(), (100, 35), Box::new(MemoryStore::new()));
        let mut system = SeedSystem::new("Clippy", 100);
        system.aphid.privilege = 3;
        system.active_file = file;
        state.seed_system = Some(system);
        state
    }

    #[test]
    fn test_clearance_unlocks() {
        let file = FileNode::file(
            "clearance",
            "sprout",
            3,
            Payload::Unlock {
                text_src: "clearance.txt".into(),
                privilege: 4,
            },
        );
        let mut state = state_with(Some(file));
        let mut scene = UnlockScene::new();
        scene.open(&mut state);
        assert_eq!(scene.update(&mut state, None), Flow::Wait);
        assert_eq!(state.seed_system.as_ref().unwrap().aphid.privilege, 4);
        assert_eq!(scene.update(&mut state, Some(Key::Enter)), Flow::goto(SEEDOS_CONSOLE));
        scene.exit(&mut state);
        assert!(state.progress.contains("did_clearance"));
    }

    #[test]
    fn test_wrong_payload_fails() {
        let file = FileNode::file("odd", "sprout", 0, Payload::None);
        let mut state = state_with(Some(file));
        let mut scene = UnlockScene::new();
        scene.open(&mut state);
        assert_eq!(scene.update(&mut state, None), Flow::goto(SEEDOS_CONSOLE));
        assert_eq!(state.seed_system.as_ref().unwrap().aphid.privilege, 3);
        let history = &state.seed_system.as_ref().unwrap().message_history;
        assert!(history.all().any(|m| m.contains("|An error occurred|")));
    }
}
