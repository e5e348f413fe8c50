use crate::key::Key;
use crate::scene::{Flow, GameState, Scene};
use crate::style::{style, Style};
use crate::widgets::Menu;

use super::{QUIT, SEEDOS_LOGIN};

const OPTIONS: [&str; 2] = ["Start", "Quit"];

pub struct MainMenuScene {
    menu: Menu,
}

impl MainMenuScene {
    pub fn new() -> Self {
        MainMenuScene {
            menu: Menu::new(1, 1, Vec::new()),
        }
    }
}

impl Default for MainMenuScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for MainMenuScene {
    fn open(&mut self, state: &mut GameState) {
        let options = OPTIONS.iter().map(|s| s.to_string()).collect();
        self.menu = Menu::centered(state.screen.size(), options);
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        match key.and_then(|k| self.menu.update(k)) {
            Some(0) => return Flow::goto(SEEDOS_LOGIN),
            Some(_) => return Flow::goto(QUIT),
            None => {}
        }
        state.screen.clear();
        let (column, row) = self.menu.position();
        state.screen.cursor_set(column, row.saturating_sub(2));
        state.screen.print(&style("seedOS", &[Style::Bold, Style::Green]));
        self.menu.draw(&mut state.screen);
        Flow::Wait
    }
}

/// Farewell text, then the game stops.
pub struct QuitScene;

impl Scene for QuitScene {
    fn update(&mut self, state: &mut GameState, _key: Option<Key>) -> Flow {
        state.screen.clear();
        state.screen.print(&style("Shutting down...", &[Style::Red]));
        state.screen.cursor_set(1, 2);
        state.screen.print("See you next time!");
        Flow::Quit
    }
}
