use crate::key::Key;
use crate::scene::{Flow, GameState, Scene};
use crate::screen::TextArea;
use crate::widgets::TextInput;

use super::{MAIN_MENU, QUIT};

/// Screen size check before anything else is drawn.
pub struct StartupScene {
    input: TextInput,
}

impl StartupScene {
    pub fn new() -> Self {
        StartupScene {
            input: TextInput::new(3, 3, 20),
        }
    }

    fn draw(&self, state: &mut GameState) {
        let (columns, rows) = state.screen.size();
        let text = format!(
            "Current size: ({}, {}) | Adjust to at least ({}, {}) for the best experience.\n\
             Enter 'y' to continue, 'n' to exit, and any key to reload screen size.\n\
             > ",
            columns, rows, state.config.min_columns, state.config.min_rows
        );
        state.screen.clear();
        state
            .screen
            .draw_text_box(&TextArea::new(1, 1, columns, 3, &text), true);
        self.input.draw(&mut state.screen);
    }
}

impl Default for StartupScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for StartupScene {
    fn open(&mut self, _state: &mut GameState) {
        self.input = TextInput::new(3, 3, 20);
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        if let Some(line) = key.and_then(|k| self.input.update(k)) {
            match line.trim().to_lowercase().as_str() {
                "y" => return Flow::goto(MAIN_MENU),
                "n" => return Flow::goto(QUIT),
                _ => {}
            }
        }
        self.draw(state);
        Flow::Wait
    }
}
