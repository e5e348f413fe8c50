use crate::assets;
use crate::files::Payload;
use crate::key::Key;
use crate::progress::read_flag;
use crate::scene::{Flow, GameState, Scene};
use crate::screen::TextArea;
use crate::style::{style, Style};

use super::{without_session, SEEDOS_CONSOLE, SEEDOS_LOOK};

/// Scrollable reader for `.txt` files.
pub struct LookScene {
    lines: Vec<String>,
    index: usize,
    name: Option<String>,
}

impl LookScene {
    pub fn new() -> Self {
        LookScene {
            lines: Vec::new(),
            index: 0,
            name: None,
        }
    }

    fn page_height(rows: u16) -> usize {
        rows.saturating_sub(5).max(1) as usize
    }

    fn max_index(&self, rows: u16) -> usize {
        self.lines.len().saturating_sub(Self::page_height(rows))
    }

    fn draw(&self, state: &mut GameState) {
        let (columns, rows) = state.screen.size();
        let height = Self::page_height(rows);
        let page: Vec<&str> = self
            .lines
            .iter()
            .skip(self.index)
            .take(height)
            .map(|s| s.as_str())
            .collect();
        state.screen.clear();
        state.screen.draw_text_box(
            &TextArea::new(2, 2, columns.saturating_sub(4), height as u16, &page.join("\n")),
            true,
        );
        let hint = format!(
            "{}, {}",
            style("Up/Down to scroll through lines", &[Style::Yellow]),
            style("q to quit", &[Style::Red]),
        );
        state.screen.draw_text_box(
            &TextArea::new(2, rows.saturating_sub(3).max(1), columns.saturating_sub(4), 1, &hint),
            true,
        );
    }
}

impl Default for LookScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LookScene {
    fn open(&mut self, state: &mut GameState) {
        self.index = 0;
        self.lines.clear();
        self.name = None;
        let Some(system) = state.seed_system.as_mut() else {
            return;
        };
        let file = system.active_file.clone();
        self.name = file.as_ref().map(|f| f.name.clone());
        let text = match file {
            Some(file) => match &file.payload {
                Payload::Text { text_src } => match assets::text(text_src) {
                    Some(text) => text.to_string(),
                    None => {
                        log::warn!("missing text asset {}", text_src);
                        "File Corrupted".to_string()
                    }
                },
                _ => {
                    log::warn!("{} has no text to show", file.name);
                    "File Corrupted".to_string()
                }
            },
            None => "Nothing's here...".to_string(),
        };
        self.lines = text.lines().map(|l| l.to_string()).collect();
        if let Some(name) = &self.name {
            system.send_messages([format!("Opening: {}", name), style("Done!", &[Style::Green])]);
        }
    }

    fn update(&mut self, state: &mut GameState, key: Option<Key>) -> Flow {
        if state.seed_system.is_none() {
            return without_session(SEEDOS_LOOK);
        }
        let (_, rows) = state.screen.size();
        match key {
            Some(Key::Up) => self.index = self.index.saturating_sub(1),
            Some(Key::Down) => self.index = (self.index + 1).min(self.max_index(rows)),
            Some(k) if k.is_char('q') => return Flow::goto(SEEDOS_CONSOLE),
            _ => {}
        }
        self.draw(state);
        Flow::Wait
    }

    fn exit(&mut self, state: &mut GameState) {
        if let Some(name) = self.name.take() {
            state.progress.add(read_flag(&name));
        }
    }
}
