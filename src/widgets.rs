use crate::key::Key;
use crate::screen::{Screen, TextArea};
use crate::session::MessageHistory;
use crate::style::{style, visible_len, Style};

/// Vertical option list driven by Up/Down/Enter.
#[derive(Debug, Clone)]
pub struct Menu {
    column: u16,
    row: u16,
    options: Vec<String>,
    selected: usize,
}

impl Menu {
    pub fn new(column: u16, row: u16, options: Vec<String>) -> Self {
        Menu {
            column,
            row,
            options,
            selected: 0,
        }
    }

    /// A menu placed in the middle of a `(columns, rows)` screen.
    pub fn centered(size: (u16, u16), options: Vec<String>) -> Self {
        let (column, row) = centered_position(size, &options);
        Self::new(column, row, options)
    }

    pub fn position(&self) -> (u16, u16) {
        (self.column, self.row)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.options.len() {
            self.selected += 1;
        }
    }

    /// Returns the chosen index once Enter is pressed.
    pub fn update(&mut self, key: Key) -> Option<usize> {
        match key {
            Key::Up => self.move_up(),
            Key::Down => self.move_down(),
            Key::Enter if !self.options.is_empty() => return Some(self.selected),
            _ => {}
        }
        None
    }

    pub fn draw(&self, screen: &mut Screen) {
        for (i, option) in self.options.iter().enumerate() {
            screen.cursor_set(self.column, self.row + i as u16);
            if i == self.selected {
                screen.print(&style(&format!("> {}", option), &[Style::BackgroundWhite, Style::Black]));
            } else {
                screen.print(&format!("  {}", option));
            }
        }
    }
}

pub fn centered_position(size: (u16, u16), options: &[String]) -> (u16, u16) {
    let widest = options.iter().map(|o| visible_len(o) + 2).max().unwrap_or(0) as u16;
    let column = size.0.saturating_sub(widest) / 2 + 1;
    let row = size.1.saturating_sub(options.len() as u16) / 2 + 1;
    (column, row)
}

/// Single-line editor. The visible part is clipped to `max_width`.
#[derive(Debug, Clone)]
pub struct TextInput {
    column: u16,
    row: u16,
    max_width: usize,
    buffer: Vec<char>,
    cursor: usize,
}

impl TextInput {
    pub fn new(column: u16, row: u16, max_width: usize) -> Self {
        TextInput {
            column,
            row,
            max_width: max_width.max(1),
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn move_to(&mut self, column: u16, row: u16, max_width: usize) {
        self.column = column;
        self.row = row;
        self.max_width = max_width.max(1);
    }

    /// Feed a key. A finished line is returned on Enter and the input resets.
    pub fn update(&mut self, key: Key) -> Option<String> {
        match key {
            Key::Char(c) => {
                self.buffer.insert(self.cursor, c);
                self.cursor += 1;
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.buffer.remove(self.cursor);
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.buffer.len()),
            Key::Escape => {
                self.buffer.clear();
                self.cursor = 0;
            }
            Key::Enter => {
                let line = self.text();
                self.buffer.clear();
                self.cursor = 0;
                return Some(line);
            }
            _ => {}
        }
        None
    }

    fn window_start(&self) -> usize {
        if self.cursor >= self.max_width {
            self.cursor + 1 - self.max_width
        } else {
            0
        }
    }

    pub fn visible(&self) -> String {
        self.buffer
            .iter()
            .skip(self.window_start())
            .take(self.max_width)
            .collect()
    }

    pub fn draw(&self, screen: &mut Screen) {
        let area = TextArea::new(self.column, self.row, self.max_width as u16, 1, &self.visible());
        screen.draw_text_box(&area, true);
        let offset = (self.cursor - self.window_start()) as u16;
        screen.cursor_set(self.column + offset, self.row);
    }
}

pub type Validator = fn(&str) -> bool;

/// A text input that only yields lines accepted by its validator.
#[derive(Debug, Clone)]
pub struct Prompt {
    input: TextInput,
    validator: Validator,
}

impl Prompt {
    pub fn new(input: TextInput, validator: Validator) -> Self {
        Prompt { input, validator }
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    pub fn update(&mut self, key: Key, history: &mut MessageHistory) -> Option<String> {
        let line = self.input.update(key)?;
        if (self.validator)(&line) {
            Some(line)
        } else {
            history.send_message("Invalid Input");
            None
        }
    }
}

pub fn any_line(_: &str) -> bool {
    true
}

pub fn yes_or_no(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "yes" | "no")
}

pub fn valid_name(line: &str) -> bool {
    !line.trim().is_empty() && !line.contains('\x1b')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_menu_clamps() {
        let mut menu = Menu::new(1, 1, options(&["Start", "Quit"]));
        menu.update(Key::Up);
        assert_eq!(menu.selected, 0);
        menu.update(Key::Down);
        menu.update(Key::Down);
        assert_eq!(menu.selected, 1);
        assert_eq!(menu.update(Key::Enter), Some(1));
        assert_eq!(menu.update(Key::Char('x')), None);
    }

    #[test]
    fn test_centered_position() {
        let opts = options(&["Start", "Quit"]);
        assert_eq!(centered_position((100, 35), &opts), (47, 17));
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new(1, 1, 20);
        for c in "lz".chars() {
            input.update(Key::Char(c));
        }
        input.update(Key::Backspace);
        input.update(Key::Char('s'));
        input.update(Key::Left);
        input.update(Key::Left);
        input.update(Key::Char('>'));
        assert_eq!(input.text(), ">ls");
        assert_eq!(input.update(Key::Enter), Some(">ls".to_string()));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_text_input_escape_clears() {
        let mut input = TextInput::new(1, 1, 20);
        input.update(Key::Char('a'));
        input.update(Key::Escape);
        assert_eq!(input.update(Key::Enter), Some(String::new()));
    }

    #[test]
    fn test_text_input_window() {
        let mut input = TextInput::new(1, 1, 3);
        for c in "abcdef".chars() {
            input.update(Key::Char(c));
        }
        assert_eq!(input.visible(), "ef");
        input.update(Key::Left);
        input.update(Key::Left);
        assert_eq!(input.visible(), "cde");
    }

    #[test]
    fn test_prompt_rejects_invalid() {
        let mut history = MessageHistory::new(10);
        let mut prompt = Prompt::new(TextInput::new(1, 1, 20), yes_or_no);
        for c in "maybe".chars() {
            prompt.update(Key::Char(c), &mut history);
        }
        assert_eq!(prompt.update(Key::Enter, &mut history), None);
        assert_eq!(history.last(), Some("Invalid Input"));
        for c in "Yes".chars() {
            prompt.update(Key::Char(c), &mut history);
        }
        assert_eq!(prompt.update(Key::Enter, &mut history), Some("Yes".to_string()));
    }

    #[test]
    fn test_valid_name() {
        assert!(valid_name("Clippy"));
        assert!(!valid_name("   "));
        assert!(!valid_name("a\x1b[31m"));
    }
}
