use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Backspace,
    Tab,
    Char(char),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a key.
    pub fn from_dom(name: &str) -> Option<Key> {
        let key = match name {
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "Tab" => Key::Tab,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Decode raw terminal data (as delivered by xterm-like emulators) into keys.
    pub fn decode(raw: &str) -> Vec<Key> {
        let mut keys = Vec::new();
        let mut chars = raw.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\x1b' => match chars.peek() {
                    Some('[') | Some('O') => {
                        chars.next();
                        match chars.next() {
                            Some('A') => keys.push(Key::Up),
                            Some('B') => keys.push(Key::Down),
                            Some('C') => keys.push(Key::Right),
                            Some('D') => keys.push(Key::Left),
                            // Unsupported sequence: skip to its final byte.
                            Some(t) if !('@'..='~').contains(&t) => {
                                for t in chars.by_ref() {
                                    if ('@'..='~').contains(&t) {
                                        break;
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                    _ => keys.push(Key::Escape),
                },
                '\r' | '\n' => keys.push(Key::Enter),
                '\x7f' | '\x08' => keys.push(Key::Backspace),
                '\t' => keys.push(Key::Tab),
                c if c.is_control() => {}
                c => keys.push(Key::Char(c)),
            }
        }
        keys
    }

    pub fn is_char(&self, expected: char) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&expected))
    }

    /// Unit step for arrow keys, in (column, row) terms.
    pub fn direction(&self) -> Option<(i32, i32)> {
        match self {
            Key::Up => Some((0, -1)),
            Key::Down => Some((0, 1)),
            Key::Left => Some((-1, 0)),
            Key::Right => Some((1, 0)),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => write!(f, "up"),
            Key::Down => write!(f, "down"),
            Key::Left => write!(f, "left"),
            Key::Right => write!(f, "right"),
            Key::Enter => write!(f, "enter"),
            Key::Escape => write!(f, "escape"),
            Key::Backspace => write!(f, "backspace"),
            Key::Tab => write!(f, "tab"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}
