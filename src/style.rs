//! ANSI SGR styling for console text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Reset,
    Bold,
    Dim,
    Underline,
    RapidBlink,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BackgroundBlack,
    BackgroundRed,
    BackgroundGreen,
    BackgroundYellow,
    BackgroundBlue,
    BackgroundMagenta,
    BackgroundCyan,
    BackgroundWhite,
}

impl Style {
    pub fn code(self) -> &'static str {
        match self {
            Style::Reset => "\x1b[0m",
            Style::Bold => "\x1b[1m",
            Style::Dim => "\x1b[2m",
            Style::Underline => "\x1b[4m",
            Style::RapidBlink => "\x1b[6m",
            Style::Black => "\x1b[30m",
            Style::Red => "\x1b[31m",
            Style::Green => "\x1b[32m",
            Style::Yellow => "\x1b[33m",
            Style::Blue => "\x1b[34m",
            Style::Magenta => "\x1b[35m",
            Style::Cyan => "\x1b[36m",
            Style::White => "\x1b[37m",
            Style::BackgroundBlack => "\x1b[40m",
            Style::BackgroundRed => "\x1b[41m",
            Style::BackgroundGreen => "\x1b[42m",
            Style::BackgroundYellow => "\x1b[43m",
            Style::BackgroundBlue => "\x1b[44m",
            Style::BackgroundMagenta => "\x1b[45m",
            Style::BackgroundCyan => "\x1b[46m",
            Style::BackgroundWhite => "\x1b[47m",
        }
    }
}

/// Wrap `text` in the given styles followed by a reset.
pub fn style(text: &str, styles: &[Style]) -> String {
    let mut out = String::with_capacity(text.len() + styles.len() * 5 + 4);
    for s in styles {
        out.push_str(s.code());
    }
    out.push_str(text);
    out.push_str(Style::Reset.code());
    out
}

/// Remove CSI escape sequences, leaving only the printable text.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                for t in chars.by_ref() {
                    if ('@'..='~').contains(&t) {
                        break;
                    }
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}

pub fn visible_len(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

/// Split `text` into pieces that are each at most `width` printable chars.
/// Escape sequences stay attached to the piece they were found in.
pub fn wrap_visible(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            current.push(c);
            if chars.peek() == Some(&'[') {
                current.push('[');
                chars.next();
                for t in chars.by_ref() {
                    current.push(t);
                    if ('@'..='~').contains(&t) {
                        break;
                    }
                }
            }
            continue;
        }
        if count == width {
            pieces.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    pieces.push(current);
    pieces
}
