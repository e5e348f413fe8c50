//! Console layout: message history on top, boxed prompt at the bottom.

use crate::screen::{Screen, TextArea};
use crate::session::MessageHistory;
use crate::style::{style, wrap_visible, Style};
use crate::widgets::{Menu, Prompt, TextInput, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// (columns, rows) of the message area.
    pub output: (u16, u16),
    /// (columns, rows) of the prompt box.
    pub input: (u16, u16),
}

pub fn layout(size: (u16, u16)) -> Layout {
    let (w, h) = (size.0 as i32, size.1 as i32);
    Layout {
        output: (10.max(w.min(w - 20)) as u16, 1.max(h - 4) as u16),
        input: (10.max(80.min(w - 2)) as u16, 3),
    }
}

/// The last lines of the history that fit the output area, oldest first.
/// Long messages are wrapped to the output width; short histories are
/// padded with blank lines at the top.
pub fn viewport(history: &MessageHistory, size: (u16, u16)) -> Vec<String> {
    let (width, height) = layout(size).output;
    let height = height as usize;
    let mut lines: Vec<String> = Vec::with_capacity(height);
    for message in history.visible().rev() {
        let mut pieces = wrap_visible(message, width as usize);
        while let Some(piece) = pieces.pop() {
            if lines.len() == height {
                break;
            }
            lines.push(piece);
        }
        if lines.len() == height {
            break;
        }
    }
    lines.resize(height, String::new());
    lines.reverse();
    lines
}

pub fn display_message_history(screen: &mut Screen, history: &MessageHistory) {
    let size = screen.size();
    let (width, height) = layout(size).output;
    let text = viewport(history, size).join("\n");
    screen.draw_text_box(&TextArea::new(4, 2, width, height, &text), true);
}

pub fn draw_user_prompt(screen: &mut Screen) {
    let (_, rows) = screen.size();
    let (width, height) = layout(screen.size()).input;
    screen.draw_rectangle(1, rows.saturating_sub(height - 1), width, height);
}

/// A console prompt positioned inside the prompt box.
pub fn prompt(size: (u16, u16), validator: Validator) -> Prompt {
    let (width, _) = layout(size).input;
    Prompt::new(
        TextInput::new(3, size.1.saturating_sub(1), width.saturating_sub(4) as usize),
        validator,
    )
}

/// Redraw the whole console: history, prompt box and the prompt's text.
pub fn draw(screen: &mut Screen, history: &MessageHistory, prompt: &Prompt) {
    screen.clear();
    display_message_history(screen, history);
    draw_user_prompt(screen);
    prompt.input().draw(screen);
}

/// A menu placed just above the prompt, over the bottom of the history.
pub fn inline_menu(size: (u16, u16), history: &mut MessageHistory, options: Vec<String>) -> Menu {
    let (_, height) = layout(size).output;
    // Blank lines reserve the rows the menu is drawn over.
    history.send_messages(std::iter::repeat("").take(options.len() + 2));
    let row = (height + 2).saturating_sub(options.len() as u16 + 1);
    Menu::new(4, row.max(2), options)
}

pub fn press_any_key(history: &mut MessageHistory) {
    history.send_message(&style(
        "Press any key to continue",
        &[Style::BackgroundYellow, Style::Black, Style::RapidBlink],
    ));
}
