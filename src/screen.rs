use crate::style::{visible_len, wrap_visible};

/// A rectangular region to draw text into. Coordinates are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextArea {
    pub column: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
    pub text: String,
}

impl TextArea {
    pub fn new(column: u16, row: u16, width: u16, height: u16, text: &str) -> Self {
        TextArea {
            column,
            row,
            width,
            height,
            text: text.into(),
        }
    }
}

/// Collects ANSI output for the host; the host drains it with `take`.
pub struct Screen {
    columns: u16,
    rows: u16,
    out: String,
}

impl Screen {
    pub fn new(columns: u16, rows: u16) -> Self {
        Screen {
            columns,
            rows,
            out: String::new(),
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
    }

    pub fn clear(&mut self) {
        self.out.push_str("\x1b[2J\x1b[H");
    }

    pub fn cursor_set(&mut self, column: u16, row: u16) {
        self.out.push_str(&format!("\x1b[{};{}H", row.max(1), column.max(1)));
    }

    pub fn print(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Draw each line of the area's text at its row, clipped to the width.
    /// With `overwrite`, rows are padded to the full width and rows past the
    /// text are blanked.
    pub fn draw_text_box(&mut self, area: &TextArea, overwrite: bool) {
        let lines: Vec<&str> = area.text.split('\n').collect();
        let width = area.width as usize;
        for index in 0..area.height as usize {
            if index >= lines.len() && !overwrite {
                break;
            }
            self.cursor_set(area.column, area.row + index as u16);
            let mut line = match lines.get(index) {
                Some(text) => clip(text, width),
                None => String::new(),
            };
            if overwrite {
                let pad = width.saturating_sub(visible_len(&line));
                line.push_str(&" ".repeat(pad));
            }
            self.out.push_str(&line);
        }
    }

    pub fn draw_rectangle(&mut self, column: u16, row: u16, width: u16, height: u16) {
        if width < 2 || height < 2 {
            return;
        }
        let inner = (width - 2) as usize;
        self.cursor_set(column, row);
        self.out.push_str(&format!("┌{}┐", "─".repeat(inner)));
        for r in 1..height - 1 {
            self.cursor_set(column, row + r);
            self.out.push('│');
            self.cursor_set(column + width - 1, row + r);
            self.out.push('│');
        }
        self.cursor_set(column, row + height - 1);
        self.out.push_str(&format!("└{}┘", "─".repeat(inner)));
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    pub fn peek(&self) -> &str {
        &self.out
    }
}

fn clip(text: &str, width: usize) -> String {
    match wrap_visible(text, width).into_iter().next() {
        Some(first) if visible_len(text) > width => format!("{}\x1b[0m", first),
        Some(first) => first,
        None => String::new(),
    }
}
