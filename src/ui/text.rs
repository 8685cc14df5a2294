use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use super::{DisplaySink, InputSource};
use crate::game::{Grid, COLS};

/// Line-oriented front-end over any reader and writer (stdin/stdout in the
/// binary, byte buffers in tests).
pub struct TextFrontend<R, W> {
    reader: R,
    writer: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> TextFrontend<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        TextFrontend {
            reader,
            writer,
            clear_screen: false,
        }
    }

    /// Clear the terminal before every board render.
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> InputSource for TextFrontend<R, W> {
    /// Undecodable bytes come back as U+FFFD, so a garbled line is a bad
    /// answer to re-prompt, not an I/O failure.
    fn read_choice(&mut self) -> io::Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        let trimmed = line.trim_end_matches(['\r', '\n']);
        Ok(Some(trimmed.to_string()))
    }
}

impl<R: BufRead, W: Write> DisplaySink for TextFrontend<R, W> {
    fn render(&mut self, grid: &Grid) -> io::Result<()> {
        if self.clear_screen {
            execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.writer.write_all(format_grid(grid).as_bytes())?;
        self.writer.flush()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{text}")?;
        self.writer.flush()
    }
}

/// Plain-text board: column numbers, one `| X | O |   |` line per row and a
/// closing rule.
pub fn format_grid(grid: &Grid) -> String {
    let mut out = String::new();

    for col in 0..COLS {
        out.push_str(&format!("  {col} "));
    }
    out.push('\n');

    for row in grid {
        out.push('|');
        for cell in row {
            out.push(' ');
            out.push(cell.glyph());
            out.push_str(" |");
        }
        out.push('\n');
    }

    out.push('+');
    out.push_str(&"---+".repeat(COLS));
    out.push('\n');
    out
}
