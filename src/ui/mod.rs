//! Terminal front-ends: the collaborator traits the game talks to, a
//! line-oriented text front-end and a full-screen ratatui front-end.

mod game_view;
pub mod text;
pub mod tui;

use std::io;

use crate::game::Grid;

pub use text::TextFrontend;
pub use tui::TuiFrontend;

/// Where raw player answers come from.
pub trait InputSource {
    /// Read one raw answer. `Ok(None)` means the input is exhausted.
    fn read_choice(&mut self) -> io::Result<Option<String>>;

    /// Read an answer to a column prompt. Front-ends with a column cursor
    /// may answer with it; everyone else reads a plain answer.
    fn read_column_choice(&mut self) -> io::Result<Option<String>> {
        self.read_choice()
    }
}

/// Where board snapshots and status messages go.
pub trait DisplaySink {
    fn render(&mut self, grid: &Grid) -> io::Result<()>;

    fn write_line(&mut self, text: &str) -> io::Result<()>;
}
