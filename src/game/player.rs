use super::board::{Board, Symbol, COLS};
use crate::ai::RandomSource;
use crate::error::{ColumnParseError, GameError};
use crate::ui::{DisplaySink, InputSource};

/// How a player chooses columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    RandomAi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    symbol: Symbol,
    name: String,
    kind: PlayerKind,
}

impl Player {
    pub fn new(symbol: Symbol, name: impl Into<String>, kind: PlayerKind) -> Self {
        Player {
            symbol,
            name: name.into(),
            kind,
        }
    }

    pub fn human(symbol: Symbol, name: impl Into<String>) -> Self {
        Self::new(symbol, name, PlayerKind::Human)
    }

    pub fn random_ai(symbol: Symbol, name: impl Into<String>) -> Self {
        Self::new(symbol, name, PlayerKind::RandomAi)
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Get player name for display
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Name followed by the piece glyph, e.g. `Ada (X)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }

    /// Propose a column that is open on `board`. The board is not touched;
    /// committing the move is up to the caller.
    pub fn propose_column<F, R>(
        &self,
        board: &Board,
        frontend: &mut F,
        rng: &mut R,
    ) -> Result<usize, GameError>
    where
        F: InputSource + DisplaySink + ?Sized,
        R: RandomSource + ?Sized,
    {
        match self.kind {
            PlayerKind::Human => self.ask_human(board, frontend),
            PlayerKind::RandomAi => self.pick_random(board, rng),
        }
    }

    /// Prompt until the answer names an open column.
    pub fn ask_human<F>(&self, board: &Board, frontend: &mut F) -> Result<usize, GameError>
    where
        F: InputSource + DisplaySink + ?Sized,
    {
        loop {
            frontend.write_line(&format!(
                "{}, choose a column (0-{}):",
                self.label(),
                COLS - 1
            ))?;

            let raw = frontend.read_column_choice()?.ok_or(GameError::InputClosed)?;
            match parse_column(&raw) {
                Ok(col) if board.is_column_full(col) => {
                    frontend.write_line(&format!("Column {col} is full, pick another one."))?;
                }
                Ok(col) => return Ok(col),
                Err(err) => {
                    log::debug!("rejected column choice {raw:?}: {err}");
                    frontend.write_line(&format!("Invalid choice: {err}."))?;
                }
            }
        }
    }

    /// Draw columns until one is open. Terminates with probability 1 as long
    /// as any column is open.
    pub fn pick_random<R>(&self, board: &Board, rng: &mut R) -> Result<usize, GameError>
    where
        R: RandomSource + ?Sized,
    {
        if board.is_full() {
            return Err(GameError::NoLegalMove);
        }

        loop {
            let col = rng.next_int(0, COLS);
            if !board.is_column_full(col) {
                return Ok(col);
            }
        }
    }
}

/// Parse a raw answer into a column index in `0..COLS`.
pub fn parse_column(raw: &str) -> Result<usize, ColumnParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ColumnParseError::Empty);
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| ColumnParseError::NotANumber(trimmed.to_string()))?;

    if (0..COLS as i64).contains(&value) {
        Ok(value as usize)
    } else {
        Err(ColumnParseError::OutOfRange(value))
    }
}
