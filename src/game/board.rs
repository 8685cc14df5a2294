use std::fmt;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning run.
pub const CONNECT: usize = 4;

/// (row, col) steps for the four axes: horizontal, vertical, diagonal `\`
/// and diagonal `/`.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Piece marker of one of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Get the other symbol
    pub fn other(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Piece(Symbol),
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Piece(symbol) => symbol.glyph(),
        }
    }
}

/// Read-only snapshot of the cells, row 0 on top.
pub type Grid = [[Cell; COLS]; ROWS];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} does not exist (choose 0-{max})", max = COLS - 1)]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: Grid,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Copy of the current cells for display.
    pub fn render(&self) -> Grid {
        self.cells
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Columns that can still take a piece, left to right.
    pub fn open_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn place_piece(&mut self, col: usize, symbol: Symbol) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::InvalidColumn(col));
        }

        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)
            .ok_or(MoveError::ColumnFull(col))?;

        self.cells[row][col] = Cell::Piece(symbol);
        Ok(row)
    }

    /// Every column is capped, so no cell is left (gravity keeps columns
    /// contiguous).
    pub fn is_full(&self) -> bool {
        self.cells[0].iter().all(|&cell| cell != Cell::Empty)
    }

    /// Scan every cell holding `symbol` in all four directions for a run of
    /// [`CONNECT`].
    pub fn check_for_win(&self, symbol: Symbol) -> bool {
        let target = Cell::Piece(symbol);
        (0..ROWS).any(|row| {
            (0..COLS).any(|col| {
                self.cells[row][col] == target
                    && DIRECTIONS
                        .iter()
                        .any(|&(dr, dc)| self.count_from(row, col, dr, dc, target) >= CONNECT)
            })
        })
    }

    /// Check if the piece at (row, col) sits on a winning line.
    ///
    /// Only the four lines through that cell are examined, so this is the
    /// cheap check after a drop: for the piece just placed it agrees with
    /// [`Board::check_for_win`] as long as the previous position held no win.
    pub fn wins_through(&self, row: usize, col: usize) -> bool {
        let cell = self.get(row, col);
        if cell == Cell::Empty {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            // The origin is counted by both walks
            let run = self.count_from(row, col, dr, dc, cell)
                + self.count_from(row, col, -dr, -dc, cell)
                - 1;
            run >= CONNECT
        })
    }

    /// Consecutive `target` cells starting at (row, col) and stepping by
    /// (dr, dc), stopping after [`CONNECT`] matches.
    fn count_from(&self, row: usize, col: usize, dr: isize, dc: isize, target: Cell) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize, col as isize);

        while count < CONNECT
            && (0..ROWS as isize).contains(&r)
            && (0..COLS as isize).contains(&c)
            && self.cells[r as usize][c as usize] == target
        {
            count += 1;
            r += dr;
            c += dc;
        }

        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
