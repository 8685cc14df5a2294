//! Core Connect Four logic: the board with its win detection, players as
//! tagged move sources, and the turn-taking game session.

mod board;
mod player;
mod session;

pub use board::{Board, Cell, Grid, MoveError, Symbol, COLS, CONNECT, ROWS};
pub use player::{parse_column, Player, PlayerKind};
pub use session::{GameSession, Outcome};
