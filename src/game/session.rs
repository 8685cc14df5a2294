use super::board::{Board, MoveError};
use super::player::Player;
use crate::ai::RandomSource;
use crate::error::{GameError, SetupError};
use crate::ui::{DisplaySink, InputSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    /// Index of the winning player.
    Win(usize),
    Draw,
}

impl Outcome {
    pub fn is_decided(self) -> bool {
        self != Outcome::Pending
    }
}

/// One game: the board, both players and whose turn it is.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    players: [Player; 2],
    current: usize,
    outcome: Outcome,
    moves_played: usize,
}

impl GameSession {
    /// Start a game on an empty board. The first player moves first.
    pub fn new(players: [Player; 2]) -> Result<Self, SetupError> {
        if players[0].symbol() == players[1].symbol() {
            return Err(SetupError::DuplicateSymbol(players[0].symbol()));
        }

        Ok(GameSession {
            board: Board::new(),
            players,
            current: 0,
            outcome: Outcome::Pending,
            moves_played: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Player to move, or the one who made the deciding move.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_decided(&self) -> bool {
        self.outcome.is_decided()
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Drop the current player's piece in `column` and evaluate the result.
    ///
    /// A win is checked before a draw, so a move that fills the board and
    /// connects four is a win. The turn only passes on while the game is
    /// still pending.
    pub fn commit_move(&mut self, column: usize) -> Result<Outcome, MoveError> {
        if self.is_decided() {
            return Err(MoveError::GameOver);
        }

        let player = &self.players[self.current];
        let row = self.board.place_piece(column, player.symbol())?;
        self.moves_played += 1;
        log::debug!(
            "move {}: {} -> column {} row {}",
            self.moves_played,
            player.label(),
            column,
            row
        );

        if self.board.wins_through(row, column) {
            self.outcome = Outcome::Win(self.current);
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
        } else {
            self.current = (self.current + 1) % 2;
        }

        Ok(self.outcome)
    }

    /// Run turns until the game is decided.
    pub fn play<F, R>(&mut self, frontend: &mut F, rng: &mut R) -> Result<Outcome, GameError>
    where
        F: InputSource + DisplaySink + ?Sized,
        R: RandomSource + ?Sized,
    {
        log::info!(
            "starting game: {} vs {}",
            self.players[0].label(),
            self.players[1].label()
        );

        while !self.is_decided() {
            frontend.render(&self.board.render())?;
            let player = self.current_player();
            frontend.write_line(&format!("{}'s turn.", player.label()))?;

            let column = player.propose_column(&self.board, frontend, rng)?;
            match self.commit_move(column) {
                Ok(_) => {}
                Err(err @ (MoveError::ColumnFull(_) | MoveError::InvalidColumn(_))) => {
                    log::debug!("proposed move rejected: {err}");
                    frontend.write_line(&format!("Move rejected: {err}."))?;
                }
                Err(MoveError::GameOver) => break,
            }
        }

        frontend.render(&self.board.render())?;
        frontend.write_line(&self.result_message())?;
        log::info!("game over after {} moves: {:?}", self.moves_played, self.outcome);

        Ok(self.outcome)
    }

    /// Text describing the outcome.
    pub fn result_message(&self) -> String {
        match self.outcome {
            Outcome::Pending => format!("{} to move.", self.current_player().label()),
            Outcome::Win(index) => format!("{} wins!", self.players[index].label()),
            Outcome::Draw => "It's a draw!".to_string(),
        }
    }
}
