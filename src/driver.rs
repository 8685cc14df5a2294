//! Session driver: sets up players, runs games and offers rematches.

use std::fmt;

use crate::ai::RandomSource;
use crate::config::{AppConfig, GameMode};
use crate::error::GameError;
use crate::game::{GameSession, Outcome, Player, Symbol};
use crate::ui::{DisplaySink, InputSource};

/// Wins per seat and draws across the games of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub names: [String; 2],
    pub wins: [u32; 2],
    pub draws: u32,
}

impl Scoreboard {
    pub fn games(&self) -> u32 {
        self.wins[0] + self.wins[1] + self.draws
    }

    /// Count a finished game. Seat names follow the latest game.
    pub fn record(&mut self, players: &[Player; 2], outcome: Outcome) {
        if self.names[0] != players[0].name() || self.names[1] != players[1].name() {
            *self = Scoreboard {
                names: [players[0].name().to_string(), players[1].name().to_string()],
                ..Default::default()
            };
        }
        match outcome {
            Outcome::Win(index) => self.wins[index] += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Pending => {}
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {} {} - {} {} ({} draw{})",
            self.names[0],
            self.wins[0],
            self.wins[1],
            self.names[1],
            self.draws,
            if self.draws == 1 { "" } else { "s" }
        )
    }
}

/// Parse the game mode answer: `1` plays the computer, `2` two people.
pub fn parse_mode(raw: &str) -> Option<GameMode> {
    match raw.trim() {
        "1" => Some(GameMode::VsAi),
        "2" => Some(GameMode::TwoPlayer),
        _ => None,
    }
}

fn is_yes(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Drives whole sessions over a front-end and a random source.
pub struct SessionDriver<F, R> {
    frontend: F,
    rng: R,
    config: AppConfig,
}

impl<F, R> SessionDriver<F, R>
where
    F: InputSource + DisplaySink,
    R: RandomSource,
{
    pub fn new(frontend: F, rng: R, config: AppConfig) -> Self {
        SessionDriver {
            frontend,
            rng,
            config,
        }
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Play games until the user declines a rematch.
    pub fn run(&mut self) -> Result<Scoreboard, GameError> {
        let mut scoreboard = Scoreboard::default();

        loop {
            let mode = match self.config.game.mode {
                Some(mode) => mode,
                None => self.ask_mode()?,
            };
            let players = self.setup_players(mode)?;

            let mut session = GameSession::new(players)?;
            let outcome = session.play(&mut self.frontend, &mut self.rng)?;
            scoreboard.record(session.players(), outcome);
            self.frontend.write_line(&scoreboard.to_string())?;

            if !self.config.game.play_again || !self.ask_play_again()? {
                break;
            }
        }

        log::info!("session finished after {} games", scoreboard.games());
        Ok(scoreboard)
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        self.frontend.write_line(prompt)?;
        self.frontend.read_choice()?.ok_or(GameError::InputClosed)
    }

    fn ask_mode(&mut self) -> Result<GameMode, GameError> {
        loop {
            let raw = self.ask("Choose a game mode: 1 = against the computer, 2 = two players")?;
            match parse_mode(&raw) {
                Some(mode) => return Ok(mode),
                None => self
                    .frontend
                    .write_line(&format!("'{}' is not a game mode, enter 1 or 2.", raw.trim()))?,
            }
        }
    }

    fn ask_name(&mut self, configured: Option<String>, seat: usize) -> Result<String, GameError> {
        if let Some(name) = configured {
            return Ok(name);
        }
        let raw = self.ask(&format!("Name for player {seat}:"))?;
        let name = raw.trim();
        if name.is_empty() {
            Ok(format!("Player {seat}"))
        } else {
            Ok(name.to_string())
        }
    }

    fn setup_players(&mut self, mode: GameMode) -> Result<[Player; 2], GameError> {
        let first = self.ask_name(self.config.game.player_one.clone(), 1)?;
        let second = match mode {
            GameMode::VsAi => Player::random_ai(Symbol::O, self.config.ai.name.clone()),
            GameMode::TwoPlayer => {
                let name = self.ask_name(self.config.game.player_two.clone(), 2)?;
                Player::human(Symbol::O, name)
            }
        };
        Ok([Player::human(Symbol::X, first), second])
    }

    fn ask_play_again(&mut self) -> Result<bool, GameError> {
        let raw = self.ask("Play again? (y/n)")?;
        Ok(is_yes(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedFrontend, ScriptedRandom};

    type ScriptedDriver = SessionDriver<ScriptedFrontend, ScriptedRandom>;

    fn driver(answers: &[&str], config: AppConfig) -> ScriptedDriver {
        // The AI always answers in column 6
        SessionDriver::new(ScriptedFrontend::new(answers), ScriptedRandom::new(&[6]), config)
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("1"), Some(GameMode::VsAi));
        assert_eq!(parse_mode(" 2 "), Some(GameMode::TwoPlayer));
        assert_eq!(parse_mode("3"), None);
        assert_eq!(parse_mode(""), None);
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_single_game_against_ai() {
        let answers = ["x", "1", "Ada", "0", "0", "0", "0", "n"];
        let mut driver = driver(&answers, AppConfig::default());

        let score = driver.run().unwrap();
        assert_eq!(score.names, ["Ada".to_string(), "Computer".to_string()]);
        assert_eq!(score.wins, [1, 0]);
        assert_eq!(score.games(), 1);
        let frontend = driver.frontend();
        assert!(frontend.saw_line("'x' is not a game mode"));
        assert!(frontend.saw_line("Ada (X) wins!"));
        assert!(frontend.saw_line("Score: Ada 1 - 0 Computer (0 draws)"));
        assert_eq!(frontend.remaining(), 0);
    }

    #[test]
    fn test_rematch_two_players_with_default_names() {
        // Game 1: player 1 wins in column 0. Game 2: player 2 wins in column 1.
        let answers = [
            "2", "", "", "0", "1", "0", "1", "0", "1", "0", "yes",
            "2", "", "", "0", "1", "0", "1", "0", "1", "5", "1", "n",
        ];
        let mut driver = driver(&answers, AppConfig::default());

        let score = driver.run().unwrap();
        assert_eq!(score.names, ["Player 1".to_string(), "Player 2".to_string()]);
        assert_eq!(score.wins, [1, 1]);
        assert_eq!(score.draws, 0);
        assert!(driver.frontend().saw_line("Player 2 (O) wins!"));
    }

    #[test]
    fn test_configured_setup_skips_prompts() {
        let mut config = AppConfig::default();
        config.game.mode = Some(GameMode::VsAi);
        config.game.player_one = Some("Ada".into());
        config.game.play_again = false;
        config.ai.name = "Robot".into();
        let mut driver = driver(&["0", "0", "0", "0"], config);

        let score = driver.run().unwrap();
        assert_eq!(score.names[1], "Robot");
        assert_eq!(score.wins, [1, 0]);
        assert!(!driver.frontend().saw_line("Play again?"));
        assert!(!driver.frontend().saw_line("Choose a game mode"));
    }

    #[test]
    fn test_closed_input_propagates() {
        let mut driver = driver(&["1", "Ada", "3"], AppConfig::default());
        assert!(matches!(driver.run(), Err(GameError::InputClosed)));
    }

    #[test]
    fn test_scoreboard_resets_when_names_change() {
        let ada = [Player::human(Symbol::X, "Ada"), Player::human(Symbol::O, "Bob")];
        let eve = [Player::human(Symbol::X, "Eve"), Player::human(Symbol::O, "Bob")];
        let mut score = Scoreboard::default();

        score.record(&ada, Outcome::Win(0));
        score.record(&ada, Outcome::Draw);
        assert_eq!(score.to_string(), "Score: Ada 1 - 0 Bob (1 draw)");

        score.record(&eve, Outcome::Win(1));
        assert_eq!(score.wins, [0, 1]);
        assert_eq!(score.draws, 0);
        assert_eq!(score.names[0], "Eve");
    }
}
