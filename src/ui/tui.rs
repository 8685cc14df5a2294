use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::game_view::{self, ViewState};
use super::{DisplaySink, InputSource};
use crate::game::{Grid, COLS};

/// What a key press means to a pending answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Continue,
    Submit(String),
    Quit,
}

/// Apply a key press to the view state.
///
/// Enter submits the typed answer. With nothing typed it submits the selected
/// column at a column prompt and a blank answer anywhere else.
pub(crate) fn handle_key(view: &mut ViewState, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Left => {
            view.selected_column = view.selected_column.saturating_sub(1);
            KeyAction::Continue
        }
        KeyCode::Right => {
            if view.selected_column + 1 < COLS {
                view.selected_column += 1;
            }
            KeyAction::Continue
        }
        KeyCode::Enter => {
            if !view.input.is_empty() {
                KeyAction::Submit(std::mem::take(&mut view.input))
            } else if view.column_prompt {
                KeyAction::Submit(view.selected_column.to_string())
            } else {
                KeyAction::Submit(String::new())
            }
        }
        KeyCode::Backspace => {
            view.input.pop();
            KeyAction::Continue
        }
        KeyCode::Char(c) => {
            view.input.push(c);
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

/// Feed keys from `next_key` through `handle_key` until one submits or quits.
/// `next_key` returns `Ok(None)` when no key arrived yet.
pub(crate) fn collect_answer<K>(
    view: &mut ViewState,
    column_prompt: bool,
    mut next_key: K,
) -> io::Result<Option<String>>
where
    K: FnMut(&ViewState) -> io::Result<Option<KeyEvent>>,
{
    view.column_prompt = column_prompt;
    let answer = loop {
        let key = match next_key(view) {
            Ok(Some(key)) => key,
            Ok(None) => continue,
            Err(err) => break Err(err),
        };
        match handle_key(view, key) {
            KeyAction::Continue => {}
            KeyAction::Submit(answer) => break Ok(Some(answer)),
            KeyAction::Quit => break Ok(None),
        }
    };
    view.column_prompt = false;
    answer
}

/// Turns the `log` facade off until dropped. Log lines written to stderr
/// would land on top of the alternate screen.
struct LogPause {
    previous: LevelFilter,
}

impl LogPause {
    fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(LevelFilter::Off);
        LogPause { previous }
    }
}

impl Drop for LogPause {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

/// Full-screen front-end. Owns the terminal in raw mode on the alternate
/// screen until dropped.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    view: ViewState,
    _log_pause: LogPause,
}

impl TuiFrontend {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(TuiFrontend {
            terminal,
            view: ViewState::new(),
            _log_pause: LogPause::new(),
        })
    }

    fn draw(&mut self) -> io::Result<()> {
        let view = &self.view;
        self.terminal.draw(|f| game_view::render(f, view))?;
        Ok(())
    }

    fn read_answer(&mut self, column_prompt: bool) -> io::Result<Option<String>> {
        let terminal = &mut self.terminal;
        collect_answer(&mut self.view, column_prompt, |view| {
            terminal.draw(|f| game_view::render(f, view))?;

            if !event::poll(Duration::from_millis(100))? {
                return Ok(None);
            }
            match event::read()? {
                Event::Key(key) => Ok(Some(key)),
                _ => Ok(None),
            }
        })
    }
}

impl InputSource for TuiFrontend {
    fn read_choice(&mut self) -> io::Result<Option<String>> {
        self.read_answer(false)
    }

    fn read_column_choice(&mut self) -> io::Result<Option<String>> {
        self.read_answer(true)
    }
}

impl DisplaySink for TuiFrontend {
    fn render(&mut self, grid: &Grid) -> io::Result<()> {
        self.view.grid = *grid;
        self.draw()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.view.push_message(text);
        self.draw()
    }
}

impl Drop for TuiFrontend {
    // Restore terminal, even on error
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::driver::SessionDriver;
    use crate::testing::ScriptedRandom;
    use std::collections::VecDeque;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Key presses played through `collect_answer`, no terminal attached.
    struct KeyScript {
        view: ViewState,
        keys: VecDeque<KeyEvent>,
        lines: Vec<String>,
    }

    impl KeyScript {
        fn new(keys: &[KeyCode]) -> Self {
            KeyScript {
                view: ViewState::new(),
                keys: keys.iter().map(|&code| press(code)).collect(),
                lines: Vec::new(),
            }
        }

        fn answer(&mut self, column_prompt: bool) -> io::Result<Option<String>> {
            let keys = &mut self.keys;
            collect_answer(&mut self.view, column_prompt, |_| {
                keys.pop_front()
                    .map(Some)
                    .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
            })
        }
    }

    impl InputSource for KeyScript {
        fn read_choice(&mut self) -> io::Result<Option<String>> {
            self.answer(false)
        }

        fn read_column_choice(&mut self) -> io::Result<Option<String>> {
            self.answer(true)
        }
    }

    impl DisplaySink for KeyScript {
        fn render(&mut self, grid: &Grid) -> io::Result<()> {
            self.view.grid = *grid;
            Ok(())
        }

        fn write_line(&mut self, text: &str) -> io::Result<()> {
            self.lines.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_arrows_move_selection_within_bounds() {
        let mut view = ViewState::new();
        assert_eq!(view.selected_column, 3);

        for _ in 0..10 {
            handle_key(&mut view, press(KeyCode::Left));
        }
        assert_eq!(view.selected_column, 0);

        for _ in 0..10 {
            handle_key(&mut view, press(KeyCode::Right));
        }
        assert_eq!(view.selected_column, COLS - 1);
    }

    #[test]
    fn test_enter_submits_selected_column_at_column_prompt() {
        let mut view = ViewState::new();
        view.column_prompt = true;
        handle_key(&mut view, press(KeyCode::Right));
        assert_eq!(
            handle_key(&mut view, press(KeyCode::Enter)),
            KeyAction::Submit("4".to_string())
        );
    }

    #[test]
    fn test_enter_submits_blank_at_other_prompts() {
        let mut view = ViewState::new();
        handle_key(&mut view, press(KeyCode::Right));
        assert_eq!(
            handle_key(&mut view, press(KeyCode::Enter)),
            KeyAction::Submit(String::new())
        );
    }

    #[test]
    fn test_typed_answer_wins_over_selection() {
        let mut view = ViewState::new();
        view.column_prompt = true;
        for c in "Adx".chars() {
            handle_key(&mut view, press(KeyCode::Char(c)));
        }
        handle_key(&mut view, press(KeyCode::Backspace));
        handle_key(&mut view, press(KeyCode::Char('a')));
        assert_eq!(view.input, "Ada");

        assert_eq!(
            handle_key(&mut view, press(KeyCode::Enter)),
            KeyAction::Submit("Ada".to_string())
        );
        assert!(view.input.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut view = ViewState::new();
        assert_eq!(handle_key(&mut view, press(KeyCode::Esc)), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut view, ctrl_c), KeyAction::Quit);
        assert!(view.input.is_empty());
    }

    #[test]
    fn test_collect_answer_clears_column_prompt() {
        let mut script = KeyScript::new(&[KeyCode::Left, KeyCode::Enter, KeyCode::Esc]);

        assert_eq!(script.read_column_choice().unwrap(), Some("2".to_string()));
        assert!(!script.view.column_prompt);
        assert_eq!(script.read_choice().unwrap(), None);
        assert!(script.read_choice().is_err());
    }

    #[test]
    fn test_blank_name_falls_back_to_seat_name() {
        // Mode 1, blank name, four drops in the middle column, no rematch
        let mut keys = vec![KeyCode::Char('1'), KeyCode::Enter, KeyCode::Enter];
        keys.extend([KeyCode::Enter; 4]);
        keys.push(KeyCode::Enter);
        let frontend = KeyScript::new(&keys);
        let rng = ScriptedRandom::new(&[6]);
        let mut driver = SessionDriver::new(frontend, rng, AppConfig::default());

        let score = driver.run().unwrap();
        assert_eq!(score.names, ["Player 1".to_string(), "Computer".to_string()]);
        assert_eq!(score.wins, [1, 0]);
        let frontend = driver.frontend();
        assert!(frontend.lines.iter().any(|l| l.contains("Player 1 (X) wins!")));
        assert!(frontend.keys.is_empty());
    }

    #[test]
    fn test_log_pause_restores_level() {
        log::set_max_level(LevelFilter::Debug);
        {
            let _pause = LogPause::new();
            assert_eq!(log::max_level(), LevelFilter::Off);
        }
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
