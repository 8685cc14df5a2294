use std::collections::VecDeque;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::game::{Board, Cell, Grid, Symbol, COLS};

/// How many status lines stay on screen.
pub const MESSAGE_HISTORY: usize = 5;

/// Everything the full-screen view shows.
pub struct ViewState {
    pub grid: Grid,
    pub selected_column: usize,
    pub input: String,
    pub messages: VecDeque<String>,
    /// Set while a column prompt waits for an answer.
    pub column_prompt: bool,
}

impl ViewState {
    pub fn new() -> Self {
        ViewState {
            grid: Board::new().render(),
            selected_column: COLS / 2, // Start in middle
            input: String::new(),
            messages: VecDeque::with_capacity(MESSAGE_HISTORY),
            column_prompt: false,
        }
    }

    pub fn push_message(&mut self, text: &str) {
        if self.messages.len() == MESSAGE_HISTORY {
            self.messages.pop_front();
        }
        self.messages.push_back(text.to_string());
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                          // Header
            Constraint::Min(10),                            // Board
            Constraint::Length(MESSAGE_HISTORY as u16 + 2), // Messages
            Constraint::Length(3),                          // Answer
            Constraint::Length(3),                          // Controls
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_board(frame, &view.grid, view.selected_column, chunks[1]);
    render_messages(frame, &view.messages, chunks[2]);
    render_input(frame, &view.input, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new("Connect Four")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn symbol_color(symbol: Symbol) -> Color {
    match symbol {
        Symbol::X => Color::Red,
        Symbol::O => Color::Yellow,
    }
}

fn render_board(frame: &mut Frame, grid: &Grid, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {col} "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {col} ")));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in grid {
        let mut row_spans = vec![Span::raw("  ║")];
        for &cell in row {
            let span = match cell {
                Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Cell::Piece(symbol) => Span::styled(
                    format!(" {symbol} "),
                    Style::default()
                        .fg(symbol_color(symbol))
                        .add_modifier(Modifier::BOLD),
                ),
            };
            row_spans.push(span);
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_messages(frame: &mut Frame, messages: &VecDeque<String>, area: Rect) {
    let lines: Vec<Line> = messages.iter().map(|m| Line::from(m.as_str())).collect();
    let widget = Paragraph::new(lines)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(widget, area);
}

fn render_input(frame: &mut Frame, input: &str, area: Rect) {
    let widget = Paragraph::new(format!("> {input}"))
        .block(Block::default().borders(Borders::ALL).title("Answer"));

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter: Drop/Submit  |  Esc: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(view: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| render(f, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_message_history_is_bounded() {
        let mut view = ViewState::new();
        for i in 0..(MESSAGE_HISTORY + 3) {
            view.push_message(&format!("line {i}"));
        }
        assert_eq!(view.messages.len(), MESSAGE_HISTORY);
        assert_eq!(view.messages.front().map(String::as_str), Some("line 3"));
    }

    #[test]
    fn test_render_shows_board_and_messages() {
        let mut view = ViewState::new();
        let mut board = Board::new();
        board.place_piece(2, Symbol::O).unwrap();
        view.grid = board.render();
        view.input = "Ada".to_string();
        view.push_message("Bob (O)'s turn.");

        let text = screen_text(&view);
        assert!(text.contains("Connect Four"));
        assert!(text.contains("Bob (O)'s turn."));
        assert!(text.contains("> Ada"));
        assert!(text.contains(" O "));
    }
}
