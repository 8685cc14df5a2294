//! # Connect Four
//!
//! Connect Four on a 6×7 board for two players, or one player against a
//! computer that picks random columns. Plays in the terminal through a plain
//! text front-end or a full-screen one built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, turn-taking session
//! - [`ai`] — Injectable random source for the computer player
//! - [`ui`] — Input/display traits and the text and TUI front-ends
//! - [`driver`] — Mode and name prompts, rematches, scoreboard
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod ui;

#[cfg(test)]
mod testing;
