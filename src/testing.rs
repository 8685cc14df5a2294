//! Deterministic collaborators for unit tests.

use std::collections::VecDeque;
use std::io;

use crate::ai::RandomSource;
use crate::game::Grid;
use crate::ui::{DisplaySink, InputSource};

/// Scripted answers followed by end of input; records what was displayed.
#[derive(Default)]
pub struct ScriptedFrontend {
    answers: VecDeque<String>,
    pub grids: Vec<Grid>,
    pub lines: Vec<String>,
    pub column_reads: usize,
}

impl ScriptedFrontend {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedFrontend {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn saw_line(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl InputSource for ScriptedFrontend {
    fn read_choice(&mut self) -> io::Result<Option<String>> {
        Ok(self.answers.pop_front())
    }

    fn read_column_choice(&mut self) -> io::Result<Option<String>> {
        self.column_reads += 1;
        self.read_choice()
    }
}

impl DisplaySink for ScriptedFrontend {
    fn render(&mut self, grid: &Grid) -> io::Result<()> {
        self.grids.push(*grid);
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }
}

/// Cycles through a fixed list of draws.
pub struct ScriptedRandom {
    values: Vec<usize>,
    next: usize,
    pub draws: usize,
}

impl ScriptedRandom {
    pub fn new(values: &[usize]) -> Self {
        assert!(!values.is_empty(), "ScriptedRandom needs at least one value");
        ScriptedRandom {
            values: values.to_vec(),
            next: 0,
            draws: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, low: usize, high: usize) -> usize {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        self.draws += 1;
        assert!((low..high).contains(&value), "scripted value {value} outside {low}..{high}");
        value
    }
}
