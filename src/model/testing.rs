//! Test doubles shared by the model tests

use std::collections::VecDeque;
use std::io;

use super::random::RandomSource;
use crate::console::ShopConsole;

/// Plays back a fixed list of numbers.
/// Values outside the requested range wrap into it; an empty script yields `low`.
pub struct ScriptedRandom {
    values: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(values: Vec<u32>) -> Self {
        ScriptedRandom {
            values: values.into(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_in_range(&mut self, low: u32, high: u32) -> u32 {
        match self.values.pop_front() {
            Some(value) if (low..high).contains(&value) => value,
            Some(value) => low + value % (high - low),
            None => low,
        }
    }
}

/// Feeds canned lines and keys, and records everything printed
#[derive(Default)]
pub struct ScriptedConsole {
    lines: VecDeque<String>,
    keys: VecDeque<char>,
    pub output: Vec<String>,
    pub clears: usize,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str], keys: &[char]) -> Self {
        ScriptedConsole {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            keys: keys.iter().copied().collect(),
            output: Vec::new(),
            clears: 0,
        }
    }

    /// Whether any printed line contains `needle`
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    pub fn count_printed(&self, needle: &str) -> usize {
        self.output.iter().filter(|line| line.contains(needle)).count()
    }
}

impl ShopConsole for ScriptedConsole {
    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }

    fn read_key(&mut self, prompt: &str) -> io::Result<Option<char>> {
        self.output.push(prompt.to_string());
        Ok(self.keys.pop_front())
    }
}
