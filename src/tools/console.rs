//! Console I/O seam between the interpreter and its host.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Line-oriented console used by the I/O builtins
pub trait Console {
    /// Emit one complete output line
    fn output(&mut self, line: &str);

    /// Emit an input prompt (no implicit newline)
    fn prompt(&mut self, text: &str) {
        self.output(text);
    }

    /// Block until one input line is available and return it without its
    /// line terminator
    fn read_input(&mut self) -> Result<String>;
}

/// Console bound to the process's stdin/stdout
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    /// Creates a stdio console
    pub fn new() -> Self {
        StdConsole
    }
}

impl Console for StdConsole {
    fn output(&mut self, line: &str) {
        println!("{}", line);
    }

    fn prompt(&mut self, text: &str) {
        print!("{}", text);
        // A failed flush only delays the prompt; the read still proceeds.
        let _ = io::stdout().flush();
    }

    fn read_input(&mut self) -> Result<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(Error::InputExhausted);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// In-memory console: scripted input lines, captured output lines
#[derive(Debug, Default, Clone)]
pub struct BufferedConsole {
    inputs: VecDeque<String>,
    outputs: Vec<String>,
}

impl BufferedConsole {
    /// Console with no input
    pub fn new() -> Self {
        Self::default()
    }

    /// Console that will answer reads with `inputs`, in order
    pub fn with_inputs<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BufferedConsole {
            inputs: inputs.into_iter().map(Into::into).collect(),
            outputs: Vec::new(),
        }
    }

    /// Everything emitted so far, one entry per output/prompt call
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// Number of input lines not yet consumed
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for BufferedConsole {
    fn output(&mut self, line: &str) {
        self.outputs.push(line.to_string());
    }

    fn read_input(&mut self) -> Result<String> {
        self.inputs.pop_front().ok_or(Error::InputExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_console_round() {
        let mut console = BufferedConsole::with_inputs(["12", "abc"]);
        console.output("hello");
        console.prompt("name? ");

        assert_eq!(console.read_input().unwrap(), "12");
        assert_eq!(console.remaining_inputs(), 1);
        assert_eq!(console.read_input().unwrap(), "abc");
        assert_eq!(console.read_input(), Err(Error::InputExhausted));
        assert_eq!(console.outputs(), ["hello", "name? "]);
    }
}
