//! ASCII text protocol and an interactive session host.
//!
//! Text-driven Intcode programs read commands as character codes terminated
//! by a newline (10) and print by outputting character codes. This module
//! converts in both directions and drives a machine from any line-oriented
//! reader and writer, so the same session works on a terminal and in tests.

use crate::config::HostConfig;
use crate::error::Result;
use crate::vm::Machine;
use log::{debug, info};
use std::fmt;
use std::io::{BufRead, Write};

/// Character code terminating every command line
pub const NEWLINE: i64 = 10;

/// Convert one line of text into input values, appending a newline
pub fn encode_line(line: &str) -> Vec<i64> {
    line.bytes()
        .map(i64::from)
        .chain(std::iter::once(NEWLINE))
        .collect()
}

/// Convert output values into printable text.
///
/// Values outside the ASCII range are usually numeric answers rather than
/// characters; they are rendered as decimal text on a line of their own.
pub fn decode_output(values: &[i64]) -> String {
    let mut text = String::new();
    for &value in values {
        match u8::try_from(value) {
            Ok(byte) if byte.is_ascii() => text.push(char::from(byte)),
            _ => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&value.to_string());
                text.push('\n');
            }
        }
    }
    text
}

/// Grid position followed from compass commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    /// Move according to a compass command; other commands leave the
    /// position unchanged. Returns true if the command was a move.
    pub fn apply(&mut self, command: &str) -> bool {
        match command.trim() {
            "north" => self.row -= 1,
            "south" => self.row += 1,
            "east" => self.col += 1,
            "west" => self.col -= 1,
            _ => return false,
        }
        true
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// How an ASCII session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// The machine executed HALT
    pub halted: bool,
    /// Number of command lines fed to the machine
    pub commands: usize,
    /// Final compass position
    pub position: Position,
}

/// Drives one machine through the ASCII protocol
pub struct AsciiSession {
    machine: Machine,
    config: HostConfig,
    position: Position,
}

impl AsciiSession {
    pub fn new(machine: Machine, config: HostConfig) -> Self {
        AsciiSession {
            machine,
            config,
            position: Position::default(),
        }
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Run the session until the machine halts or `input` reaches end of file.
    ///
    /// The machine first runs with no input. After that each read line is
    /// fed as one command; all output produced is decoded and written to
    /// `output` before the next read.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<SessionSummary> {
        info!("Starting ASCII session");
        let mut result = self.machine.run(&[])?;
        let mut commands = 0;

        loop {
            let text = decode_output(&self.machine.drain_output());
            output.write_all(text.as_bytes())?;

            if result.is_halted() {
                info!("Machine halted after {} command(s)", commands);
                break;
            }

            if !self.config.prompt.is_empty() {
                write!(output, "{}", self.config.prompt)?;
            }
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                info!("End of input after {} command(s)", commands);
                break;
            }
            let command = line.trim_end_matches(['\r', '\n']);
            debug!("command {:?}", command);

            if self.config.echo_commands {
                writeln!(output, "Command: {}", command)?;
            }
            if self.config.track_position {
                if self.position.apply(command) {
                    info!("Position: {}", self.position);
                }
                if self.config.show_position {
                    writeln!(output, "Position: {}", self.position)?;
                }
            }

            commands += 1;
            result = self.machine.run(&encode_line(command))?;
        }

        output.flush()?;
        Ok(SessionSummary {
            halted: result.is_halted(),
            commands,
            position: self.position,
        })
    }
}
