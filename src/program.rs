//! Loading Intcode programs from text.
//!
//! A program is a single line of comma-separated decimal integers, possibly
//! negative. Whitespace around values and a trailing newline are accepted.

use crate::error::{ProgramError, Result};
use log::debug;
use std::path::Path;

/// Parse comma-separated program text into a sequence of integers
pub fn parse_program(text: &str) -> std::result::Result<Vec<i64>, ProgramError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ProgramError::Empty);
    }

    text.split(',')
        .enumerate()
        .map(|(index, field)| {
            let field = field.trim();
            field.parse::<i64>().map_err(|_| ProgramError::InvalidValue {
                index,
                text: field.to_string(),
            })
        })
        .collect()
}

/// Read and parse a program file
pub fn load_program(path: &Path) -> Result<Vec<i64>> {
    let text = std::fs::read_to_string(path)?;
    let program = parse_program(&text)?;
    debug!("Loaded {} values from {}", program.len(), path.display());
    Ok(program)
}

/// Parse a comma-separated list of input values, as given on the command line
pub fn parse_inputs(text: &str) -> std::result::Result<Vec<i64>, ProgramError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_program(text)
}
