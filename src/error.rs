//! Error types for the Intcode machine and its host-side collaborators.
//!
//! Blocking on input is never an error: it is reported through
//! [`crate::vm::Status::Blocked`]. Everything here is a genuine failure that
//! the host has to deal with, usually by resetting or discarding the machine.

use thiserror::Error;

/// Failure to decode the instruction word at `address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low two digits of the instruction word name no known operation.
    #[error("unknown opcode {opcode} at address {address}")]
    UnknownOpcode { opcode: i64, address: usize },

    /// A parameter mode digit other than 0, 1 or 2.
    #[error("unknown addressing mode {digit} at address {address}")]
    UnknownMode { digit: i64, address: usize },

    /// A write target encoded in immediate mode.
    #[error("immediate-mode write target at address {address}")]
    ImmediateWrite { address: usize },
}

/// Failure to turn program text into a sequence of integers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("program text is empty")]
    Empty,

    #[error("invalid value {text:?} at position {index}")]
    InvalidValue { index: usize, text: String },
}

/// Errors returned by machine and host operations.
#[derive(Debug, Error)]
pub enum IntcodeError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// An operand resolved to a negative memory address or jump target.
    #[error("negative address {address} computed by instruction at {ip}")]
    NegativeAddress { address: i64, ip: usize },

    #[error("no machine with index {0}")]
    NoSuchMachine(usize),

    #[error("program error: {0}")]
    Parse(#[from] ProgramError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl IntcodeError {
    /// True for errors raised while executing a program, as opposed to host
    /// failures such as unreadable files.
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            IntcodeError::Decode(_) | IntcodeError::NegativeAddress { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IntcodeError>;
