//! An interpreter for the Intcode instruction set.
//!
//! A [`Machine`] runs a program until it halts or blocks waiting for input,
//! then hands control back to the caller together with any output. Hosts can
//! drive many machines side by side and wire one machine's output into
//! another's input.

pub mod ascii;
pub mod computer;
pub mod config;
pub mod error;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod opcode_tables;
pub mod opcodes_flow;
pub mod opcodes_io;
pub mod opcodes_math;
pub mod program;
pub mod vm;


pub use crate::computer::Computer;
pub use crate::config::{Config, HostConfig, MachineConfig};
pub use crate::error::{DecodeError, IntcodeError, ProgramError};
pub use crate::interpreter::RunResult;
pub use crate::memory::Memory;
pub use crate::vm::{Machine, Status};
