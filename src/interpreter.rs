//! The decode/execute loop.
//!
//! `run` executes instructions until the program halts or an INPUT
//! instruction finds no input left. Either way control returns to the host,
//! which can inspect output, supply more input and call `run` again; a
//! blocked machine resumes on the very INPUT instruction it stopped at.

use crate::error::Result;
use crate::instruction::{Instruction, Opcode};
use crate::memory::Address;
use crate::vm::{Machine, Status};
use log::{debug, info};

/// Outcome of executing a single instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Fall through to the next instruction
    Continue,
    /// Jump taken, continue at the given address
    Jumped(Address),
    /// INPUT found no input left; the instruction pointer stays put
    NeedInput,
    /// HALT executed
    Halted,
}

/// Result of one call to [`Machine::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    /// `Blocked` or `Halted`
    pub status: Status,
    /// Every buffered output not yet drained, oldest first
    pub outputs: Vec<i64>,
    /// How many values of this call's input were used
    pub inputs_consumed: usize,
}

impl RunResult {
    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    pub fn is_blocked(&self) -> bool {
        self.status == Status::Blocked
    }
}

/// Input cursor and bookkeeping for a single `run` call
#[derive(Debug)]
pub(crate) struct RunState<'a> {
    input: &'a [i64],
    consumed: usize,
    /// Last value output during this call
    pub(crate) last_output: Option<i64>,
}

impl<'a> RunState<'a> {
    fn new(input: &'a [i64]) -> Self {
        RunState {
            input,
            consumed: 0,
            last_output: None,
        }
    }

    /// Take the next unread input value, if any
    pub(crate) fn next_input(&mut self) -> Option<i64> {
        let value = self.input.get(self.consumed).copied()?;
        self.consumed += 1;
        Some(value)
    }
}

impl Machine {
    /// Execute until the program halts or blocks waiting for input.
    ///
    /// Input values are consumed in order; values left over when the program
    /// halts are ignored. A machine that already halted executes nothing.
    /// Decode errors and negative addresses stop the run and leave the
    /// machine at the failing instruction.
    pub fn run(&mut self, input: &[i64]) -> Result<RunResult> {
        if self.status == Status::Halted {
            debug!("run called on halted machine");
            return Ok(self.run_result(0));
        }

        info!(
            "Running from ip {} with {} input value(s)",
            self.ip,
            input.len()
        );
        self.status = Status::Running;
        let mut state = RunState::new(input);
        let mut steps: u64 = 0;

        loop {
            let word = self.memory.read(self.ip);
            let inst = Instruction::decode(word, self.ip)?;
            let result = self.execute_instruction(&inst, &mut state)?;
            steps += 1;

            match result {
                ExecutionResult::Continue => self.ip += inst.size(),
                ExecutionResult::Jumped(target) => self.ip = target,
                ExecutionResult::NeedInput => {
                    self.status = Status::Blocked;
                    break;
                }
                ExecutionResult::Halted => {
                    self.status = Status::Halted;
                    if self.config.legacy_halt_output {
                        let marker = state.last_output.unwrap_or(-1);
                        debug!("legacy halt output {}", marker);
                        self.output.push_back(marker);
                    }
                    break;
                }
            }
        }

        info!(
            "Stopped {} at ip {} after {} instruction(s); consumed {} input(s), {} output(s) pending",
            self.status,
            self.ip,
            steps,
            state.consumed,
            self.output.len()
        );
        Ok(self.run_result(state.consumed))
    }

    /// Execute one decoded instruction
    pub(crate) fn execute_instruction(
        &mut self,
        inst: &Instruction,
        state: &mut RunState<'_>,
    ) -> Result<ExecutionResult> {
        match inst.opcode {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => {
                self.execute_math_op(inst)
            }
            Opcode::Input | Opcode::Output => self.execute_io_op(inst, state),
            Opcode::JumpIfTrue
            | Opcode::JumpIfFalse
            | Opcode::AdjustRelativeBase
            | Opcode::Halt => self.execute_flow_op(inst),
        }
    }

    fn run_result(&self, inputs_consumed: usize) -> RunResult {
        RunResult {
            status: self.status,
            outputs: self.output(),
            inputs_consumed,
        }
    }
}
