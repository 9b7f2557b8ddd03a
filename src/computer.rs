//! A host-side container for several independent machines.
//!
//! The computer only stores machines and forwards operations by index; how
//! machines are scheduled and wired together is left to the caller.

use crate::config::MachineConfig;
use crate::error::{IntcodeError, Result};
use crate::interpreter::RunResult;
use crate::memory::Address;
use crate::vm::Machine;
use log::debug;

/// Indexed collection of machines
#[derive(Debug, Clone, Default)]
pub struct Computer {
    machines: Vec<Machine>,
    config: MachineConfig,
}

impl Computer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a computer whose machines all use `config`
    pub fn with_config(config: MachineConfig) -> Self {
        Computer {
            machines: Vec::new(),
            config,
        }
    }

    /// Add a machine running `program` and return its index
    pub fn add_program(&mut self, program: &[i64]) -> usize {
        self.machines
            .push(Machine::with_config(program, self.config));
        let index = self.machines.len() - 1;
        debug!("Added machine {}", index);
        index
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    pub fn machine(&self, index: usize) -> Result<&Machine> {
        self.machines
            .get(index)
            .ok_or(IntcodeError::NoSuchMachine(index))
    }

    pub fn machine_mut(&mut self, index: usize) -> Result<&mut Machine> {
        self.machines
            .get_mut(index)
            .ok_or(IntcodeError::NoSuchMachine(index))
    }

    /// Run machine `index` with `input`
    pub fn run_program(&mut self, index: usize, input: &[i64]) -> Result<RunResult> {
        self.machine_mut(index)?.run(input)
    }

    /// Reset machine `index` to its initial program
    pub fn reset_program(&mut self, index: usize) -> Result<()> {
        self.machine_mut(index)?.reset();
        Ok(())
    }

    /// Overwrite one memory cell of machine `index`
    pub fn modify_memory(&mut self, index: usize, addr: Address, value: i64) -> Result<()> {
        self.machine_mut(index)?.poke(addr, value);
        Ok(())
    }

    pub fn is_complete(&self, index: usize) -> Result<bool> {
        Ok(self.machine(index)?.is_halted())
    }

    /// True if the most recently added machine has halted
    pub fn is_last_complete(&self) -> bool {
        self.machines.last().is_some_and(Machine::is_halted)
    }

    /// True once every machine has halted
    pub fn all_complete(&self) -> bool {
        self.machines.iter().all(Machine::is_halted)
    }

    pub fn is_waiting_for_input(&self, index: usize) -> Result<bool> {
        Ok(self.machine(index)?.is_waiting_for_input())
    }

    /// Drain and return the buffered output of machine `index`
    pub fn take_output(&mut self, index: usize) -> Result<Vec<i64>> {
        Ok(self.machine_mut(index)?.drain_output())
    }

    /// Remove every machine
    pub fn clear(&mut self) {
        debug!("Removing {} machine(s)", self.machines.len());
        self.machines.clear();
    }
}
