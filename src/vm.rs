use crate::config::MachineConfig;
use crate::error::{IntcodeError, Result};
use crate::instruction::{AddressingMode, Instruction};
use crate::memory::{Address, Memory};
use log::debug;
use std::collections::VecDeque;
use std::fmt;

/// Execution status of a machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ready to execute the instruction at the instruction pointer
    Running,
    /// Stopped on an INPUT instruction with no input left
    Blocked,
    /// Executed HALT
    Halted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Running => "running",
            Status::Blocked => "blocked",
            Status::Halted => "halted",
        };
        write!(f, "{}", name)
    }
}

/// The Intcode machine state
///
/// A machine owns its memory outright; several machines never share
/// anything, so a host can drive any number of them side by side.
#[derive(Debug, Clone)]
pub struct Machine {
    /// Program memory
    pub(crate) memory: Memory,
    /// The program as it was at construction, restored by `reset`
    initial_program: Vec<i64>,
    /// Address of the next instruction to execute
    pub(crate) ip: Address,
    /// Offset applied to relative-mode parameters
    pub(crate) relative_base: i64,
    pub(crate) status: Status,
    /// Values output and not yet drained by the host
    pub(crate) output: VecDeque<i64>,
    pub(crate) config: MachineConfig,
}

impl Machine {
    /// Create a machine with `program` loaded at address 0
    pub fn new(program: &[i64]) -> Self {
        Self::with_config(program, MachineConfig::default())
    }

    /// Create a machine with explicit options
    pub fn with_config(program: &[i64], config: MachineConfig) -> Self {
        debug!(
            "New machine: {} cells, legacy_halt_output={}",
            program.len(),
            config.legacy_halt_output
        );
        Machine {
            memory: Memory::from_program(program),
            initial_program: program.to_vec(),
            ip: 0,
            relative_base: 0,
            status: Status::Running,
            output: VecDeque::new(),
            config,
        }
    }

    /// Restore memory to the construction snapshot and rewind the machine.
    ///
    /// Buffered output is kept; use [`Machine::clear_output`] to drop it.
    pub fn reset(&mut self) {
        debug!("Reset machine (ip was {}, status {})", self.ip, self.status);
        self.memory = Memory::from_program(&self.initial_program);
        self.ip = 0;
        self.relative_base = 0;
        self.status = Status::Running;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }

    /// True when the last run stopped on an INPUT instruction
    pub fn is_waiting_for_input(&self) -> bool {
        self.status == Status::Blocked
    }

    pub fn instruction_pointer(&self) -> Address {
        self.ip
    }

    pub fn relative_base(&self) -> i64 {
        self.relative_base
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Read a memory cell without materialising it
    pub fn peek(&self, addr: Address) -> i64 {
        self.memory.peek(addr)
    }

    /// Overwrite a memory cell between runs
    pub fn poke(&mut self, addr: Address, value: i64) {
        debug!("poke mem[{}] = {}", addr, value);
        self.memory.write(addr, value);
    }

    /// Buffered output, oldest first, without removing it
    pub fn output(&self) -> Vec<i64> {
        self.output.iter().copied().collect()
    }

    /// Remove and return all buffered output
    pub fn drain_output(&mut self) -> Vec<i64> {
        self.output.drain(..).collect()
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Decode the instruction at the instruction pointer
    pub fn current_instruction(&self) -> Result<Instruction> {
        Ok(Instruction::decode(self.memory.peek(self.ip), self.ip)?)
    }

    /// Resolve the memory address a parameter refers to.
    ///
    /// For immediate mode this is the parameter slot itself, so reading it
    /// yields the literal.
    pub(crate) fn param_address(&mut self, inst: &Instruction, index: usize) -> Result<Address> {
        let slot = inst.param_slot(index);
        match inst.modes[index] {
            AddressingMode::Immediate => Ok(slot),
            AddressingMode::Position => {
                let raw = self.memory.read(slot);
                self.to_address(raw)
            }
            AddressingMode::Relative => {
                let raw = self.relative_base.wrapping_add(self.memory.read(slot));
                self.to_address(raw)
            }
        }
    }

    /// Read the value of a parameter according to its addressing mode
    pub(crate) fn read_param(&mut self, inst: &Instruction, index: usize) -> Result<i64> {
        let addr = self.param_address(inst, index)?;
        Ok(self.memory.read(addr))
    }

    /// Write `value` to the address named by a write-target parameter
    pub(crate) fn write_param(&mut self, inst: &Instruction, index: usize, value: i64) -> Result<()> {
        let addr = self.param_address(inst, index)?;
        self.memory.write(addr, value);
        Ok(())
    }

    /// Convert a computed value into an address, rejecting negatives
    pub(crate) fn to_address(&self, raw: i64) -> Result<Address> {
        Address::try_from(raw).map_err(|_| IntcodeError::NegativeAddress {
            address: raw,
            ip: self.ip,
        })
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Machine {{ ip: {}, relative_base: {}, status: {}, cells: {}, pending output: {} }}",
            self.ip,
            self.relative_base,
            self.status,
            self.memory.len(),
            self.output.len()
        )
    }
}
