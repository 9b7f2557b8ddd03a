use crate::error::DecodeError;
use crate::memory::Address;
use crate::opcode_tables;
use log::trace;
use std::fmt::{Display, Error, Formatter};

/// Highest number of parameters any instruction takes
pub const MAX_PARAMS: usize = 3;

/// Parameter addressing modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// The parameter is the address of the value
    Position,
    /// The parameter is the value itself
    Immediate,
    /// The parameter is an offset from the relative base
    Relative,
}

impl AddressingMode {
    /// Parse an addressing mode from one mode digit
    pub fn from_digit(digit: i64, address: Address) -> Result<Self, DecodeError> {
        match digit {
            0 => Ok(AddressingMode::Position),
            1 => Ok(AddressingMode::Immediate),
            2 => Ok(AddressingMode::Relative),
            _ => Err(DecodeError::UnknownMode { digit, address }),
        }
    }

    /// Single-letter tag used when tracing instructions
    pub fn tag(&self) -> char {
        match self {
            AddressingMode::Position => 'P',
            AddressingMode::Immediate => 'I',
            AddressingMode::Relative => 'R',
        }
    }
}

/// Operation selected by the low two digits of an instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Add,
    Multiply,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    AdjustRelativeBase,
    Halt,
}

impl Opcode {
    /// Map an opcode number to its operation
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Opcode::Add),
            2 => Some(Opcode::Multiply),
            3 => Some(Opcode::Input),
            4 => Some(Opcode::Output),
            5 => Some(Opcode::JumpIfTrue),
            6 => Some(Opcode::JumpIfFalse),
            7 => Some(Opcode::LessThan),
            8 => Some(Opcode::Equals),
            9 => Some(Opcode::AdjustRelativeBase),
            99 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// The opcode number as it appears in program text
    pub fn code(&self) -> i64 {
        match self {
            Opcode::Add => 1,
            Opcode::Multiply => 2,
            Opcode::Input => 3,
            Opcode::Output => 4,
            Opcode::JumpIfTrue => 5,
            Opcode::JumpIfFalse => 6,
            Opcode::LessThan => 7,
            Opcode::Equals => 8,
            Opcode::AdjustRelativeBase => 9,
            Opcode::Halt => 99,
        }
    }

    /// Number of parameter slots following the instruction word
    pub fn param_count(&self) -> usize {
        opcode_tables::param_count(*self)
    }

    /// Index of the parameter that names a write target, if any
    pub fn write_param(&self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::Input => Some(0),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        opcode_tables::opcode_name(*self)
    }
}

/// A decoded Intcode instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Address of the instruction word
    pub address: Address,
    /// The raw instruction word
    pub word: i64,
    /// The operation to perform
    pub opcode: Opcode,
    /// Addressing mode of each parameter; unused slots are `Position`
    pub modes: [AddressingMode; MAX_PARAMS],
}

impl Instruction {
    /// Decode the instruction word `word` found at `address`.
    ///
    /// Mode digits are read least significant first, one per parameter; a
    /// missing digit is mode 0. Digits beyond the opcode's parameter count are
    /// not inspected.
    pub fn decode(word: i64, address: Address) -> Result<Self, DecodeError> {
        let code = word % 100;
        let opcode = Opcode::from_code(code).ok_or(DecodeError::UnknownOpcode {
            opcode: code,
            address,
        })?;

        let mut modes = [AddressingMode::Position; MAX_PARAMS];
        let mut digits = word / 100;
        for mode in modes.iter_mut().take(opcode.param_count()) {
            *mode = AddressingMode::from_digit(digits % 10, address)?;
            digits /= 10;
        }

        if let Some(target) = opcode.write_param() {
            if modes[target] == AddressingMode::Immediate {
                return Err(DecodeError::ImmediateWrite { address });
            }
        }

        let inst = Instruction {
            address,
            word,
            opcode,
            modes,
        };
        trace!("decoded {:5} at {}: {}", word, address, inst);
        Ok(inst)
    }

    /// Total size of the instruction in memory cells
    pub fn size(&self) -> usize {
        1 + self.opcode.param_count()
    }

    /// Address of the `index`th parameter slot
    pub fn param_slot(&self, index: usize) -> Address {
        self.address + 1 + index
    }

    /// Addressing modes of the parameters this instruction actually takes
    pub fn param_modes(&self) -> &[AddressingMode] {
        &self.modes[..self.opcode.param_count()]
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.opcode.name())?;

        for (i, mode) in self.param_modes().iter().enumerate() {
            if i == 0 {
                write!(f, " ")?;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{}", mode.tag())?;
        }

        Ok(())
    }
}
