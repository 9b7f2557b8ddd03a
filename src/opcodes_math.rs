/// Arithmetic and comparison operations for the Intcode machine
///
/// This module handles the three-parameter opcodes:
/// - Arithmetic (add, mul), wrapping on 64-bit overflow
/// - Comparisons (lt, eq), which store 1 or 0
///
/// All of them read two operands and write to the address named by the third.
use crate::error::Result;
use crate::instruction::{Instruction, Opcode};
use crate::interpreter::ExecutionResult;
use crate::vm::Machine;
use log::debug;

impl Machine {
    /// Handle arithmetic and comparison opcodes
    pub(crate) fn execute_math_op(&mut self, inst: &Instruction) -> Result<ExecutionResult> {
        let a = self.read_param(inst, 0)?;
        let b = self.read_param(inst, 1)?;

        let result = match inst.opcode {
            Opcode::Add => a.wrapping_add(b),
            Opcode::Multiply => a.wrapping_mul(b),
            Opcode::LessThan => (a < b) as i64,
            Opcode::Equals => (a == b) as i64,
            other => unreachable!("{:?} is not a math opcode", other),
        };
        debug!("{} {} {} -> {}", inst.opcode.name(), a, b, result);

        self.write_param(inst, 2, result)?;
        Ok(ExecutionResult::Continue)
    }
}
