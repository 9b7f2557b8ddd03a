/// Control-flow operations for the Intcode machine
///
/// Conditional jumps, relative base adjustment and halt.
use crate::error::Result;
use crate::instruction::{Instruction, Opcode};
use crate::interpreter::ExecutionResult;
use crate::vm::Machine;
use log::debug;

impl Machine {
    /// Handle jump, relative base and halt opcodes
    pub(crate) fn execute_flow_op(&mut self, inst: &Instruction) -> Result<ExecutionResult> {
        match inst.opcode {
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => {
                let condition = self.read_param(inst, 0)?;
                let target = self.read_param(inst, 1)?;
                let taken = match inst.opcode {
                    Opcode::JumpIfTrue => condition != 0,
                    _ => condition == 0,
                };
                debug!(
                    "{} {} {} ({})",
                    inst.opcode.name(),
                    condition,
                    target,
                    if taken { "taken" } else { "not taken" }
                );

                if taken {
                    Ok(ExecutionResult::Jumped(self.to_address(target)?))
                } else {
                    Ok(ExecutionResult::Continue)
                }
            }

            Opcode::AdjustRelativeBase => {
                let delta = self.read_param(inst, 0)?;
                self.relative_base = self.relative_base.wrapping_add(delta);
                debug!("arb {} -> {}", delta, self.relative_base);
                Ok(ExecutionResult::Continue)
            }

            Opcode::Halt => {
                debug!("halt at ip {}", inst.address);
                Ok(ExecutionResult::Halted)
            }

            other => unreachable!("{:?} is not a flow opcode", other),
        }
    }
}
