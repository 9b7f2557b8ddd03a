/// Input and output operations for the Intcode machine
///
/// INPUT is the only point where a run can suspend: when the caller's input
/// is used up, the instruction reports `NeedInput` without touching memory
/// or the instruction pointer, so the next run retries it.
use crate::error::Result;
use crate::instruction::{Instruction, Opcode};
use crate::interpreter::{ExecutionResult, RunState};
use crate::vm::Machine;
use log::debug;

impl Machine {
    /// Handle the INPUT and OUTPUT opcodes
    pub(crate) fn execute_io_op(
        &mut self,
        inst: &Instruction,
        state: &mut RunState<'_>,
    ) -> Result<ExecutionResult> {
        match inst.opcode {
            Opcode::Input => match state.next_input() {
                Some(value) => {
                    debug!("in {}", value);
                    self.write_param(inst, 0, value)?;
                    Ok(ExecutionResult::Continue)
                }
                None => {
                    debug!("in: no input left at ip {}", inst.address);
                    Ok(ExecutionResult::NeedInput)
                }
            },
            Opcode::Output => {
                let value = self.read_param(inst, 0)?;
                debug!("out {}", value);
                self.output.push_back(value);
                state.last_output = Some(value);
                Ok(ExecutionResult::Continue)
            }
            other => unreachable!("{:?} is not an io opcode", other),
        }
    }
}
