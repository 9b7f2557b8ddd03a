use crate::instruction::Opcode;

/// Get the mnemonic of an opcode
pub fn opcode_name(opcode: Opcode) -> &'static str {
    match opcode {
        Opcode::Add => "add",
        Opcode::Multiply => "mul",
        Opcode::Input => "in",
        Opcode::Output => "out",
        Opcode::JumpIfTrue => "jnz",
        Opcode::JumpIfFalse => "jz",
        Opcode::LessThan => "lt",
        Opcode::Equals => "eq",
        Opcode::AdjustRelativeBase => "arb",
        Opcode::Halt => "halt",
    }
}

/// Get the number of parameter slots that follow the instruction word
pub fn param_count(opcode: Opcode) -> usize {
    match opcode {
        Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
        Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
        Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
        Opcode::Halt => 0,
    }
}
