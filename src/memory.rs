//! Sparse memory for the Intcode machine.
//!
//! Programs routinely write far past their own length (relative-mode scratch
//! space at addresses in the thousands), so cells live in a hash map keyed by
//! address rather than a dense vector.

use log::trace;
use std::collections::HashMap;
use std::ops::Range;

/// Address of a memory cell.
pub type Address = usize;

/// Sparse, auto-extending store of signed 64-bit cells.
///
/// Reading a cell that was never written yields 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    cells: HashMap<Address, i64>,
}

impl Memory {
    /// Create an empty memory
    pub fn new() -> Self {
        Memory {
            cells: HashMap::new(),
        }
    }

    /// Create a memory holding `program` at addresses `0..program.len()`
    pub fn from_program(program: &[i64]) -> Self {
        let cells = program
            .iter()
            .enumerate()
            .map(|(addr, &value)| (addr, value))
            .collect();
        Memory { cells }
    }

    /// Read the cell at `addr`, creating it with value 0 if absent.
    pub fn read(&mut self, addr: Address) -> i64 {
        *self.cells.entry(addr).or_insert(0)
    }

    /// Read the cell at `addr` without materialising it.
    pub fn peek(&self, addr: Address) -> i64 {
        self.cells.get(&addr).copied().unwrap_or(0)
    }

    /// Write `value` to `addr`, extending storage as needed.
    pub fn write(&mut self, addr: Address, value: i64) {
        trace!("mem[{}] <- {}", addr, value);
        self.cells.insert(addr, value);
    }

    /// Number of materialised cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Dense copy of the cells in `range`; absent cells appear as 0.
    pub fn snapshot(&self, range: Range<Address>) -> Vec<i64> {
        range.map(|addr| self.peek(addr)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_unwritten_cells_read_as_zero() {
        let mut memory = Memory::new();
        assert_eq!(memory.peek(12), 0);
        assert!(memory.is_empty());

        assert_eq!(memory.read(12), 0);
        // read materialises the slot
        assert_eq!(memory.len(), 1);
        assert_eq!(memory.read(12), 0);
    }

    #[test]
    fn test_far_apart_writes() {
        let mut memory = Memory::from_program(&[1, 2, 3]);
        memory.write(1_000_000_000, -7);
        memory.write(2, 30);

        assert_eq!(memory.peek(1_000_000_000), -7);
        assert_eq!(memory.snapshot(0..4), vec![1, 2, 30, 0]);
        assert_eq!(memory.len(), 4);
    }
}
