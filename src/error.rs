use std::io;
use thiserror::Error;

use crate::machine::PROGRAM_SPACE;

/// A fatal machine condition. `addr` is always the address the faulting
/// instruction was fetched from. Faults are unrecoverable: the
/// interpreter latches the first one and refuses to step until reset.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// the two-byte word at `addr` matched no opcode pattern
    #[error("illegal instruction {opcode:#06x} at {addr:#05x}")]
    IllegalInstruction { addr: u16, opcode: u16 },

    /// CALL with all 16 stack slots in use
    #[error("call stack overflow at {addr:#05x}")]
    StackOverflow { addr: u16 },

    /// RETURN with an empty call stack
    #[error("return with empty call stack at {addr:#05x}")]
    StackUnderflow { addr: u16 },

    /// a computed memory address fell outside the 4096-byte space;
    /// reported rather than wrapped so a runaway I register is caught
    /// at its first use
    #[error("memory access out of bounds at {addr:#x}")]
    OutOfBounds { addr: usize },
}

/// Why a program image could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read program: {0}")]
    Io(#[from] io::Error),

    #[error("program is {len} bytes but only {max} fit above 0x200", max = PROGRAM_SPACE)]
    TooLarge { len: usize },
}
