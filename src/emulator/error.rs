use std::io;

use thiserror::Error;

use super::opcode::Opcode;

/// Why a program could not be loaded. Memory is left untouched in both cases.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is {size} bytes, but only {max} bytes of program memory are available")]
    TooLarge { size: usize, max: usize },
    #[error("could not read program: {0}")]
    Io(#[from] io::Error),
}

/// A condition that leaves the machine unable to continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("call stack overflow")]
    StackOverflow,
    #[error("return with an empty call stack")]
    StackUnderflow,
    #[error("fetch past the end of memory")]
    FetchOutOfBounds,
}

/// A fault together with where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{fault} at {pc:#05x} (opcode {opcode})")]
pub struct ExecError {
    /// Address of the instruction that faulted.
    pub pc: u16,
    /// The most recently fetched opcode.
    pub opcode: Opcode,
    #[source]
    pub fault: Fault,
}
