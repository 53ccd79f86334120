use std::io;

use thiserror::Error;

/// Everything that can go wrong while loading or running a program
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("unable to read ROM: {0}")]
    RomSource(#[from] io::Error),

    #[error("unrecognized opcode {opcode:#06X} at {address:#05X}")]
    UnrecognizedOpcode { opcode: u16, address: u16 },

    #[error("stack overflow calling from {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("stack underflow returning from {address:#05X}")]
    StackUnderflow { address: u16 },
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
