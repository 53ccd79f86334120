pub use chip8::Chip8;
pub use error::{Chip8Error, Result};
pub use instruction::Instruction;
pub use quirks::Quirks;

mod chip8;
pub mod constants;
pub mod cpu;
mod error;
mod instruction;
pub mod opcode;
mod operations;
mod quirks;
pub mod state;
