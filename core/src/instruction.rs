use std::fmt;

use rand::Rng;

use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;
use crate::operations::*;
use crate::quirks::Quirks;
use crate::state::State;

/// One of the 35 Chip-8 instructions with its operands decoded
///
/// Register operands are indices into `State::v`, always in 0..=F.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    ClearScreen,
    /// `00EE`
    Return,
    /// `1nnn`
    Jump { nnn: u16 },
    /// `2nnn`
    Call { nnn: u16 },
    /// `3xkk`
    SkipIfEqual { x: usize, kk: u8 },
    /// `4xkk`
    SkipIfNotEqual { x: usize, kk: u8 },
    /// `5xy0`
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6xkk`
    LoadImmediate { x: usize, kk: u8 },
    /// `7xkk`
    AddImmediate { x: usize, kk: u8 },
    /// `8xy0`
    Assign { x: usize, y: usize },
    /// `8xy1`
    Or { x: usize, y: usize },
    /// `8xy2`
    And { x: usize, y: usize },
    /// `8xy3`
    Xor { x: usize, y: usize },
    /// `8xy4`
    AddWithCarry { x: usize, y: usize },
    /// `8xy5`
    Subtract { x: usize, y: usize },
    /// `8xy6`
    ShiftRight { x: usize, y: usize },
    /// `8xy7`
    SubtractReverse { x: usize, y: usize },
    /// `8xyE`
    ShiftLeft { x: usize, y: usize },
    /// `9xy0`
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `Annn`
    SetAddress { nnn: u16 },
    /// `Bnnn`
    JumpWithOffset { nnn: u16 },
    /// `Cxkk`
    Random { x: usize, kk: u8 },
    /// `Dxyn`
    Draw { x: usize, y: usize, n: u8 },
    /// `Ex9E`
    SkipIfKeyPressed { x: usize },
    /// `ExA1`
    SkipIfKeyNotPressed { x: usize },
    /// `Fx07`
    ReadDelayTimer { x: usize },
    /// `Fx0A`
    WaitForKey { x: usize },
    /// `Fx15`
    SetDelayTimer { x: usize },
    /// `Fx18`
    SetSoundTimer { x: usize },
    /// `Fx1E`
    AddToAddress { x: usize },
    /// `Fx29`
    FontGlyph { x: usize },
    /// `Fx33`
    StoreDecimal { x: usize },
    /// `Fx55`
    StoreRegisters { x: usize },
    /// `Fx65`
    LoadRegisters { x: usize },
}

impl Instruction {
    /// Selects the Instruction for a given opcode
    ///
    /// # Arguments
    /// * `op` the instruction word
    /// * `address` where `op` was fetched from, only used to report failures
    pub fn decode(op: u16, address: u16) -> Result<Self> {
        use Instruction::*;

        let (x, y, n, kk, nnn) = (op.x(), op.y(), op.n(), op.kk(), op.nnn());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => ClearScreen,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { nnn },
            (0x2, ..) => Call { nnn },
            (0x3, ..) => SkipIfEqual { x, kk },
            (0x4, ..) => SkipIfNotEqual { x, kk },
            (0x5, .., 0x0) => SkipIfRegistersEqual { x, y },
            (0x6, ..) => LoadImmediate { x, kk },
            (0x7, ..) => AddImmediate { x, kk },
            (0x8, .., 0x0) => Assign { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddWithCarry { x, y },
            (0x8, .., 0x5) => Subtract { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubtractReverse { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x9, .., 0x0) => SkipIfRegistersNotEqual { x, y },
            (0xA, ..) => SetAddress { nnn },
            (0xB, ..) => JumpWithOffset { nnn },
            (0xC, ..) => Random { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => SkipIfKeyPressed { x },
            (0xE, _, 0xA, 0x1) => SkipIfKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => ReadDelayTimer { x },
            (0xF, _, 0x0, 0xA) => WaitForKey { x },
            (0xF, _, 0x1, 0x5) => SetDelayTimer { x },
            (0xF, _, 0x1, 0x8) => SetSoundTimer { x },
            (0xF, _, 0x1, 0xE) => AddToAddress { x },
            (0xF, _, 0x2, 0x9) => FontGlyph { x },
            (0xF, _, 0x3, 0x3) => StoreDecimal { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            _ => return Err(Chip8Error::UnrecognizedOpcode { opcode: op, address }),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`, whose pc must already point past it
    pub fn execute<R: Rng>(self, state: &mut State, rng: &mut R, quirks: &Quirks) -> Result<()> {
        use Instruction::*;

        match self {
            ClearScreen => clr(state),
            Return => rts(state)?,
            Jump { nnn } => jump(state, nnn),
            Call { nnn } => call(state, nnn)?,
            SkipIfEqual { x, kk } => ske(state, x, kk),
            SkipIfNotEqual { x, kk } => skne(state, x, kk),
            SkipIfRegistersEqual { x, y } => skre(state, x, y),
            LoadImmediate { x, kk } => load(state, x, kk),
            AddImmediate { x, kk } => add(state, x, kk),
            Assign { x, y } => mv(state, x, y),
            Or { x, y } => or(state, x, y),
            And { x, y } => and(state, x, y),
            Xor { x, y } => xor(state, x, y),
            AddWithCarry { x, y } => addr(state, x, y),
            Subtract { x, y } => sub(state, x, y),
            ShiftRight { x, y } => shr(state, x, y, quirks),
            SubtractReverse { x, y } => subn(state, x, y),
            ShiftLeft { x, y } => shl(state, x, y, quirks),
            SkipIfRegistersNotEqual { x, y } => skrne(state, x, y),
            SetAddress { nnn } => loadi(state, nnn),
            JumpWithOffset { nnn } => jumpi(state, nnn),
            Random { x, kk } => rand(state, x, kk, rng),
            Draw { x, y, n } => draw(state, x, y, n, quirks),
            SkipIfKeyPressed { x } => skpr(state, x),
            SkipIfKeyNotPressed { x } => skup(state, x),
            ReadDelayTimer { x } => moved(state, x),
            WaitForKey { x } => keyd(state, x),
            SetDelayTimer { x } => loads(state, x),
            SetSoundTimer { x } => ld(state, x),
            AddToAddress { x } => addi(state, x),
            FontGlyph { x } => ldspr(state, x),
            StoreDecimal { x } => bcd(state, x),
            StoreRegisters { x } => stor(state, x),
            LoadRegisters { x } => read(state, x),
        }
        Ok(())
    }
}

/// Assembly-style mnemonics, used when tracing execution
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            SkipIfEqual { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipIfNotEqual { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipIfRegistersEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImmediate { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddImmediate { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Assign { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddWithCarry { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Subtract { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubtractReverse { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipIfRegistersNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            SetAddress { nnn } => write!(f, "LD I, {:#05X}", nnn),
            JumpWithOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipIfKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            ReadDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            WaitForKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            AddToAddress { x } => write!(f, "ADD I, V{:X}", x),
            FontGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreDecimal { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
