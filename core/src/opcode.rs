/// # Opcodes
///
/// Every instruction is one big-endian 16-bit word. Its fields overlap:
/// ```text
/// [F___] family   primary selector, masked in place (0x0000..=0xF000)
/// [_X__] x        first register index
/// [__Y_] y        second register index
/// [___N] n        4-bit immediate or sub-selector
/// [__KK] kk       8-bit immediate
/// [_NNN] nnn      12-bit address
/// ```
/// Which of them carry meaning depends on the family; decoding never fails at
/// this level, only `Instruction::decode` decides whether a word is valid.
pub trait Opcode {
    /// Returns the Opcode's component nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[F___]`, still in its high position
    fn family(&self) -> u16;

    /// `[_X__]` as a register index
    fn x(&self) -> usize;

    /// `[__Y_]` as a register index
    fn y(&self) -> usize;

    /// `[___N]`
    fn n(&self) -> u8;

    /// `[__KK]`
    fn kk(&self) -> u8;

    /// `[_NNN]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (
            (self >> 12) as u8,
            self.x() as u8,
            self.y() as u8,
            self.n(),
        )
    }

    fn family(&self) -> u16 {
        self & 0xF000
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
