use log::warn;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_PIXELS, DISPLAY_WIDTH, FONT_END, MEMORY_SIZE, NUM_KEYS,
    NUM_REGISTERS, PROGRAM_START, SPRITE_SHEET, STACK_SIZE,
};
use crate::error::{Chip8Error, Result};

/// The complete Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the flag register: carry, borrow, shifted-out bit or collision
/// - (i) a 16-bit memory address register, of which only the low 12 bits reach memory
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) index of the next free stack slot
///
/// Timers
/// - 2 8-bit timers (delay & sound), counting down to 0 at 60Hz
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory, the font lives at 0x000..0x050
/// - 32x64 frame buffer of 0/1 pixels
///
/// ## Input
/// - pressed status of keys 0..F
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub pressed_keys: [bool; NUM_KEYS],
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            pressed_keys: [false; NUM_KEYS],
        }
    }

    /// Reads a byte; addresses wrap at 4K
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes a byte; addresses wrap at 4K and the font is read-only
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        let addr = addr & ADDRESS_MASK;
        if addr < FONT_END {
            warn!("ignoring write of {:#04X} to font address {:#05X}", value, addr);
            return;
        }
        self.memory[addr as usize] = value;
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        let left = u16::from(self.read_byte(self.pc));
        let right = u16::from(self.read_byte(self.pc.wrapping_add(1)));
        left << 8 | right
    }

    /// Pushes a return address; `address` is the calling instruction, for diagnostics
    pub fn push(&mut self, return_to: u16, address: u16) -> Result<()> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Chip8Error::StackOverflow { address })?;
        *slot = return_to;
        self.sp += 1;
        Ok(())
    }

    /// Pops a return address; `address` is the returning instruction, for diagnostics
    pub fn pop(&mut self, address: u16) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { address });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Keys outside 0..F are never pressed
    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.pressed_keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn first_pressed_key(&self) -> Option<u8> {
        self.pressed_keys
            .iter()
            .position(|&pressed| pressed)
            .map(|key| key as u8)
    }

    /// Reads a pixel by its row-major index, wrapping past the last one
    pub fn pixel(&self, index: usize) -> u8 {
        let index = index % DISPLAY_PIXELS;
        self.frame_buffer[index / DISPLAY_WIDTH][index % DISPLAY_WIDTH]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_layout() {
        let state = State::new();
        assert_eq!(state.memory[..80], SPRITE_SHEET[..]);
        assert!(state.memory[80..].iter().all(|&b| b == 0));
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.v, [0; 16]);
        assert!(!state.draw_flag);
        assert!(state.frame_buffer.iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch(), 0xAABB);
    }

    #[test]
    fn test_fetch_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.pc = 0xFFF;
        state.memory[0xFFF] = 0x12;
        assert_eq!(state.fetch(), 0x12F0);
    }

    #[test]
    fn test_addresses_are_masked() {
        let mut state = State::new();
        state.write_byte(0x1300, 0x42);
        assert_eq!(state.memory[0x300], 0x42);
        assert_eq!(state.read_byte(0xF300), 0x42);
    }

    #[test]
    fn test_font_is_read_only() {
        let mut state = State::new();
        state.write_byte(0x000, 0xFF);
        state.write_byte(0x04F, 0xFF);
        assert_eq!(state.memory[..80], SPRITE_SHEET[..]);
        state.write_byte(0x050, 0xFF);
        assert_eq!(state.memory[0x050], 0xFF);
    }

    #[test]
    fn test_stack_push_pop() {
        let mut state = State::new();
        state.push(0x202, 0x200).unwrap();
        state.push(0x302, 0x300).unwrap();
        assert_eq!(state.sp, 2);
        assert_eq!(state.pop(0x400).unwrap(), 0x302);
        assert_eq!(state.pop(0x304).unwrap(), 0x202);
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_stack_overflow() {
        let mut state = State::new();
        for n in 0..16 {
            state.push(n, n).unwrap();
        }
        assert!(matches!(
            state.push(0x222, 0x220),
            Err(Chip8Error::StackOverflow { address: 0x220 })
        ));
        assert_eq!(state.sp, 16);
    }

    #[test]
    fn test_stack_underflow() {
        let mut state = State::new();
        assert!(matches!(
            state.pop(0x200),
            Err(Chip8Error::StackUnderflow { address: 0x200 })
        ));
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_keys_out_of_range_are_not_pressed() {
        let mut state = State::new();
        state.pressed_keys = [true; 16];
        assert!(state.is_key_pressed(0xF));
        assert!(!state.is_key_pressed(0x10));
    }

    #[test]
    fn test_first_pressed_key() {
        let mut state = State::new();
        assert_eq!(state.first_pressed_key(), None);
        state.pressed_keys[0xC] = true;
        state.pressed_keys[0x3] = true;
        assert_eq!(state.first_pressed_key(), Some(0x3));
    }

    #[test]
    fn test_pixel_is_row_major() {
        let mut state = State::new();
        state.frame_buffer[1][2] = 1;
        assert_eq!(state.pixel(66), 1);
        assert_eq!(state.pixel(66 + 2048), 1);
        assert_eq!(state.pixel(2), 0);
    }
}
