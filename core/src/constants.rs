/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Only the low 12 bits of an address reach memory
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Where ROMs are loaded and execution starts; everything below belongs to the interpreter
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_PIXELS: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

pub const STACK_SIZE: usize = 16;
pub const NUM_REGISTERS: usize = 16;
pub const NUM_KEYS: usize = 16;

/// The flag register; clobbered by arithmetic, shifts and draws
pub const VF: usize = 0xF;

/// Each font glyph is 4x5 pixels stored as 5 bytes
pub const FONT_GLYPH_BYTES: u16 = 5;

/// Timers count down at 60Hz regardless of the instruction rate
pub const TIMER_HZ: u32 = 60;

/// Instruction cycles run between two timer ticks unless configured otherwise
pub const DEFAULT_CYCLES_PER_TIMER_TICK: u32 = 10;

/// # Sprite sheet
/// Hexadecimal digits 0..F, loaded at address 0x000.
///
/// ```text
/// "0"       Binary   Hex
/// ****    11110000  0xF0
/// *  *    10010000  0x90
/// *  *    10010000  0x90
/// *  *    10010000  0x90
/// ****    11110000  0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The font occupies `0x000..FONT_END` and is never written after construction
pub const FONT_END: u16 = SPRITE_SHEET.len() as u16;
