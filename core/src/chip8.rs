use std::io::Read;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{MAX_ROM_SIZE, NUM_KEYS, PROGRAM_START};
use crate::cpu;
use crate::error::{Chip8Error, Result};
use crate::quirks::Quirks;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the random source behind `Cxkk`
///  - the `quirks` it was configured with
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    rng: StdRng,
    quirks: Quirks,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            rng: StdRng::from_entropy(),
            quirks: Quirks::default(),
        }
    }

    /// A machine whose random numbers repeat from run to run
    pub fn with_seed(seed: u64) -> Self {
        Chip8 {
            state: State::new(),
            rng: StdRng::seed_from_u64(seed),
            quirks: Quirks::default(),
        }
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Self {
        self.quirks = quirks;
        self
    }

    /// Copies a program into memory at 0x200
    ///
    /// # Arguments
    /// * `program` the raw ROM image, at most 3584 bytes
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        info!("loaded {} byte program at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// Reads one byte past the limit at most, so an oversized source is
    /// reported as `RomTooLarge` without being drained.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut program = Vec::with_capacity(MAX_ROM_SIZE + 1);
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.pressed_keys.get_mut(key as usize) {
            Some(slot) => *slot = pressed,
            None => warn!("ignoring key {:#04X}, the keypad only has {} keys", key, NUM_KEYS),
        }
    }

    /// Advances the CPU by a single cycle
    pub fn advance_cpu(&mut self) {
        cpu::step(&mut self.state, &mut self.rng, &self.quirks);
    }

    /// Decrements both timers towards 0; meant to be called at 60Hz
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn draw_flag(&self) -> bool {
        self.state.draw_flag
    }

    /// To be called once the current frame has been presented
    pub fn clear_draw_flag(&mut self) {
        self.state.draw_flag = false;
    }

    /// A single pixel, 0 or 1, by row-major index
    pub fn pixel(&self, index: usize) -> u8 {
        self.state.pixel(index)
    }

    /// A tone should play while this is nonzero
    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
