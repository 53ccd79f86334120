//! Runs Chip-8 ROMs in an SDL2 window.
//!
//! ```bash
//! RUST_LOG=info cargo run -p chip8 -- roms/PONG2
//! ```
//!
//! Keypad keys are the left four columns of the keyboard (see `keymap`), Space
//! runs without frame pacing while held and Escape quits.
use std::path::PathBuf;

use clap::Parser;

use chip8_core::constants::DEFAULT_CYCLES_PER_TIMER_TICK;
use chip8_core::Quirks;

mod audio;
mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per 60Hz frame
    #[arg(short, long, default_value_t = DEFAULT_CYCLES_PER_TIMER_TICK)]
    cycles_per_frame: u32,

    /// Window pixels per Chip-8 pixel
    #[arg(short, long, default_value_t = 10)]
    scale: u32,

    /// Seed for the random number instruction, for repeatable runs
    #[arg(long)]
    seed: Option<u64>,

    /// 8XY6/8XYE shift VY into VX
    #[arg(long)]
    shift_quirk: bool,

    /// Sprites wrap across the whole screen instead of per axis
    #[arg(long)]
    flat_wrap: bool,

    /// Don't open an audio device
    #[arg(short, long)]
    mute: bool,
}

impl Args {
    fn quirks(&self) -> Quirks {
        Quirks {
            shift_reads_vy: self.shift_quirk,
            flat_sprite_wrap: self.flat_wrap,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    run::run(&args)
}
