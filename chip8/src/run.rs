use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use anyhow::Context;
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::constants::TIMER_HZ;
use chip8_core::Chip8;
use chip8_display::{Display, Palette};

use crate::audio::Beeper;
use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> anyhow::Result<()> {
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    }
    .with_quirks(args.quirks());

    // Load ROM
    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let mut reader = BufReader::new(file);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", args.rom.display()))?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, args.scale, Palette::default())?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;
    let mut beeper = if args.mute {
        None
    } else {
        Beeper::new(&sdl)
            .map_err(|e| warn!("no audio device, running muted: {}", e))
            .ok()
    };

    // Timers and the display both run at 60Hz
    let frame_time = Duration::from_secs(1) / TIMER_HZ;
    // Whether or not the frame rate should be respected
    let mut fast_forward = false;

    info!(
        "running {} at {} cycles per frame",
        args.rom.display(),
        args.cycles_per_frame
    );

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        for _ in 0..args.cycles_per_frame {
            chip8.advance_cpu();
        }

        if let Some(beeper) = beeper.as_mut() {
            if chip8.sound_timer() > 0 {
                beeper.play();
            } else {
                beeper.stop();
            }
        }

        // If the draw flag is set, render the current frame and unset it
        if let Some(frame) = chip8.get_frame() {
            display.render(frame)?;
            chip8.clear_draw_flag();
        }

        chip8.tick_timers();

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    Ok(())
}
