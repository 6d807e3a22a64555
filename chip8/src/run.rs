use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chipvm::constants::CLOCK_SPEED;
use chipvm::Machine;
use display::Display;

use crate::keymap::keymap;

/// Drives the machine at a fixed cadence: one tick per cycle period, with the
/// window, event pump and frame rendering wrapped around it.
pub fn run(rom: PathBuf) -> Result<(), Box<dyn Error>> {
    let mut machine = Machine::new();

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl);
    let mut events = sdl.event_pump()?;

    // Load ROM
    let file = File::open(&rom)?;
    let mut reader = BufReader::new(file);
    machine.load_rom_from(&mut reader)?;
    info!("loaded ROM {}", rom.display());

    // Set initial timing
    let cycle_time = Duration::new(0, CLOCK_SPEED);
    let mut last_cycle = Instant::now();

    'event: loop {
        // If the machine reports a dirty frame, render it
        if let Some(frame) = machine.take_frame() {
            display.render(&frame);
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => machine.key_press(kc),
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        machine.key_release(kc)
                    }
                }
                _ => continue,
            };
        }

        // Update state
        machine.tick();

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = current_time;
    }

    Ok(())
}
