use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_SET, FONT_START, MEMORY_SIZE, ROM_START,
};

/// The frame buffer is indexed as `[y][x]`; cells hold 0 (off) or 1 (on).
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the machine's internal state.
///
/// ## Registers
/// - (v) 16 8-bit registers V0..VF; VF doubles as the carry/borrow/collision
///   flag and is clobbered as a side effect of several instructions
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter, stepped by 2 per fetched instruction
/// - (sp) a 0-based stack pointer into `stack`
///
/// ## Memory
/// - 4096 bytes of addressable memory; 0x050..0x0A0 holds the built-in font,
///   ROMs load at 0x200, everything below that is interpreter-reserved
/// - a 16-entry stack of return addresses for nested subroutine calls
///
/// ## Timers
/// - two 8-bit timers (delay & sound), each stepped toward 0 once per tick
///
/// ## Display
/// - a 64x32 monochrome frame buffer, written only by `00E0` and `Dxyn`
/// - `draw_flag` marks the buffer dirty so the renderer can skip idle frames
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; 16],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; 16],
            i: 0,
            pc: ROM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; 16],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_loaded_at_0x050() {
        let state = State::new();
        // glyph for 0x0 is the first five font bytes
        assert_eq!(state.memory[0x050..0x055], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // glyph for 0xF is the last five
        assert_eq!(state.memory[0x09B..0x0A0], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
    }

    #[test]
    fn test_memory_above_font_zeroed() {
        let state = State::new();
        assert!(state.memory[0x0A0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pc_starts_at_rom_start() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
    }
}
