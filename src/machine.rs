use std::io::Read;

use log::trace;

use crate::constants::{MAX_ROM_SIZE, ROM_START};
use crate::error::RomLoadError;
use crate::instruction;
use crate::state::{FrameBuffer, State};

/// # Machine
/// The CHIP-8 interpreter: a fixed memory image plus CPU-like state, advanced
/// one fetch-decode-execute cycle at a time.
///
/// Supplies interfaces for:
/// - loading ROMs
/// - pressing and releasing keypad keys
/// - advancing execution by one tick
/// - inspecting the frame buffer for rendering by some display
///
/// `tick` is synchronous and non-reentrant; the host owns the cadence and must
/// not touch the keypad or the frame buffer while a tick is in progress.
pub struct Machine {
    state: State,
    keypad: [bool; 16],
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: State::new(),
            keypad: [false; 16],
        }
    }

    /// Copy a ROM image verbatim into memory at 0x200.
    ///
    /// No validation beyond the bounds check: malformed programs are accepted
    /// and only fail at execution time.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), RomLoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(RomLoadError::TooLarge { size: rom.len() });
        }
        let start = ROM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Read a ROM image to its end and load it.
    ///
    /// # Arguments
    /// * `reader` a reader over a ROM image, typically an opened file
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<(), RomLoadError> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load_rom(&rom)
    }

    /// Execute one cycle:
    /// - fetch the opcode at `pc` and advance `pc` past it
    /// - decode and run the handler, which may adjust `pc` itself
    /// - step both timers toward zero
    pub fn tick(&mut self) {
        let op = self.fetch();
        trace!(
            "{:04X} pc={:04X} i={:04X} sp={:X} v={:02X?}",
            op,
            self.state.pc,
            self.state.i,
            self.state.sp,
            self.state.v
        );
        self.state.pc += 0x2;
        self.state = instruction::decode(op)(op, &self.state, &self.keypad);

        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }

    /// Read accessor for the display collaborator.
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the frame buffer if it changed since the last call, clearing
    /// the dirty flag; the renderer can skip idle frames.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of a keypad key (0x0..=0xF).
    pub fn key_press(&mut self, key: u8) {
        self.keypad[key as usize] = true;
    }

    /// Unset the pressed status of a keypad key (0x0..=0xF).
    pub fn key_release(&mut self, key: u8) {
        self.keypad[key as usize] = false;
    }

    /// The next opcode: two consecutive bytes at `pc`, big-endian.
    fn fetch(&self) -> u16 {
        let high = u16::from(self.state.memory[self.state.pc as usize]);
        let low = u16::from(self.state.memory[self.state.pc as usize + 1]);
        high << 8 | low
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_is_big_endian() {
        let mut machine = Machine::new();
        machine.load_rom(&[0xAA, 0xBB]).unwrap();
        assert_eq!(machine.fetch(), 0xAABB);
    }

    #[test]
    fn test_tick_advances_pc() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x00, 0xE0]).unwrap();
        machine.tick();
        assert_eq!(machine.state.pc, 0x202);
    }

    #[test]
    fn test_tick_decrements_timers() {
        let mut machine = Machine::new();
        // 6205: V2 = 5; F215: DT = V2; F218: ST = V2
        machine
            .load_rom(&[0x62, 0x05, 0xF2, 0x15, 0xF2, 0x18, 0x00, 0xE0])
            .unwrap();
        for _ in 0..4 {
            machine.tick();
        }
        // each timer steps once per tick from the tick that set it
        assert_eq!(machine.state.delay_timer, 2);
        assert_eq!(machine.state.sound_timer, 3);
    }

    #[test]
    fn test_timers_stop_at_zero() {
        let mut machine = Machine::new();
        machine
            .load_rom(&[0x00, 0xE0, 0x12, 0x00])
            .unwrap();
        for _ in 0..8 {
            machine.tick();
        }
        assert_eq!(machine.state.delay_timer, 0);
        assert_eq!(machine.state.sound_timer, 0);
    }

    #[test]
    fn test_load_rom_copies_at_0x200() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x1, 0x2, 0x3]).unwrap();
        assert_eq!(machine.state.memory[0x200..0x203], [0x1, 0x2, 0x3]);
    }

    #[test]
    fn test_load_rom_accepts_max_size() {
        let mut machine = Machine::new();
        assert!(machine.load_rom(&[0xFF; 3584]).is_ok());
        assert_eq!(machine.state.memory[0xFFF], 0xFF);
    }

    #[test]
    fn test_load_rom_rejects_oversized_image() {
        let mut machine = Machine::new();
        let err = machine.load_rom(&[0xFF; 3585]).unwrap_err();
        assert!(matches!(err, RomLoadError::TooLarge { size: 3585 }));
        // memory is untouched on failure
        assert!(machine.state.memory[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut machine = Machine::new();
        let mut rom: &[u8] = &[0x00, 0xE0];
        machine.load_rom_from(&mut rom).unwrap();
        assert_eq!(machine.state.memory[0x200..0x202], [0x00, 0xE0]);
    }

    #[test]
    fn test_wait_key_blocks_across_ticks() {
        let mut machine = Machine::new();
        // F50A: wait for a key into V5
        machine.load_rom(&[0xF5, 0x0A]).unwrap();
        machine.tick();
        machine.tick();
        assert_eq!(machine.state.pc, 0x200);
    }

    #[test]
    fn test_wait_key_unblocks_on_key_press() {
        let mut machine = Machine::new();
        machine.load_rom(&[0xF5, 0x0A, 0x00, 0xE0]).unwrap();
        machine.tick();
        assert_eq!(machine.state.pc, 0x200);
        machine.key_press(0xB);
        machine.tick();
        assert_eq!(machine.state.v[0x5], 0xB);
        assert_eq!(machine.state.pc, 0x202);
        // execution proceeds normally afterwards
        machine.tick();
        assert_eq!(machine.state.pc, 0x204);
    }

    #[test]
    fn test_calls_nested_past_stack_depth_wrap_pointer() {
        let mut machine = Machine::new();
        // 2200: call 0x200, recursing on itself forever
        machine.load_rom(&[0x22, 0x00]).unwrap();
        for _ in 0..40 {
            machine.tick();
        }
        // execution continues past depth 16 with the pointer wrapped mod 16
        assert_eq!(machine.state.pc, 0x200);
        assert_eq!(machine.state.sp, 40 % 16);
        assert!(machine.state.stack.iter().all(|&addr| addr == 0x202));
    }

    #[test]
    fn test_key_release_clears_key() {
        let mut machine = Machine::new();
        machine.key_press(0x3);
        assert!(machine.keypad[0x3]);
        machine.key_release(0x3);
        assert!(!machine.keypad[0x3]);
    }

    #[test]
    fn test_take_frame_only_when_dirty() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x00, 0xE0, 0x61, 0x01]).unwrap();
        assert!(machine.take_frame().is_none());
        machine.tick(); // 00E0 marks the frame dirty
        assert!(machine.take_frame().is_some());
        assert!(machine.take_frame().is_none());
        machine.tick(); // 6101 doesn't touch the display
        assert!(machine.take_frame().is_none());
    }

    #[test]
    fn test_unknown_opcode_doesnt_halt_execution() {
        let mut machine = Machine::new();
        machine.load_rom(&[0x0F, 0xFF, 0x61, 0x42]).unwrap();
        machine.tick();
        machine.tick();
        assert_eq!(machine.state.v[0x1], 0x42);
    }

    #[test]
    fn test_frame_accessor_reads_display() {
        let mut machine = Machine::new();
        // A050: I = font base; D005: draw glyph 0 at (0, 0)
        machine.load_rom(&[0xA0, 0x50, 0xD0, 0x05]).unwrap();
        machine.tick();
        machine.tick();
        assert_eq!(machine.frame()[0][0..4], [1, 1, 1, 1]);
    }
}
