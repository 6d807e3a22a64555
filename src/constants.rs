/// Horizontal resolution of the display in pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Vertical resolution of the display in pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// Address at which ROMs are loaded and execution begins.
pub const ROM_START: u16 = 0x200;

/// The largest ROM that fits between `ROM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - ROM_START as usize;

/// Address of the built-in font sprites.
pub const FONT_START: u16 = 0x050;

/// Bytes per font glyph; `Fx29` multiplies the digit by this stride.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Nanoseconds per CPU cycle; one instruction and one timer step per cycle
/// at 500Hz.
pub const CLOCK_SPEED: u32 = 2_000_000;

/// The built-in font: 16 glyphs (hex digits 0..F) of 5 bytes each.
/// Each byte is one 8-pixel row, most significant bit leftmost.
pub const FONT_SET: [u8; 80] = [
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
