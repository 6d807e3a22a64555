//! Instruction handlers.
//!
//! Each handler is a pure function from the pre-instruction `State` (and the
//! keypad) to the post-instruction `State`. The machine advances `pc` past the
//! fetched word *before* dispatch, so:
//! - fall-through handlers leave `pc` alone
//! - skip handlers add 2
//! - jumps and returns assign `pc` absolutely
//! - `2nnn` pushes the already-advanced `pc`, which is the return address

use log::warn;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, FONT_START};
use crate::opcode::Opcode;
use crate::state::State;

/// An executable instruction: a pure function from the current state (plus
/// keypad) to the successor state.
pub type Handler = fn(u16, &State, &[bool; 16]) -> State;

/// 00E0: clear the display
pub fn cls(_op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    }
}

/// 00EE: PC = stack.pop()
///
/// Returning with an empty stack wraps the pointer, mirroring the overflow
/// policy in `call`.
pub fn ret(_op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    if state.sp == 0x0 {
        warn!("return with empty stack; wrapping stack pointer");
    }
    State {
        pc: state.stack[state.sp as usize],
        sp: state.sp.wrapping_sub(0x1) & 0xF,
        ..*state
    }
}

/// 1nnn: PC = nnn
pub fn jp(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        pc: op.nnn(),
        ..*state
    }
}

/// 2nnn: stack.push(PC); PC = nnn
///
/// A 17th nested call wraps the stack pointer back to 0 rather than indexing
/// out of bounds; the interpreter logs it and keeps going.
pub fn call(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let sp = state.sp.wrapping_add(0x1) & 0xF;
    if sp == 0x0 {
        warn!("call {:04X} overflowed the stack; wrapping stack pointer", op);
    }
    let mut stack = state.stack;
    stack[sp as usize] = state.pc;
    State {
        pc: op.nnn(),
        sp,
        stack,
        ..*state
    }
}

/// 3xkk: if Vx == kk then skip
pub fn se_byte(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let pc = if state.v[op.x() as usize] == op.kk() {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// 4xkk: if Vx != kk then skip
pub fn sne_byte(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let pc = if state.v[op.x() as usize] != op.kk() {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// 5xy0: if Vx == Vy then skip
pub fn se_reg(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let pc = if state.v[op.x() as usize] == state.v[op.y() as usize] {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// 6xkk: Vx = kk
pub fn ld_byte(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] = op.kk();
    State { v, ..*state }
}

/// 7xkk: Vx += kk, overflow dropped
pub fn add_byte(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] = v[op.x() as usize].wrapping_add(op.kk());
    State { v, ..*state }
}

/// 8xy0: Vx = Vy
pub fn ld_reg(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] = v[op.y() as usize];
    State { v, ..*state }
}

/// 8xy1: Vx |= Vy
pub fn or(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] |= v[op.y() as usize];
    State { v, ..*state }
}

/// 8xy2: Vx &= Vy
pub fn and(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] &= v[op.y() as usize];
    State { v, ..*state }
}

/// 8xy3: Vx ^= Vy
pub fn xor(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] ^= v[op.y() as usize];
    State { v, ..*state }
}

/// 8xy4: Vx += Vy; VF = carry
pub fn add_reg(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let (res, carry) = state.v[op.x() as usize].overflowing_add(state.v[op.y() as usize]);
    let mut v = state.v;
    v[0xF] = if carry { 0x1 } else { 0x0 };
    v[op.x() as usize] = res;
    State { v, ..*state }
}

/// 8xy5: Vx -= Vy; VF = !borrow
pub fn sub(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let (res, borrow) = state.v[op.x() as usize].overflowing_sub(state.v[op.y() as usize]);
    let mut v = state.v;
    v[0xF] = if borrow { 0x0 } else { 0x1 };
    v[op.x() as usize] = res;
    State { v, ..*state }
}

/// 8xy6: VF = lsb(Vx); Vx >>= 1
pub fn shr(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[0xF] = v[op.x() as usize] & 0x1;
    v[op.x() as usize] >>= 1;
    State { v, ..*state }
}

/// 8xy7: Vx = Vy - Vx; VF = !borrow
pub fn subn(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let (res, borrow) = state.v[op.y() as usize].overflowing_sub(state.v[op.x() as usize]);
    let mut v = state.v;
    v[0xF] = if borrow { 0x0 } else { 0x1 };
    v[op.x() as usize] = res;
    State { v, ..*state }
}

/// 8xyE: VF = msb(Vx); Vx <<= 1
pub fn shl(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[0xF] = (v[op.x() as usize] & 0x80) >> 7;
    v[op.x() as usize] <<= 1;
    State { v, ..*state }
}

/// 9xy0: if Vx != Vy then skip
pub fn sne_reg(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let pc = if state.v[op.x() as usize] != state.v[op.y() as usize] {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// Annn: I = nnn
pub fn ld_i(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        i: op.nnn(),
        ..*state
    }
}

/// Bnnn: PC = nnn + V0
pub fn jp_v0(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        pc: op.nnn() + u16::from(state.v[0x0]),
        ..*state
    }
}

/// Cxkk: Vx = random byte & kk
pub fn rnd(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] = rand::random::<u8>() & op.kk();
    State { v, ..*state }
}

/// Dxyn: XOR an n-byte sprite from memory[I..] onto the screen at (Vx, Vy).
///
/// The origin wraps into the screen and so does every sprite pixel; bits are
/// drawn most significant first. VF is cleared up front and set if the XOR
/// turns any lit pixel off.
pub fn drw(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    v[0xF] = 0x0;

    let origin_x = state.v[op.x() as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[op.y() as usize] as usize % DISPLAY_HEIGHT;

    for row in 0..op.n() as usize {
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        let sprite_byte = state.memory[state.i as usize + row];
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel = (sprite_byte >> (7 - bit)) & 0x1;
            v[0xF] |= pixel & frame_buffer[y][x];
            frame_buffer[y][x] ^= pixel;
        }
    }

    State {
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    }
}

/// Ex9E: if key Vx is pressed then skip
///
/// The keypad has 16 keys; only the low nibble of Vx selects one.
pub fn skp(op: u16, state: &State, keypad: &[bool; 16]) -> State {
    let pc = if keypad[(state.v[op.x() as usize] & 0xF) as usize] {
        state.pc + 0x2
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// ExA1: if key Vx is not pressed then skip
pub fn sknp(op: u16, state: &State, keypad: &[bool; 16]) -> State {
    let pc = if keypad[(state.v[op.x() as usize] & 0xF) as usize] {
        state.pc
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// Fx07: Vx = DT
pub fn ld_from_dt(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    v[op.x() as usize] = state.delay_timer;
    State { v, ..*state }
}

/// Fx0A: wait for a keypress and store it in Vx.
///
/// Expressed as a non-blocking repeat: with no key down, `pc` rewinds over the
/// instruction so the next tick refetches it and control returns to the host
/// loop. With several keys down the lowest index wins.
pub fn wait_key(op: u16, state: &State, keypad: &[bool; 16]) -> State {
    match keypad.iter().position(|&pressed| pressed) {
        Some(key) => {
            let mut v = state.v;
            v[op.x() as usize] = key as u8;
            State { v, ..*state }
        }
        None => State {
            pc: state.pc - 0x2,
            ..*state
        },
    }
}

/// Fx15: DT = Vx
pub fn ld_dt(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        delay_timer: state.v[op.x() as usize],
        ..*state
    }
}

/// Fx18: ST = Vx
pub fn ld_st(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        sound_timer: state.v[op.x() as usize],
        ..*state
    }
}

/// Fx1E: I += Vx, wrapping at 16 bits
pub fn add_i(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        i: state.i.wrapping_add(u16::from(state.v[op.x() as usize])),
        ..*state
    }
}

/// Fx29: I = address of the font glyph for digit Vx
pub fn ld_font(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    State {
        i: FONT_START + FONT_GLYPH_SIZE * u16::from(state.v[op.x() as usize]),
        ..*state
    }
}

/// Fx33: memory[I..I+3] = BCD digits of Vx (hundreds, tens, ones)
pub fn bcd(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let value = state.v[op.x() as usize];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let mut memory = state.memory;
    let i = state.i as usize;
    memory[i..i + 3].copy_from_slice(&digits);
    State { memory, ..*state }
}

/// Fx55: memory[I..=I+x] = V0..=Vx
pub fn store_v(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut memory = state.memory;
    let i = state.i as usize;
    let x = op.x() as usize;
    memory[i..=i + x].copy_from_slice(&state.v[0x0..=x]);
    State { memory, ..*state }
}

/// Fx65: V0..=Vx = memory[I..=I+x]
pub fn load_v(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    let mut v = state.v;
    let i = state.i as usize;
    let x = op.x() as usize;
    v[0x0..=x].copy_from_slice(&state.memory[i..=i + x]);
    State { v, ..*state }
}

/// Diagnostic no-op for opcodes outside the instruction set; execution
/// continues at the next word.
pub fn unknown(op: u16, state: &State, _keypad: &[bool; 16]) -> State {
    warn!("unrecognized opcode {:04X} at {:04X}; skipping", op, state.pc - 0x2);
    *state
}
