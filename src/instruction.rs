use crate::opcode::Opcode;
use crate::operations::{self, Handler};

/// Selects the handler for an opcode.
///
/// The match expresses the two-level dispatch scheme: the first nibble picks
/// the family, and families 0x0, 0x8 and 0xE refine on the last nibble while
/// 0xF refines on the last byte. Anything that falls through every arm decodes
/// to the diagnostic no-op rather than aborting.
pub fn decode(op: u16) -> Handler {
    match op.nibbles() {
        (0x0, 0x0, 0xE, 0x0) => operations::cls,
        (0x0, 0x0, 0xE, 0xE) => operations::ret,
        (0x1, ..) => operations::jp,
        (0x2, ..) => operations::call,
        (0x3, ..) => operations::se_byte,
        (0x4, ..) => operations::sne_byte,
        (0x5, .., 0x0) => operations::se_reg,
        (0x6, ..) => operations::ld_byte,
        (0x7, ..) => operations::add_byte,
        (0x8, .., 0x0) => operations::ld_reg,
        (0x8, .., 0x1) => operations::or,
        (0x8, .., 0x2) => operations::and,
        (0x8, .., 0x3) => operations::xor,
        (0x8, .., 0x4) => operations::add_reg,
        (0x8, .., 0x5) => operations::sub,
        (0x8, .., 0x6) => operations::shr,
        (0x8, .., 0x7) => operations::subn,
        (0x8, .., 0xE) => operations::shl,
        (0x9, .., 0x0) => operations::sne_reg,
        (0xA, ..) => operations::ld_i,
        (0xB, ..) => operations::jp_v0,
        (0xC, ..) => operations::rnd,
        (0xD, ..) => operations::drw,
        (0xE, .., 0x9, 0xE) => operations::skp,
        (0xE, .., 0xA, 0x1) => operations::sknp,
        (0xF, .., 0x0, 0x7) => operations::ld_from_dt,
        (0xF, .., 0x0, 0xA) => operations::wait_key,
        (0xF, .., 0x1, 0x5) => operations::ld_dt,
        (0xF, .., 0x1, 0x8) => operations::ld_st,
        (0xF, .., 0x1, 0xE) => operations::add_i,
        (0xF, .., 0x2, 0x9) => operations::ld_font,
        (0xF, .., 0x3, 0x3) => operations::bcd,
        (0xF, .., 0x5, 0x5) => operations::store_v,
        (0xF, .., 0x6, 0x5) => operations::load_v,
        _ => operations::unknown,
    }
}
