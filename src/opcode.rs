/// # Opcodes
///
/// An opcode is a single big-endian 16-bit instruction word. The top nibble
/// selects the instruction family; families 0x0, 0x8 and 0xE dispatch further
/// on the bottom nibble and family 0xF on the bottom byte.
///
/// The remaining bits carry operands:
/// - `[_X__]` the register Vx, or the upper bound of a register range V0..=Vx
/// - `[__Y_]` the register Vy
/// - `[___N]` a 4-bit literal (sprite height)
/// - `[__KK]` an 8-bit literal
/// - `[_NNN]` a 12-bit address
pub trait Opcode {
    /// All four nibbles, most significant first; the decoder matches on this.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Vx operand field, shifted down into 0x0..=0xF.
    fn x(&self) -> u8;

    /// The Vy operand field, shifted down into 0x0..=0xF.
    fn y(&self) -> u8;

    /// The 4-bit literal operand.
    fn n(&self) -> u8;

    /// The 8-bit literal operand.
    fn kk(&self) -> u8;

    /// The 12-bit address operand.
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    #[test]
    fn test_nibbles() {
        let op: u16 = 0xD123;
        assert_eq!(op.nibbles(), (0xD, 0x1, 0x2, 0x3));
    }

    #[test]
    fn test_x_is_shifted() {
        let op: u16 = 0x3C42;
        assert_eq!(op.x(), 0xC);
    }

    #[test]
    fn test_y_is_shifted() {
        let op: u16 = 0x8AB4;
        assert_eq!(op.y(), 0xB);
    }

    #[test]
    fn test_n() {
        let op: u16 = 0xD12F;
        assert_eq!(op.n(), 0xF);
    }

    #[test]
    fn test_kk() {
        let op: u16 = 0x6AFE;
        assert_eq!(op.kk(), 0xFE);
    }

    #[test]
    fn test_nnn() {
        let op: u16 = 0x2BCD;
        assert_eq!(op.nnn(), 0x0BCD);
    }
}
