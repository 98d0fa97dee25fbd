use std::fmt;

/// A raw 16-bit instruction word, with accessors for the fields
/// that the different instruction families are built from.
///
/// ```text
///  F   X   Y   N
/// |---|---|---|---|
///     |--- NNN ---|
///         |- NN --|
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combine two bytes big-endian, as they are stored in memory.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode(((left as u16) << 8) | right as u16)
    }

    /// All four nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    /// The high nibble, which selects the instruction family.
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Register index in bits 8-11.
    pub fn x(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    /// Register index in bits 4-7.
    pub fn y(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    /// The low nibble, used as sprite height.
    pub fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    /// The low byte.
    pub fn nn(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// The low twelve bits, an address.
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
