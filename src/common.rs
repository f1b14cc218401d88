//! This module defines the most basic data types used throughout the solver,
//! the recorder and the validator. These are also the types a client of this
//! crate is most likely to work with directly.

use std::fmt;

// ----------------------------------------------------------------------------
// --- TILE ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// One of the integer tiles drawn for a game: either a small tile (1..=10,
/// available twice each) or one of the four "big" tiles (25, 50, 75, 100).
/// Tiles are identified by their index (0..count) in the caller-supplied
/// ordered sequence, not by their value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Tile(pub u32);
impl Tile {
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }
}
impl From<u32> for Tile {
    fn from(value: u32) -> Self {
        Tile(value)
    }
}

/// The maximum number of tiles a single game may combine. Fixed by the
/// 3-bit tile index encoded in each solution byte (see [`crate::encode_op`]).
pub const MAX_TILES: usize = 8;

// ----------------------------------------------------------------------------
// --- OPERATOR -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// One of the four binary arithmetic operators a solution may chain. There is
/// deliberately no "NOP" variant here: a leaf tile is represented as an
/// [`crate::arena::Operation`] whose `op` field is `None`, which is the
/// idiomatic way to express "no operator" in Rust rather than adding a
/// sentinel enum member.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Operator {
    Add = 0,
    Sub = 1,
    Mul = 2,
    Div = 3,
}
impl Operator {
    /// Decodes the 2-bit operator field of an encoded solution byte.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Operator::Add,
            1 => Operator::Sub,
            2 => Operator::Mul,
            _ => Operator::Div,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => 'x',
            Operator::Div => '/',
        }
    }
}
impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ----------------------------------------------------------------------------
// --- OPERATION ENCODING -------------------------------------------------------
// ----------------------------------------------------------------------------
/// Packs a reconstructed operation into the 1-byte encoding described in
/// spec §6: bits 0-2 are the left tile index, bits 3-5 the right tile index,
/// bits 6-7 the operator. Byte 0 is reserved as the stream terminator and can
/// never be produced by a real operation (it would mean `left == right == 0`
/// with `Add`, i.e. reusing tile 0 against itself).
pub fn encode_op(left_tile: u8, right_tile: u8, op: Operator) -> u8 {
    (left_tile & 7) | ((right_tile & 7) << 3) | ((op as u8) << 6)
}

/// Splits an encoded byte back into its (left tile, right tile, operator)
/// components. Does not validate tile bounds; callers that need validation
/// should go through [`crate::validator::validate`].
pub fn decode_op(byte: u8) -> (u8, u8, Operator) {
    let left = byte & 7;
    let right = (byte >> 3) & 7;
    let op = Operator::from_bits(byte >> 6);
    (left, right, op)
}
