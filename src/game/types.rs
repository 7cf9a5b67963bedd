//! Value types shared by the rules engine, game state and interaction layers
//!
//! Every type here is a small `Copy` value with a fixed shape. Pieces and
//! positions are owned by the rules engine; the rest of the crate only ever
//! receives these values from queries, never references into engine state.
//!
//! # Coordinate System
//!
//! - **Square**: linear index 0-63 where `index = rank * 8 + file`
//! - **File**: 0 (file 'a') to 7 (file 'h')
//! - **Rank**: 0 (rank 1) to 7 (rank 8)
//!
//! So `a1 = 0`, `h1 = 7`, `e2 = 12`, `e4 = 28`, `a8 = 56`, `h8 = 63`.

use crate::game::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board column, 0 (file 'a') to 7 (file 'h')
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct File(u8);

impl File {
    /// Create a file from its index, `None` when outside 0-7
    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(File(index))
    }

    /// Create a file from a character ('a'..='h')
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(File(c as u8 - b'a')),
            _ => None,
        }
    }

    /// Convert file to character ('a'..='h')
    pub fn to_char(self) -> char {
        (b'a' + self.0) as char
    }

    /// Get the file index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }

    /// Mirror the file for a rotated board (a <-> h)
    pub fn flip(self) -> Self {
        File(7 - self.0)
    }
}

/// Board row, 0 (rank 1) to 7 (rank 8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Create a rank from its index, `None` when outside 0-7
    pub fn new(index: u8) -> Option<Self> {
        (index < 8).then_some(Rank(index))
    }

    /// Create a rank from a number (1-8)
    pub fn from_number(n: u8) -> Option<Self> {
        if (1..=8).contains(&n) {
            Some(Rank(n - 1))
        } else {
            None
        }
    }

    /// Convert rank to number (1-8)
    pub fn to_number(self) -> u8 {
        self.0 + 1
    }

    /// Get the rank index (0-7)
    pub fn index(self) -> u8 {
        self.0
    }

    /// Mirror the rank for a rotated board (1 <-> 8)
    pub fn flip(self) -> Self {
        Rank(7 - self.0)
    }

    /// True for the two absolute back ranks (index 0 and 7)
    pub fn is_back_rank(self) -> bool {
        self.0 == 0 || self.0 == 7
    }
}

/// A board square as a linear index 0-63
///
/// Serialized in algebraic notation ("e4") so snapshots stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Create a square from its linear index, `None` when outside 0-63
    pub fn new(index: u8) -> Option<Self> {
        (index < 64).then_some(Square(index))
    }

    /// Wrap an index already known to be on the board (engine squares)
    pub(crate) fn from_index_masked(index: u8) -> Self {
        Square(index & 63)
    }

    /// Create a square from file and rank
    pub fn from_coords(file: File, rank: Rank) -> Self {
        Square(rank.0 * 8 + file.0)
    }

    /// Create a square from algebraic notation (e.g., "e4")
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?.to_ascii_lowercase())?;
        let rank_num = chars.next()?.to_digit(10)? as u8;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::from_coords(file, Rank::from_number(rank_num)?))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn file(self) -> File {
        File(self.0 % 8)
    }

    pub fn rank(self) -> Rank {
        Rank(self.0 / 8)
    }

    /// The same square seen from the other side of the board
    pub fn rotate(self) -> Self {
        Square(63 - self.0)
    }

    /// All 64 squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_number())
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s.trim()).ok_or_else(|| GameError::InvalidSquare {
            input: s.to_string(),
        })
    }
}

impl Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Side to move / piece owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase letter used in UCI promotion suffixes and FEN
    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a piece letter, case-insensitive
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece as reported by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN-style symbol: uppercase for White, lowercase for Black
    pub fn symbol(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// A move in UCI shape: origin, destination and an optional promotion piece
///
/// Castling is expressed as the king's two-square move (e1g1, e8c8).
/// `promotion` is only ever set for a pawn arriving on rank 1 or rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// UCI notation, e.g. "e2e4" or "e7e8q"
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GameError::InvalidMove {
            input: s.to_string(),
        };

        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }

        let from = Square::from_algebraic(&s[0..2]).ok_or_else(invalid)?;
        let to = Square::from_algebraic(&s[2..4]).ok_or_else(invalid)?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(PieceKind::from_char(c).ok_or_else(invalid)?),
            None => None,
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}
