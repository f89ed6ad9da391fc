use std::fmt::{Display, Formatter};

use crate::chess::board::square::{Direction, Square};
use crate::chess::board::Board;
use crate::chess::rules;

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Piece {
    color: Color,
    kind: Kind,
}

impl Piece {
    pub fn new(color: Color, kind: Kind) -> Self {
        Self { color, kind }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Whether this piece may move from `from` to `to` on `board`, judged by its
    /// movement pattern alone. Neither the side to move nor the safety of the
    /// own king is taken into account.
    pub fn is_valid_move(&self, board: &Board, from: Square, to: Square) -> bool {
        rules::is_valid_move(board, *self, from, to)
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Kind {
    Bishop,
    King,
    Knight,
    Pawn,
    Queen,
    Rook,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Bishop => "bishop",
            Kind::King => "king",
            Kind::Knight => "knight",
            Kind::Pawn => "pawn",
            Kind::Queen => "queen",
            Kind::Rook => "rook",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const fn other(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// The direction this color's pawns advance in.
    pub const fn forward(&self) -> Direction {
        match self {
            Color::Black => Direction::Down,
            Color::White => Direction::Up,
        }
    }

    /// The row this color's pawns start on.
    pub const fn pawn_row(&self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 6,
        }
    }

    pub const fn back_row(&self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 7,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}
