use std::ops::{Index, IndexMut};

use arr_macro::arr;
use log::{debug, trace};
use thiserror::Error;

use crate::chess::board::iter::SquareIterator;
use crate::chess::board::piece::{Color, Kind, Piece};
use crate::chess::board::r#move::{Flags, Move};
use crate::chess::board::setup::default_setup;
use crate::chess::board::square::Square;

pub mod r#move;
pub mod piece;
pub mod setup;
pub mod square;

mod iter;

pub(crate) const BOARD_SIZE: usize = 64;

/// Every way a move can be refused. All of them mean the same thing to the
/// caller: the move was not made and another one should be asked for.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("invalid move: there is no piece on {0}")]
    NoPiece(Square),
    #[error("invalid move: the {piece} on {from} cannot move to {to}")]
    IllegalMove {
        piece: Piece,
        from: Square,
        to: Square,
    },
    #[error("invalid move: it is {to_move}'s turn, not the {piece}'s")]
    WrongTurn { piece: Piece, to_move: Color },
    #[error("invalid move: the {0} king would be left in check")]
    KingInCheck(Color),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            squares: arr![None; 64], // need integer literal here
        }
    }

    /// A board holding the standard starting position.
    pub fn standard() -> Self {
        let mut b = Self::new();
        b.populate(default_setup);
        b
    }

    pub fn squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        SquareIterator::new(self)
    }

    pub fn populate<S>(&mut self, setup: S)
    where
        S: Fn(&mut Board),
    {
        setup(self);
    }

    pub fn place(&mut self, square: Square, piece: Piece) {
        self[square] = Some(piece);
    }

    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self[square].take()
    }

    /// The piece on (`row`, `col`). Coordinates outside the board are simply
    /// empty, so rules can probe any destination without bounds checks.
    pub fn get_piece(&self, row: u8, col: u8) -> Option<Piece> {
        self.piece_at(Square::new(row, col))
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if !square.is_on_board() {
            return None;
        }
        self[square]
    }

    /// Occupied squares in row-major order.
    pub fn pieces_with_position(&self) -> Vec<(Square, Piece)> {
        self.squares()
            .filter_map(|(s, p)| p.map(|p| (s, p)))
            .collect()
    }

    /// The first king of `color` in row-major order.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.squares().find_map(|(s, p)| match p {
            Some(p) if p.kind() == Kind::King && p.color() == color => Some(s),
            _ => None,
        })
    }

    /// Moves the piece on the source square if its own movement rule allows
    /// it. Knows nothing about turns or checks.
    pub fn move_piece(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<Move, MoveError> {
        let from = Square::new(from_row, from_col);
        let to = Square::new(to_row, to_col);

        if let Err(e) = self.check_move(from, to) {
            trace!("board rejected {} -> {}: {}", from, to, e);
            return Err(e);
        }

        let mov = self.relocate(from, to);
        debug!("board moved {}", mov);
        Ok(mov)
    }

    /// Returns the piece on `from` if its movement rule accepts `to`.
    pub(crate) fn check_move(&self, from: Square, to: Square) -> Result<Piece, MoveError> {
        let piece = self.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if !piece.is_valid_move(self, from, to) {
            return Err(MoveError::IllegalMove { piece, from, to });
        }
        Ok(piece)
    }

    /// Flags describing what moving `piece` from `from` to `to` would do.
    pub(crate) fn move_flags(&self, piece: Piece, from: Square, to: Square) -> Flags {
        let mut flags = Flags::QUIET;
        if self.piece_at(to).is_some() {
            flags |= Flags::CAPTURE;
        }
        if piece.kind() == Kind::Pawn && from.delta(to).0.abs() == 2 {
            flags |= Flags::PAWN_SPRINT;
        }
        flags
    }

    /// Unconditionally moves whatever stands on `from` to `to`, replacing the
    /// occupant of `to`. Both squares must be on the board.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Move {
        let flags = match self[from] {
            Some(piece) => self.move_flags(piece, from, to),
            None => Flags::QUIET,
        };
        let piece = self[from].take();
        self[to] = piece;
        Move::new(from, to, flags)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        debug_assert!(index.is_on_board(), "{:?} is off the board", index);
        &self.squares[index.index()]
    }
}

impl IndexMut<Square> for Board {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        debug_assert!(index.is_on_board(), "{:?} is off the board", index);
        &mut self.squares[index.index()]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
