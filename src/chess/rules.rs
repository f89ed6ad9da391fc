//! Movement rules for each kind of piece.
//!
//! Every rule answers one question: can a piece of the given color move from
//! `from` to `to` on this board? The answer ignores whose turn it is and
//! whether the mover's own king ends up attacked.

use crate::chess::board::piece::{Color, Kind, Piece};
use crate::chess::board::square::{Direction, Square};
use crate::chess::board::Board;

pub fn is_valid_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let color = piece.color();
    match piece.kind() {
        Kind::Pawn => pawn(board, color, from, to),
        Kind::Knight => knight(board, color, from, to),
        Kind::Bishop => bishop(board, color, from, to),
        Kind::Rook => rook(board, color, from, to),
        Kind::Queen => queen(board, color, from, to),
        Kind::King => king(board, color, from, to),
    }
}

pub fn pawn(board: &Board, color: Color, from: Square, to: Square) -> bool {
    if !to.is_on_board() {
        return false;
    }

    let (dr, dc) = from.delta(to);
    let forward = color.forward().delta().0 as i16;
    let target = board.piece_at(to);

    match (dr, dc.abs()) {
        (r, 0) if r == forward => target.is_none(),
        (r, 0) if r == 2 * forward && from.row() == color.pawn_row() => {
            target.is_none() && board.piece_at(from + color.forward()).is_none()
        }
        (r, 1) if r == forward => target.map_or(false, |p| p.color() == color.other()),
        _ => false,
    }
}

pub fn knight(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, dc) = from.delta(to);
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1)) && can_land(board, color, to)
}

pub fn bishop(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, dc) = from.delta(to);
    dr != 0 && dr.abs() == dc.abs() && is_path_clear(board, from, to) && can_land(board, color, to)
}

pub fn rook(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, dc) = from.delta(to);
    (dr == 0) != (dc == 0) && is_path_clear(board, from, to) && can_land(board, color, to)
}

pub fn queen(board: &Board, color: Color, from: Square, to: Square) -> bool {
    bishop(board, color, from, to) || rook(board, color, from, to)
}

pub fn king(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, dc) = from.delta(to);
    dr.abs().max(dc.abs()) == 1 && can_land(board, color, to)
}

/// A piece may end its move on an empty square or on an enemy piece.
fn can_land(board: &Board, color: Color, to: Square) -> bool {
    to.is_on_board() && board.piece_at(to).map_or(true, |p| p.color() != color)
}

/// Walks from `from` towards `to` and reports whether every square strictly in
/// between is empty. The destination itself is not inspected.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let dir = match Direction::between(from, to) {
        Some(dir) => dir,
        None => return false,
    };

    let mut current = from + dir;
    while current != to {
        if !current.is_on_board() {
            return false;
        }
        if board.piece_at(current).is_some() {
            return false;
        }
        current = current + dir;
    }
    true
}
