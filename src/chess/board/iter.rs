use crate::chess::board::piece::Piece;
use crate::chess::board::square::{Square, BOARD_WIDTH};
use crate::chess::board::{Board, BOARD_SIZE};

/// Walks the board in row-major order, yielding every square with its occupant.
pub struct SquareIterator<'a> {
    board: &'a Board,
    next: usize,
}

impl<'a> SquareIterator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board, next: 0 }
    }
}

impl Iterator for SquareIterator<'_> {
    type Item = (Square, Option<Piece>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= BOARD_SIZE {
            return None;
        }
        let width = BOARD_WIDTH as usize;
        let square = Square::new((self.next / width) as u8, (self.next % width) as u8);
        self.next += 1;
        Some((square, self.board[square]))
    }
}
