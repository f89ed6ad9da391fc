use crate::chess::board::piece::{Color, Kind, Piece};
use crate::chess::board::square::{Square, BOARD_WIDTH};
use crate::chess::board::Board;

const BACK_ROW: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

/// The standard starting position: black on rows 0 and 1, white on rows 6 and 7.
pub fn default_setup(b: &mut Board) {
    for color in [Color::Black, Color::White] {
        for col in 0..BOARD_WIDTH {
            let kind = BACK_ROW[col as usize];
            b.place(Square::new(color.back_row(), col), Piece::new(color, kind));
            b.place(Square::new(color.pawn_row(), col), Piece::new(color, Kind::Pawn));
        }
    }
}
