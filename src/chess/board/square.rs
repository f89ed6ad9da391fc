use std::fmt::{Display, Formatter};
use std::ops::Add;

pub const BOARD_WIDTH: u8 = 8;

/// Unit steps between neighbouring squares. `Up` points towards row 0, which is
/// black's back rank, so it is the direction white pawns advance in.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Row and column offset of a single step.
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    /// The step that walks from `from` to `to` along a row, a column or a
    /// diagonal. Returns `None` if both squares are equal or not on a line.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        let (dr, dc) = from.delta(to);
        if (dr, dc) == (0, 0) || (dr != 0 && dc != 0 && dr.abs() != dc.abs()) {
            return None;
        }

        match (dr.signum(), dc.signum()) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 1) => Some(Direction::UpRight),
            (1, -1) => Some(Direction::DownLeft),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }
}

/// A (row, column) coordinate. Any pair of `u8` can be represented; whether
/// it lies on the board is answered by [`Square::is_on_board`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn row(&self) -> u8 {
        self.row
    }

    pub const fn col(&self) -> u8 {
        self.col
    }

    pub const fn is_on_board(&self) -> bool {
        self.row < BOARD_WIDTH && self.col < BOARD_WIDTH
    }

    /// Signed (row, column) distance from `self` to `to`.
    pub fn delta(&self, to: Square) -> (i16, i16) {
        (
            to.row as i16 - self.row as i16,
            to.col as i16 - self.col as i16,
        )
    }

    /// All 64 squares in row-major order, starting at (0, 0).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_WIDTH).flat_map(|row| (0..BOARD_WIDTH).map(move |col| Square::new(row, col)))
    }

    pub(crate) fn index(&self) -> usize {
        self.row as usize * BOARD_WIDTH as usize + self.col as usize
    }
}

impl Add<Direction> for Square {
    type Output = Square;

    fn add(self, rhs: Direction) -> Self::Output {
        let (dr, dc) = rhs.delta();
        Square::new(
            self.row.wrapping_add_signed(dr),
            self.col.wrapping_add_signed(dc),
        )
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_on_board() {
            write!(f, "{}{}", (b'a' + self.col) as char, BOARD_WIDTH - self.row)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}
