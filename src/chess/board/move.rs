use crate::chess::board::square::Square;

use bitflags::bitflags;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Flags(u8);

bitflags! {
    impl Flags: u8 {
        const CAPTURE = 0b0100;
        const SPECIAL = 0b0001;

        const QUIET = 0b0000;
        const PAWN_SPRINT = Self::SPECIAL.bits();
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Move {
    from: Square,
    to: Square,
    flags: Flags,
}

impl Move {
    pub fn new(from: Square, to: Square, flags: Flags) -> Self {
        Self { from, to, flags }
    }

    pub fn is_capture(&self) -> bool {
        self.flags.contains(Flags::CAPTURE)
    }

    pub fn is_pawn_sprint(&self) -> bool {
        self.flags.contains(Flags::PAWN_SPRINT)
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let separator = if self.is_capture() { "x" } else { "-" };
        write!(f, "{}{}{}", self.from, separator, self.to)
    }
}
