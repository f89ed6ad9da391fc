use bitflags::bitflags;
use log::{debug, trace, warn};

use crate::chess::board::piece::{Color, Piece};
use crate::chess::board::r#move::Move;
use crate::chess::board::square::Square;
use crate::chess::board::{Board, MoveError};

/// Optional strictness on top of the piece rules. With no flags set a move is
/// accepted as soon as the piece on the source square may make it, whoever's
/// turn it is and whatever happens to the mover's king.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Rules(u8);

bitflags! {
    impl Rules: u8 {
        /// Only pieces of the side to move may be moved.
        const ENFORCE_TURN = 0b01;
        /// A move must not leave the mover's own king attacked.
        const FORBID_SELF_CHECK = 0b10;

        const STRICT = Self::ENFORCE_TURN.bits() | Self::FORBID_SELF_CHECK.bits();
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Game {
    board: Board,
    current_player: Color,
    moves_played: usize,
    rules: Rules,
}

impl Game {
    /// A game in the standard starting position with white to move.
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    pub fn from_board(board: Board, current_player: Color) -> Self {
        Self {
            board,
            current_player,
            moves_played: 0,
            rules: Rules::empty(),
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Plays a move and hands the turn to the other side. On error the game
    /// is left exactly as it was.
    pub fn play(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<Move, MoveError> {
        let from = Square::new(from_row, from_col);
        let to = Square::new(to_row, to_col);

        let piece = match self.check_move(from, to) {
            Ok(piece) => piece,
            Err(e) => {
                trace!("rejected {} -> {}: {}", from, to, e);
                return Err(e);
            }
        };

        let mov = self.board.relocate(from, to);
        self.moves_played += 1;
        self.current_player = self.current_player.other();
        debug!("move {}: {} {}", self.moves_played, piece, mov);

        Ok(mov)
    }

    fn check_move(&self, from: Square, to: Square) -> Result<Piece, MoveError> {
        let piece = self.board.check_move(from, to)?;

        if self.rules.contains(Rules::ENFORCE_TURN) && piece.color() != self.current_player {
            return Err(MoveError::WrongTurn {
                piece,
                to_move: self.current_player,
            });
        }
        if self.rules.contains(Rules::FORBID_SELF_CHECK)
            && self.leaves_king_in_check(piece.color(), from, to)
        {
            return Err(MoveError::KingInCheck(piece.color()));
        }

        Ok(piece)
    }

    fn leaves_king_in_check(&self, color: Color, from: Square, to: Square) -> bool {
        let mut b = self.board.clone();
        b.relocate(from, to);
        king_attacked(&b, color)
    }

    /// Whether `piece` on `from` may go to `to` under this game's rules, turn
    /// order aside.
    fn is_playable(&self, piece: Piece, from: Square, to: Square) -> bool {
        piece.is_valid_move(&self.board, from, to)
            && !(self.rules.contains(Rules::FORBID_SELF_CHECK)
                && self.leaves_king_in_check(piece.color(), from, to))
    }

    /// True if some piece of the other color could move onto `color`'s king.
    /// A board without such a king is never in check.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        king_attacked(&self.board, color)
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.board
            .pieces_with_position()
            .into_iter()
            .filter(|(_, p)| p.color() == color)
            .any(|(from, piece)| Square::all().any(|to| self.is_playable(piece, from, to)))
    }

    /// Every move `has_legal_moves` would count, sources in row-major order and
    /// destinations in row-major order per source.
    pub fn generate_moves(&self, color: Color) -> Vec<Move> {
        let mut result = Vec::new();

        for (from, piece) in self.board.pieces_with_position() {
            if piece.color() != color {
                continue;
            }
            for to in Square::all() {
                if self.is_playable(piece, from, to) {
                    let flags = self.board.move_flags(piece, from, to);
                    result.push(Move::new(from, to, flags));
                }
            }
        }

        result
    }

    /// `None` while the side to move has a move left.
    pub fn outcome(&self) -> Option<Outcome> {
        let color = self.current_player;
        if self.has_legal_moves(color) {
            return None;
        }

        let outcome = if self.is_king_in_check(color) {
            Outcome::Checkmate {
                winner: color.other(),
            }
        } else {
            Outcome::Stalemate
        };
        debug!("game over after {} moves: {:?}", self.moves_played, outcome);
        Some(outcome)
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn king_attacked(board: &Board, color: Color) -> bool {
    let king = match board.find_king(color) {
        Some(square) => square,
        None => {
            warn!("no {} king on the board", color);
            return false;
        }
    };

    board
        .pieces_with_position()
        .into_iter()
        .any(|(square, p)| p.color() != color && p.is_valid_move(board, square, king))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::board::piece::Kind;
    use crate::chess::board::r#move::Flags;

    fn place(b: &mut Board, row: u8, col: u8, color: Color, kind: Kind) {
        b.place(Square::new(row, col), Piece::new(color, kind));
    }

    /// White king e1, white bishop e2 pinned by a black rook on e8, black king a8.
    fn pinned_bishop() -> Board {
        let mut b = Board::new();
        place(&mut b, 7, 4, Color::White, Kind::King);
        place(&mut b, 6, 4, Color::White, Kind::Bishop);
        place(&mut b, 0, 4, Color::Black, Kind::Rook);
        place(&mut b, 0, 0, Color::Black, Kind::King);
        b
    }

    /// Black king a8, white queen b6, white king h1, black to move.
    fn stalemate() -> Board {
        let mut b = Board::new();
        place(&mut b, 0, 0, Color::Black, Kind::King);
        place(&mut b, 2, 1, Color::White, Kind::Queen);
        place(&mut b, 7, 7, Color::White, Kind::King);
        b
    }

    #[test]
    fn test_new_game() {
        let g = Game::new();
        assert_eq!(Color::White, g.current_player());
        assert_eq!(0, g.moves_played());
        assert_eq!(Rules::empty(), g.rules());
        assert_eq!(&Board::standard(), g.board());
    }

    #[test]
    fn test_starting_position() {
        let g = Game::new();
        for color in [Color::White, Color::Black] {
            assert!(!g.is_king_in_check(color));
            assert!(g.has_legal_moves(color));
        }
        assert!(!g.is_over());
        assert_eq!(None, g.outcome());
    }

    #[test]
    fn test_move_gen_default_setup() {
        let g = Game::new();
        assert_eq!(20, g.generate_moves(Color::White).len());
        assert_eq!(20, g.generate_moves(Color::Black).len());

        let strict = Game::new().with_rules(Rules::STRICT);
        assert_eq!(20, strict.generate_moves(Color::White).len());
    }

    #[test]
    fn test_move_gen_flags() {
        let g = Game::new();
        let moves = g.generate_moves(Color::White);
        assert!(moves.contains(&Move::new(Square::new(6, 4), Square::new(5, 4), Flags::QUIET)));
        assert!(moves.contains(&Move::new(
            Square::new(6, 4),
            Square::new(4, 4),
            Flags::PAWN_SPRINT
        )));
        assert!(moves.contains(&Move::new(Square::new(7, 6), Square::new(5, 5), Flags::QUIET)));
        assert!(moves.iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn test_play_updates_state() {
        let mut g = Game::new();

        let mov = g.play(6, 4, 4, 4).ok().unwrap();
        assert!(mov.is_pawn_sprint());
        assert_eq!(None, g.board().get_piece(6, 4));
        assert_eq!(Some(Piece::new(Color::White, Kind::Pawn)), g.board().get_piece(4, 4));
        assert_eq!(1, g.moves_played());
        assert_eq!(Color::Black, g.current_player());
    }

    #[test]
    fn test_play_failure_changes_nothing() {
        let mut g = Game::new();
        let before = g.clone();

        assert_eq!(Err(MoveError::NoPiece(Square::new(4, 4))), g.play(4, 4, 3, 4));
        assert!(matches!(g.play(7, 0, 5, 0), Err(MoveError::IllegalMove { .. })));
        assert!(g.play(6, 4, 9, 4).is_err());
        assert!(g.play(9, 9, 8, 8).is_err());
        assert_eq!(before, g);
    }

    #[test]
    fn test_turn_not_enforced_by_default() {
        let mut g = Game::new();
        g.play(1, 4, 3, 4).ok().unwrap();
        assert_eq!(Color::Black, g.current_player());
        assert_eq!(1, g.moves_played());
    }

    #[test]
    fn test_enforce_turn() {
        let mut g = Game::new().with_rules(Rules::ENFORCE_TURN);
        let err = g.play(1, 4, 3, 4).err().unwrap();
        assert_eq!(
            MoveError::WrongTurn {
                piece: Piece::new(Color::Black, Kind::Pawn),
                to_move: Color::White
            },
            err
        );
        assert_eq!(0, g.moves_played());

        g.play(6, 4, 4, 4).ok().unwrap();
        g.play(1, 4, 3, 4).ok().unwrap();
        assert!(g.play(3, 4, 4, 4).is_err());
    }

    #[test]
    fn test_self_check_allowed_by_default() {
        let mut g = Game::from_board(pinned_bishop(), Color::White);
        g.play(6, 4, 5, 3).ok().unwrap();
        assert!(g.is_king_in_check(Color::White));
    }

    #[test]
    fn test_forbid_self_check() {
        let mut g = Game::from_board(pinned_bishop(), Color::White).with_rules(Rules::FORBID_SELF_CHECK);
        assert_eq!(Err(MoveError::KingInCheck(Color::White)), g.play(6, 4, 5, 3));
        assert_eq!(Color::White, g.current_player());

        // the king may still step aside
        g.play(7, 4, 7, 3).ok().unwrap();
        assert!(!g.is_king_in_check(Color::White));
    }

    #[test]
    fn test_is_king_in_check() {
        let mut b = Board::new();
        place(&mut b, 7, 4, Color::White, Kind::King);
        place(&mut b, 0, 0, Color::Black, Kind::King);
        place(&mut b, 3, 0, Color::Black, Kind::Bishop);

        let g = Game::from_board(b.clone(), Color::White);
        assert!(g.is_king_in_check(Color::White));
        assert!(!g.is_king_in_check(Color::Black));

        // blocked by a pawn on d2
        place(&mut b, 6, 3, Color::White, Kind::Pawn);
        let g = Game::from_board(b, Color::White);
        assert!(!g.is_king_in_check(Color::White));
    }

    #[test]
    fn test_check_by_pawn_and_knight() {
        let mut b = Board::new();
        place(&mut b, 4, 4, Color::White, Kind::King);
        place(&mut b, 0, 0, Color::Black, Kind::King);
        place(&mut b, 3, 5, Color::Black, Kind::Pawn);
        let g = Game::from_board(b.clone(), Color::White);
        assert!(g.is_king_in_check(Color::White));

        // a pawn behind the king or straight in front of it does not attack
        b.clear(Square::new(3, 5));
        place(&mut b, 5, 5, Color::Black, Kind::Pawn);
        place(&mut b, 3, 4, Color::Black, Kind::Pawn);
        let g = Game::from_board(b.clone(), Color::White);
        assert!(!g.is_king_in_check(Color::White));

        place(&mut b, 2, 5, Color::Black, Kind::Knight);
        let g = Game::from_board(b, Color::White);
        assert!(g.is_king_in_check(Color::White));
    }

    #[test]
    fn test_no_king_is_never_in_check() {
        let mut b = Board::new();
        place(&mut b, 0, 0, Color::Black, Kind::Queen);
        let g = Game::from_board(b, Color::White);
        assert!(!g.is_king_in_check(Color::White));
        assert!(!g.is_king_in_check(Color::Black));
    }

    #[test]
    fn test_empty_board_is_stalemate() {
        let g = Game::from_board(Board::new(), Color::White);
        assert!(!g.has_legal_moves(Color::White));
        assert_eq!(Some(Outcome::Stalemate), g.outcome());
        assert!(g.is_over());
    }

    #[test]
    fn test_stalemate_strict() {
        let g = Game::from_board(stalemate(), Color::Black).with_rules(Rules::STRICT);
        assert!(!g.is_king_in_check(Color::Black));
        assert!(!g.has_legal_moves(Color::Black));
        assert!(g.generate_moves(Color::Black).is_empty());
        assert_eq!(Some(Outcome::Stalemate), g.outcome());
    }

    #[test]
    fn test_stalemate_position_is_not_over_pseudo_legally() {
        // the king may still walk into the queen
        let g = Game::from_board(stalemate(), Color::Black);
        assert!(g.has_legal_moves(Color::Black));
        assert_eq!(3, g.generate_moves(Color::Black).len());
        assert!(!g.is_over());
    }

    #[test]
    fn test_checkmate_blocked_king() {
        // back rank mate: black king h8 behind its own pawns, white rook on a8
        let mut b = Board::new();
        place(&mut b, 0, 7, Color::Black, Kind::King);
        place(&mut b, 1, 6, Color::Black, Kind::Pawn);
        place(&mut b, 1, 7, Color::Black, Kind::Pawn);
        place(&mut b, 0, 0, Color::White, Kind::Rook);
        place(&mut b, 7, 4, Color::White, Kind::King);

        let g = Game::from_board(b, Color::Black).with_rules(Rules::STRICT);
        assert!(g.is_king_in_check(Color::Black));
        assert_eq!(
            Some(Outcome::Checkmate {
                winner: Color::White
            }),
            g.outcome()
        );
    }

    #[test]
    fn test_rules_flags() {
        assert!(Rules::STRICT.contains(Rules::ENFORCE_TURN));
        assert!(Rules::STRICT.contains(Rules::FORBID_SELF_CHECK));
        assert_eq!(Rules::empty(), Rules::default());
    }
}
