// This file is part of the fianchetto library.
// Copyright (C) 2026 The fianchetto developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{error::Error, fmt, num::NonZeroU32};

use arrayvec::ArrayVec;
use bitflags::bitflags;
use nohash_hasher::IntSet;

use crate::{
    attacks,
    board::Board,
    m::{MoveKind, MoveList},
    movegen,
    san::San,
    setup, ByColor, CastlingSide, Color, Move, Piece, PieceId, Role, Setup, Square,
};

bitflags! {
    /// Reasons for a [`Setup`] not being a legal [`Position`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A side has no king.
        const MISSING_KING = 1 << 1;

        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;

        /// A side has more than 16 pieces.
        const TOO_MUCH_MATERIAL = 1 << 3;

        /// There are pawns on the first or last rank.
        const PAWNS_ON_BACKRANK = 1 << 4;

        /// Two pieces stand on the same square.
        const OVERLAPPING_PIECES = 1 << 5;

        /// Two pieces share an id.
        const DUPLICATE_IDS = 1 << 6;

        /// The en passant square is not on the sixth rank seen from the
        /// side to move, is occupied, or no pawn just double stepped over
        /// it.
        const INVALID_EP_SQUARE = 1 << 7;

        /// The player not to move is in check.
        const OPPOSITE_CHECK = 1 << 8;
    }
}

/// Error when trying to create a [`Position`] from an illegal [`Setup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionError {
    errors: PositionErrorKinds,
}

impl PositionError {
    pub fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reasons = Vec::new();
        for (kind, reason) in [
            (PositionErrorKinds::EMPTY_BOARD, "empty board"),
            (PositionErrorKinds::MISSING_KING, "missing king"),
            (PositionErrorKinds::TOO_MANY_KINGS, "too many kings"),
            (PositionErrorKinds::TOO_MUCH_MATERIAL, "too much material"),
            (PositionErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank"),
            (PositionErrorKinds::OVERLAPPING_PIECES, "overlapping pieces"),
            (PositionErrorKinds::DUPLICATE_IDS, "duplicate piece ids"),
            (PositionErrorKinds::INVALID_EP_SQUARE, "invalid ep square"),
            (PositionErrorKinds::OPPOSITE_CHECK, "opposite check"),
        ] {
            if self.errors.contains(kind) {
                reasons.push(reason);
            }
        }
        write!(f, "illegal position: {}", reasons.join(", "))
    }
}

impl Error for PositionError {}

/// A legal chess position: the pieces in play, the side to move and
/// the move counters.
///
/// Pieces are stored inline, so cloning a `Position` is a fixed-size
/// copy. Hypothetical moves are tried out on such clones and never touch
/// the original.
///
/// Equality compares piece for piece, including ids and the has-moved
/// flags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pieces: ArrayVec<Piece, 64>,
    turn: Color,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: NonZeroU32,
}

impl Default for Position {
    /// The standard starting position with white to move.
    fn default() -> Position {
        let setup = Setup::default();
        Position {
            pieces: setup.pieces.into_iter().collect(),
            turn: setup.turn,
            ep_square: setup.ep_square,
            halfmoves: setup.halfmoves,
            fullmoves: setup.fullmoves,
        }
    }
}

impl Position {
    /// Validates a [`Setup`] and constructs a position.
    ///
    /// # Errors
    ///
    /// Every problem found is reported at once, see
    /// [`PositionError::kinds()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use fianchetto::{Color, Position, PositionErrorKinds, Role, Setup, Square};
    ///
    /// let mut setup = Setup::empty();
    /// setup.put(Color::White, Role::King, Square::E1);
    /// setup.put(Color::White, Role::Pawn, Square::A8);
    ///
    /// let err = Position::from_setup(setup).unwrap_err();
    /// assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));
    /// assert!(err.kinds().contains(PositionErrorKinds::PAWNS_ON_BACKRANK));
    /// ```
    pub fn from_setup(setup: Setup) -> Result<Position, PositionError> {
        let mut errors = PositionErrorKinds::empty();

        if setup.pieces.is_empty() {
            errors |= PositionErrorKinds::EMPTY_BOARD;
        }

        let mut material = ByColor::<usize>::default();
        let mut kings = ByColor::<usize>::default();
        for piece in &setup.pieces {
            *material.get_mut(piece.color) += 1;
            if piece.role == Role::King {
                *kings.get_mut(piece.color) += 1;
            }
        }
        if material.find(|&count| count > 16).is_some() {
            errors |= PositionErrorKinds::TOO_MUCH_MATERIAL;
        }
        if kings.find(|&count| count == 0).is_some() {
            errors |= PositionErrorKinds::MISSING_KING;
        }
        if kings.find(|&count| count > 1).is_some() {
            errors |= PositionErrorKinds::TOO_MANY_KINGS;
        }

        if setup
            .pieces
            .iter()
            .any(|p| p.role == Role::Pawn && (p.square.rank() == 0 || p.square.rank() == 7))
        {
            errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        let mut squares = IntSet::default();
        let mut ids = IntSet::default();
        for piece in &setup.pieces {
            if !squares.insert(piece.square) {
                errors |= PositionErrorKinds::OVERLAPPING_PIECES;
            }
            if !ids.insert(piece.id) {
                errors |= PositionErrorKinds::DUPLICATE_IDS;
            }
        }

        if errors.intersects(
            PositionErrorKinds::TOO_MUCH_MATERIAL | PositionErrorKinds::OVERLAPPING_PIECES,
        ) {
            // The square index and the inline storage rely on these.
            return Err(PositionError { errors });
        }

        let pos = Position {
            pieces: setup.pieces.into_iter().collect(),
            turn: setup.turn,
            ep_square: setup.ep_square,
            halfmoves: setup.halfmoves,
            fullmoves: setup.fullmoves,
        };

        if !pos.valid_ep_square() {
            errors |= PositionErrorKinds::INVALID_EP_SQUARE;
        }

        if pos.is_king_in_check(!pos.turn) {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        if errors.is_empty() {
            Ok(pos)
        } else {
            Err(PositionError { errors })
        }
    }

    fn valid_ep_square(&self) -> bool {
        let Some(ep_square) = self.ep_square else {
            return true;
        };
        let forward = self.turn.forward();
        let double_stepped = ep_square
            .offset(0, -forward)
            .and_then(|sq| self.piece_at(sq))
            .is_some_and(|p| p.role == Role::Pawn && p.color != self.turn);
        let origin_empty = ep_square
            .offset(0, forward)
            .is_some_and(|sq| self.piece_at(sq).is_none());

        ep_square.rank() == self.turn.fold(5, 2)
            && self.piece_at(ep_square).is_none()
            && double_stepped
            && origin_empty
    }

    /// Converts back into a [`Setup`], e.g., for editing.
    pub fn to_setup(&self) -> Setup {
        Setup {
            pieces: self.pieces.to_vec(),
            turn: self.turn,
            ep_square: self.ep_square,
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        }
    }

    /// The pieces in play, in a stable order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The square a pawn skipped with a double step on the last half-move.
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    pub fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    /// A square index over the pieces, valid as long as the borrow.
    pub fn board(&self) -> Board<'_> {
        Board::new(&self.pieces)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Scans the piece list. Use [`Position::board()`] for repeated
    /// lookups.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.color == color && p.role == Role::King)
    }

    /// Tests if a side could still castle later on, i.e., its king and
    /// the rook of `side` have not moved.
    pub fn castling_right(&self, color: Color, side: CastlingSide) -> bool {
        setup::castling_right(&self.pieces, color, side)
    }

    /// Tests if the king of `color` is attacked. A missing king is never
    /// in check.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        match self.king(color) {
            Some(king) => attacks::is_attacked(&self.board(), king.square, !color),
            None => false,
        }
    }

    /// Tests if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_king_in_check(self.turn)
    }

    /// Pieces giving check to the side to move.
    pub fn checkers(&self) -> ArrayVec<Piece, 16> {
        let board = self.board();
        match self.king(self.turn) {
            Some(king) => attacks::attackers(&board, king.square, !self.turn)
                .copied()
                .collect(),
            None => ArrayVec::new(),
        }
    }

    /// Tests if the king of `color` would be attacked after the piece on
    /// `from` moved to `to`, removing whatever stood there.
    ///
    /// Only the two squares are considered: an en passant victim stays on
    /// the board and a castling rook does not move. See
    /// [`Position::would_leave_king_in_check()`] for the exact variant.
    pub fn would_result_in_check(&self, from: Square, to: Square, color: Color) -> bool {
        let mut hypothetical = self.clone();
        if from != to {
            hypothetical.pieces.retain(|p| p.square != to);
        }
        if let Some(piece) = hypothetical.pieces.iter_mut().find(|p| p.square == from) {
            piece.square = to;
        }
        hypothetical.is_king_in_check(color)
    }

    /// Tests if playing `m` would leave the king of the moving side
    /// attacked.
    ///
    /// A castle also counts as exposing the king when the king starts in
    /// check or passes over an attacked square.
    pub fn would_leave_king_in_check(&self, m: &Move) -> bool {
        if let Some(side) = m.castling_side() {
            let board = self.board();
            let mut square = m.from();
            loop {
                if attacks::is_attacked(&board, square, !m.color()) {
                    return true;
                }
                if square == m.to() {
                    break;
                }
                match square.offset(side.step(), 0) {
                    Some(next) => square = next,
                    None => return true,
                }
            }
        }

        let mut hypothetical = self.clone();
        hypothetical.play_unchecked(m);
        hypothetical.is_king_in_check(m.color())
    }

    /// Moves of a piece obeying its movement geometry, without looking at
    /// the safety of the own king. Labels are not disambiguated.
    pub fn pseudo_legal_moves(&self, id: PieceId) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(piece) = self.piece(id) {
            movegen::gen_pseudo_legal(self, &self.board(), piece, &mut moves);
        }
        moves
    }

    fn push_legal(&self, board: &Board<'_>, piece: &Piece, moves: &mut MoveList) {
        let mut candidates = MoveList::new();
        movegen::gen_pseudo_legal(self, board, piece, &mut candidates);
        moves.extend(
            candidates
                .into_iter()
                .filter(|m| !self.would_leave_king_in_check(m)),
        );
    }

    fn label(moves: &mut MoveList, peers: &[Move]) {
        for m in moves.iter_mut() {
            *m = m.with_san(San::disambiguate(*m, peers));
        }
    }

    /// Legal moves of a single piece, for any colour.
    ///
    /// Labels name the origin file or rank where another piece of the same
    /// kind could legally reach the same square.
    pub fn legal_moves_for_piece(&self, id: PieceId) -> MoveList {
        let Some(piece) = self.piece(id) else {
            return MoveList::new();
        };
        let board = self.board();

        let mut moves = MoveList::new();
        self.push_legal(&board, piece, &mut moves);

        if piece.role != Role::Pawn && !moves.is_empty() {
            let mut peers = MoveList::new();
            for other in board
                .by_color(piece.color)
                .filter(|p| p.role == piece.role && p.id != piece.id)
            {
                self.push_legal(&board, other, &mut peers);
            }
            Position::label(&mut moves, &peers);
        }

        moves
    }

    /// Legal moves of every piece of `color`.
    pub fn legal_moves_for_color(&self, color: Color) -> MoveList {
        let board = self.board();
        let mut moves = MoveList::new();
        for piece in board.by_color(color) {
            self.push_legal(&board, piece, &mut moves);
        }
        let peers = moves.clone();
        Position::label(&mut moves, &peers);
        moves
    }

    /// Legal moves of the side to move.
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_for_color(self.turn)
    }

    /// Tests if `color` has at least one legal move.
    pub fn has_legal_moves(&self, color: Color) -> bool {
        let board = self.board();
        board.by_color(color).any(|piece| {
            let mut candidates = MoveList::new();
            movegen::gen_pseudo_legal(self, &board, piece, &mut candidates);
            candidates.iter().any(|m| !self.would_leave_king_in_check(m))
        })
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_moves(self.turn)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_moves(self.turn)
    }

    /// Plays a move. It is the caller's responsibility to ensure the move
    /// is legal.
    ///
    /// The captured piece leaves the position, a castling rook jumps over
    /// the king and a promoted pawn keeps its id.
    pub fn play_unchecked(&mut self, m: &Move) {
        let mover = m.color();

        if let Some(captured) = m.captured() {
            self.pieces.retain(|p| p.id != captured.id);
        }

        if let MoveKind::Castle { rook, rook_to, .. } = m.kind() {
            if let Some(castled) = self.pieces.iter_mut().find(|p| p.id == rook.id) {
                castled.square = rook_to;
                castled.has_moved = true;
            }
        }

        if let Some(piece) = self.pieces.iter_mut().find(|p| p.id == m.id()) {
            piece.square = m.to();
            piece.has_moved = true;
            if let Some(role) = m.promotion() {
                piece.role = role;
            }
        }

        self.ep_square = if m.role() == Role::Pawn && m.from().distance(m.to()) == 2 {
            m.from().offset(0, mover.forward())
        } else {
            None
        };

        self.halfmoves = if m.is_zeroing() {
            0
        } else {
            self.halfmoves.saturating_add(1)
        };

        if mover == Color::Black {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }

        self.turn = !mover;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn position(fen: &str) -> Position {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position")
    }

    fn setup_from(fen: &str) -> Setup {
        fen.parse::<Fen>().expect("valid fen").into_setup()
    }

    #[test]
    fn test_starting_moves() {
        let pos = Position::default();
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.legal_moves_for_color(Color::Black).len(), 20);
        assert!(!pos.is_check());
        assert!(pos.checkers().is_empty());
    }

    #[test]
    fn test_legal_moves_never_leave_king_attacked() {
        let pos = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        for color in Color::ALL {
            for m in pos.legal_moves_for_color(color) {
                let mut after = pos.clone();
                after.play_unchecked(&m);
                assert!(!after.is_king_in_check(color), "{m:?}");
                if !m.is_castle() && !m.is_en_passant() {
                    assert!(!pos.would_result_in_check(m.from(), m.to(), color), "{m:?}");
                }
            }
        }
    }

    #[test]
    fn test_pinned_piece() {
        let pos = position("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        let bishop = pos.piece_at(Square::E2).expect("bishop").id;
        assert!(!pos.pseudo_legal_moves(bishop).is_empty());
        assert!(pos.legal_moves_for_piece(bishop).is_empty());
        assert!(pos.would_result_in_check(Square::E2, Square::D3, Color::White));
        assert!(!pos.would_result_in_check(Square::E1, Square::D1, Color::White));
    }

    #[test]
    fn test_would_result_in_check_does_not_mutate() {
        let pos = position("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
        let before = pos.clone();
        let _ = pos.would_result_in_check(Square::E2, Square::D3, Color::White);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_en_passant_discovered_check() {
        // Capturing en passant would clear the fifth rank for the rook.
        let pos = position("8/8/8/K2pP2r/8/8/8/7k w - d6 0 2");
        let pawn = pos.piece_at(Square::E5).expect("pawn").id;
        assert!(pos
            .pseudo_legal_moves(pawn)
            .iter()
            .any(|m| m.is_en_passant()));
        assert!(!pos
            .legal_moves_for_piece(pawn)
            .iter()
            .any(|m| m.is_en_passant()));
    }

    #[test]
    fn test_play_castle() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10");
        let m = pos
            .legal_moves()
            .into_iter()
            .find(|m| m.castling_side() == Some(CastlingSide::QueenSide))
            .expect("O-O-O");
        pos.play_unchecked(&m);

        assert_eq!(pos.piece_at(Square::C1).map(|p| p.role), Some(Role::King));
        assert_eq!(pos.piece_at(Square::D1).map(|p| p.role), Some(Role::Rook));
        assert!(pos.piece_at(Square::A1).is_none());
        assert!(!pos.castling_right(Color::White, CastlingSide::KingSide));
        assert!(pos.castling_right(Color::Black, CastlingSide::KingSide));
        assert_eq!(pos.turn(), Color::Black);
        assert_eq!(pos.halfmoves(), 4);
    }

    #[test]
    fn test_play_en_passant() {
        let mut pos = Position::default();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ] {
            let m = pos
                .legal_moves()
                .into_iter()
                .find(|m| m.from() == from && m.to() == to)
                .expect("legal move");
            pos.play_unchecked(&m);
        }
        assert_eq!(pos.ep_square(), Some(Square::D6));

        let ep = pos
            .legal_moves()
            .into_iter()
            .find(|m| m.is_en_passant())
            .expect("exd6");
        assert_eq!(ep.to_string(), "exd6");
        pos.play_unchecked(&ep);

        assert!(pos.piece_at(Square::D5).is_none());
        assert_eq!(pos.pieces().len(), 31);
        assert_eq!(pos.ep_square(), None);
        assert_eq!(pos.fullmoves().get(), 3);
    }

    #[test]
    fn test_promotion_keeps_id() {
        let mut pos = position("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        let pawn = pos.piece_at(Square::E7).expect("pawn").id;
        let moves = pos.legal_moves_for_piece(pawn);
        assert_eq!(moves.len(), 4);
        let underpromotion = moves
            .into_iter()
            .find(|m| m.promotion() == Some(Role::Knight))
            .expect("e8=N");
        pos.play_unchecked(&underpromotion);

        let knight = pos.piece(pawn).expect("same id");
        assert_eq!(knight.role, Role::Knight);
        assert_eq!(knight.square, Square::E8);
    }

    #[test]
    fn test_castling_king_safety() {
        // The bishop on a6 covers f1, the king passes over it.
        let pos = position("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
        let king = pos.king(Color::White).expect("king").id;
        let castles: Vec<Move> = pos
            .pseudo_legal_moves(king)
            .into_iter()
            .filter(|m| m.is_castle())
            .collect();
        assert_eq!(castles.len(), 2);
        let safe: Vec<Option<CastlingSide>> = castles
            .iter()
            .filter(|m| !pos.would_leave_king_in_check(m))
            .map(|m| m.castling_side())
            .collect();
        assert_eq!(safe, [Some(CastlingSide::QueenSide)]);

        let in_check = position("4k3/8/8/8/8/8/8/R3K2r w Q - 0 1");
        assert!(!in_check.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_invalid_setups() {
        let err = Position::from_setup(Setup::empty()).unwrap_err();
        assert!(err.kinds().contains(PositionErrorKinds::EMPTY_BOARD));
        assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));

        let err = Position::from_setup(setup_from("4k3/8/8/8/8/8/8/4K2r b - - 0 1")).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::OPPOSITE_CHECK);

        let err = Position::from_setup(setup_from("4k3/8/8/8/8/8/8/4K3 w - e6 0 1")).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::INVALID_EP_SQUARE);

        let mut setup = Setup::default();
        setup.put(Color::White, Role::Queen, Square::D1);
        let err = Position::from_setup(setup).unwrap_err();
        assert!(err.kinds().contains(PositionErrorKinds::OVERLAPPING_PIECES));
        assert!(err.kinds().contains(PositionErrorKinds::TOO_MUCH_MATERIAL));
        assert_eq!(
            err.to_string(),
            "illegal position: too much material, overlapping pieces"
        );

        let err = Position::from_setup(setup_from("4k3/8/8/8/8/8/8/3KK3 w - - 0 1")).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::TOO_MANY_KINGS);

        let mut setup = setup_from("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        setup.pieces[1].id = setup.pieces[0].id;
        let err = Position::from_setup(setup).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::DUPLICATE_IDS);
    }

    #[test]
    fn test_checkmate_and_stalemate() {
        let mate = position("7k/7Q/8/8/8/8/8/4K2R b - - 0 1");
        assert!(mate.is_checkmate());
        assert!(!mate.is_stalemate());
        assert!(mate.legal_moves().is_empty());

        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_check());
    }
}
