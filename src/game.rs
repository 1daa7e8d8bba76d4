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

//! A game in progress: turn order, status and history.
//!
//! # Examples
//!
//! ```
//! use fianchetto::{Color, Game, GameStatus, PlayError, Square};
//!
//! let mut game = Game::new();
//! assert_eq!(game.status(), GameStatus::Active);
//!
//! let m = game.attempt_move(Square::E2, Square::E4, None)?;
//! assert_eq!(m.to_string(), "e4");
//! assert_eq!(game.turn(), Color::Black);
//!
//! // White cannot move twice in a row.
//! assert_eq!(
//!     game.attempt_move(Square::D2, Square::D4, None),
//!     Err(PlayError::NotSideToMovesPiece)
//! );
//!
//! game.undo();
//! assert_eq!(game.turn(), Color::White);
//! # Ok::<_, PlayError>(())
//! ```

use std::{error::Error, fmt};

use tracing::{debug, info, trace};

use crate::{
    history::History, m::MoveList, uci::UciMove, Color, Move, PieceId, Position, Role, Square,
};

/// Status of a [`Game`].
///
/// A game is in play while `Active` or `Check`. `Checkmate`, `Stalemate`
/// and `Draw` end it, `Idle` has not started yet.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Idle,
    Active,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameStatus {
    /// Derives the status of the side to move in `pos`.
    pub fn of(pos: &Position) -> GameStatus {
        debug_assert!(
            pos.king(pos.turn()).is_some(),
            "side to move has no king"
        );
        match (pos.is_check(), pos.has_legal_moves(pos.turn())) {
            (true, false) => GameStatus::Checkmate,
            (true, true) => GameStatus::Check,
            (false, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Active,
        }
    }

    pub const fn is_in_play(self) -> bool {
        matches!(self, GameStatus::Active | GameStatus::Check)
    }

    pub const fn is_over(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameStatus::Idle => "idle",
            GameStatus::Active => "active",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
        })
    }
}

/// Whether the side to move is in check, and which king is attacked.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct CheckState {
    pub in_check: bool,
    /// The attacked king. `None` unless `in_check`.
    pub king: Option<PieceId>,
}

impl CheckState {
    pub fn of(pos: &Position) -> CheckState {
        let king = pos
            .king(pos.turn())
            .filter(|_| pos.is_check())
            .map(|k| k.id);
        CheckState {
            in_check: king.is_some(),
            king,
        }
    }
}

/// Reason for rejecting a move or selection. Nothing changes when one is
/// returned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayError {
    /// The game is idle or over.
    GameNotActive,
    /// There is no piece on the origin square, or no piece with the given
    /// id.
    NoPieceAtSquare,
    /// The piece belongs to the side not to move.
    NotSideToMovesPiece,
    /// The piece cannot reach the destination, or the promotion role does
    /// not fit the move.
    IllegalPieceMove,
    /// The move would expose the own king.
    WouldLeaveKingInCheck,
    /// A pawn reaching the last rank needs a promotion role.
    PromotionRequired,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayError::GameNotActive => "game is not active",
            PlayError::NoPieceAtSquare => "no piece at square",
            PlayError::NotSideToMovesPiece => "piece does not belong to the side to move",
            PlayError::IllegalPieceMove => "piece cannot move there",
            PlayError::WouldLeaveKingInCheck => "move would leave the king in check",
            PlayError::PromotionRequired => "promotion role required",
        })
    }
}

impl Error for PlayError {}

/// One game of chess.
///
/// All changes go through [`Game::attempt_move()`], [`Game::undo()`],
/// [`Game::redo()`] and friends. Independent games are independent values.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    status: GameStatus,
    history: History,
    selected: Option<PieceId>,
    available: MoveList,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// Starts a game from the standard position.
    pub fn new() -> Game {
        Game::from_position(Position::default())
    }

    /// Starts a game from an arbitrary position. The status is computed at
    /// once, so the game may already be over.
    pub fn from_position(position: Position) -> Game {
        let mut game = Game::idle(position);
        game.start();
        game
    }

    /// Loads a position without starting the game.
    pub fn idle(position: Position) -> Game {
        Game {
            history: History::new(position.clone()),
            position,
            status: GameStatus::Idle,
            selected: None,
            available: MoveList::new(),
        }
    }

    /// Starts an idle game. Has no effect on a game that already started.
    pub fn start(&mut self) -> GameStatus {
        if self.status == GameStatus::Idle {
            self.status = GameStatus::of(&self.position);
            info!(status = %self.status, turn = %self.position.turn(), "game started");
        }
        self.status
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn check_state(&self) -> CheckState {
        CheckState::of(&self.position)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Legal moves of the selected piece.
    pub fn available_moves(&self) -> &[Move] {
        &self.available
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.available.clear();
    }

    /// Selects a piece of the side to move and computes its legal moves.
    /// `None` clears the selection.
    ///
    /// # Errors
    ///
    /// [`PlayError::GameNotActive`], [`PlayError::NoPieceAtSquare`] if no
    /// piece has the id, or [`PlayError::NotSideToMovesPiece`]. The
    /// selection is cleared in each case.
    pub fn select_piece(&mut self, id: Option<PieceId>) -> Result<&[Move], PlayError> {
        self.clear_selection();

        let Some(id) = id else {
            return Ok(self.available.as_slice());
        };

        if !self.status.is_in_play() {
            return Err(PlayError::GameNotActive);
        }
        let piece = self.position.piece(id).ok_or(PlayError::NoPieceAtSquare)?;
        if piece.color != self.position.turn() {
            trace!(%id, "rejected selection of opponent piece");
            return Err(PlayError::NotSideToMovesPiece);
        }

        self.available = self.position.legal_moves_for_piece(id);
        self.selected = Some(id);
        trace!(%id, moves = self.available.len(), "selected piece");
        Ok(self.available.as_slice())
    }

    /// Legal moves of a piece. Empty unless the game is in play and the
    /// piece belongs to the side to move.
    pub fn legal_moves_for_piece(&self, id: PieceId) -> MoveList {
        match self.position.piece(id) {
            Some(piece) if self.status.is_in_play() && piece.color == self.position.turn() => {
                self.position.legal_moves_for_piece(id)
            }
            _ => MoveList::new(),
        }
    }

    /// Legal moves of every piece of `color` in the current position,
    /// regardless of status.
    pub fn legal_moves_for_color(&self, color: Color) -> MoveList {
        self.position.legal_moves_for_color(color)
    }

    /// Plays the move of the piece on `from` to `to`.
    ///
    /// `promotion` must name the new role if and only if the move is a
    /// promotion.
    ///
    /// # Errors
    ///
    /// The checks run in this order: [`PlayError::GameNotActive`],
    /// [`PlayError::NoPieceAtSquare`], [`PlayError::NotSideToMovesPiece`],
    /// [`PlayError::IllegalPieceMove`],
    /// [`PlayError::WouldLeaveKingInCheck`], then
    /// [`PlayError::PromotionRequired`] or
    /// [`PlayError::IllegalPieceMove`] for a mismatched promotion. On error
    /// the game is unchanged.
    pub fn attempt_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, PlayError> {
        let result = self.find_move(from, to, promotion);
        match result {
            Ok(m) => {
                self.execute(m);
                Ok(m)
            }
            Err(reason) => {
                debug!(%from, %to, ?promotion, %reason, "rejected move");
                Err(reason)
            }
        }
    }

    /// Like [`Game::attempt_move()`] for a move in UCI notation.
    ///
    /// # Errors
    ///
    /// See [`Game::attempt_move()`].
    pub fn attempt_uci(&mut self, uci: &UciMove) -> Result<Move, PlayError> {
        self.attempt_move(uci.from, uci.to, uci.promotion)
    }

    fn find_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, PlayError> {
        if !self.status.is_in_play() {
            return Err(PlayError::GameNotActive);
        }
        let board = self.position.board();
        let piece = board.piece_at(from).ok_or(PlayError::NoPieceAtSquare)?;
        if piece.color != self.position.turn() {
            return Err(PlayError::NotSideToMovesPiece);
        }
        if !self
            .position
            .pseudo_legal_moves(piece.id)
            .iter()
            .any(|m| m.to() == to)
        {
            return Err(PlayError::IllegalPieceMove);
        }

        let candidates: MoveList = self
            .position
            .legal_moves_for_piece(piece.id)
            .into_iter()
            .filter(|m| m.to() == to)
            .collect();
        let first = candidates
            .first()
            .copied()
            .ok_or(PlayError::WouldLeaveKingInCheck)?;

        match (first.is_promotion(), promotion) {
            (false, None) => Ok(first),
            (true, None) => Err(PlayError::PromotionRequired),
            (false, Some(_)) => Err(PlayError::IllegalPieceMove),
            (true, Some(role)) => candidates
                .into_iter()
                .find(|m| m.promotion() == Some(role))
                .ok_or(PlayError::IllegalPieceMove),
        }
    }

    fn execute(&mut self, m: Move) {
        self.position.play_unchecked(&m);
        self.history.record(m, self.position.clone());
        self.clear_selection();
        self.status = GameStatus::of(&self.position);

        debug!(
            from = %m.from(),
            to = %m.to(),
            san = %m,
            status = %self.status,
            "played move"
        );
        if self.status.is_over() {
            info!(status = %self.status, winner = ?self.winner(), "game over");
        }
    }

    /// Ends a game in play as a draw by agreement.
    ///
    /// # Errors
    ///
    /// [`PlayError::GameNotActive`] if the game is not in play.
    pub fn declare_draw(&mut self) -> Result<(), PlayError> {
        if !self.status.is_in_play() {
            return Err(PlayError::GameNotActive);
        }
        self.clear_selection();
        self.status = GameStatus::Draw;
        info!(status = %self.status, "game over");
        Ok(())
    }

    /// The side that delivered checkmate, if any.
    pub fn winner(&self) -> Option<Color> {
        (self.status == GameStatus::Checkmate).then(|| !self.position.turn())
    }

    fn restore(&mut self, position: Position) {
        self.position = position;
        self.clear_selection();
        if self.status != GameStatus::Idle {
            self.status = GameStatus::of(&self.position);
        }
    }

    /// Takes back the last move. Returns `None` at the start of the game.
    ///
    /// The status is recomputed from the restored position, which also
    /// reopens a finished game.
    pub fn undo(&mut self) -> Option<&Position> {
        let position = self.history.undo()?.clone();
        self.restore(position);
        debug!(cursor = self.history.cursor(), status = %self.status, "undo");
        Some(&self.position)
    }

    /// Replays the next move taken back with [`Game::undo()`]. Returns
    /// `None` if there is none.
    pub fn redo(&mut self) -> Option<&Position> {
        let position = self.history.redo()?.clone();
        self.restore(position);
        debug!(cursor = self.history.cursor(), status = %self.status, "redo");
        Some(&self.position)
    }

    /// Jumps to the position after `index` moves.
    pub fn go_to(&mut self, index: usize) -> Option<&Position> {
        let position = self.history.go_to(index)?.clone();
        self.restore(position);
        debug!(cursor = index, status = %self.status, "go to");
        Some(&self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn game(fen: &str) -> Game {
        Game::from_position(
            fen.parse::<Fen>()
                .expect("valid fen")
                .into_position()
                .expect("legal position"),
        )
    }

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.legal_moves_for_color(Color::White).len(), 20);
        assert_eq!(game.check_state(), CheckState::default());
        assert_eq!(game.history().positions().len(), 1);
    }

    #[test]
    fn test_idle() {
        let mut game = Game::idle(Position::default());
        assert_eq!(
            game.attempt_move(Square::E2, Square::E4, None),
            Err(PlayError::GameNotActive)
        );
        assert_eq!(game.select_piece(Some(PieceId(12))), Err(PlayError::GameNotActive));
        assert!(game.legal_moves_for_piece(PieceId(12)).is_empty());

        assert_eq!(game.start(), GameStatus::Active);
        assert!(game.attempt_move(Square::E2, Square::E4, None).is_ok());
    }

    #[test]
    fn test_rejection_order() {
        let mut game = game("4k3/8/8/8/8/8/4r3/4K1N1 w - - 0 1");
        assert_eq!(
            game.attempt_move(Square::A1, Square::A2, None),
            Err(PlayError::NoPieceAtSquare)
        );
        assert_eq!(
            game.attempt_move(Square::E2, Square::E3, None),
            Err(PlayError::NotSideToMovesPiece)
        );
        assert_eq!(
            game.attempt_move(Square::G1, Square::G3, None),
            Err(PlayError::IllegalPieceMove)
        );
        assert_eq!(
            game.attempt_move(Square::G1, Square::H3, None),
            Err(PlayError::WouldLeaveKingInCheck)
        );
        assert_eq!(
            game.attempt_move(Square::G1, Square::E2, Some(Role::Queen)),
            Err(PlayError::IllegalPieceMove)
        );
        assert_eq!(game.status(), GameStatus::Check);
        assert!(game.history().is_empty());

        let m = game
            .attempt_move(Square::E1, Square::E2, None)
            .expect("king takes rook");
        assert_eq!(m.to_string(), "Kxe2");
        assert_eq!(game.status(), GameStatus::Active);
    }

    #[test]
    fn test_promotion_required() {
        let mut game = game("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            game.attempt_move(Square::B7, Square::B8, None),
            Err(PlayError::PromotionRequired)
        );
        assert_eq!(
            game.attempt_move(Square::B7, Square::B8, Some(Role::King)),
            Err(PlayError::IllegalPieceMove)
        );
        let m = game
            .attempt_move(Square::B7, Square::B8, Some(Role::Rook))
            .expect("b8=R");
        assert_eq!(m.to_string(), "b8=R");
        assert_eq!(game.status(), GameStatus::Check);
    }

    #[test]
    fn test_selection() {
        let mut game = Game::new();
        let knight = game.position().piece_at(Square::B1).expect("knight").id;
        assert_eq!(game.select_piece(Some(knight)).map(<[Move]>::len), Ok(2));
        assert_eq!(game.selected(), Some(knight));

        let pawn = game.position().piece_at(Square::E7).expect("pawn").id;
        assert_eq!(game.select_piece(Some(pawn)), Err(PlayError::NotSideToMovesPiece));
        assert_eq!(game.selected(), None);
        assert!(game.available_moves().is_empty());

        assert!(game.select_piece(Some(knight)).is_ok());
        game.attempt_move(Square::B1, Square::C3, None).expect("Nc3");
        assert_eq!(game.selected(), None);
        assert!(game.select_piece(None).is_ok_and(|moves| moves.is_empty()));
    }

    #[test]
    fn test_draw() {
        let mut game = Game::new();
        game.declare_draw().expect("in play");
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.declare_draw(), Err(PlayError::GameNotActive));
        assert_eq!(
            game.attempt_move(Square::E2, Square::E4, None),
            Err(PlayError::GameNotActive)
        );
    }

    #[test]
    fn test_undo_reopens_finished_game() {
        let mut game = Game::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.attempt_uci(&uci.parse().expect("valid uci"))
                .expect("legal move");
        }
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert_eq!(game.winner(), Some(Color::Black));
        assert_eq!(game.check_state().king, game.position().king(Color::White).map(|k| k.id));

        assert!(game.undo().is_some());
        assert_eq!(game.status(), GameStatus::Active);
        assert_eq!(game.turn(), Color::Black);
        assert!(game.redo().is_some());
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert!(game.go_to(0).is_some_and(|pos| pos == &Position::default()));
    }
}
