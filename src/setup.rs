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

use std::num::NonZeroU32;

use crate::{CastlingSide, Color, Piece, PieceId, Role, Square};

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// A not necessarily legal position.
///
/// Use [`Position::from_setup`](crate::Position::from_setup) to validate it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    /// Pieces on the board, in id order for setups built with
    /// [`Setup::put`].
    pub pieces: Vec<Piece>,

    /// Side to move.
    pub turn: Color,

    /// Square a pawn skipped with a double step on the last half-move.
    /// Valid target squares are on the third or sixth rank.
    pub ep_square: Option<Square>,

    /// Number of half-moves since the last
    /// [capture or pawn move](crate::Move::is_zeroing()).
    pub halfmoves: u32,

    /// Current move number.
    ///
    /// Starts at 1 and is increased after every black move.
    ///
    /// # Examples
    ///
    /// ```
    /// use fianchetto::Setup;
    ///
    /// let setup = Setup::default();
    /// assert_eq!(setup.fullmoves.get(), 1);
    /// ```
    pub fullmoves: NonZeroU32,
}

impl Setup {
    pub fn empty() -> Setup {
        Setup {
            pieces: Vec::new(),
            turn: Color::White,
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    /// Places a piece with the next free id and returns that id.
    ///
    /// Whether the piece has moved is inferred from its square: pawns off
    /// their starting rank, kings off their starting square and rooks off
    /// the corners count as moved. An existing piece on the same square is
    /// not removed; validation reports the overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use fianchetto::{Color, PieceId, Role, Setup, Square};
    ///
    /// let mut setup = Setup::empty();
    /// assert_eq!(setup.put(Color::White, Role::King, Square::E1), PieceId(0));
    /// assert_eq!(setup.put(Color::White, Role::Pawn, Square::E4), PieceId(1));
    ///
    /// assert!(!setup.pieces[0].has_moved);
    /// assert!(setup.pieces[1].has_moved);
    /// ```
    pub fn put(&mut self, color: Color, role: Role, square: Square) -> PieceId {
        let id = PieceId(
            self.pieces
                .iter()
                .map(|p| p.id.0.saturating_add(1))
                .max()
                .unwrap_or(0),
        );
        self.pieces.push(Piece {
            has_moved: !is_home_square(color, role, square),
            ..Piece::new(id, color, role, square)
        });
        id
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.square == square)
    }

    /// Grants or revokes castling on `side` by marking the involved king
    /// and rook as moved or unmoved. Revoking the last right of a colour
    /// also marks its king as moved.
    pub fn set_castling_right(&mut self, color: Color, side: CastlingSide, allowed: bool) {
        let rook_from = side.rook_from(color);
        let king_from = king_home(color);

        for piece in &mut self.pieces {
            if piece.color == color && piece.role == Role::Rook && piece.square == rook_from {
                piece.has_moved = !allowed;
            }
        }

        let keep_king = CastlingSide::ALL
            .into_iter()
            .any(|s| castling_right(&self.pieces, color, s));
        for piece in &mut self.pieces {
            if piece.color == color && piece.role == Role::King && piece.square == king_from {
                piece.has_moved = !(allowed || keep_king);
            }
        }
    }

    pub fn castling_right(&self, color: Color, side: CastlingSide) -> bool {
        castling_right(&self.pieces, color, side)
    }

    pub fn swap_turn(&mut self) {
        self.turn = !self.turn;
        self.ep_square = None;
    }
}

impl Default for Setup {
    /// The standard starting position. White pieces get ids 0 to 15, black
    /// pieces 16 to 31.
    fn default() -> Setup {
        let mut setup = Setup::empty();
        for (file, role) in (0..).zip(BACKRANK) {
            setup.put(Color::White, role, on_rank(file, 0));
        }
        for file in 0..8 {
            setup.put(Color::White, Role::Pawn, on_rank(file, 1));
        }
        for file in 0..8 {
            setup.put(Color::Black, Role::Pawn, on_rank(file, 6));
        }
        for (file, role) in (0..).zip(BACKRANK) {
            setup.put(Color::Black, role, on_rank(file, 7));
        }
        setup
    }
}

fn on_rank(file: i32, rank: i32) -> Square {
    match Square::from_coords(file, rank) {
        Some(square) => square,
        None => unreachable!("starting squares are on the board"),
    }
}

fn king_home(color: Color) -> Square {
    on_rank(4, i32::from(color.backrank()))
}

fn is_home_square(color: Color, role: Role, square: Square) -> bool {
    match role {
        Role::Pawn => square.rank() == color.pawn_rank(),
        Role::King => square == king_home(color),
        Role::Rook => CastlingSide::ALL
            .into_iter()
            .any(|side| square == side.rook_from(color)),
        Role::Knight | Role::Bishop | Role::Queen => true,
    }
}

/// Unmoved king on its starting square and unmoved rook in the corner of
/// `side`.
pub(crate) fn castling_right(pieces: &[Piece], color: Color, side: CastlingSide) -> bool {
    let unmoved = |role: Role, square: Square| {
        pieces.iter().any(|p| {
            p.color == color && p.role == role && p.square == square && !p.has_moved
        })
    };
    unmoved(Role::King, king_home(color)) && unmoved(Role::Rook, side.rook_from(color))
}
