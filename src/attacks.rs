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

//! Movement tables and attack detection.
//!
//! # Examples
//!
//! ```
//! use fianchetto::{attacks, board::Board, Color, Position, Square};
//!
//! let pos = Position::default();
//! let board = Board::new(pos.pieces());
//!
//! // The knight on g1 covers f3, the pawns cover the whole third rank.
//! assert!(attacks::is_attacked(&board, Square::F3, Color::White));
//! assert!(attacks::is_attacked(&board, Square::A3, Color::White));
//! assert!(!attacks::is_attacked(&board, Square::E4, Color::White));
//! ```

use crate::{board::Board, Color, Piece, Role, Square};

/// `(file, rank)` steps of a knight.
pub const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// `(file, rank)` steps of a king. Also the ray directions of a queen.
pub const KING_DELTAS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Ray directions of a sliding piece. Empty for other roles.
pub fn directions(role: Role) -> &'static [(i32, i32)] {
    match role {
        Role::Rook => &ROOK_DIRECTIONS,
        Role::Bishop => &BISHOP_DIRECTIONS,
        Role::Queen => &KING_DELTAS,
        Role::Pawn | Role::Knight | Role::King => &[],
    }
}

/// Tests if `piece` could capture on `target`, regardless of what
/// stands there.
///
/// Only capture geometry counts: pawn pushes and castling never attack.
pub fn attacks(board: &Board<'_>, piece: &Piece, target: Square) -> bool {
    let df = i32::from(target.file()) - i32::from(piece.square.file());
    let dr = i32::from(target.rank()) - i32::from(piece.square.rank());

    if df == 0 && dr == 0 {
        return false;
    }

    match piece.role {
        Role::Pawn => dr == piece.color.forward() && df.abs() == 1,
        Role::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
        Role::King => df.abs() <= 1 && dr.abs() <= 1,
        Role::Rook if df != 0 && dr != 0 => false,
        Role::Bishop if df.abs() != dr.abs() => false,
        Role::Queen if df != 0 && dr != 0 && df.abs() != dr.abs() => false,
        Role::Rook | Role::Bishop | Role::Queen => {
            ray_reaches(board, piece.square, (df.signum(), dr.signum()), target)
        }
    }
}

/// Walks from `from` in `direction` and tests if `target` is reached
/// before any blocker.
fn ray_reaches(board: &Board<'_>, from: Square, direction: (i32, i32), target: Square) -> bool {
    let mut current = from;
    while let Some(next) = current.offset(direction.0, direction.1) {
        if next == target {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }
    false
}

/// Pieces of color `by` attacking `square`.
pub fn attackers<'a>(
    board: &'a Board<'a>,
    square: Square,
    by: Color,
) -> impl Iterator<Item = &'a Piece> + 'a {
    board
        .by_color(by)
        .filter(move |piece| attacks(board, piece, square))
}

/// Tests if any piece of color `by` attacks `square`.
pub fn is_attacked(board: &Board<'_>, square: Square, by: Color) -> bool {
    board.by_color(by).any(|piece| attacks(board, piece, square))
}
