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

use std::fmt;

use crate::{Color, Role, Square};

/// Identity of a piece, stable for the lifetime of a game.
///
/// A promoted pawn keeps its id.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PieceId(pub u8);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl nohash_hasher::IsEnabled for PieceId {}

/// A piece on the board.
///
/// Values handed out by the engine are snapshots: changing one does not
/// change the position it was read from.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub role: Role,
    pub square: Square,
    /// Set once the piece has moved. Pawns need it for the double step,
    /// kings and rooks for castling.
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(id: PieceId, color: Color, role: Role, square: Square) -> Piece {
        Piece {
            id,
            color,
            role,
            square,
            has_moved: false,
        }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub const fn char(&self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    #[inline]
    pub fn is_enemy(&self, color: Color) -> bool {
        self.color != color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.char(), self.square)
    }
}
