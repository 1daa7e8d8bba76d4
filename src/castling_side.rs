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

use crate::{Color, Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    /// File of the rook that takes part in castling to this side.
    pub const fn rook_from_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    pub const fn king_to_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    pub const fn rook_to_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    /// Direction of the king walk along the backrank.
    pub const fn step(self) -> i32 {
        match self {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => -1,
        }
    }

    fn on_backrank(file: u8, color: Color) -> Square {
        match Square::from_coords(file as i32, color.backrank() as i32) {
            Some(square) => square,
            None => unreachable!("files and backranks are on the board"),
        }
    }

    pub fn rook_from(self, color: Color) -> Square {
        CastlingSide::on_backrank(self.rook_from_file(), color)
    }

    pub fn king_to(self, color: Color) -> Square {
        CastlingSide::on_backrank(self.king_to_file(), color)
    }

    pub fn rook_to(self, color: Color) -> Square {
        CastlingSide::on_backrank(self.rook_to_file(), color)
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}
