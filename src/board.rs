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

//! Square lookup over a list of pieces.

use std::fmt::{self, Write as _};

use nohash_hasher::IntMap;

use crate::{Color, Piece, Role, Square};

/// Index answering "what stands on this square" for a borrowed piece list.
///
/// A `Board` is rebuilt from the pieces whenever it is needed instead of
/// being updated alongside them, so it can never disagree with the list.
/// With at most 64 entries that is cheap.
///
/// # Examples
///
/// ```
/// use fianchetto::{board::Board, Color, Position, Role, Square};
///
/// let pos = Position::default();
/// let board = Board::new(pos.pieces());
///
/// assert_eq!(board.piece_at(Square::E1).map(|p| p.role), Some(Role::King));
/// assert!(board.is_empty(Square::E4));
/// assert!(board.has_enemy(Square::E7, Color::White));
/// ```
#[derive(Clone)]
pub struct Board<'a> {
    pieces: &'a [Piece],
    by_square: IntMap<Square, &'a Piece>,
}

impl<'a> Board<'a> {
    pub fn new(pieces: &'a [Piece]) -> Board<'a> {
        let mut by_square =
            IntMap::with_capacity_and_hasher(pieces.len(), Default::default());
        for piece in pieces {
            by_square.insert(piece.square, piece);
        }
        Board { pieces, by_square }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&'a Piece> {
        self.by_square.get(&square).copied()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        !self.by_square.contains_key(&square)
    }

    /// Whether `square` holds a piece of the opponent of `color`.
    #[inline]
    pub fn has_enemy(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).is_some_and(|p| p.is_enemy(color))
    }

    pub fn pieces(&self) -> &'a [Piece] {
        self.pieces
    }

    pub fn by_color(&self, color: Color) -> impl Iterator<Item = &'a Piece> {
        self.pieces.iter().filter(move |p| p.color == color)
    }

    pub fn king(&self, color: Color) -> Option<&'a Piece> {
        self.by_color(color).find(|p| p.role == Role::King)
    }

    /// Piece placement part of a FEN, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(15);

        for rank in (0..8).rev() {
            let mut empty = 0u8;

            for square in Square::all().filter(|sq| sq.rank() == rank) {
                match self.piece_at(square) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen
    }
}

impl fmt::Debug for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for square in Square::all().filter(|sq| sq.rank() == rank) {
                f.write_char(self.piece_at(square).map_or('.', |p| p.char()))?;
                f.write_char(if square.file() < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceId, Position};

    #[test]
    fn test_piece_at() {
        let pos = Position::default();
        let board = Board::new(pos.pieces());
        assert_eq!(board.piece_at(Square::A2).map(|p| p.role), Some(Role::Pawn));
        assert_eq!(board.piece_at(Square::B1).map(|p| p.role), Some(Role::Knight));
        assert_eq!(board.piece_at(Square::D4), None);
        assert_eq!(board.king(Color::Black).map(|k| k.square), Some(Square::E8));
    }

    #[test]
    fn test_has_enemy() {
        let pieces = [
            Piece::new(PieceId(0), Color::White, Role::King, Square::E1),
            Piece::new(PieceId(1), Color::Black, Role::King, Square::E8),
            Piece::new(PieceId(2), Color::Black, Role::Rook, Square::E4),
        ];
        let board = Board::new(&pieces);
        assert!(board.has_enemy(Square::E4, Color::White));
        assert!(!board.has_enemy(Square::E4, Color::Black));
        assert!(!board.has_enemy(Square::E5, Color::White));
        assert!(!board.is_empty(Square::E4));
    }

    #[test]
    fn test_board_fen() {
        let pos = Position::default();
        assert_eq!(
            Board::new(pos.pieces()).board_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }
}
