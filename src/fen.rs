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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! FENs are a convenient way to load fixture positions: any piece
//! arrangement becomes an ordinary [`Position`].
//!
//! # Examples
//!
//! ```
//! use fianchetto::{fen::Fen, Color, Square};
//!
//! let fen: Fen = "7k/7Q/8/8/8/8/8/4K2R b - - 0 1".parse()?;
//! let pos = fen.into_position()?;
//!
//! assert_eq!(pos.turn(), Color::Black);
//! assert!(pos.is_checkmate());
//! assert_eq!(pos.piece_at(Square::H8).map(|p| p.char()), Some('k'));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Pieces get ids in reading order, starting at a8. The castling field
//! marks kings and rooks as moved or unmoved. Trailing fields may be
//! omitted.

use std::{error::Error, fmt, num::NonZeroU32, str::FromStr};

use crate::{
    board::Board, CastlingSide, Color, Position, PositionError, Role, Setup, Square,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A FEN like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct Fen(pub Setup);

impl Fen {
    pub fn empty() -> Fen {
        Fen(Setup::empty())
    }

    /// Parses a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the input is not syntactically valid.
    /// Whether the position is legal is only checked when converting it
    /// with [`Fen::into_position()`].
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        let mut setup = parse_board(board_part)?;

        setup.turn = match parts.next() {
            Some(b"w") | None => Color::White,
            Some(b"b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        parse_castling(&mut setup, parts.next().unwrap_or(b"-"))?;

        setup.ep_square = match parts.next() {
            Some(b"-") | None => None,
            Some(ep_part) => Some(
                Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?,
            ),
        };

        if let Some(halfmoves_part) = parts.next() {
            setup.halfmoves =
                btoi::btou(halfmoves_part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        }

        if let Some(fullmoves_part) = parts.next() {
            let fullmoves: u32 =
                btoi::btou(fullmoves_part).map_err(|_| ParseFenError::InvalidFullmoves)?;
            setup.fullmoves = NonZeroU32::new(fullmoves).unwrap_or(NonZeroU32::MIN);
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(Fen(setup))
    }

    pub fn from_setup(setup: Setup) -> Fen {
        Fen(setup)
    }

    pub fn from_position(pos: &Position) -> Fen {
        Fen(pos.to_setup())
    }

    pub fn as_setup(&self) -> &Setup {
        &self.0
    }

    pub fn into_setup(self) -> Setup {
        self.0
    }

    /// Validates the position.
    ///
    /// # Errors
    ///
    /// See [`Position::from_setup()`].
    pub fn into_position(self) -> Result<Position, PositionError> {
        Position::from_setup(self.0)
    }
}

fn parse_board(board_part: &[u8]) -> Result<Setup, ParseFenError> {
    let mut setup = Setup::empty();
    let mut rank = 7i32;
    let mut file = 0i32;

    for &ch in board_part {
        match ch {
            b'/' => {
                if file != 8 || rank == 0 {
                    return Err(ParseFenError::InvalidBoard);
                }
                file = 0;
                rank -= 1;
            }
            b'1'..=b'8' => {
                file += i32::from(ch - b'0');
                if file > 8 {
                    return Err(ParseFenError::InvalidBoard);
                }
            }
            _ => {
                let role = Role::from_char(char::from(ch.to_ascii_lowercase()))
                    .ok_or(ParseFenError::InvalidBoard)?;
                let color = Color::from_white(ch.is_ascii_uppercase());
                let square =
                    Square::from_coords(file, rank).ok_or(ParseFenError::InvalidBoard)?;
                setup.put(color, role, square);
                file += 1;
            }
        }
    }

    if file != 8 || rank != 0 {
        return Err(ParseFenError::InvalidBoard);
    }

    Ok(setup)
}

fn parse_castling(setup: &mut Setup, castling_part: &[u8]) -> Result<(), ParseFenError> {
    let mut rights = [
        (Color::White, CastlingSide::KingSide, false),
        (Color::White, CastlingSide::QueenSide, false),
        (Color::Black, CastlingSide::KingSide, false),
        (Color::Black, CastlingSide::QueenSide, false),
    ];

    if castling_part != b"-" {
        for &ch in castling_part {
            let index = match ch {
                b'K' => 0,
                b'Q' => 1,
                b'k' => 2,
                b'q' => 3,
                _ => return Err(ParseFenError::InvalidCastling),
            };
            if rights[index].2 {
                return Err(ParseFenError::InvalidCastling);
            }
            rights[index].2 = true;
        }
    }

    for (color, side, allowed) in rights {
        setup.set_castling_right(color, side, allowed);
    }

    Ok(())
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let setup = &self.0;

        write!(
            f,
            "{} {} ",
            Board::new(&setup.pieces).board_fen(),
            setup.turn.char()
        )?;

        let mut any_castling = false;
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if setup.castling_right(color, side) {
                    let ch = match side {
                        CastlingSide::KingSide => 'k',
                        CastlingSide::QueenSide => 'q',
                    };
                    write!(f, "{}", color.fold(ch.to_ascii_uppercase(), ch))?;
                    any_castling = true;
                }
            }
        }
        if !any_castling {
            f.write_str("-")?;
        }

        match setup.ep_square {
            Some(ep_square) => write!(f, " {ep_square}")?,
            None => f.write_str(" -")?,
        }

        write!(f, " {} {}", setup.halfmoves, setup.fullmoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceId;

    #[test]
    fn test_default_round_trip() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(Fen::default().to_string(), fen);
        assert_eq!(Fen::from_position(&Position::default()).to_string(), fen);

        let pos = fen
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal");
        assert_eq!(pos.board().board_fen(), Position::default().board().board_fen());
        assert_eq!(pos.legal_moves().len(), 20);
    }

    #[test]
    fn test_castling_field() {
        let fen: Fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1".parse().expect("valid fen");
        let setup = fen.as_setup();
        assert!(setup.castling_right(Color::White, CastlingSide::KingSide));
        assert!(!setup.castling_right(Color::White, CastlingSide::QueenSide));
        assert!(!setup.castling_right(Color::Black, CastlingSide::KingSide));
        assert!(setup.castling_right(Color::Black, CastlingSide::QueenSide));
        assert_eq!(fen.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1");

        let none: Fen = "r3k2r/8/8/8/8/8/8/R3K2R b - - 5 40".parse().expect("valid fen");
        assert!(none
            .as_setup()
            .pieces
            .iter()
            .filter(|p| p.role == Role::King)
            .all(|p| p.has_moved));
        assert_eq!(none.to_string(), "r3k2r/8/8/8/8/8/8/R3K2R b - - 5 40");
    }

    #[test]
    fn test_reading_order_ids() {
        let fen: Fen = "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1".parse().expect("valid fen");
        let ids: Vec<(PieceId, Square)> = fen
            .as_setup()
            .pieces
            .iter()
            .map(|p| (p.id, p.square))
            .collect();
        assert_eq!(
            ids,
            [
                (PieceId(0), Square::E8),
                (PieceId(1), Square::E2),
                (PieceId(2), Square::E1)
            ]
        );
    }

    #[test]
    fn test_missing_castling_field() {
        let pos = "r3k2r/8/8/8/8/8/8/R3K2R w"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal");
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                assert!(!pos.castling_right(color, side));
            }
        }
        assert!(!pos.legal_moves().iter().any(|m| m.is_castle()));
    }

    #[test]
    fn test_short_fen() {
        let fen: Fen = "8/8/8/R2nkn2/8/8/2K5/8 b - -".parse().expect("valid fen");
        assert_eq!(fen.as_setup().turn, Color::Black);
        assert_eq!(fen.as_setup().fullmoves.get(), 1);
    }

    #[test]
    fn test_invalid_fen() {
        for (fen, err) in [
            ("", ParseFenError::InvalidFen),
            ("8/8/8/8/8/8/8 w - - 0 1", ParseFenError::InvalidBoard),
            ("9/8/8/8/8/8/8/8 w - - 0 1", ParseFenError::InvalidBoard),
            ("4x3/8/8/8/8/8/8/4K3 w - - 0 1", ParseFenError::InvalidBoard),
            ("4k3/8/8/8/8/8/8/4K3 x - - 0 1", ParseFenError::InvalidTurn),
            ("4k3/8/8/8/8/8/8/4K3 w KK - 0 1", ParseFenError::InvalidCastling),
            ("4k3/8/8/8/8/8/8/4K3 w - e9 0 1", ParseFenError::InvalidEpSquare),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", ParseFenError::InvalidHalfmoveClock),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 -1", ParseFenError::InvalidFullmoves),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1 1", ParseFenError::InvalidFen),
        ] {
            assert_eq!(fen.parse::<Fen>(), Err(err), "{fen}");
        }
    }
}
