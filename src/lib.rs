//! A chess rules engine: legal moves, check detection, move execution and
//! undo/redo history.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use fianchetto::Position;
//!
//! let pos = Position::default();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play a game:
//!
//! ```
//! use fianchetto::{Game, GameStatus, Square};
//!
//! let mut game = Game::new();
//!
//! // 1. f3 e5 2. g4 Qh4#
//! game.attempt_move(Square::F2, Square::F3, None)?;
//! game.attempt_move(Square::E7, Square::E5, None)?;
//! game.attempt_move(Square::G2, Square::G4, None)?;
//! game.attempt_move(Square::D8, Square::H4, None)?;
//!
//! assert_eq!(game.status(), GameStatus::Checkmate);
//! assert!(game.check_state().in_check);
//! # Ok::<_, fianchetto::PlayError>(())
//! ```
//!
//! Take moves back:
//!
//! ```
//! # use fianchetto::{Game, Position, Square};
//! # let mut game = Game::new();
//! game.attempt_move(Square::E2, Square::E4, None)?;
//! assert!(game.undo().is_some());
//! assert_eq!(game.position(), &Position::default());
//! assert!(game.redo().is_some());
//! # Ok::<_, fianchetto::PlayError>(())
//! ```
//!
//! Also supports [FEN](fen) for fixture positions, [SAN](san) move labels
//! and [UCI](uci) move input.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   vocabulary types and game status.
//!
//! # Logging
//!
//! Games emit [`tracing`](https://docs.rs/tracing) events for accepted and
//! rejected moves, undo and redo, and the end of a game. Installing a
//! subscriber is up to the application.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod game;
mod m;
mod movegen;
mod position;
mod role;
mod setup;
mod square;
mod types;

pub mod attacks;
pub mod board;
pub mod fen;
pub mod history;
pub mod perft;
pub mod san;
pub mod uci;

pub use board::Board;
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color, ParseColorError};
pub use game::{CheckState, Game, GameStatus, PlayError};
pub use history::History;
pub use m::{Move, MoveKind, MoveList};
pub use position::{Position, PositionError, PositionErrorKinds};
pub use role::Role;
pub use setup::Setup;
pub use square::{ParseSquareError, Square};
pub use types::{Piece, PieceId};
