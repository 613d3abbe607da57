//! Corner the Queen: an exact solver and console game.
//!
//! A single queen sits on a `rows` x `cols` board. Players alternate moving
//! it Left, Down, or Diagonally left-down by 1 to `x` squares; whoever puts
//! it on the corner (0,0) wins. The game always terminates, so the engine
//! solves it exhaustively instead of estimating.
//!
//! ## Modules
//!
//! - [`constants`] - Winning corner, search bounds, pruning policy, markers
//! - [`position`] - Coordinates, board configuration, move rules
//! - [`search`] - Minimax, alpha-beta, and initial placement
//! - [`board`] - Text rendering of the board
//! - [`game`] - Interactive match between humans and/or the AI
//!
//! ## Example
//!
//! ```
//! use corner_queen::position::Pos;
//! use corner_queen::search::{alphabeta, minimax};
//! use corner_queen::constants::{NEG_INF, POS_INF};
//!
//! // The side to move at (1,1) on a 3x3 board wins by going to the corner.
//! let full = minimax(Pos::new(1, 1), 3, 3, 1, true);
//! assert_eq!(full.value, 1);
//! assert_eq!(full.best_move, Some(Pos::new(0, 0)));
//!
//! let pruned = alphabeta(Pos::new(1, 1), 3, 3, 1, true, NEG_INF, POS_INF);
//! assert_eq!(pruned.best_move, full.best_move);
//! assert!(pruned.nodes <= full.nodes);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod position;
pub mod search;
