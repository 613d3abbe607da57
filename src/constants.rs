//! Constants for board geometry, search bounds, and rendering.
//!
//! The game itself has almost no tunable parameters: the board size and
//! step limit come from the player at runtime. What remains here are the
//! fixed pieces of the rules and the policy knobs of the engine.

use crate::position::Pos;

// =============================================================================
// Board Geometry
// =============================================================================

/// The winning square. Moving the queen here ends the game.
pub const WINNING_CORNER: Pos = Pos { row: 0, col: 0 };

// =============================================================================
// Search Parameters
// =============================================================================

/// Lower bound of the full alpha-beta window.
pub const NEG_INF: i32 = i32::MIN;

/// Upper bound of the full alpha-beta window.
pub const POS_INF: i32 = i32::MAX;

/// Value of a position won by the maximizing side.
pub const WIN: i32 = 1;

/// Value of a position won by the minimizing side.
pub const LOSS: i32 = -1;

/// Boards with at least this many rows and columns are searched with
/// alpha-beta pruning. Smaller boards use plain minimax so the node counts
/// shown to the player reflect the full tree.
pub const PRUNING_MIN_SIDE: i32 = 7;

// =============================================================================
// Board Markers
// =============================================================================

/// The queen's square.
pub const QUEEN: char = 'Q';

/// The winning corner while the queen is elsewhere.
pub const CORNER: char = 'R';

/// Any other square.
pub const EMPTY: char = 'X';
