//! Board geometry and queen move rules.
//!
//! This module provides the rule layer of the game:
//! - Coordinates (`Pos`) and the per-game configuration (`BoardConfig`)
//! - Bounds checking
//! - Validation of externally supplied moves
//! - Generation of every legal move from a square, in a fixed order
//!
//! The queen only ever moves Left, Down, or Diagonally left-down, so every
//! move strictly decreases `row + col`. Games therefore end within
//! `rows + cols` plies.

use std::fmt;

use thiserror::Error;

use crate::constants::WINNING_CORNER;

/// A square on the board, 0-indexed.
///
/// Coordinates are signed so that anything a player types can be represented
/// and then rejected by the rules rather than by the parser.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    /// The winning corner (0,0).
    pub const CORNER: Pos = WINNING_CORNER;

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True for the winning corner.
    #[inline]
    pub fn is_corner(self) -> bool {
        self == WINNING_CORNER
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.row, self.col)
    }
}

/// Reasons a board configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rows must be a positive integer (got {0})")]
    Rows(i32),
    #[error("cols must be a positive integer (got {0})")]
    Cols(i32),
    #[error("max steps per move must be a positive integer (got {0})")]
    Steps(i32),
    #[error("a 1x1 board has no starting square besides the winning corner")]
    NoStartingSquare,
}

/// Board dimensions and the maximum step length. Fixed for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub rows: i32,
    pub cols: i32,
    /// Maximum number of squares the queen may travel in one move.
    pub x: i32,
}

impl BoardConfig {
    pub fn new(rows: i32, cols: i32, x: i32) -> Result<Self, ConfigError> {
        if rows <= 0 {
            return Err(ConfigError::Rows(rows));
        }
        if cols <= 0 {
            return Err(ConfigError::Cols(cols));
        }
        if x <= 0 {
            return Err(ConfigError::Steps(x));
        }
        if rows == 1 && cols == 1 {
            return Err(ConfigError::NoStartingSquare);
        }
        Ok(Self { rows, cols, x })
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        in_bounds(pos.row, pos.col, self.rows, self.cols)
    }

    /// See [`is_valid_move`].
    pub fn is_valid_move(&self, old: Pos, new: Pos) -> bool {
        is_valid_move(old, new, self.rows, self.cols, self.x)
    }

    /// See [`possible_moves`].
    pub fn moves_from(&self, pos: Pos) -> Vec<Pos> {
        possible_moves(pos, self.rows, self.cols, self.x)
    }

    /// True if `pos` may hold the queen before the first move.
    pub fn is_valid_start(&self, pos: Pos) -> bool {
        self.contains(pos) && !pos.is_corner()
    }

    /// Every square except the winning corner, row-major.
    pub fn starting_squares(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows)
            .flat_map(move |r| (0..self.cols).map(move |c| Pos::new(r, c)))
            .filter(|p| !p.is_corner())
    }
}

/// The three directions the queen may travel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Down,
    Diagonal,
}

impl Direction {
    /// Directions in move generation order.
    pub const ALL: [Direction; 3] = [Direction::Left, Direction::Down, Direction::Diagonal];

    /// (row, col) change for a single step.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Down => (-1, 0),
            Direction::Diagonal => (-1, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Diagonal => "diagonal",
        }
    }
}

/// Check whether (r, c) lies on a `rows` x `cols` board.
#[inline]
pub fn in_bounds(r: i32, c: i32, rows: i32, cols: i32) -> bool {
    0 <= r && r < rows && 0 <= c && c < cols
}

/// Classify the displacement from `old` to `new`.
///
/// Returns the direction and step length when the displacement is a pure
/// left, down, or diagonal left-down move of at least one square. Bounds and
/// the step limit are not checked here. Deltas are taken in `i64`, so any
/// pair of coordinates is accepted.
pub fn classify_move(old: Pos, new: Pos) -> Option<(Direction, i64)> {
    let dr = i64::from(old.row) - i64::from(new.row);
    let dc = i64::from(old.col) - i64::from(new.col);

    if dr < 0 || dc < 0 {
        return None;
    }

    if dr == 0 && dc > 0 {
        Some((Direction::Left, dc))
    } else if dc == 0 && dr > 0 {
        Some((Direction::Down, dr))
    } else if dr == dc && dr > 0 {
        Some((Direction::Diagonal, dr))
    } else {
        None
    }
}

/// Check whether moving the queen from `old` to `new` is legal.
///
/// A legal move stays on the board, travels Left, Down, or Diagonally
/// left-down, and covers between 1 and `x` squares. Never fails; any
/// malformed move is simply `false`.
pub fn is_valid_move(old: Pos, new: Pos, rows: i32, cols: i32, x: i32) -> bool {
    if !in_bounds(new.row, new.col, rows, cols) {
        return false;
    }
    if new == old {
        return false;
    }

    match classify_move(old, new) {
        Some((_, step)) => 1 <= step && step <= i64::from(x),
        None => false,
    }
}

/// Generate every legal destination from `pos`.
///
/// Order: Left moves by increasing step, then Down, then Diagonal. Each
/// direction stops at the first step that leaves the board, since larger
/// steps in that direction only move further off it. The order is relied on
/// by the search for deterministic tie-breaking.
pub fn possible_moves(pos: Pos, rows: i32, cols: i32, x: i32) -> Vec<Pos> {
    // No direction fits more than max(rows, cols) steps on the board.
    let reach = x.min(rows.max(cols)).max(0) as usize;
    let mut moves = Vec::with_capacity(3 * reach);

    for dir in Direction::ALL {
        let (dr, dc) = dir.delta();
        for k in 1..=x {
            let nr = i64::from(pos.row) + i64::from(dr) * i64::from(k);
            let nc = i64::from(pos.col) + i64::from(dc) * i64::from(k);
            if !(0..i64::from(rows)).contains(&nr) || !(0..i64::from(cols)).contains(&nc) {
                break;
            }
            // In bounds, so both fit back into i32.
            moves.push(Pos::new(nr as i32, nc as i32));
        }
    }

    moves
}
