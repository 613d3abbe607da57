//! Text rendering of the board.
//!
//! Used by the game session to show the queen after every move.

use std::fmt;

use crate::constants::{CORNER, EMPTY, QUEEN};
use crate::position::{BoardConfig, Pos};

/// A printable snapshot of the board with the queen on it.
///
/// Row 0 is printed last so the winning corner sits at the bottom left,
/// with column numbers underneath.
pub struct BoardView<'a> {
    pub cfg: &'a BoardConfig,
    pub queen: Pos,
}

impl<'a> BoardView<'a> {
    pub fn new(cfg: &'a BoardConfig, queen: Pos) -> Self {
        Self { cfg, queen }
    }

    fn marker(&self, pos: Pos) -> char {
        if pos == self.queen {
            QUEEN
        } else if pos.is_corner() {
            CORNER
        } else {
            EMPTY
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in (0..self.cfg.rows).rev() {
            write!(f, "{r}   ")?;
            for c in 0..self.cfg.cols {
                write!(f, "{}  ", self.marker(Pos::new(r, c)))?;
            }
            writeln!(f)?;
        }
        write!(f, "    ")?;
        for c in 0..self.cfg.cols {
            write!(f, "{c}  ")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_small_board() {
        let cfg = BoardConfig::new(2, 3, 1).unwrap();
        let view = BoardView::new(&cfg, Pos::new(1, 2));
        let expected = "1   X  X  Q  \n0   R  X  X  \n    0  1  2  \n";
        assert_eq!(view.to_string(), expected);
    }

    #[test]
    fn test_queen_on_corner_hides_marker() {
        let cfg = BoardConfig::new(2, 2, 1).unwrap();
        let view = BoardView::new(&cfg, Pos::CORNER);
        let expected = "1   X  X  \n0   Q  X  \n    0  1  \n";
        assert_eq!(view.to_string(), expected);
    }
}
