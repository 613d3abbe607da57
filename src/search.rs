//! Exhaustive game-tree search.
//!
//! Two evaluators solve a position exactly:
//! - [`minimax`] visits the whole game tree
//! - [`alphabeta`] visits the same tree in the same order but skips
//!   subtrees that cannot change the result
//!
//! Both return a [`SearchResult`] holding the game-theoretic value, the
//! first optimal move in generation order, and the number of nodes visited.
//! With the full window they always agree on value and move.
//!
//! Values are `+1` when the maximizing side wins with best play and `-1`
//! when the minimizing side does. A terminal node is a loss for the side to
//! move there: at the corner, the other side just won.
//!
//! Recursion depth is bounded by `row + col` of the root, which strictly
//! decreases with every move.

use tracing::debug;

use crate::constants::{LOSS, NEG_INF, POS_INF, PRUNING_MIN_SIDE, WIN};
use crate::position::{BoardConfig, Pos, possible_moves};

/// Outcome of searching one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `+1` if the maximizing side wins, `-1` if the minimizing side wins.
    pub value: i32,
    /// First optimal move in generation order; `None` at a terminal node.
    pub best_move: Option<Pos>,
    /// Nodes visited, including the root.
    pub nodes: u64,
}

impl SearchResult {
    fn terminal(maximizing: bool) -> Self {
        Self {
            value: if maximizing { LOSS } else { WIN },
            best_move: None,
            nodes: 1,
        }
    }
}

/// Which evaluator to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchMethod {
    Minimax,
    AlphaBeta,
}

impl SearchMethod {
    /// Alpha-beta on boards at least `PRUNING_MIN_SIDE` on both sides,
    /// plain minimax otherwise. Either choice yields the same decisions.
    pub fn for_board(cfg: &BoardConfig) -> Self {
        if cfg.rows >= PRUNING_MIN_SIDE && cfg.cols >= PRUNING_MIN_SIDE {
            SearchMethod::AlphaBeta
        } else {
            SearchMethod::Minimax
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SearchMethod::Minimax => "minimax",
            SearchMethod::AlphaBeta => "alpha-beta",
        }
    }
}

/// Solve `pos` with plain minimax.
///
/// When several moves are optimal the first one generated is kept: only a
/// strict improvement replaces the current best.
pub fn minimax(pos: Pos, rows: i32, cols: i32, x: i32, maximizing: bool) -> SearchResult {
    if pos.is_corner() {
        return SearchResult::terminal(maximizing);
    }

    let moves = possible_moves(pos, rows, cols, x);
    if moves.is_empty() {
        return SearchResult::terminal(maximizing);
    }

    let mut nodes = 1;
    let mut best_value = if maximizing { NEG_INF } else { POS_INF };
    let mut best_move = None;

    for mv in moves {
        let child = minimax(mv, rows, cols, x, !maximizing);
        nodes += child.nodes;

        let improves = if maximizing {
            child.value > best_value
        } else {
            child.value < best_value
        };
        if improves {
            best_value = child.value;
            best_move = Some(mv);
        }
    }

    SearchResult {
        value: best_value,
        best_move,
        nodes,
    }
}

/// Solve `pos` with alpha-beta pruning inside the window `(alpha, beta)`.
///
/// Traversal order and tie-breaking match [`minimax`]. Iteration over a
/// node's moves stops once `alpha >= beta`; skipped subtrees add nothing to
/// the node count.
pub fn alphabeta(
    pos: Pos,
    rows: i32,
    cols: i32,
    x: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> SearchResult {
    if pos.is_corner() {
        return SearchResult::terminal(maximizing);
    }

    let moves = possible_moves(pos, rows, cols, x);
    if moves.is_empty() {
        return SearchResult::terminal(maximizing);
    }

    let mut nodes = 1;
    let mut best_value = if maximizing { NEG_INF } else { POS_INF };
    let mut best_move = None;

    for mv in moves {
        let child = alphabeta(mv, rows, cols, x, !maximizing, alpha, beta);
        nodes += child.nodes;

        if maximizing {
            if child.value > best_value {
                best_value = child.value;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_value);
        } else {
            if child.value < best_value {
                best_value = child.value;
                best_move = Some(mv);
            }
            beta = beta.min(best_value);
        }

        if alpha >= beta {
            break;
        }
    }

    SearchResult {
        value: best_value,
        best_move,
        nodes,
    }
}

/// Solve `pos` on `cfg` with the chosen method and the full window.
pub fn search(pos: Pos, cfg: &BoardConfig, maximizing: bool, method: SearchMethod) -> SearchResult {
    let result = match method {
        SearchMethod::Minimax => minimax(pos, cfg.rows, cfg.cols, cfg.x, maximizing),
        SearchMethod::AlphaBeta => {
            alphabeta(pos, cfg.rows, cfg.cols, cfg.x, maximizing, NEG_INF, POS_INF)
        }
    };

    debug!(
        method = method.name(),
        %pos,
        maximizing,
        value = result.value,
        nodes = result.nodes,
        "search finished"
    );

    result
}

/// Choose where the AI puts the queen before the first move.
///
/// Every square except the corner is solved, row-major, with the opponent
/// to move next (`maximizing = !ai_is_maximizing`). The first square with
/// the best value for the AI wins. Returns the square and the node count
/// summed over all evaluations, or `None` if the board has no square other
/// than the corner.
pub fn pick_initial_position(
    rows: i32,
    cols: i32,
    x: i32,
    use_pruning: bool,
    ai_is_maximizing: bool,
) -> Option<(Pos, u64)> {
    let next_is_maximizing = !ai_is_maximizing;

    let mut best_pos = None;
    let mut best_value = if ai_is_maximizing { NEG_INF } else { POS_INF };
    let mut total_nodes = 0;

    for r in 0..rows {
        for c in 0..cols {
            let pos = Pos::new(r, c);
            if pos.is_corner() {
                continue;
            }

            let result = if use_pruning {
                alphabeta(pos, rows, cols, x, next_is_maximizing, NEG_INF, POS_INF)
            } else {
                minimax(pos, rows, cols, x, next_is_maximizing)
            };
            total_nodes += result.nodes;

            let improves = if ai_is_maximizing {
                result.value > best_value
            } else {
                result.value < best_value
            };
            if improves {
                best_value = result.value;
                best_pos = Some(pos);
            }
        }
    }

    debug!(
        rows,
        cols,
        x,
        use_pruning,
        ai_is_maximizing,
        value = best_value,
        nodes = total_nodes,
        "placement chosen"
    );

    best_pos.map(|pos| (pos, total_nodes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(r: i32, c: i32) -> Pos {
        Pos::new(r, c)
    }

    #[test]
    fn test_terminal_corner() {
        let max = minimax(Pos::CORNER, 3, 3, 1, true);
        assert_eq!(max, SearchResult { value: -1, best_move: None, nodes: 1 });

        let min = minimax(Pos::CORNER, 3, 3, 1, false);
        assert_eq!(min, SearchResult { value: 1, best_move: None, nodes: 1 });
    }

    #[test]
    fn test_single_move_to_corner() {
        let result = minimax(p(1, 0), 3, 3, 1, true);
        assert_eq!(result.value, 1);
        assert_eq!(result.best_move, Some(p(0, 0)));
        assert_eq!(result.nodes, 2);
    }

    #[test]
    fn test_first_optimal_move_is_kept() {
        // (1,0) and (0,1) both lose for the mover; (0,0) is the only win
        // and comes last in generation order.
        let result = minimax(p(1, 1), 3, 3, 1, true);
        assert_eq!(result.value, 1);
        assert_eq!(result.best_move, Some(p(0, 0)));
        assert_eq!(result.nodes, 6);
    }

    #[test]
    fn test_losing_position_keeps_first_move() {
        let max = minimax(p(2, 2), 3, 3, 1, true);
        assert_eq!((max.value, max.best_move, max.nodes), (-1, Some(p(2, 1)), 31));

        let min = minimax(p(2, 2), 3, 3, 1, false);
        assert_eq!((min.value, min.best_move, min.nodes), (1, Some(p(2, 1)), 31));
    }

    #[test]
    fn test_alphabeta_prunes() {
        let full = minimax(p(2, 2), 3, 3, 1, true);
        let pruned = alphabeta(p(2, 2), 3, 3, 1, true, NEG_INF, POS_INF);
        assert_eq!(pruned.value, full.value);
        assert_eq!(pruned.best_move, full.best_move);
        assert_eq!(pruned.nodes, 26);
    }

    #[test]
    fn test_alphabeta_terminal() {
        let result = alphabeta(Pos::CORNER, 5, 5, 2, false, NEG_INF, POS_INF);
        assert_eq!(result, SearchResult { value: 1, best_move: None, nodes: 1 });
    }

    #[test]
    fn test_huge_step_limit_searches_like_unlimited() {
        let capped = minimax(p(1, 1), 2, 2, 2, true);
        let huge = minimax(p(1, 1), 2, 2, i32::MAX, true);
        assert_eq!(huge, capped);
        assert_eq!(huge.best_move, Some(p(0, 0)));

        let pruned = alphabeta(p(1, 1), 2, 2, 1_000_000_000, true, NEG_INF, POS_INF);
        assert_eq!(pruned.value, 1);
        assert_eq!(
            pick_initial_position(2, 2, i32::MAX, true, true),
            pick_initial_position(2, 2, 2, true, true)
        );
    }

    #[test]
    fn test_method_for_board() {
        let small = BoardConfig::new(6, 9, 2).unwrap();
        let large = BoardConfig::new(7, 7, 2).unwrap();
        assert_eq!(SearchMethod::for_board(&small), SearchMethod::Minimax);
        assert_eq!(SearchMethod::for_board(&large), SearchMethod::AlphaBeta);
    }

    #[test]
    fn test_search_dispatch_agrees() {
        let cfg = BoardConfig::new(4, 4, 3).unwrap();
        let a = search(p(3, 3), &cfg, true, SearchMethod::Minimax);
        let b = search(p(3, 3), &cfg, true, SearchMethod::AlphaBeta);
        assert_eq!((a.value, a.best_move, a.nodes), (1, Some(p(0, 0)), 396));
        assert_eq!((b.value, b.best_move, b.nodes), (1, Some(p(0, 0)), 211));
    }

    #[test]
    fn test_pick_initial_position_small() {
        assert_eq!(pick_initial_position(3, 3, 1, false, true), Some((p(0, 2), 71)));
        assert_eq!(pick_initial_position(2, 2, 1, false, true), Some((p(0, 1), 10)));
        assert_eq!(pick_initial_position(1, 2, 1, false, true), Some((p(0, 1), 2)));
    }

    #[test]
    fn test_pick_initial_position_no_candidates() {
        assert_eq!(pick_initial_position(1, 1, 1, false, true), None);
        assert_eq!(pick_initial_position(1, 1, 1, true, false), None);
    }
}
