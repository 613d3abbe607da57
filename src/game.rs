//! Interactive game sessions.
//!
//! A [`Game`] drives one match from the choice of starting player to the
//! winner announcement. It reads from any `BufRead` and writes to any
//! `Write`, so the binary hands it stdin/stdout while tests script it with
//! in-memory buffers.
//!
//! ## Flow
//!
//! 1. Pick the starting player (at random for two humans, by asking in
//!    Human-vs-AI mode).
//! 2. The starting player places the queen anywhere except the corner and
//!    plays the maximizing side for the rest of the game.
//! 3. Players alternate moves until the queen reaches (0,0); whoever moved
//!    it there wins.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use crate::board::BoardView;
use crate::position::{BoardConfig, Pos};
use crate::search::{SearchMethod, pick_initial_position, search};

/// Which kind of match is played.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    HumanVsHuman,
    HumanVsAi,
}

impl Mode {
    /// Map a menu choice (1 or 2) to a mode.
    pub fn from_choice(choice: i32) -> Option<Self> {
        match choice {
            1 => Some(Mode::HumanVsHuman),
            2 => Some(Mode::HumanVsAi),
            _ => None,
        }
    }

    /// Seats in turn order; index 0 is the first player of the mode.
    pub fn players(self) -> [Player; 2] {
        match self {
            Mode::HumanVsHuman => [Player::Player1, Player::Player2],
            Mode::HumanVsAi => [Player::You, Player::Ai],
        }
    }
}

/// A seat at the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Player1,
    Player2,
    You,
    Ai,
}

impl Player {
    pub fn is_human(self) -> bool {
        self != Player::Ai
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Player::Player1 => "Player1",
            Player::Player2 => "Player2",
            Player::You => "You",
            Player::Ai => "AI",
        };
        f.write_str(name)
    }
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Player who placed the queen (the maximizing side).
    pub starter: Player,
    /// Player who moved the queen onto the corner.
    pub winner: Player,
    /// Initial queen square.
    pub start: Pos,
    /// Every move played, in order.
    pub moves: Vec<Pos>,
    /// Nodes visited by all AI searches, placement included.
    pub ai_nodes: u64,
}

/// Line-oriented prompt/answer channel.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a full line.
    pub fn say(&mut self, msg: impl fmt::Display) -> Result<()> {
        writeln!(self.output, "{msg}")?;
        Ok(())
    }

    /// Write `prompt` without a newline and return the trimmed answer.
    ///
    /// Fails once the input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if n == 0 {
            return Err(anyhow!("input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Ask for an integer. `None` if the answer does not parse.
    pub fn ask_int(&mut self, prompt: &str) -> Result<Option<i32>> {
        Ok(self.ask(prompt)?.parse::<i32>().ok())
    }

    /// Ask for a row then a column.
    ///
    /// Re-prompts (after printing the usual complaint) until both parse.
    /// Bounds are the caller's business.
    pub fn ask_square(&mut self, row_prompt: &str, col_prompt: &str) -> Result<Pos> {
        loop {
            let Some(row) = self.ask_int(row_prompt)? else {
                self.say("Invalid input. Please enter integers.")?;
                continue;
            };
            let Some(col) = self.ask_int(col_prompt)? else {
                self.say("Invalid input. Please enter integers.")?;
                continue;
            };
            return Ok(Pos::new(row, col));
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Ask for the game mode until the answer is 1 or 2.
pub fn prompt_mode<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Mode> {
    console.say("Choose a Mode:")?;
    console.say("1) Human vs Human")?;
    console.say("2) AI vs Human")?;
    loop {
        if let Some(mode) = console.ask_int("Enter choice: ")?.and_then(Mode::from_choice) {
            return Ok(mode);
        }
        console.say("Invalid mode. Choose 1 or 2.")?;
    }
}

/// Ask for rows, cols and the step limit until they form a valid board.
pub fn prompt_board<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<BoardConfig> {
    loop {
        let rows = console.ask_int("Enter number of rows: ")?;
        let cols = console.ask_int("Enter number of columns: ")?;
        let x = console.ask_int("Enter max steps per move (x): ")?;

        match (rows, cols, x) {
            (Some(rows), Some(cols), Some(x)) => match BoardConfig::new(rows, cols, x) {
                Ok(cfg) => return Ok(cfg),
                Err(e) => console.say(format!("Invalid input. {e}."))?,
            },
            _ => console.say("Invalid input. rows, cols, x must be positive integers.")?,
        }
    }
}

/// One match between two seats.
pub struct Game<R, W> {
    cfg: BoardConfig,
    mode: Mode,
    method: SearchMethod,
    rng: fastrand::Rng,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(cfg: BoardConfig, mode: Mode, console: Console<R, W>) -> Self {
        Self {
            cfg,
            mode,
            method: SearchMethod::for_board(&cfg),
            rng: fastrand::Rng::new(),
            console,
        }
    }

    /// Use a specific random source for the Human-vs-Human coin toss.
    pub fn with_rng(mut self, rng: fastrand::Rng) -> Self {
        self.rng = rng;
        self
    }

    /// Override the search method chosen from the board size.
    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Play the match to the end.
    pub fn run(&mut self) -> Result<Outcome> {
        info!(
            rows = self.cfg.rows,
            cols = self.cfg.cols,
            x = self.cfg.x,
            mode = ?self.mode,
            method = self.method.name(),
            "game started"
        );

        let players = self.mode.players();
        let starter = self.choose_starter()?;
        let mut ai_nodes = 0;

        let start = match players[starter] {
            Player::Ai => {
                let (pos, nodes) = self.ai_placement()?;
                ai_nodes += nodes;
                pos
            }
            player => self.human_placement(player)?,
        };

        // The other seat moves first after placement.
        let mut turn = 1 - starter;
        let mut queen = start;
        let mut moves = Vec::new();

        while !queen.is_corner() {
            self.console.say(BoardView::new(&self.cfg, queen))?;

            let player = players[turn];
            let mv = if player.is_human() {
                match self.mode {
                    Mode::HumanVsHuman => self.console.say(format!("{player}'s turn."))?,
                    Mode::HumanVsAi => self.console.say("Your turn:")?,
                }
                self.human_move(queen)?
            } else {
                self.console.say("AI's turn:")?;
                let (mv, nodes) = self.ai_move(queen, turn == starter)?;
                ai_nodes += nodes;
                mv
            };

            moves.push(mv);
            queen = mv;
            turn = 1 - turn;
        }

        self.console.say(BoardView::new(&self.cfg, queen))?;

        let winner = players[1 - turn];
        match self.mode {
            Mode::HumanVsHuman => self.console.say(format!("{winner} wins!"))?,
            Mode::HumanVsAi => {
                if winner == Player::Ai {
                    self.console.say("AI wins!")?;
                } else {
                    self.console.say("You win!")?;
                }
                self.console
                    .say(format!("AI visited total of {ai_nodes} nodes."))?;
            }
        }

        info!(%winner, plies = moves.len(), ai_nodes, "game finished");

        Ok(Outcome {
            starter: players[starter],
            winner,
            start,
            moves,
            ai_nodes,
        })
    }

    /// Seat index of the player who places the queen.
    fn choose_starter(&mut self) -> Result<usize> {
        let players = self.mode.players();
        let starter = match self.mode {
            Mode::HumanVsHuman => {
                let idx = if self.rng.bool() { 0 } else { 1 };
                self.console.say(format!("{} starts first.", players[idx]))?;
                idx
            }
            Mode::HumanVsAi => {
                let answer = self.console.ask("Do you want to start first? (y/n): ")?;
                if answer.eq_ignore_ascii_case("y") {
                    self.console.say("You start first.")?;
                    0
                } else {
                    self.console.say("AI starts first.")?;
                    1
                }
            }
        };
        Ok(starter)
    }

    fn human_placement(&mut self, player: Player) -> Result<Pos> {
        match self.mode {
            Mode::HumanVsHuman => self.console.say(format!(
                "{player} chooses the initial queen position (not (0,0))."
            ))?,
            Mode::HumanVsAi => self
                .console
                .say("You choose the initial queen position (not (0,0)).")?,
        }

        loop {
            let pos = self
                .console
                .ask_square("Enter starting row of queen: ", "Enter starting column of queen: ")?;
            if self.cfg.is_valid_start(pos) {
                return Ok(pos);
            }
            self.console
                .say("Invalid start. Must be inside board and not (0,0).")?;
        }
    }

    /// The AI places the queen as the maximizing side.
    fn ai_placement(&mut self) -> Result<(Pos, u64)> {
        let use_pruning = self.method == SearchMethod::AlphaBeta;
        let (pos, nodes) =
            pick_initial_position(self.cfg.rows, self.cfg.cols, self.cfg.x, use_pruning, true)
                .context("board has no starting square")?;

        debug!(%pos, nodes, "AI placement");
        self.console
            .say(format!("AI chose initial position: {pos}"))?;
        self.console
            .say(format!("Nodes explored (initial placement): {nodes}"))?;
        Ok((pos, nodes))
    }

    fn human_move(&mut self, from: Pos) -> Result<Pos> {
        loop {
            let to = self
                .console
                .ask_square("Enter the row: ", "Enter the column: ")?;
            if self.cfg.is_valid_move(from, to) {
                return Ok(to);
            }
            self.console.say(
                "Invalid move. Allowed: Left, Down, or Diagonal left-down, within 1..x steps.",
            )?;
        }
    }

    fn ai_move(&mut self, from: Pos, maximizing: bool) -> Result<(Pos, u64)> {
        let result = search(from, &self.cfg, maximizing, self.method);
        let mv = result
            .best_move
            .ok_or_else(|| anyhow!("AI has no legal move from {from}"))?;

        self.console
            .say(format!("Nodes explored: {}", result.nodes))?;
        self.console.say(format!("AI moved to: {mv}"))?;
        Ok((mv, result.nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn game(cfg: BoardConfig, mode: Mode, script: &str) -> Game<Cursor<Vec<u8>>, Vec<u8>> {
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        Game::new(cfg, mode, console).with_rng(fastrand::Rng::with_seed(7))
    }

    fn output(game: Game<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(game.into_console().into_output()).unwrap()
    }

    #[test]
    fn test_human_starts_and_wins() {
        let cfg = BoardConfig::new(3, 3, 1).unwrap();
        // place at (0,2); the AI is forced to (0,1); we take the corner
        let mut g = game(cfg, Mode::HumanVsAi, "y\n0\n2\n0\n0\n");
        let outcome = g.run().unwrap();

        assert_eq!(outcome.starter, Player::You);
        assert_eq!(outcome.winner, Player::You);
        assert_eq!(outcome.start, Pos::new(0, 2));
        assert_eq!(outcome.moves, vec![Pos::new(0, 1), Pos::new(0, 0)]);
        assert_eq!(outcome.ai_nodes, 3);

        let text = output(g);
        assert!(text.contains("You start first."));
        assert!(text.contains("AI moved to: 0 1"));
        assert!(text.contains("You win!"));
        assert!(text.contains("AI visited total of 3 nodes."));
    }

    #[test]
    fn test_ai_starts_and_wins() {
        let cfg = BoardConfig::new(3, 3, 1).unwrap();
        // junk, then an illegal null move, then the only legal reply
        let mut g = game(cfg, Mode::HumanVsAi, "n\nfoo\n0\n2\n0\n1\n");
        let outcome = g.run().unwrap();

        assert_eq!(outcome.starter, Player::Ai);
        assert_eq!(outcome.start, Pos::new(0, 2));
        assert_eq!(outcome.winner, Player::Ai);
        assert_eq!(outcome.moves, vec![Pos::new(0, 1), Pos::new(0, 0)]);
        assert_eq!(outcome.ai_nodes, 71 + 2);

        let text = output(g);
        assert!(text.contains("AI chose initial position: 0 2"));
        assert!(text.contains("Nodes explored (initial placement): 71"));
        assert!(text.contains("Invalid input. Please enter integers."));
        assert!(text.contains("Invalid move."));
        assert!(text.contains("AI wins!"));
    }

    #[test]
    fn test_pruned_ai_makes_the_same_game() {
        let cfg = BoardConfig::new(3, 3, 1).unwrap();
        let script = "n\n0\n1\n";
        let mut full = game(cfg, Mode::HumanVsAi, script).with_method(SearchMethod::Minimax);
        let mut pruned = game(cfg, Mode::HumanVsAi, script).with_method(SearchMethod::AlphaBeta);

        let a = full.run().unwrap();
        let b = pruned.run().unwrap();
        assert_eq!((a.start, &a.moves, a.winner), (b.start, &b.moves, b.winner));
        assert!(b.ai_nodes <= a.ai_nodes);
    }

    #[test]
    fn test_two_humans() {
        let cfg = BoardConfig::new(3, 3, 2).unwrap();
        // corner is refused as a start; (1,0) then straight down
        let mut g = game(cfg, Mode::HumanVsHuman, "0\n0\n1\n0\n0\n0\n");
        let outcome = g.run().unwrap();

        assert_eq!(outcome.start, Pos::new(1, 0));
        assert_eq!(outcome.moves, vec![Pos::CORNER]);
        assert_ne!(outcome.winner, outcome.starter);
        assert_eq!(outcome.ai_nodes, 0);

        let text = output(g);
        assert!(text.contains("Invalid start."));
        assert!(text.contains(&format!("{} wins!", outcome.winner)));
        assert!(!text.contains("AI visited"));
    }

    #[test]
    fn test_input_closed_is_error() {
        let cfg = BoardConfig::new(3, 3, 1).unwrap();
        let mut g = game(cfg, Mode::HumanVsAi, "y\n0\n");
        let err = g.run().unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn test_prompt_mode_and_board() {
        let script = "3\n1\n-1\n2\n2\n3\nx\n2\n3\n3\n2\n";
        let mut console = Console::new(Cursor::new(script.as_bytes()), Vec::new());

        assert_eq!(prompt_mode(&mut console).unwrap(), Mode::HumanVsHuman);
        let cfg = prompt_board(&mut console).unwrap();
        assert_eq!(cfg, BoardConfig::new(3, 3, 2).unwrap());

        let text = String::from_utf8(console.into_output()).unwrap();
        assert!(text.contains("Invalid mode. Choose 1 or 2."));
        assert!(text.contains("rows must be a positive integer"));
        assert!(text.contains("rows, cols, x must be positive integers"));
    }
}
