//! Three-in-a-row test game used by the integration tests.

use mcts::{random_rollout, DecisionProcess, Outcome, RandomPlayout};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    E,
    X,
    O,
}

impl Cell {
    pub fn other(self) -> Cell {
        match self {
            Cell::X => Cell::O,
            Cell::O => Cell::X,
            Cell::E => Cell::E,
        }
    }

    fn ch(self) -> char {
        match self {
            Cell::E => 'E',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToe {
    board: [Cell; 9],
    /// Owner of the last move. The node built on this state is scored from
    /// this player's perspective; the opponent moves next.
    last_mover: Cell,
}

impl TicTacToe {
    /// Empty board with `next` about to move.
    pub fn new(next: Cell) -> Self {
        Self {
            board: [Cell::E; 9],
            last_mover: next.other(),
        }
    }

    /// Mid-game position with `next` about to move.
    pub fn from_board(board: [Cell; 9], next: Cell) -> Self {
        Self {
            board,
            last_mover: next.other(),
        }
    }

    /// The next mover claims `cell`.
    pub fn play(&self, cell: usize) -> Self {
        let mover = self.last_mover.other();
        let mut board = self.board;
        board[cell] = mover;
        Self {
            board,
            last_mover: mover,
        }
    }

    pub fn winner(&self) -> Cell {
        for line in LINES {
            let first = self.board[line[0]];
            if first != Cell::E && line.iter().all(|&i| self.board[i] == first) {
                return first;
            }
        }
        Cell::E
    }

    fn free_cells(&self) -> Vec<usize> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell == Cell::E)
            .map(|(i, _)| i)
            .collect()
    }
}

impl DecisionProcess for TicTacToe {
    type Player = Cell;
    type Move = usize;

    fn legal_moves(&self) -> Vec<usize> {
        if self.winner() != Cell::E {
            return vec![];
        }
        self.free_cells()
    }

    fn apply<R: Rng>(&self, cell: &usize, _rng: &mut R) -> Option<Self> {
        Some(self.play(*cell))
    }

    fn simulate<R: Rng>(&self, rng: &mut R) -> Outcome<Cell> {
        random_rollout(self, rng)
    }

    fn id(&self) -> String {
        self.board.iter().map(|cell| cell.ch()).collect()
    }

    fn player(&self) -> Cell {
        self.last_mover
    }
}

impl RandomPlayout for TicTacToe {
    fn outcome(&self) -> Option<Outcome<Cell>> {
        let winner = self.winner();
        if winner != Cell::E {
            return Some(Outcome {
                score: 1.0,
                winner,
                player: self.last_mover,
            });
        }
        if self.free_cells().is_empty() {
            // Draw: scoreless, no side credited.
            return Some(Outcome {
                score: 0.0,
                winner: Cell::E,
                player: self.last_mover,
            });
        }
        None
    }
}
