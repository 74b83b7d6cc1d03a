//! A generic Monte Carlo Tree Search engine for turn-based decision
//! processes.
//!
//! Implement [`DecisionProcess`] for a game or simulation, then hand an
//! initial state to [`MonteCarloTree::start`] together with an iteration
//! budget and an [`rand::Rng`] handle. The engine builds a search tree by
//! repeated selection, expansion, simulation and backpropagation, and returns
//! the root's children ranked by visit count. [`MonteCarloTree::resume`]
//! continues a previous search from a descendant state, keeping the
//! statistics already gathered for that subtree.
//!
//! ```
//! use mcts::{DecisionProcess, MonteCarloTree, Outcome, SearchConfig};
//! use rand::Rng;
//!
//! // Take one or two tokens from a pile; taking the last token wins.
//! #[derive(Clone)]
//! struct Pile {
//!     tokens: u32,
//!     turn: bool,
//! }
//!
//! impl DecisionProcess for Pile {
//!     type Player = bool;
//!     type Move = u32;
//!
//!     fn legal_moves(&self) -> Vec<u32> {
//!         (1..=self.tokens.min(2)).collect()
//!     }
//!
//!     fn apply<R: Rng>(&self, mv: &u32, _rng: &mut R) -> Option<Self> {
//!         Some(Pile { tokens: self.tokens - mv, turn: !self.turn })
//!     }
//!
//!     fn simulate<R: Rng>(&self, rng: &mut R) -> Outcome<bool> {
//!         let mut pile = self.clone();
//!         let mut last = !pile.turn;
//!         while pile.tokens > 0 {
//!             let take = rng.gen_range(1..=pile.tokens.min(2));
//!             last = pile.turn;
//!             pile.tokens -= take;
//!             pile.turn = !pile.turn;
//!         }
//!         Outcome { score: 1.0, winner: last, player: self.turn }
//!     }
//!
//!     fn id(&self) -> String {
//!         format!("{}:{}", self.tokens, self.turn)
//!     }
//!
//!     fn player(&self) -> bool {
//!         self.turn
//!     }
//! }
//!
//! let mut engine = MonteCarloTree::new(SearchConfig::with_iterations(200));
//! let mut rng = rand::thread_rng();
//! let ranked = engine
//!     .start(Pile { tokens: 7, turn: true }, &mut rng)
//!     .unwrap();
//! assert!(ranked.best().is_some());
//! ```

mod config;
mod graph;
mod policy;
mod process;
mod rollout;
mod search;
mod tree;

pub use config::SearchConfig;
pub use graph::{generate_graph, GraphEdge, GraphNode};
pub use policy::{ucb1, PolicyFn};
pub use process::{DecisionProcess, Outcome};
pub use rollout::{random_rollout, RandomPlayout};
pub use search::{MonteCarloTree, RankedMove, RankedMoves, SearchError};
pub use tree::{Node, NodeId, Tree};
