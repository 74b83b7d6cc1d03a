use std::fmt::Debug;

use rand::Rng;

/// Result of one random playout: a scalar score, the player who produced it
/// and the player the playout deemed the winner.
///
/// For single-player processes `player` and `winner` are held constant, which
/// turns the engine's perspective-flipped accounting into plain accumulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome<P> {
    pub score: f64,
    pub winner: P,
    pub player: P,
}

/// The capability any turn-based decision process must expose to the engine.
///
/// The engine depends only on this trait, never on concrete game types.
///
/// The `Clone` supertrait is the copy operation: a clone must be deep enough
/// that mutating it never affects the original (board or array contents must
/// not be aliased between the two).
pub trait DecisionProcess: Clone {
    /// Whose-turn identity. Equality drives the backpropagation sign rule.
    type Player: Clone + PartialEq + Debug;
    type Move: Clone + Debug;

    /// Legal moves from this state, in a deterministic order. An empty list
    /// signals a terminal or stuck state and is a valid answer.
    ///
    /// Once the engine has stored the move list for a node the process must
    /// not report a different list for an equal state.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply a move, producing the successor state. Must not mutate `self`.
    ///
    /// `None` is the "no further state" sentinel for unreachable or no-op
    /// transitions; the engine then rolls out the current state instead.
    /// Random transitions draw from `rng`, never from global state.
    fn apply<R: Rng>(&self, mv: &Self::Move, rng: &mut R) -> Option<Self>;

    /// Run one independent random playout to completion.
    fn simulate<R: Rng>(&self, rng: &mut R) -> Outcome<Self::Player>;

    /// Identity of this state, used for deduplication and tree re-rooting.
    /// Must be injective over reachable states: distinct legal moves from the
    /// same state must yield pairwise-distinct identities.
    fn id(&self) -> String;

    /// The player whose perspective this state's statistics accrue to.
    ///
    /// Playout scores are added to a node when its player equals the
    /// outcome's winner and subtracted otherwise, so for adversarial games
    /// this is the player who owns the position (usually the one who just
    /// moved), not the one about to reply.
    fn player(&self) -> Self::Player;
}
