use rand::Rng;

use crate::process::{DecisionProcess, Outcome};

/// Terminal probing for processes that want [`random_rollout`] to drive their
/// `simulate` implementation.
pub trait RandomPlayout: DecisionProcess {
    /// `Some` once the process has reached a terminal state.
    fn outcome(&self) -> Option<Outcome<Self::Player>>;
}

/// Uniform random playout: apply random legal moves until the process reports
/// an outcome or gets stuck.
///
/// A stuck state (no outcome, no legal moves, or a dead-end transition) scores
/// zero for the mover of the starting state.
pub fn random_rollout<G, R>(process: &G, rng: &mut R) -> Outcome<G::Player>
where
    G: RandomPlayout,
    R: Rng,
{
    let mut current = process.clone();

    loop {
        if let Some(outcome) = current.outcome() {
            return outcome;
        }

        let moves = current.legal_moves();
        if moves.is_empty() {
            return stuck(process, &current);
        }

        let mv = &moves[rng.gen_range(0..moves.len())];
        current = match current.apply(mv, rng) {
            Some(next) => next,
            None => return stuck(process, &current),
        };
    }
}

fn stuck<G: RandomPlayout>(start: &G, end: &G) -> Outcome<G::Player> {
    Outcome {
        score: 0.0,
        winner: end.player(),
        player: start.player(),
    }
}
