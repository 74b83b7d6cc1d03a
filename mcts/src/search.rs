use std::cmp::Ordering;
use std::time::Instant;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::SearchConfig;
use crate::policy::PolicyFn;
use crate::process::{DecisionProcess, Outcome};
use crate::tree::{NodeId, Tree};

/// Fatal and recoverable failures surfaced by [`MonteCarloTree::start`] and
/// [`MonteCarloTree::resume`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// Two distinct moves from the same state produced equal identities. The
    /// process violated its determinism contract; the run is aborted and must
    /// not be retried.
    #[error("duplicated node: moves from state {parent:?} both produced identity {child:?}")]
    DuplicateExpansion { parent: String, child: String },

    /// The root state's identity changed while the search was running, which
    /// means the process mutated a stored state in place instead of copying.
    #[error("mutable state: root identity changed from {expected:?} to {actual:?} during search")]
    MutatedState { expected: String, actual: String },

    /// `resume` was asked for a state the existing tree does not contain.
    /// Recoverable: fall back to `start`.
    #[error("node not found")]
    NodeNotFound,
}

/// One candidate next state, ranked by how often the search visited it.
#[derive(Clone, Debug)]
pub struct RankedMove<S> {
    pub state: S,
    pub visits: u64,
}

/// Children of the root ordered by descending visit count, ties kept in
/// expansion order. Empty when the root never acquired children; that is not
/// an error, it means no move is available.
#[derive(Clone, Debug)]
pub struct RankedMoves<S> {
    /// Playouts executed by this engine across all `start`/`resume` calls.
    pub iterations: u64,
    pub moves: Vec<RankedMove<S>>,
}

impl<S> RankedMoves<S> {
    /// The most-visited next state, if any move is available.
    pub fn best(&self) -> Option<&S> {
        self.moves.first().map(|m| &m.state)
    }
}

/// The search engine. Owns one tree exclusively; single-threaded, the whole
/// loop runs to completion on the calling thread.
pub struct MonteCarloTree<S: DecisionProcess> {
    config: SearchConfig,
    tree: Option<Tree<S>>,
    total_iterations: u64,
}

impl<S: DecisionProcess> MonteCarloTree<S> {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            tree: None,
            total_iterations: 0,
        }
    }

    /// The tree built by the last run, for inspection.
    pub fn tree(&self) -> Option<&Tree<S>> {
        self.tree.as_ref()
    }

    pub fn total_iterations(&self) -> u64 {
        self.total_iterations
    }

    /// Build a fresh one-node tree rooted at `initial` and run the search
    /// loop for the configured budget.
    pub fn start<R: Rng>(
        &mut self,
        initial: S,
        rng: &mut R,
    ) -> Result<RankedMoves<S>, SearchError> {
        self.tree = Some(Tree::new(initial));
        self.run(rng)
    }

    /// Continue a prior search from a descendant state: find the matching
    /// node in the existing tree, make it the new root keeping its
    /// accumulated statistics, and run the loop again from there.
    ///
    /// Fails with [`SearchError::NodeNotFound`] when the state is not in the
    /// tree (or no search has run yet); callers should fall back to `start`.
    pub fn resume<R: Rng>(&mut self, state: &S, rng: &mut R) -> Result<RankedMoves<S>, SearchError> {
        let tree = self.tree.as_mut().ok_or(SearchError::NodeNotFound)?;
        let id = state.id();
        let node = tree.find_by_id(&id).ok_or(SearchError::NodeNotFound)?;
        tree.reroot(node);
        debug!(root = %id, "re-rooted tree, continuing search");
        self.run(rng)
    }

    fn run<R: Rng>(&mut self, rng: &mut R) -> Result<RankedMoves<S>, SearchError> {
        let mut tree = self.tree.take().ok_or(SearchError::NodeNotFound)?;
        let result = self.search_loop(&mut tree, rng);
        self.tree = Some(tree);
        result
    }

    fn search_loop<R: Rng>(
        &mut self,
        tree: &mut Tree<S>,
        rng: &mut R,
    ) -> Result<RankedMoves<S>, SearchError> {
        let started = Instant::now();
        let budget = self.config.iterations();
        let root_id = tree.root_node().id().to_owned();

        let mut iterations = 0u64;
        loop {
            let selected = select(tree, self.config.policy);
            let rolled = match expand(tree, selected, rng)? {
                Expanded::Child(child) => child,
                // Nothing new under this node: roll out its own state.
                Expanded::Exhausted | Expanded::DeadEnd => selected,
            };
            let outcome = tree.get(rolled).state().simulate(rng);
            back_propagate(tree, rolled, &outcome);

            iterations += 1;
            trace!(
                iteration = iterations,
                node = rolled.0,
                score = outcome.score,
                "playout complete"
            );
            if iterations >= budget {
                break;
            }
            if let Some(cap) = self.config.max_timeout {
                if started.elapsed() >= cap {
                    break;
                }
            }
        }
        self.total_iterations += iterations;

        // Guard against a process that mutated the stored root in place.
        let actual = tree.root_node().state().id();
        if actual != root_id {
            return Err(SearchError::MutatedState {
                expected: root_id,
                actual,
            });
        }

        let root = tree.root();
        let mut moves: Vec<RankedMove<S>> = tree
            .children(root)
            .iter()
            .map(|&child| {
                let node = tree.get(child);
                RankedMove {
                    state: node.state().clone(),
                    visits: node.visits(),
                }
            })
            .collect();
        // Stable sort keeps expansion order on equal visit counts.
        moves.sort_by(|a, b| b.visits.cmp(&a.visits));

        debug!(
            iterations,
            nodes = tree.len(),
            candidates = moves.len(),
            "search finished"
        );
        Ok(RankedMoves {
            iterations: self.total_iterations,
            moves,
        })
    }
}

#[derive(Debug)]
enum Expanded {
    /// A new child was appended; roll it out.
    Child(NodeId),
    /// The move led to no further state; roll out the current node.
    DeadEnd,
    /// Every move has been tried; roll out the current node.
    Exhausted,
}

/// Descend from the root until a node that still has something new to offer:
/// a frontier node (no children) or one holding untried moves. Fully expanded
/// interior nodes are passed through via the policy ranking, ties broken by
/// preferring the less-visited child.
fn select<S: DecisionProcess>(tree: &Tree<S>, policy: PolicyFn) -> NodeId {
    let mut current = tree.root();
    loop {
        let node = tree.get(current);
        if node.children.is_empty() || !node.fully_expanded() {
            return current;
        }

        let parent_visits = node.visits;
        let mut ranked: Vec<(NodeId, f64, u64)> = node
            .children
            .iter()
            .map(|&child_id| {
                let child = tree.get(child_id);
                (
                    child_id,
                    policy(child.score, child.visits, parent_visits),
                    child.visits,
                )
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.2.cmp(&b.2))
        });

        match ranked.first() {
            Some(&(best, _, _)) => current = best,
            // Unreachable given the frontier check above; being explicit
            // keeps exhausted subtrees from looping.
            None => return current,
        }
    }
}

/// Consume one untried move of `id`, appending the resulting child.
///
/// Populates the untried-move list on first touch; an empty list is a valid
/// terminal answer and distinct from "not yet asked".
fn expand<S: DecisionProcess, R: Rng>(
    tree: &mut Tree<S>,
    id: NodeId,
    rng: &mut R,
) -> Result<Expanded, SearchError> {
    if tree.get(id).untried.is_none() {
        let moves = tree.get(id).state.legal_moves();
        tree.get_mut(id).untried = Some(moves);
    }

    let node = tree.get(id);
    let mv = match &node.untried {
        Some(moves) if node.tried < moves.len() => moves[node.tried].clone(),
        _ => return Ok(Expanded::Exhausted),
    };
    tree.get_mut(id).tried += 1;

    let next = match tree.get(id).state.apply(&mv, rng) {
        Some(next) => next,
        None => return Ok(Expanded::DeadEnd),
    };

    let next_id = next.id();
    let node = tree.get(id);
    if node
        .children
        .iter()
        .any(|&child| tree.get(child).id == next_id)
    {
        return Err(SearchError::DuplicateExpansion {
            parent: node.id.clone(),
            child: next_id,
        });
    }

    Ok(Expanded::Child(tree.add_child(id, next)))
}

/// Credit a playout to `from` and every ancestor up to the root.
fn back_propagate<S: DecisionProcess>(
    tree: &mut Tree<S>,
    from: NodeId,
    outcome: &Outcome<S::Player>,
) {
    let mut current = Some(from);
    while let Some(id) = current {
        let node = tree.get_mut(id);
        node.visits += 1;
        // Perspective flip: a playout won by this node's mover counts for
        // it, every other combination of mover and winner counts against.
        if node.player == outcome.winner {
            node.score += outcome.score;
        } else {
            node.score -= outcome.score;
        }
        current = node.parent;
    }
}
