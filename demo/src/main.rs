//! Plays the survival simulation end to end with the search engine, printing
//! each chosen action. `RUST_LOG=debug` surfaces the engine's own spans.

mod survivor;

use anyhow::Result;
use mcts::{MonteCarloTree, SearchConfig, SearchError};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = Pcg64::seed_from_u64(42);
    let mut engine = MonteCarloTree::new(SearchConfig::with_iterations(2000));
    let mut game = survivor::Survivor::new();

    let mut ranked = engine.start(game.clone(), &mut rng)?;
    while let Some(best) = ranked.best() {
        game = best.clone();
        info!(
            action = ?game.last_action,
            hours = game.hours,
            life = game.life,
            hunger = game.hunger,
            "engine chose"
        );

        // Keep the subtree we already searched; fall back to a fresh search
        // if the position is somehow not in the tree.
        ranked = match engine.resume(&game, &mut rng) {
            Ok(ranked) => ranked,
            Err(SearchError::NodeNotFound) => engine.start(game.clone(), &mut rng)?,
            Err(err) => return Err(err.into()),
        };
    }

    info!(
        hours = game.hours,
        days = game.hours / 24,
        playouts = engine.total_iterations(),
        "survivor died"
    );
    Ok(())
}
