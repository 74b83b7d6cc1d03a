//! A single-player resource-survival simulation searched by the engine.
//!
//! One actor, so every playout's `player` and `winner` are the same identity
//! and backpropagated scores accumulate plainly: the engine simply learns
//! which action keeps the survivor alive longest.

use mcts::{DecisionProcess, Outcome};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Place {
    Home,
    Farm,
    Forest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    DoNothing,
    GoHome,
    GoToFarm,
    GoToForest,
    Rest,
    HuntRabbit,
    GetVegetable,
}

impl Action {
    /// Hours the action consumes.
    fn hours(self) -> u32 {
        match self {
            Action::Rest => 6,
            Action::DoNothing => 1,
            Action::GoHome | Action::GoToFarm => 3,
            Action::GoToForest => 4,
            Action::HuntRabbit => 2,
            Action::GetVegetable => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Survivor {
    pub hours: u32,
    pub life: i32,
    pub hunger: i32,
    pub place: Place,
    pub last_action: Option<Action>,
}

impl Survivor {
    pub fn new() -> Self {
        Self {
            hours: 0,
            life: 100,
            hunger: 0,
            place: Place::Home,
            last_action: None,
        }
    }

    pub fn alive(&self) -> bool {
        self.life > 0
    }

    fn actions(&self) -> Vec<Action> {
        let mut actions = vec![Action::DoNothing];
        match self.place {
            Place::Home => actions.extend([Action::Rest, Action::GoToFarm, Action::GoToForest]),
            Place::Farm => actions.extend([Action::GetVegetable, Action::GoHome, Action::GoToForest]),
            Place::Forest => actions.extend([Action::HuntRabbit, Action::GoHome, Action::GoToFarm]),
        }
        actions
    }

    fn step<R: Rng>(&self, action: Action, rng: &mut R) -> Self {
        let mut next = self.clone();
        next.last_action = Some(action);
        match action {
            Action::GoHome => next.place = Place::Home,
            Action::GoToFarm => next.place = Place::Farm,
            Action::GoToForest => next.place = Place::Forest,
            _ => {}
        }
        next.hours += action.hours();

        match action {
            // A rabbit is a proper meal, a vegetable a snack.
            Action::HuntRabbit => next.hunger = (next.hunger - 40).max(0),
            Action::GetVegetable => next.hunger = (next.hunger - 10).max(0),
            Action::Rest => next.life = (next.life + 10).min(100),
            _ => {}
        }

        next.hunger += action.hours() as i32;
        if next.hunger > 100 {
            next.life -= next.hunger - 100;
        }

        // Encounters at night hit twice as hard.
        let hour_of_day = next.hours % 24;
        let factor = if hour_of_day > 21 || hour_of_day < 6 { 2 } else { 1 };
        match next.place {
            Place::Forest => {
                if rng.gen_range(0..100) > 65 {
                    next.life -= 20 * factor;
                }
            }
            Place::Farm => {
                if rng.gen_range(0..100) > 95 {
                    next.life -= 20 * factor;
                }
            }
            Place::Home => {}
        }
        next
    }
}

impl DecisionProcess for Survivor {
    type Player = ();
    type Move = Action;

    fn legal_moves(&self) -> Vec<Action> {
        if !self.alive() {
            return vec![];
        }
        self.actions()
    }

    fn apply<R: Rng>(&self, action: &Action, rng: &mut R) -> Option<Self> {
        Some(self.step(*action, rng))
    }

    fn simulate<R: Rng>(&self, rng: &mut R) -> Outcome<()> {
        let start = self.hours;
        let mut game = self.clone();
        while game.alive() {
            let actions = game.actions();
            let action = actions[rng.gen_range(0..actions.len())];
            game = game.step(action, rng);
        }
        Outcome {
            score: f64::from(game.hours - start) / 100.0,
            winner: (),
            player: (),
        }
    }

    fn id(&self) -> String {
        format!(
            "{}h|l{}|g{}|{:?}|{:?}",
            self.hours, self.life, self.hunger, self.place, self.last_action
        )
    }

    fn player(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcts::{MonteCarloTree, SearchConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn home_is_safe_while_fed() {
        let mut rng = Pcg64::seed_from_u64(0);
        let rested = Survivor::new().step(Action::Rest, &mut rng);
        assert_eq!(rested.life, 100);
        assert_eq!(rested.hours, 6);
        assert_eq!(rested.place, Place::Home);
    }

    #[test]
    fn starvation_ends_every_playout() {
        let mut rng = Pcg64::seed_from_u64(1);
        let outcome = Survivor::new().simulate(&mut rng);
        assert!(outcome.score > 0.0);
    }

    #[test]
    fn search_ranks_all_home_actions() {
        let mut engine = MonteCarloTree::new(SearchConfig::with_iterations(500));
        let mut rng = Pcg64::seed_from_u64(2);
        let ranked = engine.start(Survivor::new(), &mut rng).unwrap();
        // DoNothing, Rest, GoToFarm, GoToForest.
        assert_eq!(ranked.moves.len(), 4);
        assert!(ranked.best().unwrap().alive());
    }
}
