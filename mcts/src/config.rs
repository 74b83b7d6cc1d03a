use std::time::Duration;

use crate::policy::{ucb1, PolicyFn};

/// Engine configuration.
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Playout budget per `start`/`resume` call. Zero means the 1000 default.
    pub max_iterations: u64,
    /// Optional wall-clock cap, checked once per iteration boundary. The loop
    /// stops on whichever of the two budgets runs out first.
    pub max_timeout: Option<Duration>,
    /// Replaceable selection policy.
    pub policy: PolicyFn,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_timeout: None,
            policy: ucb1,
        }
    }
}

impl SearchConfig {
    pub fn with_iterations(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, max_timeout: Duration) -> Self {
        self.max_timeout = Some(max_timeout);
        self
    }

    pub fn with_policy(mut self, policy: PolicyFn) -> Self {
        self.policy = policy;
        self
    }

    /// Budget actually applied by the engine.
    pub(crate) fn iterations(&self) -> u64 {
        if self.max_iterations == 0 {
            1000
        } else {
            self.max_iterations
        }
    }
}
