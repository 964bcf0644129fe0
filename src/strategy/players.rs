//! Built-in strategies that fall outside the deterministic memory-one family.

use super::{Action, Classifier, History, MemoryDepth, Strategy};
use crate::game::Game;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cooperates until the opponent defects once, then defects forever.
#[derive(Debug, Clone, Default)]
pub struct Grudger;

impl Strategy for Grudger {
    fn name(&self) -> &str {
        "Grudger"
    }

    fn classifier(&self) -> Classifier {
        Classifier::deterministic(MemoryDepth::Unbounded)
    }

    fn strategy(&mut self, history: &History) -> Action {
        if history.opponent().contains(&Action::D) {
            Action::D
        } else {
            Action::C
        }
    }
}

/// Defects only after two consecutive opponent defections.
#[derive(Debug, Clone, Default)]
pub struct TitForTwoTats;

impl Strategy for TitForTwoTats {
    fn name(&self) -> &str {
        "Tit For Two Tats"
    }

    fn classifier(&self) -> Classifier {
        Classifier::deterministic(MemoryDepth::Finite(2))
    }

    fn strategy(&mut self, history: &History) -> Action {
        match history.opponent() {
            [.., Action::D, Action::D] => Action::D,
            _ => Action::C,
        }
    }
}

/// Repeats C, C, D regardless of the opponent.
#[derive(Debug, Clone, Default)]
pub struct CyclerCCD;

impl Strategy for CyclerCCD {
    fn name(&self) -> &str {
        "Cycler CCD"
    }

    fn classifier(&self) -> Classifier {
        Classifier::deterministic(MemoryDepth::Finite(2))
    }

    fn strategy(&mut self, history: &History) -> Action {
        if history.len() % 3 == 2 {
            Action::D
        } else {
            Action::C
        }
    }
}

/// Cooperates with a fixed probability each round.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    cooperation_probability: f64,
    seed: Option<u64>,
    rng: StdRng,
}

impl RandomPlayer {
    /// A NaN probability is treated as never cooperating; other values are
    /// clamped to `[0, 1]`.
    pub fn new(cooperation_probability: f64) -> Self {
        Self::with_rng(cooperation_probability, None, StdRng::from_os_rng())
    }

    /// Reproducible variant for simulations that need a fixed seed.
    /// `reset` replays the same sequence of moves.
    pub fn seeded(cooperation_probability: f64, seed: u64) -> Self {
        Self::with_rng(
            cooperation_probability,
            Some(seed),
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(cooperation_probability: f64, seed: Option<u64>, rng: StdRng) -> Self {
        let cooperation_probability = if cooperation_probability.is_nan() {
            0.0
        } else {
            cooperation_probability.clamp(0.0, 1.0)
        };
        Self {
            cooperation_probability,
            seed,
            rng,
        }
    }

    pub fn cooperation_probability(&self) -> f64 {
        self.cooperation_probability
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl Strategy for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn classifier(&self) -> Classifier {
        Classifier::stochastic(MemoryDepth::Finite(0))
    }

    fn strategy(&mut self, _history: &History) -> Action {
        if self.rng.random_bool(self.cooperation_probability) {
            Action::C
        } else {
            Action::D
        }
    }

    fn reset(&mut self) {
        if let Some(seed) = self.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }
}

/// Tit For Tat that forgives a defection with a probability derived from the
/// payoff matrix: `min(1 - (t - r) / (r - s), (r - p) / (t - p))`.
#[derive(Debug, Clone)]
pub struct GenerousTitForTat {
    forgiveness: f64,
    rng: StdRng,
}

impl GenerousTitForTat {
    pub fn new(game: &Game) -> Self {
        let (r, p, s, t) = game.rpst();
        let forgiveness = (1.0 - (t - r) / (r - s)).min((r - p) / (t - p));
        Self {
            forgiveness: if forgiveness.is_finite() {
                forgiveness.clamp(0.0, 1.0)
            } else {
                0.0
            },
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn forgiveness(&self) -> f64 {
        self.forgiveness
    }
}

impl Default for GenerousTitForTat {
    fn default() -> Self {
        Self::new(&Game::default())
    }
}

impl Strategy for GenerousTitForTat {
    fn name(&self) -> &str {
        "Generous Tit For Tat"
    }

    fn classifier(&self) -> Classifier {
        Classifier::stochastic(MemoryDepth::Finite(1))
    }

    fn strategy(&mut self, history: &History) -> Action {
        match history.last() {
            None | Some((_, Action::C)) => Action::C,
            Some((_, Action::D)) => {
                if self.rng.random_bool(self.forgiveness) {
                    Action::C
                } else {
                    Action::D
                }
            }
        }
    }
}
