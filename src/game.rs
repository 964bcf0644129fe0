use crate::strategy::Action;
use serde::{Deserialize, Serialize};

/// Payoff matrix of a symmetric 2x2 game.
///
/// `r` is the reward for mutual cooperation, `s` the sucker's payoff for
/// cooperating against a defector, `t` the temptation to defect against a
/// cooperator and `p` the punishment for mutual defection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub r: f64,
    pub s: f64,
    pub t: f64,
    pub p: f64,
}

impl Game {
    pub fn new(r: f64, s: f64, t: f64, p: f64) -> Self {
        Self { r, s, t, p }
    }

    /// Stag hunt: mutual cooperation pays more than exploiting a cooperator.
    pub fn stag() -> Self {
        Self::new(5.0, 0.0, 3.0, 1.0)
    }

    /// Prisoner's Dilemma with an inflated temptation payoff.
    pub fn high_temptation() -> Self {
        Self::new(3.0, 0.0, 7.0, 1.0)
    }

    /// Payoffs in the conventional `(R, P, S, T)` order.
    pub fn rpst(&self) -> (f64, f64, f64, f64) {
        (self.r, self.p, self.s, self.t)
    }

    /// Scores one round, returning `(first player, second player)`.
    pub fn score(&self, pair: (Action, Action)) -> (f64, f64) {
        match pair {
            (Action::C, Action::C) => (self.r, self.r),
            (Action::C, Action::D) => (self.s, self.t),
            (Action::D, Action::C) => (self.t, self.s),
            (Action::D, Action::D) => (self.p, self.p),
        }
    }
}

impl Default for Game {
    /// The standard Prisoner's Dilemma (r=3, s=0, t=5, p=1).
    fn default() -> Self {
        Self::new(3.0, 0.0, 5.0, 1.0)
    }
}

/// The two games a roster is configured with: `(stag, high_t)`.
pub fn declare_game_configs() -> (Game, Game) {
    (Game::stag(), Game::high_temptation())
}
