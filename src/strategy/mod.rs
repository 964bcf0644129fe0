//! Strategy primitives shared by the catalog and the roster.
//!
//! A `Strategy` is one player of an iterated 2x2 game: given the history of
//! both players' past moves it returns the next `Action`. Every strategy also
//! reports a `Classifier`, which is what the catalog filters on.

pub mod memory_one;
pub mod players;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use memory_one::MemoryOnePlayer;
pub use players::{CyclerCCD, GenerousTitForTat, Grudger, RandomPlayer, TitForTwoTats};

/// A single move in the game: cooperate or defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    C,
    D,
}

impl Action {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Action::C),
            'D' => Some(Action::D),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::C => write!(f, "C"),
            Action::D => write!(f, "D"),
        }
    }
}

/// How many previous rounds a strategy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryDepth {
    Finite(u32),
    Unbounded,
}

impl MemoryDepth {
    /// Returns the depth when it is finite.
    pub fn finite(self) -> Option<u32> {
        match self {
            MemoryDepth::Finite(depth) => Some(depth),
            MemoryDepth::Unbounded => None,
        }
    }
}

impl fmt::Display for MemoryDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryDepth::Finite(depth) => write!(f, "{}", depth),
            MemoryDepth::Unbounded => write!(f, "inf"),
        }
    }
}

/// Static properties of a strategy used for catalog filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classifier {
    pub memory_depth: MemoryDepth,
    pub stochastic: bool,
}

impl Classifier {
    pub fn deterministic(memory_depth: MemoryDepth) -> Self {
        Self {
            memory_depth,
            stochastic: false,
        }
    }

    pub fn stochastic(memory_depth: MemoryDepth) -> Self {
        Self {
            memory_depth,
            stochastic: true,
        }
    }
}

/// Moves played so far, from the point of view of the player being asked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    own: Vec<Action>,
    opponent: Vec<Action>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one finished round.
    pub fn push(&mut self, own: Action, opponent: Action) {
        self.own.push(own);
        self.opponent.push(opponent);
    }

    pub fn len(&self) -> usize {
        self.own.len()
    }

    pub fn is_empty(&self) -> bool {
        self.own.is_empty()
    }

    pub fn own(&self) -> &[Action] {
        &self.own
    }

    pub fn opponent(&self) -> &[Action] {
        &self.opponent
    }

    /// The previous round as `(own, opponent)`.
    pub fn last(&self) -> Option<(Action, Action)> {
        Some((*self.own.last()?, *self.opponent.last()?))
    }
}

/// One player of an iterated game.
pub trait Strategy: Send {
    /// Human-readable name, unique within the built-in catalog.
    fn name(&self) -> &str;

    fn classifier(&self) -> Classifier;

    /// Chooses the next move given everything played so far.
    fn strategy(&mut self, history: &History) -> Action;

    /// Returns the player to its state before the first round.
    fn reset(&mut self) {}
}

impl fmt::Debug for dyn Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name())
            .field("classifier", &self.classifier())
            .finish()
    }
}
