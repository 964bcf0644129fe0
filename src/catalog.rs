//! Strategy catalog: the filterable source of strategy variants the roster
//! is built from.

use crate::strategy::{
    Classifier, CyclerCCD, GenerousTitForTat, Grudger, MemoryOnePlayer, RandomPlayer, Strategy,
    TitForTwoTats,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Strategy catalog is unavailable: {0}")]
    Unavailable(String),
}

/// Matching criteria for a catalog query. Memory depth bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyFilter {
    pub stochastic: bool,
    pub min_memory_depth: u32,
    pub max_memory_depth: u32,
}

impl StrategyFilter {
    /// Non-stochastic strategies with memory depth 0 or 1.
    pub fn memory_one_deterministic() -> Self {
        Self {
            stochastic: false,
            min_memory_depth: 0,
            max_memory_depth: 1,
        }
    }

    /// Unbounded memory never falls inside the finite bounds.
    pub fn matches(&self, classifier: &Classifier) -> bool {
        if classifier.stochastic != self.stochastic {
            return false;
        }
        match classifier.memory_depth.finite() {
            Some(depth) => (self.min_memory_depth..=self.max_memory_depth).contains(&depth),
            None => false,
        }
    }
}

impl Default for StrategyFilter {
    fn default() -> Self {
        Self::memory_one_deterministic()
    }
}

type StrategyFactory = Arc<dyn Fn() -> Box<dyn Strategy> + Send + Sync>;

/// A catalog entry: a name, its classifier and a way to build fresh instances.
#[derive(Clone)]
pub struct StrategyVariant {
    name: String,
    classifier: Classifier,
    factory: StrategyFactory,
}

impl StrategyVariant {
    /// Wraps a constructor. Name and classifier are read from a probe instance.
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn Strategy> + Send + Sync + 'static,
    {
        let probe = factory();
        Self {
            name: probe.name().to_string(),
            classifier: probe.classifier(),
            factory: Arc::new(factory),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classifier(&self) -> Classifier {
        self.classifier
    }

    /// Builds a new instance with default parameters.
    pub fn instantiate(&self) -> Box<dyn Strategy> {
        (self.factory)()
    }
}

impl fmt::Debug for StrategyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyVariant")
            .field("name", &self.name)
            .field("classifier", &self.classifier)
            .finish()
    }
}

/// Anything that can answer a filtered strategy query.
pub trait StrategyCatalog {
    /// Returns the matching variants in catalog order.
    fn filtered_strategies(
        &self,
        filter: &StrategyFilter,
    ) -> Result<Vec<StrategyVariant>, CatalogError>;
}

/// In-process catalog of every strategy this crate implements, sorted by name.
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    variants: Vec<StrategyVariant>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        let mut variants: Vec<StrategyVariant> = MemoryOnePlayer::all()
            .into_iter()
            .map(|player| {
                StrategyVariant::from_factory(move || -> Box<dyn Strategy> {
                    Box::new(player.clone())
                })
            })
            .collect();

        let extras: [fn() -> Box<dyn Strategy>; 5] = [
            || Box::new(Grudger),
            || Box::new(TitForTwoTats),
            || Box::new(CyclerCCD),
            || Box::new(RandomPlayer::default()),
            || Box::new(GenerousTitForTat::default()),
        ];
        variants.extend(extras.into_iter().map(StrategyVariant::from_factory));

        variants.sort_by(|a, b| a.name.cmp(&b.name));
        Self { variants }
    }

    pub fn all(&self) -> &[StrategyVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyCatalog for BuiltinCatalog {
    fn filtered_strategies(
        &self,
        filter: &StrategyFilter,
    ) -> Result<Vec<StrategyVariant>, CatalogError> {
        let matches: Vec<StrategyVariant> = self
            .variants
            .iter()
            .filter(|v| filter.matches(&v.classifier))
            .cloned()
            .collect();
        debug!(
            "Catalog filter {:?} matched {} of {} strategies",
            filter,
            matches.len(),
            self.variants.len()
        );
        Ok(matches)
    }
}
