//! Roster construction: filters the catalog, keeps a fixed subset of the
//! matches, instantiates them and builds the lookup tables consumers use.

use crate::catalog::{CatalogError, StrategyCatalog, StrategyFilter, StrategyVariant};
use crate::config::{Config, ConfigError, SelectionPolicy};
use crate::game::Game;
use crate::strategy::Strategy;
use indexmap::IndexMap;
use log::{debug, info, warn};
use thiserror::Error;

/// Number of leading filtered strategies kept in catalog order.
pub const SELECTION_HEAD: usize = 12;

/// Hand-picked positions in the filtered list appended after the head.
pub const EXTRA_SELECTION_INDICES: [usize; 4] = [18, 23, 26, 28];

#[derive(Error, Debug)]
pub enum InitializationError {
    #[error("Failed to query strategy catalog: {0}")]
    CatalogUnavailable(#[from] CatalogError),
    #[error("Filtered catalog has {found} strategies but the selection needs at least {needed}")]
    NotEnoughStrategies { needed: usize, found: usize },
    #[error("Roster configuration rejected: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Strategy name to live instance, in selection order.
pub type NameToInstance = IndexMap<String, Box<dyn Strategy>>;

/// Strategy name to its 1-based selection position as a decimal string.
pub type NameToCode = IndexMap<String, String>;

/// The default catalog query: deterministic strategies of memory depth 0 or 1.
pub fn build_filter() -> StrategyFilter {
    StrategyFilter::memory_one_deterministic()
}

/// Runs the filtered query against the injected catalog.
///
/// # Arguments
/// * `catalog` - Any `StrategyCatalog`, e.g. `BuiltinCatalog` or a test fake.
/// * `filter` - Matching criteria, usually `build_filter()`.
///
/// # Returns
/// * `Ok(Vec<StrategyVariant>)` - Matching variants in the catalog's own order.
///
/// # Errors
/// Returns `InitializationError::CatalogUnavailable` when the catalog cannot
/// answer the query.
pub fn query_catalog<C>(
    catalog: &C,
    filter: &StrategyFilter,
) -> Result<Vec<StrategyVariant>, InitializationError>
where
    C: StrategyCatalog + ?Sized,
{
    Ok(catalog.filtered_strategies(filter)?)
}

/// Applies the selection policy to the filtered catalog.
///
/// # Arguments
/// * `results` - The filtered catalog, in catalog order.
/// * `policy` - How many leading entries to keep and which extra positions to append.
///
/// # Returns
/// * `Ok(Vec<StrategyVariant>)` - The first `policy.head` entries followed by
///   the entries at `policy.extra_indices`, in that order.
///
/// # Errors
/// Returns `InitializationError::NotEnoughStrategies` when `results` is too
/// short for any of the requested positions.
pub fn select_subset(
    results: &[StrategyVariant],
    policy: &SelectionPolicy,
) -> Result<Vec<StrategyVariant>, InitializationError> {
    let needed = policy.required_len();
    if results.len() < needed {
        return Err(InitializationError::NotEnoughStrategies {
            needed,
            found: results.len(),
        });
    }

    let selection = results[..policy.head]
        .iter()
        .chain(policy.extra_indices.iter().map(|&i| &results[i]))
        .cloned()
        .collect();
    Ok(selection)
}

/// Builds one fresh instance per selected variant, preserving order.
///
/// # Arguments
/// * `selection` - The variants chosen by `select_subset`.
///
/// # Returns
/// * `Vec<Box<dyn Strategy>>` - One default-parameter instance per variant.
pub fn instantiate_all(selection: &[StrategyVariant]) -> Vec<Box<dyn Strategy>> {
    selection.iter().map(StrategyVariant::instantiate).collect()
}

/// Keys instances by name.
///
/// # Arguments
/// * `instances` - Instances in selection order.
///
/// # Returns
/// * `NameToInstance` - Insertion-ordered map. A repeated name keeps its first
///   position but the later instance replaces the earlier one.
pub fn build_name_instance_map(instances: Vec<Box<dyn Strategy>>) -> NameToInstance {
    let mut map = NameToInstance::with_capacity(instances.len());
    for instance in instances {
        let name = instance.name().to_string();
        if map.contains_key(&name) {
            warn!("Duplicate strategy name '{}': keeping the later instance", name);
        }
        map.insert(name, instance);
    }
    map
}

/// Assigns each name its 1-based position as a decimal string.
///
/// # Arguments
/// * `names` - Strategy names in selection order.
///
/// # Returns
/// * `NameToCode` - Insertion-ordered map. A repeated name ends up with the
///   position of its last occurrence.
pub fn build_name_code_map<'a, I>(names: I) -> NameToCode
where
    I: IntoIterator<Item = &'a str>,
{
    let mut map = NameToCode::new();
    for (position, name) in names.into_iter().enumerate() {
        let code = (position + 1).to_string();
        if let Some(previous) = map.insert(name.to_string(), code) {
            warn!(
                "Duplicate strategy name '{}': code {} replaced by {}",
                name,
                previous,
                position + 1
            );
        }
    }
    map
}

/// Fully initialised roster. Immutable once built; hand it out by reference.
#[derive(Debug)]
pub struct Roster {
    selection: Vec<StrategyVariant>,
    name_to_instance: NameToInstance,
    name_to_code: NameToCode,
    stag: Game,
    high_temptation: Game,
}

impl Roster {
    /// Runs the whole initialisation pass against `catalog` using `config`.
    ///
    /// # Arguments
    /// * `catalog` - The injected strategy catalog.
    /// * `config` - Filter, selection policy and games; validated first.
    ///
    /// # Returns
    /// * `Ok(Roster)` - The selection, both lookup tables and both games.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The configuration fails validation.
    /// - The catalog cannot be queried.
    /// - The filtered catalog is too short for the selection policy.
    pub fn build<C>(catalog: &C, config: &Config) -> Result<Self, InitializationError>
    where
        C: StrategyCatalog + ?Sized,
    {
        config.validate()?;

        let results = query_catalog(catalog, &config.filter)?;
        info!(
            "Catalog returned {} strategies for filter {:?}",
            results.len(),
            config.filter
        );

        let selection = select_subset(&results, &config.selection)?;
        for (i, variant) in selection.iter().enumerate() {
            debug!("Selected #{}: {}", i + 1, variant.name());
        }

        let name_to_code = build_name_code_map(selection.iter().map(StrategyVariant::name));
        let name_to_instance = build_name_instance_map(instantiate_all(&selection));
        info!(
            "Roster ready: {} strategies, {} unique names",
            selection.len(),
            name_to_code.len()
        );

        Ok(Self {
            selection,
            name_to_instance,
            name_to_code,
            stag: config.games.stag,
            high_temptation: config.games.high_temptation,
        })
    }

    /// Builds with the default filter, selection and games.
    ///
    /// # Errors
    /// Same as `Roster::build`.
    pub fn from_catalog<C>(catalog: &C) -> Result<Self, InitializationError>
    where
        C: StrategyCatalog + ?Sized,
    {
        Self::build(catalog, &Config::default())
    }

    /// The selected variants in selection order.
    pub fn selection(&self) -> &[StrategyVariant] {
        &self.selection
    }

    /// Names in selection order, repeats included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.selection.iter().map(StrategyVariant::name)
    }

    /// The instance registered under `name`, if any.
    pub fn instance(&self, name: &str) -> Option<&dyn Strategy> {
        self.name_to_instance.get(name).map(|s| &**s)
    }

    /// The decimal code of `name` (`"1"` for the first selected strategy).
    pub fn code(&self, name: &str) -> Option<&str> {
        self.name_to_code.get(name).map(String::as_str)
    }

    /// Name to instance, in insertion order.
    pub fn name_to_instance(&self) -> &NameToInstance {
        &self.name_to_instance
    }

    /// Name to decimal code, in insertion order.
    pub fn name_to_code(&self) -> &NameToCode {
        &self.name_to_code
    }

    /// Stag hunt payoffs (r=5, s=0, t=3, p=1 unless configured otherwise).
    pub fn stag(&self) -> &Game {
        &self.stag
    }

    /// High temptation payoffs (r=3, s=0, t=7, p=1 unless configured otherwise).
    pub fn high_temptation(&self) -> &Game {
        &self.high_temptation
    }

    /// Number of selected variants, repeats included.
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinCatalog;
    use crate::strategy::{Action, Classifier, History, MemoryDepth};

    /// Fixed-move strategy so tests can tell same-named instances apart.
    struct FakeStrategy {
        name: String,
        action: Action,
    }

    impl Strategy for FakeStrategy {
        fn name(&self) -> &str {
            &self.name
        }

        fn classifier(&self) -> Classifier {
            Classifier::deterministic(MemoryDepth::Finite(0))
        }

        fn strategy(&mut self, _history: &History) -> Action {
            self.action
        }
    }

    fn fake_variant(name: &str, action: Action) -> StrategyVariant {
        let name = name.to_string();
        StrategyVariant::from_factory(move || -> Box<dyn Strategy> {
            Box::new(FakeStrategy {
                name: name.clone(),
                action,
            })
        })
    }

    /// Catalog returning `S0`, `S1`, ... regardless of the filter.
    struct FakeCatalog {
        variants: Vec<StrategyVariant>,
    }

    impl FakeCatalog {
        fn with_len(len: usize) -> Self {
            Self {
                variants: (0..len)
                    .map(|i| fake_variant(&format!("S{}", i), Action::C))
                    .collect(),
            }
        }
    }

    impl StrategyCatalog for FakeCatalog {
        fn filtered_strategies(
            &self,
            _filter: &StrategyFilter,
        ) -> Result<Vec<StrategyVariant>, CatalogError> {
            Ok(self.variants.clone())
        }
    }

    struct OfflineCatalog;

    impl StrategyCatalog for OfflineCatalog {
        fn filtered_strategies(
            &self,
            _filter: &StrategyFilter,
        ) -> Result<Vec<StrategyVariant>, CatalogError> {
            Err(CatalogError::Unavailable("offline".to_string()))
        }
    }

    #[test]
    fn test_build_filter_defaults() {
        let filter = build_filter();
        assert!(!filter.stochastic);
        assert_eq!(filter.min_memory_depth, 0);
        assert_eq!(filter.max_memory_depth, 1);
    }

    #[test]
    fn test_select_subset_exactly_29() {
        let catalog = FakeCatalog::with_len(29);
        let selection = select_subset(&catalog.variants, &SelectionPolicy::default()).unwrap();

        assert_eq!(selection.len(), 16);
        let names: Vec<&str> = selection.iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            vec![
                "S0", "S1", "S2", "S3", "S4", "S5", "S6", "S7", "S8", "S9", "S10", "S11", "S18",
                "S23", "S26", "S28"
            ]
        );
    }

    #[test]
    fn test_select_subset_too_short() {
        let catalog = FakeCatalog::with_len(20);
        let result = select_subset(&catalog.variants, &SelectionPolicy::default());
        assert!(matches!(
            result,
            Err(InitializationError::NotEnoughStrategies {
                needed: 29,
                found: 20
            })
        ));
    }

    #[test]
    fn test_roster_maps_and_codes() {
        let catalog = FakeCatalog::with_len(40);
        let roster = Roster::from_catalog(&catalog).unwrap();

        assert_eq!(roster.len(), 16);
        assert_eq!(roster.name_to_instance().len(), 16);
        assert_eq!(roster.name_to_code().len(), 16);

        for (position, name) in roster.names().enumerate() {
            assert_eq!(roster.code(name), Some((position + 1).to_string().as_str()));
            assert_eq!(roster.instance(name).unwrap().name(), name);
        }
        assert_eq!(roster.code("S28"), Some("16"));
        assert_eq!(roster.code("S12"), None);

        let keys: Vec<&str> = roster.name_to_code().keys().map(String::as_str).collect();
        let names: Vec<&str> = roster.names().collect();
        assert_eq!(keys, names);
    }

    #[test]
    fn test_roster_games() {
        let roster = Roster::from_catalog(&FakeCatalog::with_len(29)).unwrap();
        assert_eq!(*roster.stag(), Game::new(5.0, 0.0, 3.0, 1.0));
        assert_eq!(*roster.high_temptation(), Game::new(3.0, 0.0, 7.0, 1.0));
    }

    #[test]
    fn test_roster_fails_on_short_catalog() {
        let result = Roster::from_catalog(&FakeCatalog::with_len(20));
        assert!(matches!(
            result,
            Err(InitializationError::NotEnoughStrategies { .. })
        ));
    }

    #[test]
    fn test_roster_fails_on_unavailable_catalog() {
        let result = Roster::from_catalog(&OfflineCatalog);
        assert!(matches!(
            result,
            Err(InitializationError::CatalogUnavailable(_))
        ));
    }

    #[test]
    fn test_roster_rejects_invalid_config() {
        let mut config = Config::default();
        config.filter.min_memory_depth = 3;
        let result = Roster::build(&FakeCatalog::with_len(40), &config);
        assert!(matches!(result, Err(InitializationError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_names_later_wins() {
        let selection = vec![
            fake_variant("X", Action::C),
            fake_variant("Y", Action::C),
            fake_variant("X", Action::D),
        ];

        let mut instances = build_name_instance_map(instantiate_all(&selection));
        assert_eq!(instances.len(), 2);
        let x = instances.get_mut("X").unwrap();
        assert_eq!(x.strategy(&History::new()), Action::D);

        let codes = build_name_code_map(selection.iter().map(StrategyVariant::name));
        assert_eq!(codes.len(), 2);
        assert_eq!(codes["X"], "3");
        assert_eq!(codes["Y"], "2");
        // First occurrence keeps its slot.
        assert_eq!(codes.get_index(0).map(|(k, _)| k.as_str()), Some("X"));
    }

    #[test]
    fn test_builtin_roster() {
        let roster = Roster::from_catalog(&BuiltinCatalog::new()).unwrap();
        assert_eq!(roster.len(), 16);
        assert_eq!(roster.name_to_instance().len(), 16);

        let names: Vec<&str> = roster.names().collect();
        assert_eq!(names[0], "Alternator");
        assert_eq!(names[4], "Defector");
        assert_eq!(names[5], "Memory One CCCC/D");
        assert_eq!(names[15], "Memory One DDDD/C");
        assert_eq!(roster.code("Cooperator"), Some("4"));
        assert!(roster
            .selection()
            .iter()
            .all(|v| !v.classifier().stochastic));
    }
}
