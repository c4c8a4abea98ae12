//! Strategy registry
//!
//! Holds the cleaning strategies in run order. The default order matters:
//! sentinels are scrubbed before outlier repair ever sees the column, and
//! coercion runs last, over repaired values.

use crate::coerce::NumericCoercion;
use crate::error::CleanError;
use crate::missing::SentinelScrub;
use crate::outlier::OutlierRepair;
use crate::strategy::CleanStrategy;
use scour_infer::SentinelPolicy;

/// Registry of cleaning strategies, kept in priority order
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn CleanStrategy>>,
}

impl StrategyRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Register a strategy, keeping priority order
    pub fn register<S: CleanStrategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Box::new(strategy));
        self.strategies
            .sort_by_key(|s| std::cmp::Reverse(s.priority()));
    }

    /// Strategies in run order
    pub fn strategies(&self) -> impl Iterator<Item = &dyn CleanStrategy> {
        self.strategies.iter().map(Box::as_ref)
    }

    /// Look up a strategy by name
    ///
    /// # Errors
    /// Returns [`CleanError::MissingCapability`] when absent.
    pub fn by_name(&self, name: &str) -> Result<&dyn CleanStrategy, CleanError> {
        self.strategies
            .iter()
            .find(|s| s.name() == name)
            .map(Box::as_ref)
            .ok_or_else(|| CleanError::MissingCapability {
                column: String::new(),
                what: format!("strategy '{name}'"),
            })
    }

    /// Number of registered strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        default_strategies(SentinelPolicy::standard())
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("StrategyRegistry")
            .field("strategies", &names)
            .finish()
    }
}

/// The built-in strategies with a given sentinel policy
#[must_use]
pub fn default_strategies(policy: SentinelPolicy) -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    registry.register(SentinelScrub::with_policy(policy));
    registry.register(OutlierRepair::new());
    registry.register(NumericCoercion::new());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_order() {
        let registry = StrategyRegistry::default();
        let names: Vec<_> = registry.strategies().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["sentinel-scrub", "outlier-repair", "numeric-coercion"]
        );
    }

    #[test]
    fn lookup_by_name() {
        let registry = StrategyRegistry::default();
        assert!(registry.by_name("outlier-repair").is_ok());
        let err = registry.by_name("imputer").unwrap_err();
        assert!(matches!(err, CleanError::MissingCapability { .. }));
    }
}
