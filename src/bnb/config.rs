//! Branch-and-bound configuration.

use crate::error::{TspError, TspResult};

/// Lower bound used to decide whether a branch can still beat the incumbent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundKind {
    /// Cost of the tour prefix extended by the candidate edge.
    ///
    /// Admissible because edge costs are non-negative: the prefix cost never
    /// decreases on the way down to a leaf.
    #[default]
    PartialCost,

    /// Prefix cost plus the weight of a minimum spanning tree over the
    /// candidate, the vertices still unvisited after it, and vertex 0.
    ///
    /// Any completion is a Hamiltonian path over that set, hence a spanning
    /// tree of it, so the bound never exceeds the true completion cost.
    SpanningTree,
}

/// Configuration for [`BnbRunner`](super::BnbRunner).
///
/// # Examples
///
/// ```
/// use u_tsp_exact::bnb::{BnbConfig, BoundKind};
///
/// let config = BnbConfig::default()
///     .with_bound(BoundKind::SpanningTree)
///     .with_max_calls(1_000_000);
/// assert!(config.pruning);
/// assert_eq!(config.max_calls, Some(1_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbConfig {
    /// Skip branches that cannot improve on the incumbent. Disabling this
    /// changes only the counters, never the best cost.
    pub pruning: bool,

    /// Bound used when pruning.
    pub bound: BoundKind,

    /// Keep the best tour, not only its cost.
    pub record_tour: bool,

    /// Hard budget on recursive calls. `None` = no limit.
    pub max_calls: Option<u64>,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            pruning: true,
            bound: BoundKind::default(),
            record_tour: true,
            max_calls: None,
        }
    }
}

impl BnbConfig {
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_bound(mut self, bound: BoundKind) -> Self {
        self.bound = bound;
        self
    }

    pub fn with_record_tour(mut self, record: bool) -> Self {
        self.record_tour = record;
        self
    }

    pub fn with_max_calls(mut self, n: u64) -> Self {
        self.max_calls = Some(n);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> TspResult<()> {
        if self.max_calls == Some(0) {
            return Err(TspError::config("max_calls must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BnbConfig::default();
        assert!(config.pruning);
        assert!(config.record_tour);
        assert_eq!(config.bound, BoundKind::PartialCost);
        assert!(config.max_calls.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = BnbConfig::default()
            .with_pruning(false)
            .with_bound(BoundKind::SpanningTree)
            .with_record_tour(false)
            .with_max_calls(10);
        assert!(!config.pruning);
        assert_eq!(config.bound, BoundKind::SpanningTree);
        assert!(!config.record_tour);
        assert_eq!(config.max_calls, Some(10));
    }

    #[test]
    fn test_validate_zero_budget() {
        let config = BnbConfig::default().with_max_calls(0);
        assert!(config.validate().is_err());
    }
}
