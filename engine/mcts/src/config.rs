//! Search configuration parameters.

use std::time::Duration;

/// Configuration for the Monte-Carlo tree search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Simulations run between two deadline checks. The in-flight block
    /// always completes, so a turn can overrun its slice by at most one
    /// block.
    pub playout_block: u32,

    /// Random playouts per leaf evaluation; every node on the path counts
    /// this many playouts per simulation.
    pub playouts_per_leaf: u32,

    /// Playout count at which a leaf expands its children.
    pub expand_threshold: u32,

    /// Wall-clock budget for the whole match.
    pub time_limit: Duration,

    /// Fraction of the remaining budget spent on one turn.
    pub turn_share: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            playout_block: 100,
            playouts_per_leaf: 4,
            expand_threshold: 80,
            time_limit: Duration::from_secs_f64(9.8),
            turn_share: 0.2,
        }
    }
}

impl SearchConfig {
    /// A fast configuration for tests: a few milliseconds per match so a
    /// turn finishes after a single block.
    pub fn for_testing() -> Self {
        Self {
            time_limit: Duration::from_millis(10),
            ..Self::default()
        }
    }

    /// Builder pattern: set the whole-match time budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Builder pattern: set the per-turn share of the remaining budget.
    pub fn with_turn_share(mut self, share: f64) -> Self {
        self.turn_share = share;
        self
    }

    /// Builder pattern: set the block size between deadline checks.
    pub fn with_playout_block(mut self, block: u32) -> Self {
        self.playout_block = block;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_tuned_constants() {
        let config = SearchConfig::default();
        assert_eq!(config.playout_block, 100);
        assert_eq!(config.playouts_per_leaf, 4);
        assert_eq!(config.expand_threshold, 80);
        assert_eq!(config.time_limit, Duration::from_secs_f64(9.8));
        assert!((config.turn_share - 0.2).abs() < 1e-12);
    }

    #[test]
    fn expansion_threshold_is_reachable_in_leaf_steps() {
        // Playout counts advance in `playouts_per_leaf` increments, so the
        // equality test against the threshold must be able to hit it.
        let config = SearchConfig::default();
        assert_eq!(config.expand_threshold % config.playouts_per_leaf, 0);
    }

    #[test]
    fn builder_pattern_overrides_fields() {
        let config = SearchConfig::default()
            .with_time_limit(Duration::from_secs(1))
            .with_turn_share(0.5)
            .with_playout_block(10);
        assert_eq!(config.time_limit, Duration::from_secs(1));
        assert!((config.turn_share - 0.5).abs() < 1e-12);
        assert_eq!(config.playout_block, 10);
    }
}
