//! Aggregated statistics for one search call.

use std::time::Duration;

/// What a finished search did, for logging and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStatistics {
    /// Completed simulation iterations
    pub simulations: u64,

    /// Wall-clock time the call took
    pub duration: Duration,

    /// Play counter of the root after the search
    pub root_plays: u32,

    /// Win counter of the root after the search
    pub root_wins: u32,

    /// Nodes in the tree after the search
    pub tree_nodes: usize,
}

impl SearchStatistics {
    /// Average cost of one simulation, None if nothing ran.
    pub fn nanos_per_simulation(&self) -> Option<u128> {
        if self.simulations == 0 {
            None
        } else {
            Some(self.duration.as_nanos() / self.simulations as u128)
        }
    }

    /// Projected simulation count for a budget, based on the measured rate.
    pub fn estimated_simulations(&self, budget: Duration) -> Option<u64> {
        let per_simulation = self.nanos_per_simulation()?;
        if per_simulation == 0 {
            return None;
        }
        Some((budget.as_nanos() / per_simulation) as u64)
    }

    /// Percentage of simulations through the root that were wins.
    pub fn confidence(&self) -> Option<f64> {
        if self.root_plays == 0 {
            None
        } else {
            Some(100.0 * self.root_wins as f64 / self.root_plays as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_statistics() {
        let stats = SearchStatistics::default();

        assert_eq!(stats.simulations, 0);
        assert_eq!(stats.nanos_per_simulation(), None);
        assert_eq!(stats.estimated_simulations(Duration::from_secs(1)), None);
        assert_eq!(stats.confidence(), None);
    }

    #[test]
    fn test_nanos_per_simulation() {
        let stats = SearchStatistics {
            simulations: 1000,
            duration: Duration::from_millis(500),
            ..Default::default()
        };

        // 500ms over 1000 simulations is 500us each
        assert_eq!(stats.nanos_per_simulation(), Some(500_000));
    }

    #[test]
    fn test_estimated_simulations() {
        let stats = SearchStatistics {
            simulations: 1000,
            duration: Duration::from_millis(500),
            ..Default::default()
        };

        assert_eq!(
            stats.estimated_simulations(Duration::from_secs(1)),
            Some(2000)
        );
    }

    #[test]
    fn test_confidence() {
        let stats = SearchStatistics {
            root_plays: 400,
            root_wins: 300,
            ..Default::default()
        };

        let confidence = stats.confidence().unwrap();
        assert!((confidence - 75.0).abs() < 1e-9);
    }
}
