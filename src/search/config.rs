//! Search configuration parameters.

use serde::{Deserialize, Serialize};

/// How the turn planner breaks ties between equally scored plans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnTiebreak {
    /// Keep the plan found first.
    #[default]
    FirstFound,
    /// Prefer the plan that plays more cards before ending the turn.
    PreferLonger,
    /// Prefer the plan that plays fewer cards.
    PreferShorter,
}

impl TurnTiebreak {
    /// Whether a candidate of `candidate_len` moves should replace the
    /// current best of `best_len` moves at equal score.
    #[must_use]
    pub fn prefers(self, candidate_len: usize, best_len: usize) -> bool {
        match self {
            TurnTiebreak::FirstFound => false,
            TurnTiebreak::PreferLonger => candidate_len > best_len,
            TurnTiebreak::PreferShorter => candidate_len < best_len,
        }
    }
}

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Collapse strategically identical moves before expanding a node.
    pub coalesce: bool,

    /// Completed turn plans the planner scores before settling for the
    /// best one seen.
    pub max_candidates: usize,

    /// Maximum nodes a single search may allocate (`None` = unlimited).
    /// Hitting it ends the search with no result.
    pub node_budget: Option<usize>,

    /// Tie policy for the turn planner.
    pub tiebreak: TurnTiebreak,

    /// Wild cards granted to an opponent when checking whether they could
    /// reach their goal card.
    pub danger_wilds: usize,

    /// Node budget for each opponent danger search.
    pub danger_node_budget: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            coalesce: true,
            max_candidates: 100,
            node_budget: Some(200_000),
            tiebreak: TurnTiebreak::FirstFound,
            danger_wilds: 2,
            danger_node_budget: 2_000,
        }
    }
}

impl SearchConfig {
    pub fn with_coalesce(mut self, coalesce: bool) -> Self {
        self.coalesce = coalesce;
        self
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn with_node_budget(mut self, node_budget: Option<usize>) -> Self {
        self.node_budget = node_budget;
        self
    }

    pub fn with_tiebreak(mut self, tiebreak: TurnTiebreak) -> Self {
        self.tiebreak = tiebreak;
        self
    }

    pub fn with_danger_wilds(mut self, danger_wilds: usize) -> Self {
        self.danger_wilds = danger_wilds;
        self
    }

    /// Config for the nested goal search run on an opponent's behalf.
    #[must_use]
    pub fn for_danger_search(&self) -> Self {
        self.clone().with_node_budget(Some(self.danger_node_budget))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert!(config.coalesce);
        assert_eq!(config.max_candidates, 100);
        assert_eq!(config.node_budget, Some(200_000));
        assert_eq!(config.tiebreak, TurnTiebreak::FirstFound);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_coalesce(false)
            .with_max_candidates(10)
            .with_tiebreak(TurnTiebreak::PreferLonger);

        assert!(!config.coalesce);
        assert_eq!(config.max_candidates, 10);
        assert_eq!(config.for_danger_search().node_budget, Some(2_000));
    }

    #[test]
    fn test_tiebreak() {
        assert!(!TurnTiebreak::FirstFound.prefers(5, 1));
        assert!(TurnTiebreak::PreferLonger.prefers(5, 1));
        assert!(!TurnTiebreak::PreferLonger.prefers(1, 1));
        assert!(TurnTiebreak::PreferShorter.prefers(1, 5));
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_tiebreak(TurnTiebreak::PreferShorter);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
