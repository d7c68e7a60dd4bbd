// ============================================
// Interaction Scorer
// ============================================
//
// Linear combination of raw engagement counters:
//   views * w_views + likes * w_likes + saves * w_saves + follows * w_follows
//
// No normalization and no upper bound.

use crate::models::EngagementCounts;

/// Per-signal weights for the interaction score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionWeights {
    pub views: f64,
    pub likes: f64,
    pub saves: f64,
    pub follows: f64,
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            views: 0.1,
            likes: 0.3,
            saves: 0.4,
            follows: 0.5,
        }
    }
}

impl InteractionWeights {
    /// Weights used by feed ranking. Posts carry no follower signal, so
    /// `follows` is always zero here.
    pub fn feed() -> Self {
        Self {
            follows: 0.0,
            ..Self::default()
        }
    }

    pub fn with_views(mut self, weight: f64) -> Self {
        self.views = weight;
        self
    }

    pub fn with_likes(mut self, weight: f64) -> Self {
        self.likes = weight;
        self
    }

    pub fn with_saves(mut self, weight: f64) -> Self {
        self.saves = weight;
        self
    }

    pub fn with_follows(mut self, weight: f64) -> Self {
        self.follows = weight;
        self
    }
}

impl EngagementCounts {
    pub fn weighted(&self, weights: &InteractionWeights) -> f64 {
        self.views as f64 * weights.views
            + self.likes as f64 * weights.likes
            + self.saves as f64 * weights.saves
            + self.follows as f64 * weights.follows
    }
}

/// Weighted engagement score; an absent item scores 0.
pub fn interaction_score(item: Option<&EngagementCounts>, weights: &InteractionWeights) -> f64 {
    item.map(|counts| counts.weighted(weights)).unwrap_or(0.0)
}
