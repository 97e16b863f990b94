use super::catalog::{Criterion, Provider};
use super::scores::ScoreTable;
use super::AdvisorError;
use serde::Serialize;

/// Neutral midpoint applied to every criterion the user left untouched.
pub const DEFAULT_WEIGHT: u32 = 3;

/// Per-criterion importance weights. Missing criteria take the neutral
/// default at construction; the documented UI range is [1,5] but the vector
/// itself accepts any value so the zero-sum guard in `rank` stays reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightVector {
    weights: [u32; Criterion::COUNT],
}

impl WeightVector {
    pub fn neutral() -> Self {
        Self {
            weights: [DEFAULT_WEIGHT; Criterion::COUNT],
        }
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Criterion, u32)>,
    {
        let mut vector = Self::neutral();
        for (criterion, weight) in entries {
            vector.set(criterion, weight);
        }
        vector
    }

    pub fn set(&mut self, criterion: Criterion, weight: u32) {
        self.weights[criterion.index()] = weight;
    }

    pub fn weight(&self, criterion: Criterion) -> u32 {
        self.weights[criterion.index()]
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().map(|weight| u64::from(*weight)).sum()
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::neutral()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedProvider {
    pub provider: Provider,
    pub score: f64,
}

/// Providers ordered by weighted final score, descending. Ties keep the
/// canonical provider order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub entries: Vec<RankedProvider>,
}

impl RankedResult {
    pub fn recommendation(&self) -> Option<&RankedProvider> {
        self.entries.first()
    }
}

/// Weighted arithmetic mean of each provider's scores, the importance
/// vector as weights. All weights zero is the one undefined case.
pub fn rank(table: &ScoreTable, weights: &WeightVector) -> Result<RankedResult, AdvisorError> {
    let total = weights.total();
    if total == 0 {
        return Err(AdvisorError::ZeroWeightSum);
    }

    let mut entries: Vec<RankedProvider> = Provider::ordered()
        .into_iter()
        .map(|provider| {
            let weighted_sum: u64 = Criterion::ordered()
                .into_iter()
                .map(|criterion| {
                    u64::from(weights.weight(criterion))
                        * u64::from(table.score(criterion, provider).value())
                })
                .sum();
            RankedProvider {
                provider,
                score: weighted_sum as f64 / total as f64,
            }
        })
        .collect();

    // Stable sort: equal scores preserve canonical provider order.
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(RankedResult { entries })
}
