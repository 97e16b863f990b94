use super::catalog::Criterion;
use super::ranking::{RankedResult, WeightVector};
use super::scores::ScoreTable;
use serde::Serialize;

/// Margin below which the top two providers are called a close race.
const TIGHT_MARGIN: f64 = 0.25;

#[derive(Debug, Clone, Serialize)]
pub struct RankingInsights {
    pub leader: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<&'static str>,
    pub margin: f64,
    /// Criteria contributing most to the leader's edge over the runner-up,
    /// strongest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decisive_criteria: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}

pub(crate) fn generate_insights(
    result: &RankedResult,
    table: &ScoreTable,
    weights: &WeightVector,
) -> Option<RankingInsights> {
    let leader = result.recommendation()?;
    let runner_up = result.entries.get(1);

    let margin = runner_up
        .map(|entry| leader.score - entry.score)
        .unwrap_or(0.0);

    let decisive_criteria = match runner_up {
        Some(second) => {
            let total = weights.total();
            let mut edges: Vec<(&'static str, i64)> = Criterion::ordered()
                .into_iter()
                .filter_map(|criterion| {
                    let gap = i64::from(table.score(criterion, leader.provider).value())
                        - i64::from(table.score(criterion, second.provider).value());
                    let contribution = gap * i64::from(weights.weight(criterion));
                    (total > 0 && contribution > 0).then_some((criterion.label(), contribution))
                })
                .collect();
            edges.sort_by(|a, b| b.1.cmp(&a.1));
            edges.into_iter().take(3).map(|(label, _)| label).collect()
        }
        None => Vec::new(),
    };

    let mut observations = Vec::new();
    if let Some(second) = runner_up {
        if margin < TIGHT_MARGIN {
            observations.push(format!(
                "{} and {} are within {:.2} points; weight adjustments may flip the result",
                leader.provider.label(),
                second.provider.label(),
                margin
            ));
        }
    }
    if leader.score < 3.0 {
        observations.push(format!(
            "even the leading provider scores only {:.2}; the use case may be a poor fit for this catalog",
            leader.score
        ));
    }

    Some(RankingInsights {
        leader: leader.provider.label(),
        runner_up: runner_up.map(|entry| entry.provider.label()),
        margin,
        decisive_criteria,
        observations,
    })
}
