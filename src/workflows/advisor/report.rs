use super::catalog::{Criterion, Provider};
use super::ranking::RankedResult;
use super::scores::ScoreTable;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProviderScoreCell {
    pub provider: Provider,
    pub provider_label: &'static str,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct CriterionRowView {
    pub criterion: Criterion,
    pub criterion_label: &'static str,
    pub scores: Vec<ProviderScoreCell>,
}

/// The score matrix as the presentation layer consumes it: rows in canonical
/// criterion order, columns in canonical provider order.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreMatrixView {
    pub providers: Vec<&'static str>,
    pub rows: Vec<CriterionRowView>,
}

impl ScoreMatrixView {
    pub fn from_table(table: &ScoreTable) -> Self {
        let providers = Provider::ordered()
            .iter()
            .map(|provider| provider.label())
            .collect();

        let rows = Criterion::ordered()
            .into_iter()
            .map(|criterion| CriterionRowView {
                criterion,
                criterion_label: criterion.label(),
                scores: Provider::ordered()
                    .into_iter()
                    .map(|provider| ProviderScoreCell {
                        provider,
                        provider_label: provider.label(),
                        score: table.score(criterion, provider).value(),
                    })
                    .collect(),
            })
            .collect();

        Self { providers, rows }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntryView {
    pub provider: Provider,
    pub provider_label: &'static str,
    pub score: f64,
    /// Score formatted to two decimal places for display.
    pub display_score: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub provider: Provider,
    pub provider_label: &'static str,
    pub display_score: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingView {
    pub rankings: Vec<RankedEntryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<RecommendationView>,
}

impl RankingView {
    pub fn from_result(result: &RankedResult) -> Self {
        let rankings = result
            .entries
            .iter()
            .map(|entry| RankedEntryView {
                provider: entry.provider,
                provider_label: entry.provider.label(),
                score: entry.score,
                display_score: format!("{:.2}", entry.score),
            })
            .collect();

        let recommendation = result.recommendation().map(|top| RecommendationView {
            provider: top.provider,
            provider_label: top.provider.label(),
            display_score: format!("{:.2}", top.score),
        });

        Self {
            rankings,
            recommendation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::advisor::ranking::{rank, WeightVector};
    use crate::workflows::advisor::scores::Score;

    #[test]
    fn matrix_view_mirrors_table_in_canonical_order() {
        let mut table = ScoreTable::filled(Score::DEFAULT);
        table.set(Criterion::SecurityParameters, Provider::Gcp, Score::clamped(4));

        let view = ScoreMatrixView::from_table(&table);
        assert_eq!(view.rows.len(), Criterion::COUNT);
        assert_eq!(view.providers.first(), Some(&"AWS"));
        assert_eq!(view.providers.last(), Some(&"T-Systems"));

        let security = view
            .rows
            .iter()
            .find(|row| row.criterion == Criterion::SecurityParameters)
            .expect("row present");
        assert_eq!(security.criterion_label, "Security Parameters");
        let gcp = security
            .scores
            .iter()
            .find(|cell| cell.provider == Provider::Gcp)
            .expect("cell present");
        assert_eq!(gcp.score, 4);
    }

    #[test]
    fn ranking_view_formats_scores_to_two_decimals() {
        let mut table = ScoreTable::filled(Score::DEFAULT);
        for criterion in Criterion::ordered() {
            table.set(criterion, Provider::Hetzner, Score::clamped(5));
        }

        let ranked = rank(&table, &WeightVector::neutral()).expect("rank");
        let view = RankingView::from_result(&ranked);

        let recommendation = view.recommendation.expect("recommendation present");
        assert_eq!(recommendation.provider_label, "Hetzner");
        assert_eq!(recommendation.display_score, "5.00");

        let runner_up = &view.rankings[1];
        assert_eq!(runner_up.provider_label, "AWS");
        assert_eq!(runner_up.display_score, "1.00");
    }
}
