mod catalog;
mod insights;
mod model;
mod normalizer;
mod prompt;
mod ranking;
mod report;
mod scores;

pub use catalog::{Criterion, Provider};
pub use insights::RankingInsights;
pub use model::{ModelGateway, ModelGatewayError, OpenAiChatClient};
pub use normalizer::{normalize_scores, NormalizedScores, RepairSummary};
pub use prompt::build_prompt;
pub use ranking::{rank, RankedProvider, RankedResult, WeightVector, DEFAULT_WEIGHT};
pub use report::{
    CriterionRowView, ProviderScoreCell, RankedEntryView, RankingView, RecommendationView,
    ScoreMatrixView,
};
pub use scores::{Score, ScoreTable};

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::warn;

#[derive(Debug)]
pub enum AdvisorError {
    EmptyUseCase,
    MalformedResponse(serde_json::Error),
    ZeroWeightSum,
    NoScores,
    Model(ModelGatewayError),
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::EmptyUseCase => write!(f, "use case description is empty"),
            AdvisorError::MalformedResponse(err) => {
                write!(f, "model response is not valid JSON: {}", err)
            }
            AdvisorError::ZeroWeightSum => {
                write!(f, "criteria weights sum to zero; ranking is undefined")
            }
            AdvisorError::NoScores => {
                write!(f, "no generated scores are available yet")
            }
            AdvisorError::Model(err) => write!(f, "model invocation failed: {}", err),
        }
    }
}

impl std::error::Error for AdvisorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdvisorError::MalformedResponse(err) => Some(err),
            AdvisorError::Model(err) => Some(err),
            AdvisorError::EmptyUseCase
            | AdvisorError::ZeroWeightSum
            | AdvisorError::NoScores => None,
        }
    }
}

impl From<ModelGatewayError> for AdvisorError {
    fn from(err: ModelGatewayError) -> Self {
        Self::Model(err)
    }
}

/// One generation's worth of state: the normalized table plus everything the
/// presentation layer shows alongside it. The hosting application keeps the
/// latest snapshot in a single slot, replaced wholesale on success.
#[derive(Debug, Clone)]
pub struct ScoreSnapshot {
    pub table: ScoreTable,
    pub repairs: RepairSummary,
    pub raw_response: String,
    pub generated_at: DateTime<Utc>,
}

impl ScoreSnapshot {
    pub fn from_response(raw_response: String) -> Result<Self, AdvisorError> {
        let NormalizedScores { table, repairs } = normalize_scores(&raw_response)?;
        if !repairs.is_clean() {
            warn!(repairs = %repairs.describe(), "model response needed repairs");
        }
        Ok(Self {
            table,
            repairs,
            raw_response,
            generated_at: Utc::now(),
        })
    }

    /// Ranks this snapshot under the given weights, with derived insights.
    pub fn rank(
        &self,
        weights: &WeightVector,
    ) -> Result<(RankedResult, Option<RankingInsights>), AdvisorError> {
        let result = rank(&self.table, weights)?;
        let insights = insights::generate_insights(&result, &self.table, weights);
        Ok((result, insights))
    }
}

/// Runs the scoring pipeline end to end against a model gateway: validate
/// the use case, build the prompt, invoke the model once, normalize.
#[derive(Debug)]
pub struct CloudAdvisor {
    gateway: Box<dyn ModelGateway>,
}

impl CloudAdvisor {
    pub fn new(gateway: Box<dyn ModelGateway>) -> Self {
        Self { gateway }
    }

    pub fn generate_scores(&self, use_case: &str) -> Result<ScoreSnapshot, AdvisorError> {
        let use_case = use_case.trim();
        if use_case.is_empty() {
            return Err(AdvisorError::EmptyUseCase);
        }

        let prompt = build_prompt(use_case);
        let raw_response = self.gateway.complete(&prompt)?;
        ScoreSnapshot::from_response(raw_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct RecordingGateway {
        response: String,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingGateway {
        fn returning(response: &str) -> Self {
            Self {
                response: response.to_string(),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn prompt_count(&self) -> usize {
            self.prompts.lock().expect("prompt mutex").len()
        }
    }

    impl ModelGateway for RecordingGateway {
        fn complete(&self, prompt: &str) -> Result<String, ModelGatewayError> {
            let mut guard = self.prompts.lock().expect("prompt mutex");
            guard.push(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    #[test]
    fn blank_use_case_never_reaches_the_gateway() {
        let gateway = RecordingGateway::returning("{}");
        let handle = gateway.clone();
        let advisor = CloudAdvisor::new(Box::new(gateway));

        let error = advisor.generate_scores("   \n\t ").expect_err("must fail");
        assert!(matches!(error, AdvisorError::EmptyUseCase));
        assert_eq!(handle.prompt_count(), 0);
    }

    #[test]
    fn generation_normalizes_and_keeps_the_raw_response() {
        let raw = r#"{"Security Parameters": {"AWS": "5"}}"#;
        let advisor = CloudAdvisor::new(Box::new(RecordingGateway::returning(raw)));

        let snapshot = advisor.generate_scores("small team, tight budget").expect("snapshot");
        assert_eq!(snapshot.raw_response, raw);
        assert_eq!(
            snapshot
                .table
                .score(Criterion::SecurityParameters, Provider::Aws)
                .value(),
            5
        );
        assert!(!snapshot.repairs.is_clean());
    }

    #[test]
    fn garbage_response_is_terminal_for_the_action() {
        let advisor = CloudAdvisor::new(Box::new(RecordingGateway::returning("not json")));
        let error = advisor.generate_scores("anything").expect_err("must fail");
        assert!(matches!(error, AdvisorError::MalformedResponse(_)));
    }

    #[test]
    fn snapshot_rank_pairs_result_with_insights() {
        let raw = r#"{"Security Parameters": {"AWS": 5, "Azure": 4}}"#;
        let snapshot = ScoreSnapshot::from_response(raw.to_string()).expect("snapshot");
        let (result, insights) = snapshot.rank(&WeightVector::neutral()).expect("rank");

        assert_eq!(
            result.recommendation().map(|entry| entry.provider),
            Some(Provider::Aws)
        );
        let insights = insights.expect("insights");
        assert_eq!(insights.leader, "AWS");
    }
}
