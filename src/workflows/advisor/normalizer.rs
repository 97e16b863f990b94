use super::catalog::{Criterion, Provider};
use super::scores::{coerce_integer, CoercedValue, Score, ScoreTable};
use super::AdvisorError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Tally of the silent repairs applied while normalizing a model response.
/// Repairs never fail the operation; this record is the diagnostic channel
/// that keeps them visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairSummary {
    /// Criteria absent from the response, or present with a non-object
    /// value, whose rows were synthesized entirely from defaults.
    pub defaulted_criteria: usize,
    /// Provider cells absent from an otherwise usable criterion row.
    pub defaulted_cells: usize,
    /// Values that were usable only after numeric coercion.
    pub coerced_values: usize,
    /// Values no coercion could salvage, replaced by the default score.
    pub unusable_values: usize,
    /// Integer values outside [1,5] that were clamped into range.
    pub clamped_values: usize,
    /// Unknown criterion or provider keys dropped from the response.
    pub ignored_keys: usize,
}

impl RepairSummary {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }

    /// Short human-readable account of the nonzero tallies.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        for (count, noun) in [
            (self.defaulted_criteria, "defaulted criteria"),
            (self.defaulted_cells, "defaulted cells"),
            (self.coerced_values, "coerced values"),
            (self.unusable_values, "unusable values"),
            (self.clamped_values, "clamped values"),
            (self.ignored_keys, "ignored keys"),
        ] {
            if count > 0 {
                parts.push(format!("{count} {noun}"));
            }
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// A model response repaired into the strict table shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedScores {
    pub table: ScoreTable,
    pub repairs: RepairSummary,
}

/// Parses `raw` as JSON and repairs it into a fully-populated score table.
///
/// Unparseable text is the only failure. Once parsing succeeds every defect
/// is repaired: missing criteria and providers default to the minimum score,
/// non-integers go through best-effort coercion, survivors are clamped into
/// [1,5], and unknown keys are dropped. A top-level value that is valid JSON
/// but not an object is treated like an empty object.
pub fn normalize_scores(raw: &str) -> Result<NormalizedScores, AdvisorError> {
    let parsed: Value = serde_json::from_str(raw).map_err(AdvisorError::MalformedResponse)?;

    let empty = Map::new();
    let root = match parsed.as_object() {
        Some(object) => object,
        None => &empty,
    };

    let mut table = ScoreTable::filled(Score::DEFAULT);
    let mut repairs = RepairSummary::default();

    repairs.ignored_keys += root
        .keys()
        .filter(|key| Criterion::from_label(key).is_none())
        .count();

    for criterion in Criterion::ordered() {
        let row = match root.get(criterion.label()).and_then(Value::as_object) {
            Some(row) => row,
            None => {
                // Missing entirely, or present with a shape we cannot index.
                repairs.defaulted_criteria += 1;
                continue;
            }
        };

        repairs.ignored_keys += row
            .keys()
            .filter(|key| Provider::from_label(key).is_none())
            .count();

        for provider in Provider::ordered() {
            let Some(value) = row.get(provider.label()) else {
                repairs.defaulted_cells += 1;
                continue;
            };

            let raw_score = match coerce_integer(value) {
                CoercedValue::Exact(number) => number,
                CoercedValue::Converted(number) => {
                    repairs.coerced_values += 1;
                    number
                }
                CoercedValue::Unusable => {
                    repairs.unusable_values += 1;
                    continue;
                }
            };

            if !(Score::MIN..=Score::MAX).contains(&raw_score) {
                repairs.clamped_values += 1;
            }
            table.set(criterion, provider, Score::clamped(raw_score));
        }
    }

    Ok(NormalizedScores { table, repairs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_fully_populated(table: &ScoreTable) {
        for criterion in Criterion::ordered() {
            for provider in Provider::ordered() {
                let value = table.score(criterion, provider).value();
                assert!((1..=5).contains(&value), "cell out of range: {value}");
            }
        }
    }

    #[test]
    fn partial_response_is_filled_with_defaults() {
        let raw = json!({ "Security Parameters": { "AWS": 5, "Azure": 4 } }).to_string();
        let normalized = normalize_scores(&raw).expect("normalizes");

        let table = &normalized.table;
        assert_fully_populated(table);
        assert_eq!(
            table
                .score(Criterion::SecurityParameters, Provider::Aws)
                .value(),
            5
        );
        assert_eq!(
            table
                .score(Criterion::SecurityParameters, Provider::Azure)
                .value(),
            4
        );
        assert_eq!(
            table
                .score(Criterion::SecurityParameters, Provider::Gcp)
                .value(),
            1
        );
        assert_eq!(
            table
                .score(Criterion::PricingFlexibility, Provider::Aws)
                .value(),
            1
        );

        assert_eq!(normalized.repairs.defaulted_criteria, Criterion::COUNT - 1);
        assert_eq!(normalized.repairs.defaulted_cells, Provider::COUNT - 2);
    }

    #[test]
    fn unparseable_text_fails_without_a_table() {
        let error = normalize_scores("not json").expect_err("must fail");
        assert!(matches!(error, AdvisorError::MalformedResponse(_)));
    }

    #[test]
    fn top_level_non_object_defaults_every_cell() {
        let normalized = normalize_scores("[1, 2, 3]").expect("valid JSON normalizes");
        assert_eq!(
            normalized.table,
            ScoreTable::filled(Score::DEFAULT),
            "array input should produce the all-default table"
        );
        assert_eq!(normalized.repairs.defaulted_criteria, Criterion::COUNT);
    }

    #[test]
    fn values_are_coerced_then_clamped() {
        let raw = json!({
            "Security Parameters": {
                "AWS": "4",
                "Azure": 4.9,
                "GCP": 12,
                "Oracle": -3,
                "IBM": "excellent",
                "Alibaba": true
            }
        })
        .to_string();
        let normalized = normalize_scores(&raw).expect("normalizes");
        let table = &normalized.table;
        let at = |p| table.score(Criterion::SecurityParameters, p).value();

        assert_eq!(at(Provider::Aws), 4);
        assert_eq!(at(Provider::Azure), 4);
        assert_eq!(at(Provider::Gcp), 5);
        assert_eq!(at(Provider::Oracle), 1);
        assert_eq!(at(Provider::Ibm), 1);
        assert_eq!(at(Provider::Alibaba), 1);

        assert_eq!(normalized.repairs.coerced_values, 2);
        assert_eq!(normalized.repairs.clamped_values, 2);
        assert_eq!(normalized.repairs.unusable_values, 2);
    }

    #[test]
    fn unknown_keys_are_ignored_not_propagated() {
        let raw = json!({
            "Security Parameters": { "AWS": 3, "CloudCorp": 5 },
            "Weather Resistance": { "AWS": 5 }
        })
        .to_string();
        let normalized = normalize_scores(&raw).expect("normalizes");

        assert_eq!(
            normalized
                .table
                .score(Criterion::SecurityParameters, Provider::Aws)
                .value(),
            3
        );
        assert_eq!(normalized.repairs.ignored_keys, 2);
        assert!(normalized.table.to_json().get("Weather Resistance").is_none());
    }

    #[test]
    fn criterion_with_non_object_value_is_defaulted() {
        let raw = json!({ "Security Parameters": 5 }).to_string();
        let normalized = normalize_scores(&raw).expect("normalizes");
        assert_eq!(
            normalized
                .table
                .score(Criterion::SecurityParameters, Provider::Aws)
                .value(),
            1
        );
        assert_eq!(normalized.repairs.defaulted_criteria, Criterion::COUNT);
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = json!({
            "Security Parameters": { "AWS": "7", "Azure": 2.2 },
            "Niche Services": { "Hetzner": 4 }
        })
        .to_string();
        let first = normalize_scores(&raw).expect("first pass");
        let second =
            normalize_scores(&first.table.to_json().to_string()).expect("second pass");

        assert_eq!(first.table, second.table);
        assert!(second.repairs.is_clean());
    }

    #[test]
    fn clean_response_reports_no_repairs() {
        let table = ScoreTable::filled(Score::clamped(4));
        let normalized =
            normalize_scores(&table.to_json().to_string()).expect("normalizes");
        assert!(normalized.repairs.is_clean());
        assert_eq!(normalized.repairs.describe(), "none");
    }

    #[test]
    fn describe_lists_only_nonzero_tallies() {
        let repairs = RepairSummary {
            defaulted_criteria: 2,
            clamped_values: 1,
            ..RepairSummary::default()
        };
        assert_eq!(repairs.describe(), "2 defaulted criteria, 1 clamped values");
    }
}
