use super::catalog::{Criterion, Provider};
use serde::Serialize;
use serde_json::{Map, Value};

/// Integer rating of a provider on one criterion, held in [1,5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 5;

    /// Fallback used whenever a cell is missing or unusable.
    pub const DEFAULT: Self = Self(Self::MIN as u8);

    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(Self::MIN, Self::MAX) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Outcome of the best-effort integer coercion applied to model output.
/// `Converted` marks values that were usable but not already integers, so
/// the normalizer can tally them as repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CoercedValue {
    Exact(i64),
    Converted(i64),
    Unusable,
}

/// Integers pass through, floats truncate toward zero, integer strings
/// parse. Booleans, nulls, containers, and non-integer strings are unusable.
pub(crate) fn coerce_integer(value: &Value) -> CoercedValue {
    match value {
        Value::Number(number) => {
            if let Some(exact) = number.as_i64() {
                CoercedValue::Exact(exact)
            } else if number.as_u64().is_some() {
                // Beyond i64 range, clamping makes the exact value irrelevant.
                CoercedValue::Converted(i64::MAX)
            } else if let Some(float) = number.as_f64() {
                CoercedValue::Converted(float as i64)
            } else {
                CoercedValue::Unusable
            }
        }
        Value::String(text) => match text.trim().parse::<i64>() {
            Ok(parsed) => CoercedValue::Converted(parsed),
            Err(_) => CoercedValue::Unusable,
        },
        _ => CoercedValue::Unusable,
    }
}

/// Fully-populated criterion x provider score matrix. Construction goes
/// through normalization, so every cell is guaranteed to hold a valid score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTable {
    cells: [[Score; Provider::COUNT]; Criterion::COUNT],
}

impl ScoreTable {
    pub fn filled(score: Score) -> Self {
        Self {
            cells: [[score; Provider::COUNT]; Criterion::COUNT],
        }
    }

    pub fn score(&self, criterion: Criterion, provider: Provider) -> Score {
        self.cells[criterion.index()][provider.index()]
    }

    pub(crate) fn set(&mut self, criterion: Criterion, provider: Provider, score: Score) {
        self.cells[criterion.index()][provider.index()] = score;
    }

    /// Label-keyed nested object in the same shape the model is asked to
    /// return, usable as normalizer input again.
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for criterion in Criterion::ordered() {
            let mut row = Map::new();
            for provider in Provider::ordered() {
                row.insert(
                    provider.label().to_string(),
                    Value::from(self.score(criterion, provider).value()),
                );
            }
            root.insert(criterion.label().to_string(), Value::Object(row));
        }
        Value::Object(root)
    }

    /// Matrix as CSV with criteria as rows and providers as columns.
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["Criterion".to_string()];
        header.extend(Provider::ordered().iter().map(|p| p.label().to_string()));
        writer.write_record(&header)?;

        for criterion in Criterion::ordered() {
            let mut record = vec![criterion.label().to_string()];
            record.extend(
                Provider::ordered()
                    .iter()
                    .map(|provider| self.score(criterion, *provider).value().to_string()),
            );
            writer.write_record(&record)?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
