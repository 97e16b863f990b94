use crate::workflows::advisor::{CloudAdvisor, Criterion, ScoreSnapshot};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Shared service state: the advisor, the readiness flag, the metrics
/// handle, and the single slot holding the latest generated snapshot.
#[derive(Clone)]
pub struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    advisor: Arc<CloudAdvisor>,
    snapshot: Arc<Mutex<Option<ScoreSnapshot>>>,
}

impl AppState {
    pub fn new(advisor: CloudAdvisor, metrics: PrometheusHandle) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics,
            advisor: Arc::new(advisor),
            snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn mark_ready(&self) {
        self.readiness.store(true, Ordering::Release);
    }

    pub(crate) fn is_ready(&self) -> bool {
        // Acquire pairs with the Release store in mark_ready.
        self.readiness.load(Ordering::Acquire)
    }

    pub(crate) fn render_metrics(&self) -> String {
        self.metrics.render()
    }

    pub(crate) fn advisor(&self) -> Arc<CloudAdvisor> {
        self.advisor.clone()
    }

    /// Replaces the previous snapshot wholesale; a failed generation never
    /// reaches this point, so stale state survives failed attempts.
    pub(crate) fn store_snapshot(&self, snapshot: ScoreSnapshot) {
        let mut slot = self.snapshot.lock().expect("snapshot mutex poisoned");
        *slot = Some(snapshot);
    }

    pub(crate) fn latest_snapshot(&self) -> Option<ScoreSnapshot> {
        self.snapshot
            .lock()
            .expect("snapshot mutex poisoned")
            .clone()
    }
}

/// Parses a `<criterion label>=<weight>` CLI argument.
pub(crate) fn parse_weight(raw: &str) -> Result<(Criterion, u32), String> {
    let (label, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected '<criterion>=<weight>', got '{raw}'"))?;
    let label = label.trim();
    let criterion = Criterion::from_label(label)
        .ok_or_else(|| format!("unknown criterion '{label}'"))?;
    let weight = value
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("weight '{}' is not a whole number", value.trim()))?;
    if !(1..=5).contains(&weight) {
        return Err(format!("weight {weight} must be between 1 and 5"));
    }
    Ok((criterion, weight))
}

/// Resolves a label-keyed weight object, rejecting unknown criteria and
/// out-of-range values. Weights are our own UI contract; unlike model
/// output they get no leniency.
pub(crate) fn deserialize_weights<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<(Criterion, u32)>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<BTreeMap<String, u32>>::deserialize(deserializer)?;
    opt.map(|entries| {
        entries
            .into_iter()
            .map(|(label, weight)| {
                let criterion = Criterion::from_label(&label).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown criterion '{label}'"))
                })?;
                if !(1..=5).contains(&weight) {
                    return Err(serde::de::Error::custom(format!(
                        "weight for '{label}' must be between 1 and 5"
                    )));
                }
                Ok((criterion, weight))
            })
            .collect()
    })
    .transpose()
}
