use super::aggregate::aggregate;
use super::brackets::{resolve_age_bracket, resolve_height_bracket};
use super::criterion;
use super::domain::{CandidateInput, Criterion, EvaluationOutcome};
use super::thresholds::ThresholdStore;
use std::sync::Arc;

/// Stateless evaluator over an immutable threshold store. Cloning shares the store.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    store: Arc<ThresholdStore>,
}

impl EvaluationEngine {
    pub fn new(store: ThresholdStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<ThresholdStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ThresholdStore {
        &self.store
    }

    pub fn evaluate(&self, input: &CandidateInput) -> EvaluationOutcome {
        let age_bracket = resolve_age_bracket(input.age, input.sex);
        let height_bracket = resolve_height_bracket(input.height_cm, input.sex);

        let results = Criterion::ordered()
            .into_iter()
            .map(|oic| {
                criterion::evaluate(
                    &self.store,
                    oic,
                    input.sex,
                    input.measurements.get(oic),
                    age_bracket,
                    height_bracket,
                )
            })
            .collect();

        aggregate(results, age_bracket, height_bracket)
    }
}
