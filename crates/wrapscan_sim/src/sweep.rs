//! Test sweeps: directed, exhaustive, and random vector sets.
//!
//! A sweep runs one test closure per vector and records every outcome.
//! A failing vector is recorded and the sweep continues; only the rows
//! that produced a signature participate in the uniqueness statistics.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// What one vector produced.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VectorOutcome {
    /// The test completed with this signature.
    Signature(String),
    /// The test failed; the rendered error.
    Failed(String),
}

/// One vector's row in the sweep results.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SweepRow {
    /// The applied test vector.
    pub vector: String,
    /// What it produced.
    pub outcome: VectorOutcome,
}

/// Aggregated results of a sweep.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct SweepResults {
    /// One row per applied vector, in application order.
    pub rows: Vec<SweepRow>,
    /// Number of distinct signatures among the successful rows.
    pub unique_signatures: usize,
    /// `1 - unique/successful`; zero when every signature is distinct
    /// or nothing succeeded.
    pub collision_rate: f64,
}

impl SweepResults {
    fn from_rows(rows: Vec<SweepRow>) -> Self {
        let signatures: Vec<&String> = rows
            .iter()
            .filter_map(|r| match &r.outcome {
                VectorOutcome::Signature(s) => Some(s),
                VectorOutcome::Failed(_) => None,
            })
            .collect();
        let successful = signatures.len();
        let unique_signatures = signatures.into_iter().collect::<BTreeSet<_>>().len();
        let collision_rate = if successful == 0 {
            0.0
        } else {
            1.0 - unique_signatures as f64 / successful as f64
        };
        Self {
            rows,
            unique_signatures,
            collision_rate,
        }
    }
}

/// Applies `test` to each vector in order. Failures are recorded per
/// vector and never abort the sweep.
pub fn run_directed<F>(vectors: &[String], mut test: F) -> SweepResults
where
    F: FnMut(&str) -> Result<String, SimError>,
{
    let rows = vectors
        .iter()
        .map(|vector| {
            let outcome = match test(vector) {
                Ok(signature) => VectorOutcome::Signature(signature),
                Err(err) => VectorOutcome::Failed(err.to_string()),
            };
            SweepRow {
                vector: vector.clone(),
                outcome,
            }
        })
        .collect();
    SweepResults::from_rows(rows)
}

/// Applies `test` to every `width`-bit vector in ascending binary order.
pub fn run_exhaustive<F>(width: u32, test: F) -> SweepResults
where
    F: FnMut(&str) -> Result<String, SimError>,
{
    let width = width as usize;
    let vectors: Vec<String> = (0..1u64 << width)
        .map(|i| format!("{i:0width$b}"))
        .collect();
    run_directed(&vectors, test)
}

/// Draws `count` uniformly random `width`-bit vectors.
pub fn random_vectors<R: Rng>(width: usize, count: usize, rng: &mut R) -> Vec<String> {
    (0..count)
        .map(|_| {
            (0..width)
                .map(|_| if rng.gen_bool(0.5) { '1' } else { '0' })
                .collect()
        })
        .collect()
}
