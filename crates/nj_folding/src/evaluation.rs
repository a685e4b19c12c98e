//! Comparison of predicted against observed structures.

use std::ops::RangeInclusive;
use log::debug;

use nj_structure::PairSet;

use crate::FoldError;
use crate::FoldingModel;
use crate::ModelKind;

/// Fraction of observed pairs that were predicted.
///
/// An observed structure without pairs yields 0.0.
pub fn accuracy(observed: &PairSet, predicted: &PairSet) -> f64 {
    if observed.is_empty() {
        debug!("Observed structure has no pairs, accuracy set to 0.");
        return 0.0;
    }
    predicted.intersection_len(observed) as f64 / observed.len() as f64
}

/// Prediction and accuracy of one model on one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepRow {
    pub kind: ModelKind,
    pub min_loop_length: usize,
    pub predicted: PairSet,
    pub accuracy: f64,
}

/// Fold with `model` and score the prediction against `observed`.
pub fn evaluate_model<S: AsRef<str>>(
    model: &FoldingModel,
    sequence: &str,
    binding_sites: &[S],
    observed: &PairSet,
) -> Result<SweepRow, FoldError> {
    let predicted = model.run(sequence, binding_sites, false)?;
    let accuracy = accuracy(observed, &predicted);
    debug!("{} (min loop {}): accuracy {:.3}",
        model.kind(), model.min_loop_length(), accuracy);
    Ok(SweepRow {
        kind: model.kind(),
        min_loop_length: model.min_loop_length(),
        predicted,
        accuracy,
    })
}

/// Evaluate every model kind for every minimal loop length in `lengths`.
///
/// Rows are ordered by loop length, then by the order of `kinds`.
pub fn sweep_min_loop_length<S: AsRef<str>>(
    kinds: &[ModelKind],
    sequence: &str,
    binding_sites: &[S],
    observed: &PairSet,
    lengths: RangeInclusive<usize>,
) -> Result<Vec<SweepRow>, FoldError> {
    let mut rows = Vec::new();
    for l in lengths {
        for &kind in kinds {
            let model = FoldingModel::new(kind, l as i64)?;
            rows.push(evaluate_model(&model, sequence, binding_sites, observed)?);
        }
    }
    Ok(rows)
}
