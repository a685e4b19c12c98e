//! Serializable summaries for `--json` output.

use serde::Serialize;

use nj_folding::accuracy;
use nj_folding::FoldResult;
use nj_folding::FoldingModel;
use nj_folding::Score;
use nj_folding::SweepRow;
use nj_structure::DotBracketVec;
use nj_structure::PairSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoldReport {
    pub header: Option<String>,
    pub model: String,
    pub min_loop_length: usize,
    pub sequence: String,
    pub structure: String,
    pub pairs: Vec<(usize, usize)>,
    pub score: Score,
    pub energy: Option<Score>,
    pub accuracy: Option<f64>,
}

impl FoldReport {
    pub fn new(
        header: Option<String>,
        model: &FoldingModel,
        result: &FoldResult,
        observed: Option<&PairSet>,
    ) -> Self {
        Self {
            header,
            model: model.kind().to_string(),
            min_loop_length: model.min_loop_length(),
            sequence: result.sequence().to_string(),
            structure: result.dot_bracket().to_string(),
            pairs: result.pairs().to_tuples(),
            score: result.score(),
            energy: result.energy(),
            accuracy: observed.map(|obs| accuracy(obs, result.pairs())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub model: String,
    pub min_loop_length: usize,
    pub structure: String,
    pub accuracy: f64,
}

impl From<&SweepRow> for SweepReport {
    fn from(row: &SweepRow) -> Self {
        Self {
            model: row.kind.to_string(),
            min_loop_length: row.min_loop_length,
            structure: DotBracketVec::from(&row.predicted).to_string(),
            accuracy: row.accuracy,
        }
    }
}
