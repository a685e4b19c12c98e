//! The four folding models.
//!
//! Each model bundles a scoring policy, a traceback mode and a minimal
//! loop length. Models are plain values; every call builds and discards
//! its own score table.

use std::fmt;
use std::str::FromStr;
use log::log;
use log::Level;

use nj_structure::DotBracketVec;
use nj_structure::PairSet;

use crate::traceback;
use crate::ExcludedIndices;
use crate::FoldError;
use crate::NucleotideVec;
use crate::Recurrence;
use crate::Score;
use crate::ScoringPolicy;
use crate::TracebackMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Base-pair maximization, no loop constraint.
    Classical,
    /// Base-pair maximization with a minimal loop length.
    ClassicalMll,
    /// Pair energies, binding-site exclusion and a minimal loop length.
    BindingEnergy,
    /// As `BindingEnergy`, with the stem-preferring traceback.
    BindingEnergyAltTb,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Classical,
        ModelKind::ClassicalMll,
        ModelKind::BindingEnergy,
        ModelKind::BindingEnergyAltTb,
    ];

    pub fn policy(&self) -> ScoringPolicy {
        match self {
            ModelKind::Classical | ModelKind::ClassicalMll => ScoringPolicy::Unit,
            ModelKind::BindingEnergy | ModelKind::BindingEnergyAltTb => ScoringPolicy::Energy,
        }
    }

    pub fn traceback_mode(&self) -> TracebackMode {
        match self {
            ModelKind::BindingEnergyAltTb => TracebackMode::Alternative,
            _ => TracebackMode::Standard,
        }
    }

    /// Whether binding sites exclude positions from pairing. Every model
    /// validates them, only the binding models apply them.
    pub fn uses_binding_sites(&self) -> bool {
        matches!(self, ModelKind::BindingEnergy | ModelKind::BindingEnergyAltTb)
    }

    /// Whether the minimal loop length is taken from the caller.
    pub fn uses_min_loop(&self) -> bool {
        !matches!(self, ModelKind::Classical)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Classical => "classical",
            ModelKind::ClassicalMll => "classical-mll",
            ModelKind::BindingEnergy => "binding",
            ModelKind::BindingEnergyAltTb => "binding-alttb",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL.iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!(
                "unknown model '{}' (expected one of: {})", s,
                ModelKind::ALL.map(|k| k.name()).join(", ")
            ))
    }
}

/// A model kind together with its minimal loop length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldingModel {
    kind: ModelKind,
    min_loop: usize,
}

impl FoldingModel {
    /// Validates the loop length. `Classical` always folds with 0.
    pub fn new(kind: ModelKind, min_loop_length: i64) -> Result<Self, FoldError> {
        if min_loop_length < 0 {
            return Err(FoldError::NegativeLoopLength(min_loop_length));
        }
        let min_loop = if kind.uses_min_loop() { min_loop_length as usize } else { 0 };
        Ok(Self { kind, min_loop })
    }

    pub fn classical() -> Self {
        Self { kind: ModelKind::Classical, min_loop: 0 }
    }

    pub fn classical_mll(min_loop: usize) -> Self {
        Self { kind: ModelKind::ClassicalMll, min_loop }
    }

    pub fn binding_energy(min_loop: usize) -> Self {
        Self { kind: ModelKind::BindingEnergy, min_loop }
    }

    pub fn binding_energy_alt_tb(min_loop: usize) -> Self {
        Self { kind: ModelKind::BindingEnergyAltTb, min_loop }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn min_loop_length(&self) -> usize {
        self.min_loop
    }

    /// Validate the input, fill the table and trace back one structure.
    ///
    /// With `verbose`, diagnostics are logged at info instead of debug level.
    pub fn fold<S: AsRef<str>>(
        &self,
        sequence: &str,
        binding_sites: &[S],
        verbose: bool,
    ) -> Result<FoldResult, FoldError> {
        let level = if verbose { Level::Info } else { Level::Debug };
        let sequence = NucleotideVec::try_from(sequence)?;
        let resolved = ExcludedIndices::resolve(&sequence, binding_sites)?;
        let excluded = if self.kind.uses_binding_sites() {
            resolved
        } else {
            ExcludedIndices::none()
        };

        let recurrence = Recurrence::new(&sequence, self.kind.policy(), &excluded, self.min_loop);
        let table = recurrence.fill();
        log!(level, "{} (min loop {}): optimum {} on {} nt.",
            self.kind, self.min_loop, table.optimum(), sequence.len());

        let pairs = traceback(&table, &recurrence, self.kind.traceback_mode())?;
        let score = table.optimum();
        let result = FoldResult { kind: self.kind, sequence, excluded, pairs, score };
        log!(level, "{}", result.sequence);
        log!(level, "{}", result.dot_bracket());
        if let Some(e) = result.energy() {
            log!(level, "energy {}", e);
        }
        Ok(result)
    }

    /// Fold and return only the structure.
    pub fn run<S: AsRef<str>>(
        &self,
        sequence: &str,
        binding_sites: &[S],
        verbose: bool,
    ) -> Result<PairSet, FoldError> {
        self.fold(sequence, binding_sites, verbose).map(FoldResult::into_pairs)
    }
}

/// One-shot entry point: validate, build the model and fold.
pub fn run<S: AsRef<str>>(
    kind: ModelKind,
    sequence: &str,
    binding_sites: &[S],
    verbose: bool,
    min_loop_length: i64,
) -> Result<PairSet, FoldError> {
    FoldingModel::new(kind, min_loop_length)?.run(sequence, binding_sites, verbose)
}

/// The outcome of one fold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldResult {
    kind: ModelKind,
    sequence: NucleotideVec,
    excluded: ExcludedIndices,
    pairs: PairSet,
    score: Score,
}

impl FoldResult {
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn sequence(&self) -> &NucleotideVec {
        &self.sequence
    }

    pub fn excluded(&self) -> &ExcludedIndices {
        &self.excluded
    }

    pub fn pairs(&self) -> &PairSet {
        &self.pairs
    }

    pub fn into_pairs(self) -> PairSet {
        self.pairs
    }

    /// The table optimum.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Structure energy, only for energy-weighted models.
    pub fn energy(&self) -> Option<Score> {
        match self.kind.policy() {
            ScoringPolicy::Energy => Some(-self.score),
            ScoringPolicy::Unit => None,
        }
    }

    /// Dot-bracket rendering with excluded positions marked `*`.
    pub fn dot_bracket(&self) -> DotBracketVec {
        let mut dbv = DotBracketVec::from(&self.pairs);
        dbv.mark_excluded(self.excluded.to_vec());
        dbv
    }
}
