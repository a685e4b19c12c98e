//! The nj_folding crate.
//!
//! Nussinov-Jacobson secondary structure prediction:
//!  - base-pair maximization (classical),
//!  - a minimal hairpin loop length,
//!  - single-pair energies with binding-site exclusion,
//!  - a traceback that prefers long stems among co-optimal structures.
//!
//! Every fold validates its input, fills an O(n²) score table in O(n³)
//! time and traces back one optimal structure. Nothing is shared between
//! folds, independent folds may run in parallel.
//!
//! ```
//! use nj_folding::{run, ModelKind};
//!
//! let pairs = run(ModelKind::ClassicalMll, "GGGAAAUCC", &[] as &[&str], false, 3).unwrap();
//! assert_eq!(pairs.to_tuples(), vec![(0, 8), (1, 7), (2, 6)]);
//! ```

mod error;
mod nucleotides;
mod binding_sites;
mod scoring;
mod nussinov;
mod traceback;
mod enumerate;
mod models;
mod evaluation;

pub use error::*;
pub use nucleotides::*;
pub use binding_sites::*;
pub use scoring::*;
pub use nussinov::*;
pub use traceback::*;
pub use enumerate::*;
pub use models::*;
pub use evaluation::*;
