//! # njfold
//!
//! Unified API for Nussinov-Jacobson structure prediction.
//!
//! This crate re-exports the main functionality from its submodules.

pub mod input_parsers;
pub mod report;

pub mod structure {
    pub use ::nj_structure::*;
}

pub mod folding {
    pub use ::nj_folding::*;
}

use std::io::Write;
use env_logger::Builder;

/// Log level from a `-v` count: warn, info (-v) or debug (-vv).
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            // no prefix, just the message
            writeln!(buf, "{}", record.args())
        })
        .init();
}
