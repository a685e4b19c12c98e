use std::fs::File;
use std::io::{stdin, BufRead, BufReader, Cursor};
use std::path::Path;

use anyhow::{anyhow, Result};
use paste::paste;

// ============================================================
//  FASTA-like records: header, sequence, observed structure
// ============================================================

/// One input record. The sequence is kept as text, validation happens
/// when it is folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldInput {
    pub header: Option<String>,
    pub sequence: String,
    pub observed: Option<String>,
}

#[derive(Clone, Copy)]
enum RecordMode {
    Lenient,
    Strict,
}

/// Core parsing logic shared by all adapters.
fn parse_record<R: BufRead>(reader: R, mode: RecordMode) -> Result<FoldInput> {
    let mut header: Option<String> = None;
    let mut sequence: Option<String> = None;
    let mut observed: Option<String> = None;

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            if sequence.is_some() {
                break;
            } else {
                continue;
            }
        }

        if line.starts_with('>') && sequence.is_none() {
            header = Some(line.to_string());
        } else if let Some(token) = line.split_whitespace().next() {
            if sequence.is_none() {
                sequence = Some(token.to_string());
            } else {
                observed = Some(token.to_string());
                break;
            }
        }
    }

    let sequence = sequence.ok_or_else(|| anyhow!("Missing sequence line"))?;

    if let RecordMode::Strict = mode {
        if observed.is_none() {
            return Err(anyhow!("Missing observed structure line"));
        }
    }

    if let Some(obs) = &observed {
        if obs.chars().count() != sequence.chars().count() {
            return Err(anyhow!(
                "Sequence length ({}) and structure length ({}) do not match",
                sequence.chars().count(),
                obs.chars().count()
            ));
        }
    }

    Ok(FoldInput { header, sequence, observed })
}

// ============================================================
//  Base parser functions (lenient and strict variants)
// ============================================================

/// Observed structure optional.
pub fn read_fold<R: BufRead>(reader: R) -> Result<FoldInput> {
    parse_record(reader, RecordMode::Lenient)
}

/// Observed structure required.
pub fn read_eval<R: BufRead>(reader: R) -> Result<FoldInput> {
    parse_record(reader, RecordMode::Strict)
}

// ============================================================
//  Macro generating file/string/stdin/input helpers
// ============================================================

/// Generate input adapters for a base parser function `fn base<R: BufRead>(R) -> Result<T>`.
///
/// This expands into:
/// - `base_string(&str)`
/// - `base_file<P: AsRef<Path>>(P)`
/// - `base_stdin()`
/// - `base_input(&str)`  (dispatches "-" → stdin, otherwise → file)
macro_rules! define_input_variants {
    ($base:ident, $ret:ty) => {
        paste! {
            /// Read from a string buffer.
            pub fn [<$base _string>](s: &str) -> $ret {
                $base(Cursor::new(s))
            }

            /// Read from a file path.
            pub fn [<$base _file>]<P: AsRef<Path>>(path: P) -> $ret {
                let reader = BufReader::new(File::open(path)?);
                $base(reader)
            }

            /// Read from stdin.
            pub fn [<$base _stdin>]() -> $ret {
                let reader = BufReader::new(stdin());
                $base(reader)
            }

            /// Read either from stdin ("-") or a file path.
            pub fn [<$base _input>](s: &str) -> $ret {
                if s == "-" {
                    [<$base _stdin>]()
                } else {
                    [<$base _file>](s)
                }
            }
        }
    };
}

define_input_variants!(read_fold, Result<FoldInput>);
define_input_variants!(read_eval, Result<FoldInput>);

// ============================================================
//  Position ruler for verbose output
// ============================================================

pub fn ruler(len: usize) -> String {
    let mut s = String::new();
    let mut c = 0;
    for i in 0..=len {
        if i % 10 == 0 {
            let t = format!("{}", i / 10);
            c = t.len() - 1;
            s.push_str(&t);
            continue;
        } else if c > 0 {
            c -= 1;
            continue;
        }
        if i % 10 == 5 {
            s.push(',');
        } else {
            s.push('.');
        }
    }
    s
}
