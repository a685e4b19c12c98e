use log::info;
use colored::*;
use clap::ArgAction;
use clap::Parser;
use anyhow::Result;
use itertools::Itertools;
use rayon::prelude::*;

use nj_folding::evaluate_model;
use nj_folding::FoldingModel;
use nj_folding::ModelKind;
use nj_folding::SweepRow;
use nj_structure::DotBracketVec;
use nj_structure::PairSet;

use njfold::init_logging;
use njfold::input_parsers::read_eval_input;
use njfold::report::SweepReport;


#[derive(Debug, Parser)]
#[command(name = "nj-sweep")]
#[command(author, version, about = "Score folding models against an observed structure over a range of minimal loop lengths.")]
pub struct Cli {
    /// Input file (FASTA-like: header, sequence, observed structure), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Largest minimal loop length to evaluate
    #[arg(long, default_value_t = 10)]
    pub max_loop: usize,

    /// Models to evaluate (default: all)
    #[arg(short, long = "model", value_name = "MODEL")]
    pub models: Vec<ModelKind>,

    /// Binding site (substring of the sequence), may be repeated
    #[arg(short, long = "binding-site", value_name = "SITE")]
    pub binding_sites: Vec<String>,

    /// Print a JSON report
    #[arg(long)]
    pub json: bool,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = read_eval_input(&cli.input)?;
    let observed = PairSet::from_annotation(input.observed.as_deref().unwrap_or_default())?;
    let kinds = if cli.models.is_empty() {
        ModelKind::ALL.to_vec()
    } else {
        cli.models.clone()
    };

    // The classical model ignores L, so it collapses to a single run.
    let models: Vec<FoldingModel> = (0..=cli.max_loop)
        .cartesian_product(kinds.iter().copied())
        .map(|(l, kind)| FoldingModel::new(kind, l as i64))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .unique()
        .collect();
    info!("Evaluating {} independent runs.", models.len());

    let rows: Vec<SweepRow> = models
        .par_iter()
        .map(|model| evaluate_model(model, &input.sequence, &cli.binding_sites, &observed))
        .collect::<Result<Vec<_>, _>>()?;

    if cli.json {
        let reports: Vec<SweepReport> = rows.iter().map(SweepReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if let Some(h) = &input.header {
        println!("{}", h.yellow())
    }
    println!("{:<14} {:>3} {}", "", "", input.sequence);
    println!("{:<14} {:>3} {}", "observed", "", DotBracketVec::from(&observed));
    for row in &rows {
        println!("{:<14} {:>3} {} {}",
            row.kind.to_string(),
            row.min_loop_length,
            DotBracketVec::from(&row.predicted),
            format!("{:.3}", row.accuracy).green()
        );
    }

    for kind in &kinds {
        // Ties go to the smallest loop length.
        let best = rows.iter()
            .filter(|r| r.kind == *kind)
            .rev()
            .max_by(|a, b| a.accuracy.total_cmp(&b.accuracy));
        if let Some(row) = best {
            println!("{} {} at L={} ({:.3})",
                "best".cyan(), kind, row.min_loop_length, row.accuracy);
        }
    }

    Ok(())
}
