use log::info;
use colored::*;
use clap::ArgAction;
use clap::Parser;
use anyhow::Result;

use nj_folding::accuracy;
use nj_folding::enumerate_optimal;
use nj_folding::FoldingModel;
use nj_folding::ModelKind;
use nj_folding::Recurrence;
use nj_structure::DotBracketVec;
use nj_structure::PairSet;

use njfold::init_logging;
use njfold::input_parsers::ruler;
use njfold::input_parsers::read_fold_input;
use njfold::report::FoldReport;


#[derive(Debug, Parser)]
#[command(name = "nj-fold")]
#[command(author, version, about = "Predict an RNA secondary structure.")]
pub struct Cli {
    /// Input file (FASTA-like: header, sequence, optional structure), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Folding model: classical, classical-mll, binding, binding-alttb
    #[arg(short, long, default_value = "binding-alttb")]
    pub model: ModelKind,

    /// Minimal number of unpaired bases enclosed by a pair
    #[arg(short = 'l', long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_loop: i64,

    /// Binding site (substring of the sequence), may be repeated
    #[arg(short, long = "binding-site", value_name = "SITE")]
    pub binding_sites: Vec<String>,

    /// Print every co-optimal structure (exponential, short sequences only)
    #[arg(long)]
    pub all: bool,

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

    let input = read_fold_input(&cli.input)?;
    let model = FoldingModel::new(cli.model, cli.min_loop)?;
    let result = model.fold(&input.sequence, &cli.binding_sites, cli.verbose > 0)?;
    let observed = input.observed.as_deref().map(PairSet::from_annotation).transpose()?;

    if cli.json {
        let report = FoldReport::new(input.header, &model, &result, observed.as_ref());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(h) = &input.header {
        println!("{}", h.yellow())
    }
    let n = result.sequence().len();
    info!("{}", ruler(n - 1).magenta());
    println!("{}", result.sequence());
    let score = match result.energy() {
        Some(e) => format!("{:>6}", e),
        None => format!("{:>6}", result.score()),
    };
    println!("{} {}", result.dot_bracket(), score.green());

    if let Some(obs) = &observed {
        let acc = accuracy(obs, result.pairs());
        println!("{} {}", DotBracketVec::from(obs), format!("{:>6.2}", acc).cyan());
    }

    if cli.all {
        let recurrence = Recurrence::new(
            result.sequence(),
            model.kind().policy(),
            result.excluded(),
            model.min_loop_length()
        );
        let table = recurrence.fill();
        let structures = enumerate_optimal(&table, &recurrence)?;
        info!("{} co-optimal structures.", structures.len());
        for pairs in &structures {
            let mut dbv = DotBracketVec::from(pairs);
            dbv.mark_excluded(result.excluded().to_vec());
            println!("{}", dbv.to_string().blue());
        }
    }
    info!("{}", ruler(n - 1).magenta());

    Ok(())
}
