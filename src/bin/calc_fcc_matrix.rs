use std::path::PathBuf;
use std::process;
use clap::Parser;
use log::info;
use fccluster::{
    FccConfig,
    Result,
    contacts::read_path_list,
    pipeline::{load_matrix, write_fcc_matrix},
    utils::{init_logging, open_output, output_name, RunTimer},
};

/// Calculates a matrix of fraction of common contacts between two or more structures.
#[derive(Parser, Debug)]
#[command(name = "calc_fcc_matrix", version)]
struct Args {
    /// Contact files, one per structure
    contacts: Vec<PathBuf>,

    /// Input file (one contact file name per line)
    #[arg(short = 'f', long = "file")]
    input_file: Option<PathBuf>,

    /// Output file [default: STDOUT]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of matrix lines to cache before writing [default: 50000]
    #[arg(short, long = "buffer_size")]
    buffer_size: Option<usize>,

    /// Ignore chain character in residue code. Use for homomeric complexes.
    #[arg(short, long = "ignore_chain")]
    ignore_chain: bool,

    /// INI configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// error, warn, info, debug, trace or none
    #[arg(long)]
    log_level: Option<String>,
}

fn run(args: Args) -> Result<()> {
    let mut config = FccConfig::load(args.config.as_deref())?;
    if let Some(size) = args.buffer_size {
        config.matrix.buffer_size = size;
    }
    if args.ignore_chain {
        config.matrix.ignore_chain = true;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;
    init_logging(&config.logging)?;
    config.log_warnings();

    let paths = match &args.input_file {
        Some(list) => read_path_list(list)?,
        None => args.contacts,
    };

    let timer = RunTimer::start();
    // the output is only opened once every input has parsed
    let matrix = load_matrix(&paths, &config.matrix)?;
    info!("Writing matrix to {}", output_name(args.output.as_deref()));
    let sink = open_output(args.output.as_deref())?;
    write_fcc_matrix(&matrix, &config.matrix, sink)?;
    timer.finish();
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("- {}", e);
        process::exit(1);
    }
}
