use std::fs;
use std::path::PathBuf;
use std::process;
use clap::Parser;
use fccluster::{
    FccConfig,
    Error,
    Result,
    contacts::{generator::ContactGenerator, read_path_list},
    utils::{init_logging, RunTimer},
};

/// Calculates contact lists for structure files with an external program.
#[derive(Parser, Debug)]
#[command(name = "make_contacts", version)]
struct Args {
    /// Structure files (PDB format)
    structures: Vec<PathBuf>,

    /// Input file (one file path per line)
    #[arg(short = 'f', long = "file")]
    input_file: Option<PathBuf>,

    /// Number of simultaneous processes to launch in each round [default: 1]
    #[arg(short, long)]
    nproc: Option<usize>,

    /// Distance cutoff to evaluate contacts [default: 5.0A]
    #[arg(short, long)]
    cutoff: Option<String>,

    /// Path to the contact calculation program
    #[arg(short, long = "exec")]
    executable: Option<PathBuf>,

    /// Filter contacts on their segids, e.g. A,C [default: all chains]
    #[arg(short, long)]
    selection: Option<String>,

    /// INI configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// error, warn, info, debug, trace or none
    #[arg(long)]
    log_level: Option<String>,
}

fn run(args: Args) -> Result<()> {
    let mut config = FccConfig::load(args.config.as_deref())?;
    if let Some(nproc) = args.nproc {
        config.contacts.nproc = nproc;
    }
    if let Some(cutoff) = args.cutoff {
        config.contacts.distance_cutoff = cutoff;
    }
    if let Some(executable) = args.executable {
        config.contacts.executable = executable;
    }
    if args.selection.is_some() {
        config.contacts.selection = args.selection;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;
    init_logging(&config.logging)?;
    config.log_warnings();

    let structures = match &args.input_file {
        Some(list) => read_path_list(list)?,
        None => args.structures,
    };
    if structures.is_empty() {
        return Err(Error::config("No files provided"));
    }
    let structures = structures
        .iter()
        .map(fs::canonicalize)
        .collect::<std::io::Result<Vec<_>>>()?;

    let timer = RunTimer::start();
    let generator = ContactGenerator::new(&config.contacts, &structures)?;
    generator.run(&structures)?;
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
