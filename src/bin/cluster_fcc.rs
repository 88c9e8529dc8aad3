use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;
use clap::Parser;
use log::info;
use fccluster::{
    FccConfig,
    Result,
    cluster::write_clusters,
    pipeline::cluster_matrix,
    utils::{init_logging, open_output, RunTimer},
};

/// Asymmetric Taylor-Butina disjoint clustering of an FCC matrix.
#[derive(Parser, Debug)]
#[command(name = "cluster_fcc", version)]
struct Args {
    /// Four column matrix file (i k fcc_ik fcc_ki)
    matrix: PathBuf,

    /// Scores strictly above this value make two structures neighbors
    cutoff: f64,

    /// Output file [default: STDOUT]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum number of elements in a cluster [default: 4]
    #[arg(short = 'c', long = "cluster-size")]
    cluster_size: Option<usize>,

    /// Post-clustering step to include false singletons in the existing clusters
    #[arg(short = 'f', long = "include-false-singletons")]
    include_false_singletons: bool,

    /// Write run statistics as JSON to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// INI configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// error, warn, info, debug, trace or none
    #[arg(long)]
    log_level: Option<String>,
}

fn run(args: Args) -> Result<()> {
    let mut config = FccConfig::load(args.config.as_deref())?;
    config.cluster.cutoff = args.cutoff;
    if let Some(size) = args.cluster_size {
        config.cluster.min_cluster_size = size;
    }
    if args.include_false_singletons {
        config.cluster.include_false_singletons = true;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;
    init_logging(&config.logging)?;
    config.log_warnings();

    let timer = RunTimer::start();
    let run = cluster_matrix(&args.matrix, &config.cluster)?;
    info!(
        "Clustered {} elements in {:.2} seconds",
        run.graph.len(),
        timer.elapsed_secs()
    );

    let out = open_output(args.output.as_deref())?;
    write_clusters(out, &run.clustering.clusters)?;

    run.summary.log();
    if let Some(path) = &args.summary {
        run.summary.write_json(BufWriter::new(File::create(path)?))?;
        info!("Summary written to {:?}", path);
    }

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
