use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;
use clap::Parser;
use fccluster::{
    Result,
    cluster::{pretty, read_clusters},
};

/// Outputs the names of the cluster members from a clustering output file
/// and the file listing the structures.
#[derive(Parser, Debug)]
#[command(name = "pretty_clusters", version)]
struct Args {
    /// Cluster output of cluster_fcc
    clusters: PathBuf,

    /// One structure file name per line, in matrix order
    names: PathBuf,
}

fn run(args: Args) -> Result<()> {
    let records = read_clusters(BufReader::new(File::open(&args.clusters)?))?;
    let names = pretty::read_name_list(&args.names)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in pretty::name_clusters(&records, &names)? {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}\nAborting..", e);
        process::exit(1);
    }
}
