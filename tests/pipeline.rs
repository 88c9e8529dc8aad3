use std::fs;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use fccluster::cluster::{read_clusters, write_clusters, NeighborGraph};
use fccluster::config::{ClusterConfig, MatrixConfig};
use fccluster::pipeline::{calculate_matrix, cluster_graph, cluster_matrix, load_matrix};
use fccluster::{ChainMode, ContactSets, Error, FccMatrix, PairScore};

fn write_contacts(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

#[test]
fn test_matrix_rows_for_three_structures() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_contacts(dir.path(), "1.contacts", &["1", "2", "3"]),
        write_contacts(dir.path(), "2.contacts", &["2", "3", "4"]),
        write_contacts(dir.path(), "3.contacts", &["1", "2", "3", "4"]),
    ];

    let mut out = Vec::new();
    let rows = calculate_matrix(&paths, &MatrixConfig::default(), &mut out).unwrap();
    assert_eq!(rows, 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1 2 0.667 0.667\n1 3 1.000 0.750\n2 3 1.000 0.750\n"
    );
}

#[test]
fn test_fewer_than_two_structures_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_contacts(dir.path(), "1.contacts", &["1"]),
        PathBuf::new(),
    ];
    let result = calculate_matrix(&paths, &MatrixConfig::default(), Vec::<u8>::new());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_contact_file_is_rejected_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let paths = vec![
        write_contacts(dir.path(), "1.contacts", &["1"]),
        dir.path().join("absent.contacts"),
    ];
    match load_matrix(&paths, &MatrixConfig::default()) {
        Err(Error::Config(message)) => assert!(message.contains("absent.contacts")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("missing file was accepted"),
    }

    let mut out = Vec::new();
    assert!(calculate_matrix(&paths, &MatrixConfig::default(), &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn test_ignore_chain_counts_relabelled_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    // the first two records differ only in the chain column
    let paths = vec![
        write_contacts(dir.path(), "a.contacts", &["000121000342", "000122000342", "000131000342"]),
        write_contacts(dir.path(), "b.contacts", &["000121000342", "000141000342", "000151000342", "000161000342"]),
    ];

    let aware = FccMatrix::new(ContactSets::load(&paths, ChainMode::Aware).unwrap());
    let pair = aware.pairs().next().unwrap();
    assert_eq!(pair.to_row(), "1 2 0.333 0.250");

    let ignore = FccMatrix::new(ContactSets::load(&paths, ChainMode::Ignore).unwrap());
    let pair = ignore.pairs().next().unwrap();
    // both collapsed copies of 00012..342 are found in b
    assert_eq!(pair.to_row(), "1 2 0.667 0.500");
}

#[test]
fn test_matrix_file_round_trip_into_clusters() {
    let dir = tempfile::tempdir().unwrap();
    // structures 1-4 share most contacts, 5 shares none
    let paths = vec![
        write_contacts(dir.path(), "1.contacts", &["1", "2", "3", "4"]),
        write_contacts(dir.path(), "2.contacts", &["1", "2", "3", "4", "5"]),
        write_contacts(dir.path(), "3.contacts", &["1", "2", "3", "4", "6"]),
        write_contacts(dir.path(), "4.contacts", &["1", "2", "3", "4", "7"]),
        write_contacts(dir.path(), "5.contacts", &["8", "9"]),
    ];

    let matrix_path = dir.path().join("fcc.matrix");
    let sink = fs::File::create(&matrix_path).unwrap();
    let config = MatrixConfig { buffer_size: 3, ..MatrixConfig::default() };
    assert_eq!(calculate_matrix(&paths, &config, sink).unwrap(), 10);

    let cluster_config = ClusterConfig { cutoff: 0.75, min_cluster_size: 4, include_false_singletons: false };
    let run = cluster_matrix(&matrix_path, &cluster_config).unwrap();

    assert_eq!(run.clustering.clusters.len(), 1);
    let cluster = &run.clustering.clusters[0];
    // 1-4 all point at each other, so one of them takes the other three
    assert_eq!(cluster.len(), 4);
    assert_eq!(run.summary.true_singletons, 1);
    assert!((run.summary.coverage_percent - 80.0).abs() < 1e-9);

    let mut out = Vec::new();
    write_clusters(&mut out, &run.clustering.clusters).unwrap();
    let records = read_clusters(BufReader::new(Cursor::new(out))).unwrap();
    let mut ids: Vec<_> = records[0].structures().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_star_graph_example() {
    let pairs = vec![
        PairScore::new(1, 2, 0.9, 0.1),
        PairScore::new(1, 3, 0.9, 0.1),
        PairScore::new(1, 4, 0.9, 0.1),
        PairScore::new(2, 3, 0.1, 0.1),
        PairScore::new(2, 4, 0.1, 0.1),
        PairScore::new(3, 4, 0.1, 0.1),
        PairScore::new(4, 5, 0.1, 0.1),
    ];
    let graph = NeighborGraph::from_pairs(pairs, 0.5);
    let config = ClusterConfig { cutoff: 0.5, min_cluster_size: 3, include_false_singletons: true };
    let run = cluster_graph(graph, &config);

    let mut out = Vec::new();
    write_clusters(&mut out, &run.clustering.clusters).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Cluster 1 -> 1 2 3 4 \n");
    assert_eq!(run.summary.true_singletons, 1);
    assert_eq!(run.summary.false_singletons_reinserted, 0);
}

#[test]
fn test_false_singletons_are_marked_in_output() {
    let matrix = "\
1 2 0.900 0.100
1 3 0.900 0.100
1 4 0.900 0.100
1 5 0.100 0.100
2 5 0.100 0.900
3 5 0.100 0.900
";
    let graph = NeighborGraph::from_reader(Cursor::new(matrix), 0.5).unwrap();
    let config = ClusterConfig { cutoff: 0.5, min_cluster_size: 4, include_false_singletons: true };
    let run = cluster_graph(graph, &config);

    let mut out = Vec::new();
    write_clusters(&mut out, &run.clustering.clusters).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "Cluster 1 -> 1 2 3 4 5* \n");
    assert_eq!(run.summary.false_singletons_reinserted, 1);
    assert_eq!(run.summary.clustered, 5);
}
