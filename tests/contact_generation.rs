#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use fccluster::config::ContactsConfig;
use fccluster::contacts::generator::ContactGenerator;
use fccluster::{Error, ChainMode, ContactSets};

/// Stand-in for the contact program: prints the non-ATOM lines of the
/// structure file and fails on files named `broken*`.
fn fake_executable(dir: &Path) -> PathBuf {
    let path = dir.join("fake_contacts.sh");
    fs::write(
        &path,
        "#!/bin/sh\ncase \"$2\" in\n  *broken*) echo \"cannot parse $2\" >&2; exit 3;;\nesac\ngrep -v '^ATOM' \"$2\"\nexit 0\n",
    )
    .unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn atom(segid: char) -> String {
    format!("{:<72}{}", "ATOM      1  N   ALA A   1", segid)
}

fn structure(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

// Process-spawning checks run in one test so no script is being written
// while another test forks.
#[test]
fn test_contact_generation() {
    let dir = tempfile::tempdir().unwrap();
    let executable = fake_executable(dir.path());

    let first = structure(dir.path(), "model_1.pdb", &[
        atom('A'),
        atom('B'),
        "000121000342".to_string(),
        "000121000342".to_string(),
        "000051000012".to_string(),
    ]);
    let second = structure(dir.path(), "model_2.pdb", &[
        "000121000342".to_string(),
        "000131000332".to_string(),
    ]);

    // plain run: deduplicated, sorted, written next to the input
    let config = ContactsConfig { executable: executable.clone(), nproc: 2, ..ContactsConfig::default() };
    let structures = vec![first.clone(), second.clone()];
    let generator = ContactGenerator::new(&config, &structures).unwrap();
    let written = generator.run(&structures).unwrap();
    assert_eq!(written, vec![dir.path().join("model_1.contacts"), dir.path().join("model_2.contacts")]);
    assert_eq!(
        fs::read_to_string(&written[0]).unwrap(),
        "000051000012\n000121000342\n"
    );
    let sets = ContactSets::load(&written, ChainMode::Aware).unwrap();
    assert_eq!(sets.len(), 2);

    // selection: segment B is number 2, so only records with chain 2 on both sides stay
    let third = structure(dir.path(), "model_3.pdb", &[
        "000122000342".to_string(),
        "000121000342".to_string(),
    ]);
    let config = ContactsConfig {
        executable: executable.clone(),
        selection: Some("B".to_string()),
        ..ContactsConfig::default()
    };
    let structures = vec![first.clone(), third];
    let generator = ContactGenerator::new(&config, &structures).unwrap();
    let written = generator.run(&structures).unwrap();
    assert_eq!(written[1], dir.path().join("model_3.contacts-B"));
    assert_eq!(fs::read_to_string(&written[1]).unwrap(), "000122000342\n");

    // a failing job is reported after the rest have run
    let broken = structure(dir.path(), "broken.pdb", &["000121000342".to_string()]);
    let config = ContactsConfig { executable: executable.clone(), nproc: 1, ..ContactsConfig::default() };
    let structures = vec![broken, second];
    let generator = ContactGenerator::new(&config, &structures).unwrap();
    match generator.run(&structures) {
        Err(Error::Contacts(message)) => {
            assert!(message.contains("broken.pdb"));
            assert!(message.starts_with("1 of 2"));
        },
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(dir.path().join("model_2.contacts").exists());

    // missing program is fatal before anything runs
    let config = ContactsConfig { executable: dir.path().join("nope"), ..ContactsConfig::default() };
    assert!(matches!(ContactGenerator::new(&config, &[first]), Err(Error::Config(_))));
}
