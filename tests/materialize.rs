mod common;

use std::collections::BTreeSet;
use std::path::Path;

use baasync::pull::materialize::{extract_archive, materialize, TempArchive};
use baasync::store::FunctionEntry;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Map};

use common::{tarball, FakeRemote};

fn entry(id: &str, deployment: Option<&str>) -> FunctionEntry {
    let mut fields = Map::new();
    if let Some(d) = deployment {
        fields.insert("deployment".to_string(), json!(d));
    }
    FunctionEntry {
        id: id.to_string(),
        path: format!("functions/{}", id),
        fields,
    }
}

fn file_names(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn deployment_is_extracted_and_archive_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut remote = FakeRemote::default();
    remote.archives.insert(
        "dep1".to_string(),
        tarball(&[("main.js", "console.log(1)"), ("package.json", "{}")]),
    );

    let extraction = materialize(&remote, dir.path(), &entry("fn1", Some("dep1")))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(extraction.files, 2);
    assert_eq!(extraction.skipped, 0);
    assert_eq!(
        file_names(&dir.path().join("functions/fn1")),
        BTreeSet::from(["main.js".to_string(), "package.json".to_string()])
    );
    assert_eq!(file_names(dir.path()), BTreeSet::from(["functions".to_string()]));
    assert_eq!(remote.calls(), vec!["download:fn1:dep1"]);
}

#[tokio::test]
async fn existing_files_are_overwritten_and_others_kept() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("functions/fn1");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("main.js"), "old").unwrap();
    std::fs::write(dest.join("notes.txt"), "mine").unwrap();

    let mut remote = FakeRemote::default();
    remote
        .archives
        .insert("dep1".to_string(), tarball(&[("main.js", "new")]));

    materialize(&remote, dir.path(), &entry("fn1", Some("dep1")))
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(dest.join("main.js")).unwrap(), "new");
    assert_eq!(std::fs::read_to_string(dest.join("notes.txt")).unwrap(), "mine");
}

#[tokio::test]
async fn function_without_deployment_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let remote = FakeRemote::default();

    let result = materialize(&remote, dir.path(), &entry("fn1", None))
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(remote.calls().is_empty());
    assert!(file_names(dir.path()).is_empty());
}

#[tokio::test]
async fn corrupt_archive_fails_and_is_still_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut remote = FakeRemote::default();
    remote
        .archives
        .insert("dep1".to_string(), b"definitely not gzip".to_vec());

    let result = materialize(&remote, dir.path(), &entry("fn1", Some("dep1"))).await;

    assert!(result.is_err());
    assert_eq!(file_names(dir.path()), BTreeSet::from(["functions".to_string()]));
}

#[tokio::test]
async fn download_failure_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let remote = FakeRemote::default();

    let err = materialize(&remote, dir.path(), &entry("fn1", Some("gone")))
        .await
        .unwrap_err();

    assert!(format!("{:#}", err).contains("404"));
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn nested_directories_are_created() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("a.tar.gz");
    std::fs::write(
        &archive,
        tarball(&[("src/index.js", "x"), ("src/lib/util.js", "y")]),
    )
    .unwrap();
    let dest = dir.path().join("out");
    std::fs::create_dir_all(&dest).unwrap();

    let extraction = extract_archive(&archive, &dest).unwrap();

    assert_eq!(extraction.files, 2);
    assert!(dest.join("src/lib/util.js").is_file());
}

/// Gzip tarball built from raw headers, so names and entry types are written
/// as given instead of being validated by `tar::Builder`.
fn raw_tarball(entries: &[(&[u8], u8, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, kind, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_entry_type(tar::EntryType::new(*kind));
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, content.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

#[test]
fn escaping_and_unknown_entries_do_not_abort_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("a.tar.gz");
    std::fs::write(
        &archive,
        raw_tarball(&[
            (&b"../evil.txt"[..], b'0', "pwned"),
            (&b"weird"[..], b'Q', "???"),
            (&b"main.js"[..], b'0', "console.log(1)"),
        ]),
    )
    .unwrap();
    let out = dir.path().join("out");
    let dest = out.join("fn1");
    std::fs::create_dir_all(&dest).unwrap();

    let extraction = extract_archive(&archive, &dest).unwrap();

    assert_eq!(extraction.files, 1);
    assert!(extraction.skipped >= 1);
    assert!(dest.join("main.js").is_file());
    assert!(!out.join("evil.txt").exists());
    assert!(!dir.path().join("evil.txt").exists());
}

#[test]
fn temp_archive_name_contains_function_id_and_is_removed_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = {
        let archive = TempArchive::new(dir.path(), "fn1");
        let name = archive.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("fn1-"));
        assert!(name.ends_with(".tar.gz"));
        std::fs::write(archive.path(), b"data").unwrap();
        archive.path().to_path_buf()
    };
    assert!(!path.exists());
}
