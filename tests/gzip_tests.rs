//! Tests for gzip compressed input support.

#![cfg(feature = "gzip")]

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::{write::GzEncoder, Compression};
use knucleotide::config::Config;
use knucleotide::reader::{read_input, Input};
use knucleotide::run::run_to_writer;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Writes a gzipped copy of the sample fixture into `dir`.
fn gzipped_sample(dir: &Path) -> PathBuf {
    let plain = std::fs::read(fixture_path("sample.fa")).unwrap();
    let path = dir.join("sample.fa.gz");

    let mut encoder = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(&plain).unwrap();
    encoder.finish().unwrap();
    path
}

#[test]
fn read_record_from_gzip_file() {
    let dir = TempDir::new().unwrap();
    let path = gzipped_sample(dir.path());

    let gzipped = read_input(&Input::File(path), "THREE").expect("should read gzipped file");
    let plain = read_input(&Input::File(fixture_path("sample.fa")), "THREE").unwrap();
    assert_eq!(gzipped, plain);
}

#[test]
fn gzip_and_plain_produce_same_reports() {
    let dir = TempDir::new().unwrap();
    let path = gzipped_sample(dir.path());

    let mut gzipped = Vec::new();
    run_to_writer(&Config::reference(path).unwrap(), &mut gzipped).unwrap();

    let expected = std::fs::read_to_string(fixture_path("sample.expected")).unwrap();
    assert_eq!(String::from_utf8(gzipped).unwrap(), expected);
}

#[test]
fn multi_member_gzip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("split.fa.gz");
    let mut file = std::fs::File::create(&path).unwrap();
    for part in [&b">THREE\nGGTA\n"[..], &b"GGTA\n"[..]] {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(part).unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
    }
    drop(file);

    let seq = read_input(&Input::File(path), "THREE").unwrap();
    assert_eq!(&seq[..], b"GGTAGGTA");
}
