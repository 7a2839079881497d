//! Extraction integration tests
//!
//! Drive the library pipeline against synthetic dumps with class data
//! embedded between unrelated bytes.

use classcarve::{
    archive::{Compression, JarWriter, Manifest},
    extract::{self, ExtractOptions, ExtractOutcome, ProgressEvent},
    ExtractionPlan, CLASS_MAGIC,
};
use std::fs::File;
use std::io::Read;
use tempfile::tempdir;

// ===== Fixture functions =====

/// Minimal class-like blob: magic, version, then filler
fn fake_class(major: u8, body_len: usize) -> Vec<u8> {
    let mut data = CLASS_MAGIC.to_vec();
    data.extend_from_slice(&[0x00, 0x00, 0x00, major]);
    data.extend(std::iter::repeat(0x5A).take(body_len));
    data
}

/// A dump with leading garbage and three embedded classes
fn dump_with_three_classes() -> (Vec<u8>, Vec<usize>) {
    let mut dump = vec![0x11; 37];
    let mut starts = Vec::new();
    for (major, body) in [(0x34, 100), (0x37, 12), (0x41, 300)] {
        starts.push(dump.len());
        dump.extend(fake_class(major, body));
    }
    (dump, starts)
}

fn read_entry(path: &std::path::Path, name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    entry.read_to_end(&mut data).unwrap();
    data
}

// ===== Tests =====

#[test]
fn test_plan_finds_embedded_classes() {
    let (dump, starts) = dump_with_three_classes();
    let plan = ExtractionPlan::build(&dump, &CLASS_MAGIC);

    assert_eq!(plan.offsets(), starts.as_slice());
    assert_eq!(plan.accepted_count(), 3);

    // Leading garbage is not part of any fragment
    assert_eq!(plan.accepted_bytes(), dump.len() - starts[0]);
    assert_eq!(plan.entries()[1].fragment.len(), 4 + 4 + 12);
}

#[test]
fn test_run_round_trips_fragment_bytes() {
    let (dump, starts) = dump_with_three_classes();
    let dir = tempdir().unwrap();
    let input = dir.path().join("heap.bin");
    let output = dir.path().join("classes.jar");
    std::fs::write(&input, &dump).unwrap();

    let mut options = ExtractOptions::new(&input, &output);
    options.compression = Compression::Stored;

    let mut added = Vec::new();
    let mut reporter = |event: ProgressEvent| {
        if let ProgressEvent::EntryAdded { name, .. } = event {
            added.push(name);
        }
    };
    let outcome = extract::run(&options, &mut reporter).unwrap();

    assert!(matches!(outcome, ExtractOutcome::Written(ref s) if s.accepted == 3 && s.skipped == 0));
    assert_eq!(
        added,
        vec![
            "ExtractedClass_1.class",
            "ExtractedClass_2.class",
            "ExtractedClass_3.class"
        ]
    );
    assert_eq!(
        read_entry(&output, "ExtractedClass_2.class"),
        dump[starts[1]..starts[2]].to_vec()
    );
    assert_eq!(
        read_entry(&output, "ExtractedClass_3.class"),
        dump[starts[2]..].to_vec()
    );
}

#[test]
fn test_skipped_fragments_are_not_written() {
    let (dump, starts) = dump_with_three_classes();
    let dir = tempdir().unwrap();
    let output = dir.path().join("classes.jar");

    // Caller-supplied offsets: the first one points into the garbage prefix
    let mut offsets = vec![5];
    offsets.extend_from_slice(&starts);
    let plan = ExtractionPlan::from_offsets(&dump, offsets, &CLASS_MAGIC);
    assert_eq!(plan.skipped_count(), 1);

    let mut jar = JarWriter::create(&output, &Manifest::default(), Compression::Deflated).unwrap();
    for entry in plan.accepted() {
        jar.add_entry(&entry.name, entry.data()).unwrap();
    }
    jar.finish().unwrap();

    let archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert!(!names.contains(&"ExtractedClass_1.class"));
    assert!(names.contains(&"ExtractedClass_2.class"));
    assert!(names.contains(&"ExtractedClass_4.class"));
    assert_eq!(archive.len(), 4);
}
