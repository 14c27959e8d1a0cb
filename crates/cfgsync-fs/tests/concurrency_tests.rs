//! Concurrent access tests for write_atomic
//!
//! Concurrent writers to the same storage file must never interleave;
//! a reader always sees one complete write.

use cfgsync_fs::{NormalizedPath, io};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

#[test]
fn test_racing_writers_leave_one_whole_document() {
    const WRITERS: usize = 8;
    const ROUNDS: usize = 20;

    let dir = tempdir().unwrap();
    let target = dir.path().join("settings.json");
    let shared = Arc::new(NormalizedPath::new(&target));
    let start = Arc::new(Barrier::new(WRITERS));

    let workers: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let (shared, start) = (Arc::clone(&shared), Arc::clone(&start));
            thread::spawn(move || {
                start.wait();
                for round in 0..ROUNDS {
                    io::write_text(&shared, &format!("{{\"writer\": {writer}, \"round\": {round}}}\n"))
                        .expect("Should write");
                }
            })
        })
        .collect();
    workers
        .into_iter()
        .for_each(|w| w.join().expect("Writer should not panic"));

    let last = io::read_text(&shared).unwrap();
    assert!(last.starts_with("{\"writer\": "), "torn write: {last}");
    assert_eq!(last.lines().count(), 1, "interleaved writes: {last}");
    assert!(
        std::fs::read_dir(dir.path()).unwrap().count() == 1,
        "temp files left behind"
    );
}

#[test]
fn test_concurrent_create_empty_reports_single_creator() {
    let dir = tempdir().unwrap();
    let path = Arc::new(NormalizedPath::new(dir.path().join("nested/settings.json")));
    let num_threads = 6;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|_| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                io::create_empty(&path).unwrap()
            })
        })
        .collect();

    let created: usize = handles
        .into_iter()
        .map(|h| h.join().expect("Thread should not panic"))
        .filter(|created| *created)
        .count();

    assert_eq!(created, 1, "Exactly one thread should create the file");
}
