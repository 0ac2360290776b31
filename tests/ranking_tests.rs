//! File-backed leaderboard tests.

use std::fs;
use std::sync::Arc;
use std::thread;

use lights_out::ranking::{FileBackend, RankingError, RankingStore, DEFAULT_CAPACITY};
use proptest::prelude::*;
use tempfile::TempDir;

fn file_store() -> (TempDir, RankingStore<FileBackend>) {
    let dir = tempfile::tempdir().unwrap();
    let store = RankingStore::new(FileBackend::new(dir.path().join("ranking.txt")));
    (dir, store)
}

fn names(store: &RankingStore<FileBackend>) -> Vec<String> {
    store.load().unwrap().into_iter().map(|e| e.name).collect()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_missing_file_creates_it() {
    let (dir, store) = file_store();

    assert!(store.load().unwrap().is_empty());
    assert!(dir.path().join("ranking.txt").exists());
}

#[test]
fn test_load_empty_file() {
    let (dir, store) = file_store();
    fs::write(dir.path().join("ranking.txt"), "").unwrap();

    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_load_valid_entries_sorted() {
    let (dir, store) = file_store();
    fs::write(
        dir.path().join("ranking.txt"),
        "PlayerA,10,2023-01-01 12:00:00\nPlayerC,15,2023-01-03 14:00:00\nPlayerB,5,2023-01-02 10:00:00\n",
    )
    .unwrap();

    let entries = store.load().unwrap();
    assert_eq!(names(&store), ["PlayerB", "PlayerA", "PlayerC"]);
    assert_eq!(entries[0].timestamp, "2023-01-02 10:00:00");
}

#[test]
fn test_load_unreadable_path_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be.
    let store = RankingStore::new(FileBackend::new(dir.path()));

    assert!(matches!(store.load(), Err(RankingError::Storage(_))));
}

// =============================================================================
// Submitting
// =============================================================================

#[test]
fn test_three_players_in_order() {
    let (_dir, store) = file_store();

    store.submit("PlayerA", 10, None).unwrap();
    store.submit("PlayerB", 5, None).unwrap();
    store.submit("PlayerC", 20, None).unwrap();

    let entries = store.load().unwrap();
    let summary: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.moves)).collect();
    assert_eq!(summary, [("PlayerB", 5), ("PlayerA", 10), ("PlayerC", 20)]);
}

#[test]
fn test_full_list_evicts_worst() {
    let (_dir, store) = file_store();
    for i in 0..10u32 {
        store
            .submit(&format!("Player{i}"), (i + 1) * 10, Some(format!("2023-01-01 10:0{i}:00")))
            .unwrap();
    }

    let submission = store.submit("NewBest", 95, Some("2023-02-01 10:00:00".into())).unwrap();
    assert_eq!(submission.rank, Some(10));

    let entries = store.load().unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[9].name, "NewBest");
    assert!(!entries.iter().any(|e| e.moves == 100));
}

#[test]
fn test_full_list_rejects_worse_score() {
    let (_dir, store) = file_store();
    for i in 0..10u32 {
        store.submit(&format!("Player{i}"), (i + 1) * 5, None).unwrap();
    }

    let submission = store.submit("WorsePlayer", 55, None).unwrap();
    assert_eq!(submission.rank, None);

    assert_eq!(store.load().unwrap().len(), 10);
    assert!(!names(&store).contains(&"WorsePlayer".to_string()));
}

#[test]
fn test_timestamp_cannot_add_records() {
    let (dir, store) = file_store();
    for i in 0..10u32 {
        store.submit(&format!("Player{i}"), (i + 1) * 10, None).unwrap();
    }

    let result = store.submit(
        "X",
        2,
        Some("2024-01-01 00:00:00\nInjected,1,2024-01-01 00:00:00".into()),
    );
    assert!(matches!(result, Err(RankingError::InvalidTimestamp)));
    assert!(matches!(
        store.submit("Comma", 1, Some("2024,01".into())),
        Err(RankingError::InvalidTimestamp)
    ));

    assert_eq!(store.load().unwrap().len(), 10);
    assert_eq!(
        fs::read_to_string(dir.path().join("ranking.txt")).unwrap().lines().count(),
        10
    );
    assert!(!names(&store).iter().any(|n| n == "Injected" || n == "Comma"));
}

#[test]
fn test_name_trimmed() {
    let (_dir, store) = file_store();
    store.submit("  PlayerX  ", 5, None).unwrap();
    assert_eq!(names(&store), ["PlayerX"]);
}

#[test]
fn test_long_name_truncated() {
    let (_dir, store) = file_store();
    store.submit(&"A".repeat(60), 10, None).unwrap();
    assert_eq!(names(&store), ["A".repeat(50)]);
}

#[test]
fn test_whitespace_name_not_persisted() {
    let (dir, store) = file_store();

    assert!(matches!(store.submit("   ", 15, None), Err(RankingError::EmptyName)));
    assert!(store.load().unwrap().is_empty());

    store.submit("ValidPlayer", 20, None).unwrap();
    assert_eq!(names(&store), ["ValidPlayer"]);
    assert_eq!(
        fs::read_to_string(dir.path().join("ranking.txt")).unwrap().lines().count(),
        1
    );
}

#[test]
fn test_file_format() {
    let (dir, store) = file_store();
    store.submit("Ana", 7, Some("2024-03-01 09:30:00".into())).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("ranking.txt")).unwrap(),
        "Ana,7,2024-03-01 09:30:00\n"
    );
}

#[test]
fn test_malformed_lines_dropped_on_rewrite() {
    let (dir, store) = file_store();
    let path = dir.path().join("ranking.txt");
    fs::write(&path, "broken line\nAna,3,2024-01-01 00:00:00\n").unwrap();

    store.submit("Bob", 4, Some("2024-01-02 00:00:00".into())).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Ana,3,2024-01-01 00:00:00\nBob,4,2024-01-02 00:00:00\n"
    );
}

// =============================================================================
// Concurrency
// =============================================================================

/// Concurrent submitters do not lose each other's entries.
#[test]
fn test_concurrent_submissions_serialize() {
    let (_dir, store) = file_store();
    let store = Arc::new(store.with_capacity(64));

    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..5u32 {
                    store.submit(&format!("T{t}-{i}"), t * 10 + i + 1, None).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.load().unwrap().len(), 40);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any sequence of submissions leaves a sorted list within capacity.
    #[test]
    fn prop_sorted_and_bounded(scores in prop::collection::vec(1u32..500, 0..25)) {
        let (_dir, store) = file_store();
        for (i, moves) in scores.iter().enumerate() {
            store.submit(&format!("P{i}"), *moves, None).unwrap();
        }

        let entries = store.load().unwrap();
        prop_assert!(entries.len() <= DEFAULT_CAPACITY);
        prop_assert_eq!(entries.len(), scores.len().min(DEFAULT_CAPACITY));
        prop_assert!(entries.windows(2).all(|w| w[0].moves <= w[1].moves));

        let mut best = scores.clone();
        best.sort_unstable();
        best.truncate(DEFAULT_CAPACITY);
        let kept: Vec<_> = entries.iter().map(|e| e.moves).collect();
        prop_assert_eq!(kept, best);
    }
}
