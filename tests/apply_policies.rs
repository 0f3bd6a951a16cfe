use assert_fs::prelude::*;
use canon_rename::{apply, enumerate, plan, CollisionPolicy, DepthMode, KindFilter, Outcome};
use std::fs;

fn plan_files(td: &assert_fs::TempDir) -> Vec<canon_rename::PlannedOperation> {
    let cands = enumerate(&[td.path()], KindFilter::new(false, true), DepthMode::Level1).unwrap();
    plan(cands, true)
}

#[test]
fn suffix_policy_keeps_both() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("x-1").write_str("first").unwrap();
    td.child("x 1").write_str("second").unwrap();

    let applied = apply(plan_files(&td), CollisionPolicy::Suffix);
    assert_eq!(applied.len(), 2);
    // File-name order: "x 1" sorts before "x-1".
    assert_eq!(applied[0].outcome, Outcome::Renamed);
    assert_eq!(applied[0].actual_target, td.path().join("X_1"));
    assert_eq!(applied[1].outcome, Outcome::RenamedWithSuffix);
    assert_eq!(applied[1].actual_target, td.path().join("X_1_1"));
    td.child("X_1").assert("second");
    td.child("X_1_1").assert("first");
}

#[test]
fn delete_policy_replaces_existing_file() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("REPORT").write_str("old").unwrap();
    td.child("report").write_str("new").unwrap();

    let applied = apply(plan_files(&td), CollisionPolicy::Delete);
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].outcome, Outcome::DeletedThenRenamed);
    td.child("REPORT").assert("new");
    assert!(!td.path().join("report").exists());
}

#[test]
fn merge_policy_on_identical_and_different_files() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("SAME").write_str("payload").unwrap();
    td.child("same").write_str("payload").unwrap();
    td.child("DIFF").write_str("theirs").unwrap();
    td.child("diff").write_str("mine").unwrap();

    let applied = apply(plan_files(&td), CollisionPolicy::Merge);
    let by_src = |name: &str| {
        applied
            .iter()
            .find(|a| a.source.path == td.path().join(name))
            .unwrap()
    };

    let same = by_src("same");
    assert_eq!(same.outcome, Outcome::MergedSkippedIdentical);
    assert_eq!(same.actual_target, td.path().join("SAME"));
    assert!(!td.path().join("same").exists());
    td.child("SAME").assert("payload");

    let diff = by_src("diff");
    assert_eq!(diff.outcome, Outcome::MergedKeptBothWithSuffix);
    assert_eq!(diff.actual_target, td.path().join("DIFF_1"));
    td.child("DIFF").assert("theirs");
    td.child("DIFF_1").assert("mine");
}

#[test]
fn merge_policy_on_directories() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("PHOTOS/a.jpg").write_str("A").unwrap();
    td.child("PHOTOS/b.jpg").write_str("B-theirs").unwrap();
    td.child("photos/b.jpg").write_str("B-mine").unwrap();
    td.child("photos/c.jpg").write_str("C").unwrap();
    td.child("photos/a.jpg").write_str("A").unwrap();

    let cands = enumerate(&[td.path()], KindFilter::new(true, false), DepthMode::Level1).unwrap();
    let applied = apply(plan(cands, true), CollisionPolicy::Merge);
    assert_eq!(applied.len(), 1);
    let merged = &applied[0];
    assert_eq!(merged.outcome, Outcome::Merged);
    let stats = merged.merge_stats.unwrap();
    assert_eq!(stats.moved, 1);
    assert_eq!(stats.deduplicated, 1);
    assert_eq!(stats.kept_both_conflicts, 1);
    assert_eq!(stats.errors, 0);

    td.child("PHOTOS/a.jpg").assert("A");
    td.child("PHOTOS/b.jpg").assert("B-theirs");
    td.child("PHOTOS/b.jpg_1").assert("B-mine");
    td.child("PHOTOS/c.jpg").assert("C");
    assert!(!td.path().join("photos").exists());
}

#[test]
fn vanished_source_is_recorded_as_error() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("gone").write_str("x").unwrap();
    td.child("kept").write_str("y").unwrap();
    let ops = plan_files(&td);
    fs::remove_file(td.path().join("gone")).unwrap();

    let applied = apply(ops, CollisionPolicy::Suffix);
    assert_eq!(applied[0].outcome, Outcome::Error);
    assert_eq!(applied[0].actual_target, td.path().join("gone"));
    assert!(applied[0].error.as_deref().unwrap().contains("gone"));
    assert_eq!(applied[1].outcome, Outcome::Renamed);
}
