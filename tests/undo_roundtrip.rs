use assert_fs::prelude::*;
use canon_rename::{
    apply, enumerate, plan, CollisionPolicy, DepthMode, KindFilter, UndoLog, UndoOutcome,
};
use std::fs;
use std::path::Path;

fn listing(root: &Path) -> Vec<String> {
    let mut out: Vec<String> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| {
            let e = e.unwrap();
            e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/")
        })
        .collect();
    out.sort();
    out
}

#[test]
fn suffix_batch_round_trips_through_undo() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("ảnh-cũ/tháng 1").create_dir_all().unwrap();
    td.child("ảnh-cũ/tháng 1/ghi chú.txt").write_str("note").unwrap();
    td.child("ANH_CU").create_dir_all().unwrap();
    let before = listing(td.path());

    let cands = enumerate(&[td.path()], KindFilter::new(true, true), DepthMode::All).unwrap();
    let applied = apply(plan(cands, true), CollisionPolicy::Suffix);
    assert!(td.path().join("ANH_CU_1/THANG_1/GHI_CHU.TXT").is_file());

    let mut log = UndoLog::new(applied);
    let results = log.undo();
    assert!(results.iter().all(|r| r.outcome == UndoOutcome::Undone), "{results:?}");
    assert_eq!(listing(td.path()), before);
    assert!(log.undo().is_empty());
}

#[test]
fn delete_batch_restores_renamed_entry() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("NOTES").write_str("old").unwrap();
    td.child("notes").write_str("new").unwrap();

    let cands = enumerate(&[td.path()], KindFilter::new(false, true), DepthMode::Level1).unwrap();
    let mut log = UndoLog::new(apply(plan(cands, true), CollisionPolicy::Delete));
    let results = log.undo();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, UndoOutcome::Undone);
    // The deleted target is gone for good; the renamed entry is back.
    assert_eq!(fs::read_to_string(td.path().join("notes")).unwrap(), "new");
    assert!(!td.path().join("NOTES").exists());
}

#[test]
fn merged_state_is_left_alone() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("DOCS/a.txt").write_str("a").unwrap();
    td.child("docs/b.txt").write_str("b").unwrap();

    let cands = enumerate(&[td.path()], KindFilter::new(true, false), DepthMode::Level1).unwrap();
    let mut log = UndoLog::new(apply(plan(cands, true), CollisionPolicy::Merge));
    let after_merge = listing(td.path());

    let results = log.undo();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].outcome, UndoOutcome::SkippedMerge);
    assert_eq!(listing(td.path()), after_merge);
}

#[test]
fn entry_moved_away_reports_missing() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("x").create_dir_all().unwrap();
    let cands = enumerate(&[td.path()], KindFilter::new(true, false), DepthMode::Level1).unwrap();
    let mut log = UndoLog::new(apply(plan(cands, true), CollisionPolicy::Suffix));
    fs::remove_dir(td.path().join("X")).unwrap();

    let results = log.undo();
    assert_eq!(results[0].outcome, UndoOutcome::MissingActual);
}
