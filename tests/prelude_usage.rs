use canon_rename::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn prelude_covers_a_whole_batch() {
    let td = tempdir().unwrap();
    fs::create_dir_all(td.path().join("dự án/bản nháp")).unwrap();

    let mut roots = RootSet::new();
    roots.add(&td.path().display().to_string()).unwrap();

    let cands: Vec<CandidateEntry> =
        enumerate(roots.as_slice(), KindFilter::default(), DepthMode::All).unwrap();
    assert!(cands.iter().all(|c| c.kind == EntryKind::Directory));

    let ops: Vec<PlannedOperation> = plan(cands, true);
    assert_eq!(preview(&ops).len(), 2);

    let applied: Vec<AppliedOperation> = apply(ops, CollisionPolicy::Suffix);
    assert!(applied.iter().all(|a| a.outcome == Outcome::Renamed));
    assert!(td.path().join("DU_AN/BAN_NHAP").is_dir());
    assert_eq!(BatchSummary::from_applied(&applied).renamed, 2);
    let rows: Vec<ExportRecord> = applied.iter().map(ExportRecord::from_applied).collect();
    assert_eq!(rows.len(), 2);

    let results = undo(&applied);
    assert_eq!(UndoSummary::from_results(&results).undone, 2);
    assert!(results.iter().all(|r| r.outcome == UndoOutcome::Undone));
    assert!(td.path().join("dự án/bản nháp").is_dir());

    let log = UndoLog::new(applied);
    assert_eq!(log.len(), 2);
}

#[test]
fn prelude_exposes_error_type() {
    let err: CanonError = RootSet::new().add("").unwrap_err();
    assert!(matches!(err, CanonError::InvalidRoot(_)));
}
