use assert_fs::prelude::*;
use canon_rename::{enumerate, DepthMode, EntryKind, KindFilter};

fn tree() -> assert_fs::TempDir {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("a/b/c").create_dir_all().unwrap();
    td.child("a/file-1.txt").write_str("1").unwrap();
    td.child("a/b/file-2.txt").write_str("2").unwrap();
    td.child("top.txt").write_str("t").unwrap();
    td
}

#[test]
fn depth_and_kind_filters_combine() {
    let td = tree();
    let roots = [td.path()];

    let dirs_all = enumerate(&roots, KindFilter::new(true, false), DepthMode::All).unwrap();
    assert_eq!(dirs_all.len(), 3);
    assert!(dirs_all.iter().all(|c| c.kind == EntryKind::Directory));

    let files_l2 = enumerate(&roots, KindFilter::new(false, true), DepthMode::Level2).unwrap();
    assert_eq!(files_l2.len(), 1);
    assert!(files_l2[0].path.ends_with("a/file-1.txt"));

    let both_up_to_2 = enumerate(&roots, KindFilter::new(true, true), DepthMode::UpToLevel2).unwrap();
    // a, top.txt, a/b, a/file-1.txt
    assert_eq!(both_up_to_2.len(), 4);
    assert!(both_up_to_2.iter().all(|c| c.depth <= 2));
}

#[test]
fn several_roots_keep_their_own_root() {
    let one = tree();
    let two = assert_fs::TempDir::new().unwrap();
    two.child("x").create_dir_all().unwrap();
    let found = enumerate(&[one.path(), two.path()], KindFilter::new(true, false), DepthMode::Level1).unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].root, one.path());
    assert_eq!(found[1].root, two.path());
}

#[test]
fn empty_kind_filter_is_a_configuration_error() {
    let err = KindFilter::new(false, false).validate().unwrap_err();
    assert!(err.is_configuration());
}
