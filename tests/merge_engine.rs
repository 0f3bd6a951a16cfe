use assert_fs::prelude::*;
use canon_rename::merge_into;
use std::fs;

#[test]
fn deep_merge_counts_every_child_once() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("src/a/b/c/leaf.txt").write_str("leaf").unwrap();
    td.child("src/a/b/dup.bin").write_binary(&[0u8; 4096]).unwrap();
    td.child("src/a/new.txt").write_str("n").unwrap();
    td.child("dst/a/b/dup.bin").write_binary(&[0u8; 4096]).unwrap();
    td.child("dst/a/b/c/other.txt").write_str("o").unwrap();

    let stats = merge_into(&td.path().join("src"), &td.path().join("dst"));
    assert_eq!(stats.moved, 2, "{stats:?}");
    assert_eq!(stats.deduplicated, 1);
    assert_eq!(stats.kept_both_conflicts, 0);
    assert_eq!(stats.errors, 0);

    td.child("dst/a/b/c/leaf.txt").assert("leaf");
    td.child("dst/a/b/c/other.txt").assert("o");
    td.child("dst/a/new.txt").assert("n");
    assert!(!td.path().join("src").exists());
}

#[test]
fn same_size_different_content_is_kept_twice() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("src/f").write_str("aaaa").unwrap();
    td.child("dst/f").write_str("bbbb").unwrap();
    td.child("dst/f_1").write_str("taken").unwrap();

    let stats = merge_into(&td.path().join("src"), &td.path().join("dst"));
    assert_eq!(stats.kept_both_conflicts, 1);
    td.child("dst/f").assert("bbbb");
    td.child("dst/f_1").assert("taken");
    td.child("dst/f_2").assert("aaaa");
}

#[test]
fn file_against_directory_is_kept_with_suffix() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("src/thing").create_dir_all().unwrap();
    td.child("src/thing/inner").write_str("i").unwrap();
    td.child("dst/thing").write_str("file").unwrap();

    let stats = merge_into(&td.path().join("src"), &td.path().join("dst"));
    assert_eq!(stats.kept_both_conflicts, 1);
    td.child("dst/thing").assert("file");
    td.child("dst/thing_1/inner").assert("i");
}

#[cfg(unix)]
#[test]
fn unreadable_subdirectory_is_counted_and_left_behind() {
    use std::os::unix::fs::PermissionsExt;

    let td = assert_fs::TempDir::new().unwrap();
    td.child("src/locked/x").write_str("x").unwrap();
    td.child("dst/locked/y").write_str("y").unwrap();
    let locked = td.path().join("src/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Running with privileges that bypass permission bits.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let stats = merge_into(&td.path().join("src"), &td.path().join("dst"));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(stats.errors, 1);
    assert!(td.path().join("src/locked/x").exists());
    td.child("dst/locked/y").assert("y");
}

#[cfg(target_os = "linux")]
#[test]
fn keep_both_across_devices_counts_a_conflict() {
    use std::os::unix::fs::MetadataExt;

    let Ok(src_base) = tempfile::tempdir_in("/dev/shm") else {
        return;
    };
    let dst_base = assert_fs::TempDir::new().unwrap();
    let src_dev = fs::metadata(src_base.path()).unwrap().dev();
    let dst_dev = fs::metadata(dst_base.path()).unwrap().dev();
    if src_dev == dst_dev {
        // Both temp locations share a filesystem; nothing crosses a device.
        return;
    }

    fs::write(src_base.path().join("f"), "mine").unwrap();
    fs::write(src_base.path().join("only_src"), "s").unwrap();
    dst_base.child("f").write_str("theirs").unwrap();

    let stats = merge_into(src_base.path(), dst_base.path());
    assert_eq!(stats.kept_both_conflicts, 1, "{stats:?}");
    assert_eq!(stats.copied, 1, "{stats:?}");
    assert_eq!(stats.errors, 0);
    dst_base.child("f").assert("theirs");
    dst_base.child("f_1").assert("mine");
    dst_base.child("only_src").assert("s");
}
