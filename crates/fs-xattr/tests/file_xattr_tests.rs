//! Tests for descriptor-based xattr operations (XattrOps)

#[macro_use]
mod common;

use common::{attr, scratch_dir, scratch_file, user_names};
use fs_xattr::{Operation, SetMode, Target, XattrOps};
use std::fs::{File, OpenOptions};
use std::os::fd::{AsFd, AsRawFd};

fn open_rw(path: &std::path::Path) -> File {
    OpenOptions::new().read(true).write(true).open(path).unwrap()
}

#[test]
fn test_file_xattr_round_trip() {
    let temp_dir = scratch_dir();
    let path = scratch_file(&temp_dir, "source.txt");
    require_xattrs!(&path);

    let file = open_rw(&path);
    file.set_xattr(attr("test"), b"test_value").unwrap();
    file.set_xattr(attr("description"), b"Test file for xattr preservation")
        .unwrap();

    assert_eq!(file.get_xattr(attr("test")).unwrap(), b"test_value");
    assert_eq!(
        file.get_xattr(attr("description")).unwrap(),
        b"Test file for xattr preservation"
    );

    // Visible through the path API too
    assert_eq!(fs_xattr::get(&path, attr("test")).unwrap(), b"test_value");
}

#[test]
fn test_file_xattr_list_and_remove() {
    let temp_dir = scratch_dir();
    let path = scratch_file(&temp_dir, "source.txt");
    require_xattrs!(&path);

    let file = open_rw(&path);
    assert!(user_names(file.list_xattr().unwrap()).is_empty());

    let names = ["one", "two", "three"].map(attr);
    for name in &names {
        file.set_xattr(name, b"v").unwrap();
    }
    let mut listed = user_names(file.list_xattr().unwrap());
    listed.sort();
    let mut expected = names.to_vec();
    expected.sort();
    assert_eq!(listed, expected);

    file.remove_xattr(&names[1]).unwrap();
    assert!(!user_names(file.list_xattr().unwrap()).contains(&names[1]));
}

#[test]
fn test_file_xattr_modes() {
    let temp_dir = scratch_dir();
    let path = scratch_file(&temp_dir, "source.txt");
    require_xattrs!(&path);

    let file = open_rw(&path);
    let name = attr("mode");
    assert!(file
        .set_xattr_with_mode(&name, b"x", SetMode::Replace)
        .unwrap_err()
        .is_not_found());
    file.set_xattr_with_mode(&name, b"x", SetMode::Create).unwrap();
    let err = file
        .set_xattr_with_mode(&name, b"y", SetMode::Create)
        .unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EEXIST));
    assert_eq!(err.op(), Operation::FSet);
}

#[test]
fn test_file_xattr_large_value() {
    let temp_dir = scratch_dir();
    let path = scratch_file(&temp_dir, "large.txt");
    require_xattrs!(&path);

    let file = open_rw(&path);
    let value = vec![0xA5u8; 2000];
    file.set_xattr(attr("large"), &value).unwrap();
    assert_eq!(file.get_xattr(attr("large")).unwrap(), value);
}

#[test]
fn test_file_xattr_error_reports_descriptor() {
    let temp_dir = scratch_dir();
    let path = scratch_file(&temp_dir, "source.txt");
    require_xattrs!(&path);

    let file = open_rw(&path);
    let err = file.get_xattr(attr("missing")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.op(), Operation::FGet);
    assert_eq!(err.target(), &Target::Fd(file.as_raw_fd()));
}

/// Borrowed descriptors work the same as owned files
#[test]
fn test_borrowed_fd() {
    let temp_dir = scratch_dir();
    let path = scratch_file(&temp_dir, "source.txt");
    require_xattrs!(&path);

    let file = open_rw(&path);
    let fd = file.as_fd();
    fd.set_xattr(attr("borrowed"), b"yes").unwrap();
    assert_eq!(fd.get_xattr(attr("borrowed")).unwrap(), b"yes");
}

/// The descriptor stays bound to the original file after a rename
#[test]
fn test_descriptor_survives_rename() {
    let temp_dir = scratch_dir();
    let path = scratch_file(&temp_dir, "before.txt");
    require_xattrs!(&path);

    let file = open_rw(&path);
    let renamed = temp_dir.path().join("after.txt");
    std::fs::rename(&path, &renamed).unwrap();

    file.set_xattr(attr("moved"), b"still here").unwrap();
    assert_eq!(fs_xattr::get(&renamed, attr("moved")).unwrap(), b"still here");
}
