use fs_xattr::XattrError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Namespace prefix for attribute names on this platform
///
/// FreeBSD takes the namespace as a separate argument, so names carry no prefix.
#[cfg(not(target_os = "freebsd"))]
pub const USER_PREFIX: &str = "user.";
#[cfg(target_os = "freebsd")]
pub const USER_PREFIX: &str = "";

/// Build a user-namespace attribute name
#[allow(dead_code)]
pub fn attr(name: &str) -> String {
    format!("{USER_PREFIX}{name}")
}

/// Scratch directory on the target filesystem
///
/// `/tmp` is often tmpfs, which lacks user xattrs on older kernels; the cargo
/// target directory is on a real disk.
pub fn scratch_dir() -> TempDir {
    TempDir::new_in(env!("CARGO_TARGET_TMPDIR")).unwrap()
}

/// Create a regular file with some content
pub fn scratch_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, "test content").unwrap();
    path
}

/// Check whether the filesystem holding `path` takes user xattrs
pub fn xattrs_supported(path: &Path) -> bool {
    let probe = attr("test_support");
    match fs_xattr::set(path, &probe, b"test") {
        Ok(()) => {
            let _ = fs_xattr::remove(path, &probe);
            true
        }
        Err(e) if e.is_unsupported() => false,
        Err(e) => panic!("unexpected error probing xattr support: {e}"),
    }
}

/// Skip the calling test when xattrs are not available
#[allow(unused_macros)]
macro_rules! require_xattrs {
    ($path:expr) => {
        if !common::xattrs_supported($path) {
            println!("Extended attributes not supported on this filesystem - test skipped");
            return;
        }
    };
}

/// Names in the user namespace, dropping `security.*` and friends the
/// platform may attach on its own (SELinux labels, for one)
#[allow(dead_code)]
pub fn user_names(names: Vec<OsString>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| n.starts_with(USER_PREFIX))
        .collect()
}

/// The raw errno of a failed call
#[allow(dead_code)]
pub fn errno_of<T: std::fmt::Debug>(result: Result<T, XattrError>) -> i32 {
    result
        .unwrap_err()
        .raw_os_error()
        .expect("error should carry an errno")
}
