//! Temp-file-and-rename writes so readers never observe a partial document.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};
use uuid::Uuid;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` inside `dir` with `contents` in one rename.
///
/// The temporary file is created next to the target so the rename never
/// crosses a filesystem boundary. On failure the temporary file is removed
/// and the previous target, if any, is left untouched.
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{file_name}' is not a plain file name"),
        ));
    }
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.{}.{counter}.tmp", Uuid::new_v4().simple());

    if let Err(err) = write_temp(dir, &tmp_name, contents) {
        remove_quietly(dir, &tmp_name);
        return Err(err);
    }
    if let Err(err) = replace(dir, &tmp_name, file_name) {
        remove_quietly(dir, &tmp_name);
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    // Windows refuses to rename over an existing file.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}

fn remove_quietly(dir: &Dir, name: &str) {
    if dir.remove_file(name).is_err() {
        // Already gone or never created.
    }
}

fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Directory fsync is advisory on some platforms.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;
    use rstest::rstest;

    fn temp_dir() -> (tempfile::TempDir, Dir) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open dir");
        (tmp, dir)
    }

    #[rstest]
    fn replaces_existing_contents_without_leftovers() {
        let (_guard, dir) = temp_dir();
        write_atomic(&dir, "users.json", b"[1]").expect("first write");
        write_atomic(&dir, "users.json", b"[1,2]").expect("second write");

        assert_eq!(dir.read_to_string("users.json").expect("read"), "[1,2]");
        let names: Vec<_> = dir
            .entries()
            .expect("entries")
            .map(|entry| entry.expect("entry").file_name())
            .collect();
        assert_eq!(names, ["users.json"]);
    }

    #[rstest]
    #[case("../escape.json")]
    #[case("nested/users.json")]
    #[case(".hidden")]
    fn rejects_non_plain_names(#[case] name: &str) {
        let (_guard, dir) = temp_dir();
        let err = write_atomic(&dir, name, b"[]").expect_err("must reject");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
