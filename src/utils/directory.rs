use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Lists the direct children of `dir`, sorted by file name.
/// Fails on the first entry that cannot be read, so callers never see a partial listing.
pub fn get_direct_children(dir: &Path) -> io::Result<Vec<DirEntry>> {
    if !dir.metadata()?.is_dir() {
        return Err(io::Error::other("not a directory"));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        entries.push(entry?);
    }
    Ok(entries)
}

/// Base name of the running binary, if the platform can tell us.
pub fn running_executable_name() -> Option<OsString> {
    env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_os_string()))
}

/// Name of `path` inside an archive rooted at `root`'s parent,
/// so the root folder's own name prefixes every entry.
pub fn archive_entry_name(path: &Path, root: &Path) -> Option<PathBuf> {
    let base = root.parent()?;
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_direct_children_are_sorted_and_shallow() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("c")).unwrap();
        fs::write(temp.path().join("c").join("nested.txt"), "n").unwrap();

        let names: Vec<_> = get_direct_children(temp.path())
            .unwrap()
            .into_iter()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
    }

    #[test]
    fn test_direct_children_of_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let result = get_direct_children(&temp.path().join("missing"));
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_direct_children_of_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(get_direct_children(&file).is_err());
    }

    #[test]
    fn test_archive_entry_name() {
        let root = Path::new("/data/src/bak");
        assert_eq!(
            archive_entry_name(Path::new("/data/src/bak/notes/a.txt"), root),
            Some(PathBuf::from("bak/notes/a.txt"))
        );
        assert_eq!(archive_entry_name(root, root), Some(PathBuf::from("bak")));
        assert_eq!(archive_entry_name(Path::new("/elsewhere/x"), root), None);
    }

    #[test]
    fn test_archive_entry_name_with_relative_root() {
        let root = Path::new("./bak");
        assert_eq!(
            archive_entry_name(Path::new("./bak/report.txt"), root),
            Some(PathBuf::from("bak/report.txt"))
        );
    }

    #[test]
    fn test_running_executable_name_is_known() {
        assert!(running_executable_name().is_some());
    }
}
