use std::collections::BTreeSet;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::common::constants::{DEFAULT_SIZE_CEILING, RESERVED_FILE_NAMES};

/// A single file discovered during traversal: its absolute path and size.
///
/// Entries are transient — the set is rebuilt from scratch for every
/// attack/release run, never cached across runs.
//
// // 遍历期间发现的单个文件：绝对路径与大小。
// // 条目是临时的，每次攻击/恢复运行都会重新构建，绝不跨运行缓存。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FileEntry {
    /// Canonical absolute path of the file.
    // // 文件的规范化绝对路径。
    pub path: PathBuf,

    /// File size in bytes at discovery time.
    // // 发现时的文件大小（字节）。
    pub size: u64,
}

/// Predicate deciding whether a file is hidden and must be skipped.
/// Supplied at construction so platform variants and tests can swap it.
pub type HiddenPredicate = fn(&Path, &Metadata) -> bool;

/// Enumerates the files eligible for a batch run under a set of roots.
///
/// Exclusion policy, in order: reserved names ([`RESERVED_FILE_NAMES`]),
/// the hidden-file predicate, then the size ceiling. Directories are always
/// descended into; only files are filtered. Every traversal error is logged
/// and skipped — `collect` never fails, it returns whatever it gathered.
//
// // 在一组根目录下枚举符合批处理条件的文件。
// // 排除顺序：保留名称、隐藏文件判定、大小上限。目录总是被递归进入，
// // 只有文件会被过滤。所有遍历错误都记录并跳过，`collect` 永不失败。
pub struct PathCollector {
    size_ceiling: u64,
    is_hidden: HiddenPredicate,
}

impl Default for PathCollector {
    fn default() -> Self {
        PathCollector::new(DEFAULT_SIZE_CEILING)
    }
}

impl PathCollector {
    /// 创建一个收集器，使用平台默认的隐藏文件判定。
    pub fn new(size_ceiling: u64) -> Self {
        PathCollector {
            size_ceiling,
            is_hidden: platform_hidden,
        }
    }

    /// Replaces the hidden-file predicate.
    pub fn with_visibility(mut self, is_hidden: HiddenPredicate) -> Self {
        self.is_hidden = is_hidden;
        self
    }

    /// Walks every root and returns the deduplicated set of eligible files.
    ///
    /// Roots that do not exist, unreadable subtrees and entries vanishing
    /// mid-walk are logged and skipped; siblings keep being traversed.
    /// Symbolic links are not followed, so cyclic links cannot loop.
    pub fn collect(&self, roots: &[PathBuf]) -> BTreeSet<FileEntry> {
        let mut files = BTreeSet::new();

        for root in roots {
            debug!(root = %root.display(), "collecting files");

            for entry in WalkDir::new(root).follow_links(false) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                        continue;
                    }
                };

                if !entry.file_type().is_file() {
                    continue;
                }

                let name = entry.file_name().to_string_lossy();
                if RESERVED_FILE_NAMES.contains(&name.as_ref()) {
                    continue;
                }

                let metadata = match entry.metadata() {
                    Ok(metadata) => metadata,
                    Err(err) => {
                        warn!(path = %entry.path().display(), error = %err, "skipping file without metadata");
                        continue;
                    }
                };

                if (self.is_hidden)(entry.path(), &metadata) {
                    continue;
                }

                if metadata.len() > self.size_ceiling {
                    debug!(path = %entry.path().display(), size = metadata.len(), "skipping oversize file");
                    continue;
                }

                // Canonical form so a file reachable through more than one
                // root appears exactly once.
                let path = match entry.path().canonicalize() {
                    Ok(path) => path,
                    Err(err) => {
                        warn!(path = %entry.path().display(), error = %err, "skipping file that vanished mid-walk");
                        continue;
                    }
                };

                files.insert(FileEntry {
                    path,
                    size: metadata.len(),
                });
            }
        }

        files
    }
}

/// Windows exposes hidden/system attribute bits on file metadata.
#[cfg(windows)]
fn platform_hidden(_path: &Path, metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

    metadata.file_attributes() & (FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM) != 0
}

/// On unix-likes the convention is a leading dot in the file name.
#[cfg(not(windows))]
fn platform_hidden(path: &Path, _metadata: &Metadata) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn paths(files: &BTreeSet<FileEntry>) -> Vec<String> {
        files
            .iter()
            .filter_map(|entry| entry.path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    /// 测试：保留名称 (readme.txt / thekey.key) 永远不会被收集。
    #[test]
    fn test_reserved_names_are_excluded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep me").unwrap();
        fs::write(dir.path().join("readme.txt"), "marker").unwrap();
        fs::write(dir.path().join("thekey.key"), "legacy").unwrap();

        let files = PathCollector::new(1024).collect(&[dir.path().to_path_buf()]);

        assert_eq!(paths(&files), vec!["notes.txt"]);
    }

    /// 测试：超过大小上限的文件被排除，等于上限的文件被保留。
    #[test]
    fn test_size_ceiling_is_enforced() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("at_limit.bin"), vec![0u8; 64]).unwrap();
        fs::write(dir.path().join("oversize.bin"), vec![0u8; 65]).unwrap();

        let files = PathCollector::new(64).collect(&[dir.path().to_path_buf()]);

        assert_eq!(paths(&files), vec!["at_limit.bin"]);
    }

    /// 测试：隐藏文件按平台判定被排除，但隐藏目录依旧被递归进入。
    #[cfg(unix)]
    #[test]
    fn test_hidden_files_are_excluded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("visible.txt"), "a").unwrap();
        fs::write(dir.path().join(".hidden"), "b").unwrap();

        let nested = dir.path().join(".config");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inside.txt"), "c").unwrap();

        let files = PathCollector::new(1024).collect(&[dir.path().to_path_buf()]);
        let mut names = paths(&files);
        names.sort();

        assert_eq!(names, vec!["inside.txt", "visible.txt"]);
    }

    /// 测试：子目录不可读时，其余可读部分照常返回。
    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("reachable.txt"), "ok").unwrap();

        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("unreachable.txt"), "no").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users ignore permission bits, the scenario cannot be
        // simulated then.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let files = PathCollector::new(1024).collect(&[dir.path().to_path_buf()]);

        // Restore so the tempdir can be cleaned up.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(paths(&files), vec!["reachable.txt"]);
    }

    /// 测试：同一文件经多个根可达时只出现一次。
    #[test]
    fn test_overlapping_roots_deduplicate() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("inner");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("once.txt"), "x").unwrap();

        let files =
            PathCollector::new(1024).collect(&[dir.path().to_path_buf(), nested.clone()]);

        assert_eq!(files.len(), 1);
    }

    /// 测试：根目录不存在时返回空集而不是失败。
    #[test]
    fn test_missing_root_yields_empty_set() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let files = PathCollector::new(1024).collect(&[missing]);

        assert!(files.is_empty());
    }

    /// 测试：自定义隐藏判定可以替换平台默认值。
    #[test]
    fn test_custom_visibility_predicate() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.skip"), "b").unwrap();

        fn skip_extension(path: &Path, _metadata: &Metadata) -> bool {
            path.extension().is_some_and(|ext| ext == "skip")
        }

        let files = PathCollector::new(1024)
            .with_visibility(skip_extension)
            .collect(&[dir.path().to_path_buf()]);

        assert_eq!(paths(&files), vec!["a.txt"]);
    }
}
