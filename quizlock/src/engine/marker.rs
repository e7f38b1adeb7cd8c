use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::common::constants::MARKER_FILE_NAME;

/// Writes the notice marker into each target root.
///
/// Best effort per root: a root where the marker cannot be written is
/// logged and does not block markers in the remaining roots.
//
// // 将通知标记写入每个目标根目录。逐根尽力而为：某个根写入失败只记录，
// // 不阻塞其余根目录的标记写入。
pub(crate) fn write_markers(roots: &[PathBuf], notice: &str) {
    for root in roots {
        let marker = root.join(MARKER_FILE_NAME);
        match fs::write(&marker, notice) {
            Ok(()) => info!(path = %marker.display(), "marker file created"),
            Err(err) => {
                error!(path = %marker.display(), error = %err, "failed to create marker file");
            }
        }
    }
}

/// Removes the marker from each target root, best effort per root.
/// A marker that is already gone is not an error worth reporting loudly.
pub(crate) fn remove_markers(roots: &[PathBuf]) {
    for root in roots {
        let marker = root.join(MARKER_FILE_NAME);
        if !marker.exists() {
            continue;
        }
        match fs::remove_file(&marker) {
            Ok(()) => info!(path = %marker.display(), "marker file removed"),
            Err(err) => {
                error!(path = %marker.display(), error = %err, "failed to remove marker file");
            }
        }
    }
}

/// 检查某个根目录当前是否带有标记文件。
pub fn has_marker(root: &Path) -> bool {
    root.join(MARKER_FILE_NAME).is_file()
}
