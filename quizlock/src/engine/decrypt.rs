use tracing::info;

use crate::crypto::key::{AttackKey, KeyError};
use crate::engine::config::ConfigError;
use crate::engine::progress::{BatchSummary, Phase, ProgressEvent};
use crate::engine::{AttackEngine, marker, transform};

/// Defines errors that can abort a release run before any file is touched.
//
// // 定义在触碰任何文件之前就会终止恢复运行的错误。
#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    /// No key is persisted, so there is nothing to release.
    //
    // // 没有持久化密钥，无可恢复。
    #[error("No key is persisted; there is no encrypted run to release")]
    KeyAbsent,

    /// The persisted key text cannot be decoded; files stay untouched so
    /// a later repair of the document can still release them.
    //
    // // 持久化的密钥文本无法解码；文件保持原样，待文档修复后仍可恢复。
    #[error("Persisted key is unusable: {0}")]
    InvalidKey(#[from] KeyError),

    /// The key/configuration document could not be read or written.
    //
    // // 无法读取或写入密钥/配置文档。
    #[error("Configuration document failure: {0}")]
    Persistence(#[from] ConfigError),
}

/// 执行一次恢复（解密）运行。
///
/// 密钥只在所有根目录处理完毕后擦除一次；标记文件逐根尽力移除。
/// 认证失败的文件被跳过且保持原样，绝不会被当成"解密成功"。
pub(crate) fn decrypt_run(
    engine: &mut AttackEngine,
    on_progress: &mut dyn FnMut(ProgressEvent),
) -> Result<BatchSummary, DecryptError> {
    engine.config.reload()?;

    let key_text = engine
        .config
        .document
        .key
        .clone()
        .ok_or(DecryptError::KeyAbsent)?;
    let key = AttackKey::from_hex(&key_text)?;

    let roots = engine.target_roots();
    let files = engine.collector().collect(&roots);
    info!(count = files.len(), "files selected for decryption");

    let summary = transform::run_batch(&files, &key, Phase::Decrypt, on_progress);

    marker::remove_markers(&roots);

    engine.config.document.key = None;
    engine.config.persist()?;
    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "release run finished, key erased"
    );
    Ok(summary)
}
