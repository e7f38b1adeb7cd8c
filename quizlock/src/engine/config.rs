use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Defines errors that can occur while reading or writing the persisted
/// key/configuration document. Any of these is fatal to the operation in
/// flight: the engine must not touch files without knowing key state.
//
// // 定义在读写持久化的密钥/配置文档时可能发生的错误。
// // 任何一种都会终止正在进行的操作：引擎在不了解密钥状态时绝不能触碰文件。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the document.
    //
    // // 读取或写入文档时发生 I/O 错误。
    #[error("Failed to access configuration document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or misses required fields.
    //
    // // 文档不是有效的 JSON，或缺少必需字段。
    #[error("Failed to parse configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The persisted game document shared between runs.
///
/// Only three fields matter to the engine; everything else (trivia
/// questions, scores) is carried through `extra` untouched so a rewrite
/// never drops the quiz layer's data.
//
// // 跨运行共享的持久化游戏文档。
// // 引擎只关心三个字段；其余内容（测验题目、分数）经 `extra` 原样保留，
// // 重写时绝不丢弃测验层的数据。
#[derive(Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Target root folder names, resolved relative to the base directory.
    // // 目标根文件夹名称，相对基目录解析。
    pub folders: Vec<String>,

    /// The active key in hex form, or `None` when no run is outstanding.
    // // 十六进制形式的活动密钥；无未完成运行时为 `None`。
    pub key: Option<String>,

    /// Human-readable notice text written into each marker file.
    // // 写入每个标记文件的通知文本。
    pub readme_context: String,

    /// Quiz content the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Owns the document and the path it lives at, with explicit persistence
/// points: the engine reloads at the start of every run and persists only
/// when the key field changes.
//
// // 持有文档及其所在路径，并提供显式的持久化时机：引擎在每次运行开始时
// // 重新加载，仅在密钥字段变化时写回。
pub struct ConfigStore {
    path: PathBuf,
    pub document: GameConfig,
}

impl ConfigStore {
    /// 从磁盘加载文档。
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let document = serde_json::from_str(&content)?;
        Ok(ConfigStore {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Re-reads the document from disk, replacing the in-memory state.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let content = fs::read_to_string(&self.path)?;
        self.document = serde_json::from_str(&content)?;
        Ok(())
    }

    /// Writes the in-memory document back to disk, pretty-printed.
    pub fn persist(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.document)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
