#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use quizlock::engine::{AttackEngine, ConfigStore};
use sha2::{Digest, Sha256};
use tempfile::TempDir;

/// 测试用的标记通知文本。
pub const NOTICE: &str = "Score 18 in the quiz to get your files back. Do not tamper with them.";

/// 辅助函数：在临时目录下搭建一个假的用户主目录，并创建目标文件夹。
///
/// 返回主目录路径；所有目标根目录都在它下面。
pub fn setup_home(dir: &TempDir, folders: &[&str]) -> PathBuf {
    let home = dir.path().join("home");
    for folder in folders {
        fs::create_dir_all(home.join(folder)).unwrap();
    }
    home
}

/// 辅助函数：写出带测验内容的配置文档 (data.json)，密钥为空。
pub fn write_config(dir: &TempDir, folders: &[&str]) -> PathBuf {
    let path = dir.path().join("data.json");
    let document = serde_json::json!({
        "folders": folders,
        "key": null,
        "readme_context": NOTICE,
        "questions": [
            { "question": "What keyword declares a function in Rust?", "answer": "fn" },
            { "question": "What does the ? operator do?", "answer": "propagates errors" }
        ],
        "required_score": 18
    });
    fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

/// 辅助函数：构造指向假主目录的引擎，带较小的大小上限以便测试超限排除。
pub fn build_engine(config_path: &Path, home: &Path, ceiling: u64) -> AttackEngine {
    let store = ConfigStore::load(config_path).unwrap();
    AttackEngine::new(store)
        .with_base_dir(home)
        .with_size_ceiling(ceiling)
}

/// 辅助函数：读取磁盘上配置文档中的 key 字段。
pub fn persisted_key(config_path: &Path) -> Option<String> {
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config_path).unwrap()).unwrap();
    raw["key"].as_str().map(|s| s.to_string())
}

/// 辅助函数：计算文件内容的 SHA-256，用于"文件未被改动"断言。
pub fn sha256_of(path: &Path) -> String {
    let content = fs::read(path).unwrap();
    hex::encode(Sha256::digest(&content))
}
