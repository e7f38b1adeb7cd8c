/// Which half of the lifecycle a batch run belongs to.
//
// // 批处理运行所属的生命周期阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The attack: plaintext to ciphertext.
    Encrypt,
    /// The release: ciphertext back to plaintext.
    Decrypt,
}

/// Emitted once after every attempted file, skips included.
///
/// `index` is 1-based, so the final event of a run carries
/// `index == total` and [`ProgressEvent::fraction`] reaches `1.0`.
//
// // 每处理完一个文件（含跳过）发出一次。`index` 从 1 开始，
// // 因此一次运行的最后一个事件满足 `index == total`，fraction 达到 1.0。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    pub index: usize,
    pub total: usize,
    pub phase: Phase,
}

impl ProgressEvent {
    /// Running completion fraction, for progress-bar rendering.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.index as f64 / self.total as f64
        }
    }
}

/// Terminal result of a batch run.
///
/// `processed + skipped == total`; a run with skips still terminates
/// normally — partial progress beats an undefined mixture of states.
//
// // 批处理运行的终态结果。`processed + skipped == total`；
// // 有跳过的运行仍正常终止——保留部分进度胜过留下状态不明的混合局面。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files successfully transformed.
    pub processed: usize,
    /// Files skipped after a per-file failure.
    pub skipped: usize,
    /// Files the collector selected for this run.
    pub total: usize,
}

impl BatchSummary {
    /// True when every selected file was transformed.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }
}
