//! 髒標記追蹤

use std::collections::HashSet;

/// 需要重算的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirtyReason {
    /// 門檻變更
    Cutoff,
    /// 訂單池刷新
    Pool,
    /// 基準線變更
    Baseline,
}

/// 髒標記追蹤器
#[derive(Debug)]
pub struct DirtyTracker {
    reasons: HashSet<DirtyReason>,
}

impl DirtyTracker {
    /// 創建新的追蹤器（初始為髒，尚未計算過）
    pub fn new() -> Self {
        let mut reasons = HashSet::new();
        reasons.insert(DirtyReason::Pool);
        Self { reasons }
    }

    /// 標記需要重算
    pub fn mark_dirty(&mut self, reason: DirtyReason) {
        self.reasons.insert(reason);
    }

    /// 是否需要重算
    pub fn is_dirty(&self) -> bool {
        !self.reasons.is_empty()
    }

    /// 檢查特定原因
    pub fn is_dirty_for(&self, reason: DirtyReason) -> bool {
        self.reasons.contains(&reason)
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.reasons.clear();
    }

    /// 獲取所有髒原因
    pub fn reasons(&self) -> Vec<DirtyReason> {
        self.reasons.iter().copied().collect()
    }
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}
