//! 出貨門檻與運作模式

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 出貨門檻（品質分數下限）
///
/// 永遠落在 [0, 100]。分數 >= 門檻的訂單出貨，低於門檻的訂單暫扣。
/// 建構時一律夾緊（clamp），不會拒絕超出範圍的輸入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct Cutoff(Decimal);

impl Cutoff {
    /// 全部出貨
    pub const MIN: Cutoff = Cutoff(Decimal::ZERO);

    /// 全部暫扣（仍受最少出貨一筆的下限保護）
    pub const MAX: Cutoff = Cutoff(Decimal::ONE_HUNDRED);

    /// 創建新的門檻，超出 [0, 100] 的值會被夾緊
    pub fn new(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// 以整數百分比創建門檻
    pub fn from_percent(value: u32) -> Self {
        Self::new(Decimal::from(value))
    }

    /// 創建門檻，並回報輸入是否被夾緊
    pub fn clamped(value: Decimal) -> (Self, bool) {
        let cutoff = Self::new(value);
        (cutoff, cutoff.0 != value)
    }

    /// 門檻數值
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// 門檻比例（0 ~ 1）
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// 是否為 0（全部出貨）
    pub fn is_min(&self) -> bool {
        self.0 == Decimal::ZERO
    }

    /// 是否為 100
    pub fn is_max(&self) -> bool {
        self.0 == Decimal::ONE_HUNDRED
    }

    /// 檢查分數是否達到門檻
    pub fn admits(&self, score: Decimal) -> bool {
        score >= self.0
    }
}

impl Default for Cutoff {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<Decimal> for Cutoff {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl From<Cutoff> for Decimal {
    fn from(cutoff: Cutoff) -> Self {
        cutoff.0
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// 運作模式（預設門檻）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// 積極出貨 - 低門檻
    Aggressive,
    /// 平衡 - 中門檻
    Balanced,
    /// 最大保護 - 高門檻
    Maximum,
}

impl Mode {
    /// 所有模式
    pub const ALL: [Mode; 3] = [Mode::Aggressive, Mode::Balanced, Mode::Maximum];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Aggressive => "aggressive",
            Mode::Balanced => "balanced",
            Mode::Maximum => "maximum",
        };
        f.pad(name)
    }
}
