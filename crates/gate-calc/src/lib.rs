//! # Gate Calculation Engine
//!
//! 核心計算：門檻策略、出貨/暫扣分割、影響推估

pub mod partition;
pub mod policy;
pub mod projection;

// Re-export 主要類型
pub use partition::{Partition, ScoreIndex, ShipDecisionEngine};
pub use policy::{CutoffChange, CutoffSource, ThresholdPolicy};
pub use projection::ImpactProjector;

use gate_core::{Baseline, Cutoff};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// 各類成本節省（日）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSavings {
    /// 正向運費
    pub shipping: Decimal,
    /// 逆向（退回）運費
    pub reverse_shipping: Decimal,
    /// 包材
    pub packaging: Decimal,
}

impl CostSavings {
    /// 合計
    pub fn total(&self) -> Decimal {
        self.shipping + self.reverse_shipping + self.packaging
    }
}

/// 影響推估報告（唯讀快照，整份替換，不做局部更新）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    /// 本報告對應的門檻
    pub cutoff: Cutoff,

    /// 出貨訂單數
    pub orders_to_ship: usize,

    /// 暫扣訂單數
    pub orders_flagged: usize,

    /// 推估簽收率（%）
    pub projected_delivery_rate: Decimal,

    /// 推估退回減少比例（%）
    pub projected_rto_reduction_pct: Decimal,

    /// 推估庫存佔用減少比例（%）
    pub projected_inventory_reduction_pct: Decimal,

    /// 暫扣的庫存件數
    pub units_held: u64,

    /// 各類日節省
    pub savings: CostSavings,

    /// 日節省合計
    pub daily_savings: Decimal,

    /// 月節省推估
    pub monthly_savings: Decimal,
}

impl ImpactReport {
    /// 空訂單池的報告：數量與節省為 0，簽收率等於基準線
    pub fn empty(cutoff: Cutoff, baseline: &Baseline) -> Self {
        Self {
            cutoff,
            orders_to_ship: 0,
            orders_flagged: 0,
            projected_delivery_rate: baseline.previous_delivery_rate,
            projected_rto_reduction_pct: Decimal::ZERO,
            projected_inventory_reduction_pct: Decimal::ZERO,
            units_held: 0,
            savings: CostSavings::default(),
            daily_savings: Decimal::ZERO,
            monthly_savings: Decimal::ZERO,
        }
    }

    /// 訂單總數
    pub fn total_orders(&self) -> usize {
        self.orders_to_ship + self.orders_flagged
    }

    /// 簽收率相對基準線的變化（百分點）
    pub fn delivery_rate_change(&self, baseline: &Baseline) -> Decimal {
        self.projected_delivery_rate - baseline.previous_delivery_rate
    }
}

/// 四捨五入到小數兩位（.5 遠離零）
pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let baseline = Baseline::new(Decimal::from(56));
        let report = ImpactReport::empty(Cutoff::from_percent(40), &baseline);

        assert_eq!(report.total_orders(), 0);
        assert_eq!(report.projected_delivery_rate, Decimal::from(56));
        assert_eq!(report.delivery_rate_change(&baseline), Decimal::ZERO);
        assert_eq!(report.savings.total(), Decimal::ZERO);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round2(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(round2(Decimal::from(67)), Decimal::from(67));
    }

    #[test]
    fn test_report_serializes() {
        let baseline = Baseline::new(Decimal::from(56));
        let report = ImpactReport::empty(Cutoff::from_percent(75), &baseline);

        let json = serde_json::to_string(&report).unwrap();
        let restored: ImpactReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, report);
    }
}
