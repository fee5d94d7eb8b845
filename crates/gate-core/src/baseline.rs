//! 基準線（「全部出貨」的歷史表現）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{GateError, Result};

/// 每單成本上限（10 億）
pub const MAX_COST_PER_ORDER: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// 歷史基準線
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// 歷史簽收率（%）
    pub previous_delivery_rate: Decimal,

    /// 歷史退回率（%）
    pub previous_rto_rate: Decimal,

    /// 每單正向運費
    pub shipping_cost_per_order: Decimal,

    /// 每單逆向（退回）運費
    pub reverse_shipping_cost_per_order: Decimal,

    /// 每單包材成本
    pub packaging_cost_per_order: Decimal,
}

impl Baseline {
    /// 創建新的基準線（成本預設為 0）
    pub fn new(previous_delivery_rate: Decimal) -> Self {
        Self {
            previous_delivery_rate,
            previous_rto_rate: Decimal::ONE_HUNDRED - previous_delivery_rate,
            shipping_cost_per_order: Decimal::ZERO,
            reverse_shipping_cost_per_order: Decimal::ZERO,
            packaging_cost_per_order: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置歷史退回率
    pub fn with_previous_rto_rate(mut self, rate: Decimal) -> Self {
        self.previous_rto_rate = rate;
        self
    }

    /// 建構器模式：設置每單正向運費
    pub fn with_shipping_cost(mut self, cost: Decimal) -> Self {
        self.shipping_cost_per_order = cost;
        self
    }

    /// 建構器模式：設置每單逆向運費
    pub fn with_reverse_shipping_cost(mut self, cost: Decimal) -> Self {
        self.reverse_shipping_cost_per_order = cost;
        self
    }

    /// 建構器模式：設置每單包材成本
    pub fn with_packaging_cost(mut self, cost: Decimal) -> Self {
        self.packaging_cost_per_order = cost;
        self
    }

    /// 驗證比率落在 [0, 100]、成本介於 0 與 `MAX_COST_PER_ORDER`
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("previous_delivery_rate", self.previous_delivery_rate),
            ("previous_rto_rate", self.previous_rto_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(GateError::InvalidBaseline(format!(
                    "{} 必須介於 0 與 100 之間: {}",
                    name, rate
                )));
            }
        }

        for (name, cost) in [
            ("shipping_cost_per_order", self.shipping_cost_per_order),
            (
                "reverse_shipping_cost_per_order",
                self.reverse_shipping_cost_per_order,
            ),
            ("packaging_cost_per_order", self.packaging_cost_per_order),
        ] {
            if cost < Decimal::ZERO {
                return Err(GateError::InvalidBaseline(format!(
                    "{} 不可為負: {}",
                    name, cost
                )));
            }
            if cost > MAX_COST_PER_ORDER {
                return Err(GateError::InvalidBaseline(format!(
                    "{} 超過上限 {}: {}",
                    name, MAX_COST_PER_ORDER, cost
                )));
            }
        }

        Ok(())
    }
}
