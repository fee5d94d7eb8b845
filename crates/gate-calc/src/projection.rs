//! 影響推估

use gate_core::{Baseline, DeliveryCurve, GateConfig, Order};
use rust_decimal::Decimal;

use crate::partition::Partition;
use crate::{round2, CostSavings, ImpactReport};

/// 影響推估器
///
/// 由分割結果與基準線推導簽收率、退回減少、庫存減少與各類成本節省。
/// 節省只計入相對「全部出貨」被暫扣的訂單，因此門檻 0 時為 0，且隨門檻單調不減。
#[derive(Debug, Clone)]
pub struct ImpactProjector {
    config: GateConfig,
}

impl ImpactProjector {
    /// 創建新的推估器
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// 推估配置
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// 產生影響報告
    pub fn project(&self, partition: &Partition<'_>, baseline: &Baseline) -> ImpactReport {
        let cutoff = partition.cutoff;

        if partition.is_empty() {
            tracing::debug!("訂單池為空，回傳基準線報告");
            return ImpactReport::empty(cutoff, baseline);
        }

        // Step 1: 簽收率
        let hold_weight = self.hold_weight(partition);
        let headroom = Decimal::ONE_HUNDRED - baseline.previous_delivery_rate;
        let delivery_rate = baseline.previous_delivery_rate + hold_weight * headroom;

        // Step 2: 退回減少（以 1 - 分數/100 作為每筆的退回機率）
        let expected_returns: Decimal = partition
            .ship
            .iter()
            .chain(partition.hold.iter())
            .map(|o| o.return_likelihood())
            .sum();
        let avoided_returns: Decimal = partition.hold.iter().map(|o| o.return_likelihood()).sum();
        let rto_reduction_pct = percent_of(avoided_returns, expected_returns);

        // Step 3: 庫存佔用減少
        let units_held: u64 = partition
            .hold
            .iter()
            .map(|o| u64::from(o.inventory_units))
            .sum();
        let units_total =
            units_held + partition.ship.iter().map(|o| u64::from(o.inventory_units)).sum::<u64>();
        let inventory_reduction_pct =
            percent_of(Decimal::from(units_held), Decimal::from(units_total));

        // Step 4: 成本節省
        let savings = self.savings_for(&partition.hold, baseline);
        let daily_savings = savings.total();
        let monthly_savings = daily_savings * Decimal::from(self.config.monthly_multiplier);

        tracing::debug!(
            "門檻 {}：出貨 {} 筆，暫扣 {} 筆，簽收率 {}，日節省 {}",
            cutoff,
            partition.ship.len(),
            partition.hold.len(),
            round2(delivery_rate),
            daily_savings
        );

        ImpactReport {
            cutoff,
            orders_to_ship: partition.ship.len(),
            orders_flagged: partition.hold.len(),
            projected_delivery_rate: round2(delivery_rate),
            projected_rto_reduction_pct: round2(rto_reduction_pct),
            projected_inventory_reduction_pct: round2(inventory_reduction_pct),
            units_held,
            savings,
            daily_savings,
            monthly_savings,
        }
    }

    /// 暫扣權重（0 ~ 1），決定簽收率從基準線往 100% 移動的比例
    fn hold_weight(&self, partition: &Partition<'_>) -> Decimal {
        if partition.cutoff.is_max() {
            return Decimal::ONE;
        }

        match self.config.delivery_curve {
            DeliveryCurve::HoldShare => partition.hold_share(),
            DeliveryCurve::LinearCutoff => partition.cutoff.fraction(),
        }
    }

    /// 單筆訂單出貨時的履約成本（未四捨五入）
    ///
    /// 逆向運費以退回機率加權。暫扣該訂單即省下這些成本。
    pub fn order_costs(&self, order: &Order, baseline: &Baseline) -> CostSavings {
        let multiplier = self.config.class_multipliers.for_class(order.shipping_class);
        CostSavings {
            shipping: baseline.shipping_cost_per_order * multiplier,
            reverse_shipping: baseline.reverse_shipping_cost_per_order
                * multiplier
                * order.return_likelihood(),
            packaging: baseline.packaging_cost_per_order,
        }
    }

    /// 暫扣訂單的各類成本節省（已四捨五入到分）
    fn savings_for(&self, held: &[&Order], baseline: &Baseline) -> CostSavings {
        let mut total = CostSavings::default();

        for order in held {
            let costs = self.order_costs(order, baseline);
            total.shipping += costs.shipping;
            total.reverse_shipping += costs.reverse_shipping;
            total.packaging += costs.packaging;
        }

        CostSavings {
            shipping: round2(total.shipping),
            reverse_shipping: round2(total.reverse_shipping),
            packaging: round2(total.packaging),
        }
    }
}

impl Default for ImpactProjector {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

/// part / whole × 100，分母為 0 時回傳 0，結果限制在 [0, 100]
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
