//! 淨利目標函數

use gate_calc::{ImpactProjector, ImpactReport, Partition};
use gate_core::{Baseline, GateError, Order, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 淨利目標
///
/// 淨利 = 出貨訂單預期毛利 − 出貨訂單履約成本 − 暫扣訂單機會成本
///
/// - 預期毛利：簽收機率 × 金額 × 毛利率（貨到付款再扣代收手續費）
/// - 履約成本：全部出貨的成本 − 報告中的日節省
/// - 機會成本：簽收機率 × 金額 × 機會成本率
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitObjective {
    /// 毛利率（0 ~ 1）
    pub margin_rate: Decimal,

    /// 暫扣訂單的機會成本率（0 ~ 1）
    pub opportunity_cost_rate: Decimal,

    /// 貨到付款代收手續費率（0 ~ 1）
    pub cod_fee_rate: Decimal,
}

impl Default for ProfitObjective {
    fn default() -> Self {
        Self {
            margin_rate: Decimal::new(35, 2),
            opportunity_cost_rate: Decimal::new(5, 2),
            cod_fee_rate: Decimal::new(2, 2),
        }
    }
}

impl ProfitObjective {
    /// 創建新的目標函數
    pub fn new(margin_rate: Decimal, opportunity_cost_rate: Decimal, cod_fee_rate: Decimal) -> Self {
        Self {
            margin_rate,
            opportunity_cost_rate,
            cod_fee_rate,
        }
    }

    /// 單筆出貨的預期毛利
    pub fn expected_margin(&self, order: &Order) -> Result<Decimal> {
        let mut rate = self.margin_rate;
        if order.is_cod() {
            rate -= self.cod_fee_rate;
        }
        weighted_value(order, rate)
    }

    /// 單筆暫扣的機會成本
    pub fn opportunity_cost(&self, order: &Order) -> Result<Decimal> {
        weighted_value(order, self.opportunity_cost_rate)
    }

    /// 全部出貨時的履約成本
    pub fn ship_all_cost(
        &self,
        orders: &[Order],
        projector: &ImpactProjector,
        baseline: &Baseline,
    ) -> Result<Decimal> {
        checked_total(orders.iter().map(|o| Ok(projector.order_costs(o, baseline).total())))
    }

    /// 評估單一分割的淨利
    ///
    /// 金額過大導致溢位時回傳 `CalculationError`。
    pub fn evaluate(
        &self,
        partition: &Partition<'_>,
        report: &ImpactReport,
        ship_all_cost: Decimal,
    ) -> Result<Decimal> {
        let margin = checked_total(partition.ship.iter().map(|o| self.expected_margin(o)))?;
        let opportunity = checked_total(partition.hold.iter().map(|o| self.opportunity_cost(o)))?;
        let fulfillment = ship_all_cost
            .checked_sub(report.daily_savings)
            .ok_or_else(overflow)?;

        margin
            .checked_sub(fulfillment)
            .and_then(|v| v.checked_sub(opportunity))
            .ok_or_else(overflow)
    }
}

/// 簽收機率 × 金額 × 比率
fn weighted_value(order: &Order, rate: Decimal) -> Result<Decimal> {
    order
        .delivery_likelihood()
        .checked_mul(order.order_value)
        .and_then(|v| v.checked_mul(rate))
        .ok_or_else(overflow)
}

fn checked_total(values: impl Iterator<Item = Result<Decimal>>) -> Result<Decimal> {
    values.fold(Ok(Decimal::ZERO), |acc, value| {
        acc?.checked_add(value?).ok_or_else(overflow)
    })
}

fn overflow() -> GateError {
    GateError::CalculationError("淨利計算溢位，訂單金額過大".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_calc::ShipDecisionEngine;
    use gate_core::{Cutoff, PaymentMethod};

    #[test]
    fn test_expected_margin() {
        let objective = ProfitObjective::default();
        let prepaid = Order::new("ORD-1".to_string(), Decimal::from(80))
            .with_order_value(Decimal::from(1000));
        let cod = prepaid.clone().with_payment(PaymentMethod::Cod);

        // 0.8 × 1000 × 0.35 = 280
        assert_eq!(objective.expected_margin(&prepaid).unwrap(), Decimal::from(280));
        // 0.8 × 1000 × 0.33 = 264
        assert_eq!(objective.expected_margin(&cod).unwrap(), Decimal::from(264));
        // 0.8 × 1000 × 0.05 = 40
        assert_eq!(objective.opportunity_cost(&prepaid).unwrap(), Decimal::from(40));
    }

    #[test]
    fn test_evaluate_ship_all() {
        let objective = ProfitObjective::default();
        let projector = ImpactProjector::default();
        let baseline = Baseline::new(Decimal::from(60))
            .with_shipping_cost(Decimal::from(50))
            .with_packaging_cost(Decimal::from(10));

        let orders = vec![
            Order::new("ORD-1".to_string(), Decimal::from(100)).with_order_value(Decimal::from(400)),
            Order::new("ORD-2".to_string(), Decimal::from(50)).with_order_value(Decimal::from(200)),
        ];

        let partition = ShipDecisionEngine::partition(&orders, Cutoff::MIN);
        let report = projector.project(&partition, &baseline);
        let ship_all = objective.ship_all_cost(&orders, &projector, &baseline).unwrap();

        // 毛利：400×0.35 + 0.5×200×0.35 = 175；成本：2 × 60 = 120
        assert_eq!(ship_all, Decimal::from(120));
        assert_eq!(objective.evaluate(&partition, &report, ship_all).unwrap(), Decimal::from(55));
    }

    #[test]
    fn test_holding_a_loser_raises_profit() {
        let objective = ProfitObjective::default();
        let projector = ImpactProjector::default();
        let baseline = Baseline::new(Decimal::from(60))
            .with_shipping_cost(Decimal::from(50))
            .with_reverse_shipping_cost(Decimal::from(50))
            .with_packaging_cost(Decimal::from(10));

        let orders = vec![
            Order::new("ORD-1".to_string(), Decimal::from(95)).with_order_value(Decimal::from(500)),
            Order::new("ORD-2".to_string(), Decimal::from(10)).with_order_value(Decimal::from(100)),
        ];
        let ship_all = objective.ship_all_cost(&orders, &projector, &baseline).unwrap();

        let all = ShipDecisionEngine::partition(&orders, Cutoff::MIN);
        let gated = ShipDecisionEngine::partition(&orders, Cutoff::from_percent(50));

        let all_value = objective
            .evaluate(&all, &projector.project(&all, &baseline), ship_all)
            .unwrap();
        let gated_value = objective
            .evaluate(&gated, &projector.project(&gated, &baseline), ship_all)
            .unwrap();

        assert!(gated_value > all_value);
    }

    #[test]
    fn test_evaluate_reports_overflow() {
        let objective = ProfitObjective::default();
        let projector = ImpactProjector::default();
        let baseline = Baseline::new(Decimal::from(60));

        let orders: Vec<Order> = (0..4)
            .map(|i| {
                Order::new(format!("ORD-{}", i), Decimal::ONE_HUNDRED).with_order_value(Decimal::MAX)
            })
            .collect();
        let partition = ShipDecisionEngine::partition(&orders, Cutoff::MIN);
        let report = projector.project(&partition, &baseline);

        let result = objective.evaluate(&partition, &report, Decimal::ZERO);
        assert!(matches!(result, Err(GateError::CalculationError(_))));
    }
}
