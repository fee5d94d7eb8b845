//! 出貨閘門示例：模式切換與影響報告

use order_gate::{
    Baseline, DecisionSession, GateConfig, Mode, OrderPool, OrderRecord, PaymentMethod,
    ShippingClass,
};
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    order_gate::logging::init();

    println!("=== 出貨閘門示例 ===\n");

    let records = vec![
        OrderRecord::new("SO-1001", 92.0).with_order_value(1890.0),
        OrderRecord::new("SO-1002", 78.5)
            .with_payment(PaymentMethod::Cod)
            .with_order_value(640.0),
        OrderRecord::new("SO-1003", 66.0)
            .with_shipping_class(ShippingClass::Heavy)
            .with_inventory_units(2)
            .with_order_value(2400.0),
        OrderRecord::new("SO-1004", 41.0)
            .with_payment(PaymentMethod::Cod)
            .with_order_value(520.0),
        OrderRecord::new("SO-1005", 104.0).with_order_value(310.0),
        OrderRecord::new("SO-1006", 18.0)
            .with_payment(PaymentMethod::Cod)
            .with_shipping_class(ShippingClass::Express)
            .with_order_value(870.0),
    ];

    let outcome = OrderPool::ingest(records)?;
    for warning in &outcome.warnings {
        println!(
            "警告: 訂單 {} 分數 {} 已夾緊為 {}",
            warning.order_ref, warning.original_score, warning.clamped_score
        );
    }

    let baseline = Baseline::new(Decimal::from(56))
        .with_shipping_cost(Decimal::from(65))
        .with_reverse_shipping_cost(Decimal::from(50))
        .with_packaging_cost(Decimal::from(12));

    let mut session = DecisionSession::new(Arc::new(outcome.pool), baseline, GateConfig::default())?;

    for mode in Mode::ALL {
        let cutoff = session.set_mode(mode);
        let report = session.report();
        println!(
            "模式 {:<10} 門檻 {:>3} | 出貨 {} 暫扣 {} | 簽收率 {}% | 退回減少 {}% | 日節省 {} | 月節省 {}",
            mode,
            cutoff,
            report.orders_to_ship,
            report.orders_flagged,
            report.projected_delivery_rate,
            report.projected_rto_reduction_pct,
            report.daily_savings,
            report.monthly_savings
        );
    }

    Ok(())
}
