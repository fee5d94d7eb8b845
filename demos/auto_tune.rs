//! 門檻自動調整示例：隨機訂單池 + 推薦器閉環

use order_gate::{
    Baseline, DecisionSession, GateConfig, Order, OrderPool, PaymentMethod, ProfitObjective,
    ShippingClass, ThresholdRecommender,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::sync::Arc;

fn synthetic_pool(size: usize, seed: u64) -> OrderPool {
    let mut rng = StdRng::seed_from_u64(seed);
    let orders = (0..size)
        .map(|i| {
            let payment = if rng.gen_bool(0.65) {
                PaymentMethod::Cod
            } else {
                PaymentMethod::Prepaid
            };
            let class = match rng.gen_range(0..10) {
                0 => ShippingClass::Heavy,
                1 | 2 => ShippingClass::Express,
                _ => ShippingClass::Standard,
            };
            Order::new(format!("SO-{:05}", i), Decimal::from(rng.gen_range(0..=100i64)))
                .with_payment(payment)
                .with_shipping_class(class)
                .with_inventory_units(rng.gen_range(1..=3))
                .with_order_value(Decimal::from(rng.gen_range(250..=2500i64)))
        })
        .collect();
    OrderPool::new(orders)
}

fn main() -> anyhow::Result<()> {
    order_gate::logging::init();

    let baseline = Baseline::new(Decimal::from(56))
        .with_shipping_cost(Decimal::from(65))
        .with_reverse_shipping_cost(Decimal::from(50))
        .with_packaging_cost(Decimal::from(12));

    let config = GateConfig::default();
    let recommender = ThresholdRecommender::new(config.clone(), ProfitObjective::default())?;
    let mut session = DecisionSession::new(Arc::new(synthetic_pool(156, 7)), baseline, config)?;

    let before = session.report();
    tracing::info!(
        "目前門檻 {}：出貨 {}，日節省 {}",
        before.cutoff,
        before.orders_to_ship,
        before.daily_savings
    );

    let recommendation = session.auto_tune(&recommender)?;
    let after = session.report();

    println!("=== 門檻自動調整 ===");
    println!(
        "推薦門檻: {}（{}）",
        recommendation.cutoff,
        if recommendation.improved {
            "已改善"
        } else {
            "維持原門檻"
        }
    );
    println!(
        "淨利: {} → {}（+{}）",
        recommendation.current_objective_value,
        recommendation.objective_value,
        recommendation.uplift()
    );
    println!(
        "出貨 {} / 暫扣 {}，簽收率 {}%，庫存減少 {}%，月節省 {}",
        after.orders_to_ship,
        after.orders_flagged,
        after.projected_delivery_rate,
        after.projected_inventory_reduction_pct,
        after.monthly_savings
    );

    Ok(())
}
