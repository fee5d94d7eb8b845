//! 性質測試（proptest）

use order_gate::*;
use proptest::prelude::*;
use std::collections::HashSet;
use uuid::Uuid;

fn order_strategy() -> impl Strategy<Value = Order> {
    (0i64..=10_000, 0u32..5, 0u8..3, any::<bool>(), 0i64..=5_000).prop_map(
        |(score, units, class, cod, value)| {
            let class = match class {
                0 => ShippingClass::Standard,
                1 => ShippingClass::Express,
                _ => ShippingClass::Heavy,
            };
            let payment = if cod {
                PaymentMethod::Cod
            } else {
                PaymentMethod::Prepaid
            };
            Order::new("ORD".to_string(), Decimal::new(score, 2))
                .with_shipping_class(class)
                .with_payment(payment)
                .with_inventory_units(units)
                .with_order_value(Decimal::from(value))
        },
    )
}

fn pool_strategy() -> impl Strategy<Value = Vec<Order>> {
    prop::collection::vec(order_strategy(), 0..60)
}

fn cutoff_strategy() -> impl Strategy<Value = Cutoff> {
    (0i64..=10_000).prop_map(|v| Cutoff::new(Decimal::new(v, 2)))
}

fn baseline() -> Baseline {
    Baseline::new(Decimal::new(563, 1))
        .with_shipping_cost(Decimal::new(6550, 2))
        .with_reverse_shipping_cost(Decimal::from(48))
        .with_packaging_cost(Decimal::new(1225, 2))
}

fn ids(orders: &[&Order]) -> HashSet<Uuid> {
    orders.iter().map(|o| o.id).collect()
}

proptest! {
    #[test]
    fn ship_set_shrinks_as_cutoff_rises(
        orders in pool_strategy(),
        a in cutoff_strategy(),
        b in cutoff_strategy(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let at_low = ShipDecisionEngine::partition(&orders, low);
        let at_high = ShipDecisionEngine::partition(&orders, high);

        prop_assert!(ids(&at_high.ship).is_subset(&ids(&at_low.ship)));
    }

    #[test]
    fn partition_is_complete_and_disjoint(orders in pool_strategy(), cutoff in cutoff_strategy()) {
        let partition = ShipDecisionEngine::partition(&orders, cutoff);
        let ship = ids(&partition.ship);
        let hold = ids(&partition.hold);

        prop_assert!(ship.is_disjoint(&hold));
        let all: HashSet<Uuid> = orders.iter().map(|o| o.id).collect();
        let union: HashSet<Uuid> = ship.union(&hold).copied().collect();
        prop_assert_eq!(union, all);
        prop_assert_eq!(partition.total(), orders.len());
    }

    #[test]
    fn non_empty_pool_always_ships_one(orders in pool_strategy(), cutoff in cutoff_strategy()) {
        let partition = ShipDecisionEngine::partition(&orders, cutoff);
        prop_assert_eq!(partition.ship.is_empty(), orders.is_empty());
    }

    #[test]
    fn score_index_agrees_with_engine(orders in pool_strategy(), cutoff in cutoff_strategy()) {
        let linear = ShipDecisionEngine::partition(&orders, cutoff);
        let indexed = ScoreIndex::new(&orders).partition_at(cutoff);

        prop_assert_eq!(ids(&linear.ship), ids(&indexed.ship));
        prop_assert_eq!(ids(&linear.hold), ids(&indexed.hold));
    }

    #[test]
    fn metrics_are_monotone_and_bounded(
        orders in pool_strategy(),
        a in cutoff_strategy(),
        b in cutoff_strategy(),
        linear in any::<bool>(),
    ) {
        let curve = if linear { DeliveryCurve::LinearCutoff } else { DeliveryCurve::HoldShare };
        let projector = ImpactProjector::new(GateConfig::new().with_delivery_curve(curve));
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let r_low = projector.project(&ShipDecisionEngine::partition(&orders, low), &baseline());
        let r_high = projector.project(&ShipDecisionEngine::partition(&orders, high), &baseline());

        prop_assert!(r_low.projected_delivery_rate <= r_high.projected_delivery_rate);
        prop_assert!(r_low.projected_rto_reduction_pct <= r_high.projected_rto_reduction_pct);
        prop_assert!(
            r_low.projected_inventory_reduction_pct <= r_high.projected_inventory_reduction_pct
        );
        prop_assert!(r_low.daily_savings <= r_high.daily_savings);
        prop_assert!(r_low.savings.shipping <= r_high.savings.shipping);
        prop_assert!(r_low.savings.reverse_shipping <= r_high.savings.reverse_shipping);
        prop_assert!(r_low.savings.packaging <= r_high.savings.packaging);

        for report in [&r_low, &r_high] {
            prop_assert!(report.projected_rto_reduction_pct >= Decimal::ZERO);
            prop_assert!(report.projected_rto_reduction_pct <= Decimal::ONE_HUNDRED);
            prop_assert!(report.projected_inventory_reduction_pct >= Decimal::ZERO);
            prop_assert!(report.projected_inventory_reduction_pct <= Decimal::ONE_HUNDRED);
            prop_assert!(report.daily_savings >= Decimal::ZERO);
        }
    }

    #[test]
    fn boundary_cutoffs(orders in pool_strategy()) {
        let projector = ImpactProjector::default();

        let at_zero = projector.project(&ShipDecisionEngine::partition(&orders, Cutoff::MIN), &baseline());
        prop_assert_eq!(at_zero.orders_to_ship, orders.len());
        prop_assert_eq!(at_zero.projected_delivery_rate, baseline().previous_delivery_rate);
        prop_assert_eq!(at_zero.daily_savings, Decimal::ZERO);

        let at_max = projector.project(&ShipDecisionEngine::partition(&orders, Cutoff::MAX), &baseline());
        if orders.is_empty() {
            prop_assert_eq!(at_max.projected_delivery_rate, baseline().previous_delivery_rate);
        } else {
            prop_assert_eq!(at_max.projected_delivery_rate, Decimal::ONE_HUNDRED);
            prop_assert!(at_max.orders_to_ship >= 1);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn recommend_is_stable(orders in pool_strategy(), current in cutoff_strategy()) {
        let pool = OrderPool::new(orders);
        let recommender =
            ThresholdRecommender::new(GateConfig::default(), ProfitObjective::default()).unwrap();

        let first = recommender.recommend(&pool, &baseline(), current).unwrap();
        let again = recommender.recommend(&pool, &baseline(), current).unwrap();
        prop_assert_eq!(first.cutoff, again.cutoff);

        // 回寫後再推薦：已收斂，不再改變
        let settled = recommender.recommend(&pool, &baseline(), first.cutoff).unwrap();
        prop_assert!(!settled.improved);
        prop_assert_eq!(settled.cutoff, first.cutoff);
    }
}
