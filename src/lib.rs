//! # Order Gate
//!
//! 訂單出貨閘門：以品質分數門檻決定出貨/暫扣，並推估對簽收率、退回、
//! 庫存與成本的影響。
//!
//! ```
//! use order_gate::{Baseline, Cutoff, ImpactProjector, Order, ShipDecisionEngine};
//! use rust_decimal::Decimal;
//!
//! let orders = vec![
//!     Order::new("ORD-1".to_string(), Decimal::from(88)),
//!     Order::new("ORD-2".to_string(), Decimal::from(31)),
//! ];
//! let baseline = Baseline::new(Decimal::from(56));
//!
//! let partition = ShipDecisionEngine::partition(&orders, Cutoff::from_percent(50));
//! let report = ImpactProjector::default().project(&partition, &baseline);
//!
//! assert_eq!(report.orders_to_ship, 1);
//! assert_eq!(report.orders_flagged, 1);
//! ```

pub mod logging;

pub use rust_decimal::Decimal;

pub use gate_cache::{CutoffCoalescer, DecisionSession, Ticket};
pub use gate_calc::{
    CostSavings, CutoffChange, CutoffSource, ImpactProjector, ImpactReport, Partition,
    ScoreIndex, ShipDecisionEngine, ThresholdPolicy,
};
pub use gate_core::{
    Baseline, ClassMultipliers, Cutoff, DeliveryCurve, GateConfig, GateError, IngestOutcome,
    IngestWarning, Mode, ModePresets, Order, OrderPool, OrderRecord, PaymentMethod, Result,
    ShippingClass, MAX_COST_PER_ORDER, MAX_ORDER_VALUE,
};
pub use gate_optimizer::{CandidateScore, ProfitObjective, Recommendation, ThresholdRecommender};
