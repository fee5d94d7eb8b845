//! # Gate Core
//!
//! 核心資料模型與類型定義（訂單、門檻、基準線、配置）

pub mod baseline;
pub mod config;
pub mod cutoff;
pub mod order;
pub mod pool;

// Re-export 主要類型
pub use baseline::{Baseline, MAX_COST_PER_ORDER};
pub use config::{ClassMultipliers, DeliveryCurve, GateConfig, ModePresets};
pub use cutoff::{Cutoff, Mode};
pub use order::{Order, PaymentMethod, ShippingClass, MAX_ORDER_VALUE};
pub use pool::{IngestOutcome, IngestWarning, OrderPool, OrderRecord};

/// 出貨閘門錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("無效的訂單: {0}")]
    InvalidOrder(String),

    #[error("無效的基準線: {0}")]
    InvalidBaseline(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
