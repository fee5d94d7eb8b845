//! 訂單池（單次計算的不可變快照）與上游資料匯入

use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::order::{Order, PaymentMethod, ShippingClass, MAX_ORDER_VALUE};
use crate::{GateError, Result};

/// 上游評分後的原始訂單記錄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// 外部訂單號
    pub order_ref: String,

    /// 模型輸出的品質分數（未驗證）
    pub score: f64,

    /// 付款方式
    pub payment: PaymentMethod,

    /// 運費等級
    pub shipping_class: ShippingClass,

    /// 佔用庫存件數
    pub inventory_units: u32,

    /// 訂單金額
    pub order_value: f64,
}

impl OrderRecord {
    /// 創建新的原始記錄（預付、標準件、1 件、金額 0）
    pub fn new(order_ref: impl Into<String>, score: f64) -> Self {
        Self {
            order_ref: order_ref.into(),
            score,
            payment: PaymentMethod::Prepaid,
            shipping_class: ShippingClass::Standard,
            inventory_units: 1,
            order_value: 0.0,
        }
    }

    /// 建構器模式：設置付款方式
    pub fn with_payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = payment;
        self
    }

    /// 建構器模式：設置運費等級
    pub fn with_shipping_class(mut self, shipping_class: ShippingClass) -> Self {
        self.shipping_class = shipping_class;
        self
    }

    /// 建構器模式：設置庫存件數
    pub fn with_inventory_units(mut self, units: u32) -> Self {
        self.inventory_units = units;
        self
    }

    /// 建構器模式：設置訂單金額
    pub fn with_order_value(mut self, value: f64) -> Self {
        self.order_value = value;
        self
    }
}

/// 匯入警告（分數超出範圍已被夾緊）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestWarning {
    pub order_ref: String,
    pub original_score: f64,
    pub clamped_score: Decimal,
}

/// 匯入結果
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub pool: OrderPool,
    pub warnings: Vec<IngestWarning>,
}

/// 訂單池快照
///
/// 一次計算（含整個推薦掃描）只讀取同一份快照，刷新時整份替換。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPool {
    orders: Vec<Order>,
    snapshot_at: NaiveDateTime,
}

impl OrderPool {
    /// 以現在時間建立快照
    pub fn new(orders: Vec<Order>) -> Self {
        Self::with_snapshot_time(orders, Utc::now().naive_utc())
    }

    /// 以指定時間建立快照
    pub fn with_snapshot_time(orders: Vec<Order>, snapshot_at: NaiveDateTime) -> Self {
        Self {
            orders,
            snapshot_at,
        }
    }

    /// 空訂單池
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// 匯入上游記錄
    ///
    /// - 分數超出 [0, 100]：夾緊並回報警告，不中斷
    /// - 空訂單號、非有限分數、重複訂單號：回報錯誤
    /// - 金額為負、非有限或超過 `MAX_ORDER_VALUE`：回報錯誤
    pub fn ingest(records: Vec<OrderRecord>) -> Result<IngestOutcome> {
        let mut orders = Vec::with_capacity(records.len());
        let mut warnings = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for record in records {
            if record.order_ref.trim().is_empty() {
                return Err(GateError::InvalidOrder("訂單號不可為空".to_string()));
            }

            if !seen.insert(record.order_ref.clone()) {
                return Err(GateError::InvalidOrder(format!(
                    "重複的訂單號: {}",
                    record.order_ref
                )));
            }

            if !record.score.is_finite() {
                return Err(GateError::InvalidOrder(format!(
                    "訂單 {} 的分數無法解析: {}",
                    record.order_ref, record.score
                )));
            }

            // 先在 f64 上夾緊，任何有限分數都能轉成 Decimal
            let bounded = record.score.clamp(0.0, 100.0);
            let score = Decimal::try_from(bounded).map_err(|_| {
                GateError::CalculationError(format!(
                    "訂單 {} 的分數無法轉換: {}",
                    record.order_ref, bounded
                ))
            })?;

            let value = Decimal::try_from(record.order_value).map_err(|_| {
                GateError::InvalidOrder(format!(
                    "訂單 {} 的金額無法解析: {}",
                    record.order_ref, record.order_value
                ))
            })?;

            if value < Decimal::ZERO {
                return Err(GateError::InvalidOrder(format!(
                    "訂單 {} 的金額不可為負: {}",
                    record.order_ref, value
                )));
            }

            if value > MAX_ORDER_VALUE {
                return Err(GateError::InvalidOrder(format!(
                    "訂單 {} 的金額超過上限 {}: {}",
                    record.order_ref, MAX_ORDER_VALUE, value
                )));
            }

            let order = Order::new(record.order_ref.clone(), score)
                .with_payment(record.payment)
                .with_shipping_class(record.shipping_class)
                .with_inventory_units(record.inventory_units)
                .with_order_value(value);

            if bounded != record.score {
                tracing::warn!(
                    "訂單 {} 分數超出範圍 {}，已夾緊為 {}",
                    record.order_ref,
                    record.score,
                    order.score
                );
                warnings.push(IngestWarning {
                    order_ref: record.order_ref,
                    original_score: record.score,
                    clamped_score: order.score,
                });
            }

            orders.push(order);
        }

        tracing::debug!("匯入訂單 {} 筆，警告 {} 筆", orders.len(), warnings.len());

        Ok(IngestOutcome {
            pool: Self::new(orders),
            warnings,
        })
    }

    /// 所有訂單
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// 快照時間
    pub fn snapshot_at(&self) -> NaiveDateTime {
        self.snapshot_at
    }

    /// 訂單數量
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// 是否為空
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// 總庫存件數
    pub fn total_inventory_units(&self) -> u64 {
        self.orders.iter().map(|o| u64::from(o.inventory_units)).sum()
    }
}
