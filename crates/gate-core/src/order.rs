//! 訂單模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 付款方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// 貨到付款
    Cod,
    /// 預付
    Prepaid,
}

/// 運費等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingClass {
    /// 標準件
    Standard,
    /// 快遞
    Express,
    /// 大件/重貨
    Heavy,
}

/// 單筆訂單金額上限（1 兆），保證整池加總不會溢位
pub const MAX_ORDER_VALUE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// 待出貨訂單（已由上游模型評分）
///
/// 反序列化與 `Order::new` 一樣會把分數夾緊到 [0, 100]、金額夾緊到不小於 0。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "OrderFields")]
pub struct Order {
    /// 訂單ID
    pub id: Uuid,

    /// 外部訂單號
    pub order_ref: String,

    /// 品質分數（0-100，越高越可能成功簽收）
    pub score: Decimal,

    /// 付款方式
    pub payment: PaymentMethod,

    /// 運費等級
    pub shipping_class: ShippingClass,

    /// 佔用庫存件數
    pub inventory_units: u32,

    /// 訂單金額
    pub order_value: Decimal,
}

/// 反序列化用的原始欄位
#[derive(Deserialize)]
struct OrderFields {
    id: Uuid,
    order_ref: String,
    score: Decimal,
    payment: PaymentMethod,
    shipping_class: ShippingClass,
    inventory_units: u32,
    order_value: Decimal,
}

impl From<OrderFields> for Order {
    fn from(fields: OrderFields) -> Self {
        let mut order = Order::new(fields.order_ref, fields.score)
            .with_payment(fields.payment)
            .with_shipping_class(fields.shipping_class)
            .with_inventory_units(fields.inventory_units)
            .with_order_value(fields.order_value);
        order.id = fields.id;
        order
    }
}

impl Order {
    /// 創建新的訂單，分數夾緊到 [0, 100]
    pub fn new(order_ref: String, score: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_ref,
            score: score.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            payment: PaymentMethod::Prepaid,
            shipping_class: ShippingClass::Standard,
            inventory_units: 1,
            order_value: Decimal::ZERO,
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

    /// 建構器模式：設置訂單金額（負值視為 0）
    pub fn with_order_value(mut self, value: Decimal) -> Self {
        self.order_value = value.max(Decimal::ZERO);
        self
    }

    /// 預估簽收機率（0 ~ 1）
    pub fn delivery_likelihood(&self) -> Decimal {
        self.score / Decimal::ONE_HUNDRED
    }

    /// 預估退回（RTO）機率（0 ~ 1）
    pub fn return_likelihood(&self) -> Decimal {
        Decimal::ONE - self.delivery_likelihood()
    }

    /// 檢查是否為貨到付款
    pub fn is_cod(&self) -> bool {
        self.payment == PaymentMethod::Cod
    }
}
