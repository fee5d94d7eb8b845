//! 出貨/暫扣分割

use gate_core::{Cutoff, Order};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// 分割結果（不持久化，每次由門檻與訂單池推導）
#[derive(Debug, Clone, Serialize)]
pub struct Partition<'a> {
    /// 使用的門檻
    pub cutoff: Cutoff,

    /// 出貨集合
    pub ship: Vec<&'a Order>,

    /// 暫扣集合
    pub hold: Vec<&'a Order>,

    /// 是否套用了「至少出貨一筆」的下限
    pub floor_applied: bool,
}

impl<'a> Partition<'a> {
    /// 訂單總數
    pub fn total(&self) -> usize {
        self.ship.len() + self.hold.len()
    }

    /// 是否為空訂單池
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// 暫扣比例（0 ~ 1），空池為 0
    pub fn hold_share(&self) -> Decimal {
        if self.is_empty() {
            return Decimal::ZERO;
        }
        Decimal::from(self.hold.len() as u64) / Decimal::from(self.total() as u64)
    }

    /// 出貨訂單ID
    pub fn ship_ids(&self) -> Vec<Uuid> {
        self.ship.iter().map(|o| o.id).collect()
    }

    /// 暫扣訂單ID
    pub fn hold_ids(&self) -> Vec<Uuid> {
        self.hold.iter().map(|o| o.id).collect()
    }
}

/// 出貨決策引擎（純函數）
pub struct ShipDecisionEngine;

impl ShipDecisionEngine {
    /// 依門檻分割訂單：分數 >= 門檻出貨，否則暫扣
    ///
    /// 訂單池非空而出貨集合為空時，分數最高的一筆（同分取池中較前者）改為出貨。
    /// 兩個集合都保持訂單池原本的順序。
    pub fn partition(orders: &[Order], cutoff: Cutoff) -> Partition<'_> {
        let (mut ship, mut hold): (Vec<&Order>, Vec<&Order>) =
            orders.iter().partition(|o| cutoff.admits(o.score));

        let mut floor_applied = false;
        if ship.is_empty() && !hold.is_empty() {
            let best = Self::best_index(&hold);
            ship.push(hold.remove(best));
            floor_applied = true;
            tracing::debug!("門檻 {} 無訂單可出貨，保留最高分訂單出貨", cutoff);
        }

        Partition {
            cutoff,
            ship,
            hold,
            floor_applied,
        }
    }

    /// 分數最高者的位置（同分取最前）
    fn best_index(orders: &[&Order]) -> usize {
        let mut best = 0;
        for (idx, order) in orders.iter().enumerate().skip(1) {
            if order.score > orders[best].score {
                best = idx;
            }
        }
        best
    }
}

/// 依分數排序的索引，供推薦掃描重複分割使用
///
/// 與 `ShipDecisionEngine::partition` 得到相同的集合，
/// 但集合內依分數由高到低排列（同分保持訂單池順序）。
#[derive(Debug, Clone)]
pub struct ScoreIndex<'a> {
    sorted: Vec<&'a Order>,
}

impl<'a> ScoreIndex<'a> {
    /// 建立索引
    pub fn new(orders: &'a [Order]) -> Self {
        let mut sorted: Vec<&Order> = orders.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        Self { sorted }
    }

    /// 訂單數量
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// 是否為空
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// 依門檻分割（二分搜尋）
    pub fn partition_at(&self, cutoff: Cutoff) -> Partition<'a> {
        let mut split = self.sorted.partition_point(|o| cutoff.admits(o.score));

        let floor_applied = split == 0 && !self.sorted.is_empty();
        if floor_applied {
            split = 1;
        }

        Partition {
            cutoff,
            ship: self.sorted[..split].to_vec(),
            hold: self.sorted[split..].to_vec(),
            floor_applied,
        }
    }
}
