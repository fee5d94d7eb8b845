//! 門檻變更合併
//!
//! 連續快速的門檻變更（例如拖拉滑桿）只計算最新的值；
//! 過時的結果一律丟棄，報告不會以錯誤的順序呈現。

use gate_calc::ImpactReport;
use gate_core::Cutoff;
use std::sync::Arc;

/// 一次門檻計算請求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub cutoff: Cutoff,
}

/// 門檻變更合併器（由呼叫端持有）
#[derive(Debug, Default)]
pub struct CutoffCoalescer {
    last_submitted: u64,
    pending: Option<Ticket>,
    last_published: Option<u64>,
    latest: Option<Arc<ImpactReport>>,
    superseded: u64,
}

impl CutoffCoalescer {
    /// 創建新的合併器
    pub fn new() -> Self {
        Self::default()
    }

    /// 提交新的門檻，取代尚未處理的請求
    pub fn submit(&mut self, cutoff: Cutoff) -> Ticket {
        self.last_submitted += 1;
        let ticket = Ticket {
            seq: self.last_submitted,
            cutoff,
        };

        if let Some(previous) = self.pending.replace(ticket) {
            self.superseded += 1;
            tracing::trace!("門檻請求 #{} 被 #{} 取代", previous.seq, ticket.seq);
        }

        ticket
    }

    /// 取出最新的待處理請求
    pub fn take_latest(&mut self) -> Option<Ticket> {
        self.pending.take()
    }

    /// 是否有待處理請求
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 發布計算結果
    ///
    /// 計算期間已有更新的請求，或已發布過更新的結果時，回傳 `false` 並丟棄。
    pub fn publish(&mut self, ticket: Ticket, report: ImpactReport) -> bool {
        let stale_by_submit = ticket.seq < self.last_submitted;
        let stale_by_publish = self.last_published.is_some_and(|seq| seq >= ticket.seq);

        if stale_by_submit || stale_by_publish {
            tracing::debug!("丟棄過時的報告 #{}（門檻 {}）", ticket.seq, ticket.cutoff);
            return false;
        }

        self.last_published = Some(ticket.seq);
        self.latest = Some(Arc::new(report));
        true
    }

    /// 取出最新請求、計算並發布
    pub fn run_latest<F>(&mut self, compute: F) -> Option<Arc<ImpactReport>>
    where
        F: FnOnce(Cutoff) -> ImpactReport,
    {
        let ticket = self.take_latest()?;
        let report = compute(ticket.cutoff);
        if self.publish(ticket, report) {
            self.latest.clone()
        } else {
            None
        }
    }

    /// 最新已發布的報告
    pub fn latest(&self) -> Option<Arc<ImpactReport>> {
        self.latest.clone()
    }

    /// 被合併掉的請求數
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}
