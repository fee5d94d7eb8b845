//! 決策工作階段
//!
//! 持有目前的訂單池快照、基準線與門檻策略，門檻或資料變更時標記為髒，
//! 讀取報告時才重算。所有路徑（使用者設定、模式、自動推薦）都經過同一條
//! 分割 → 推估管線。

use gate_calc::{
    CutoffChange, CutoffSource, ImpactProjector, ImpactReport, Partition, ShipDecisionEngine,
    ThresholdPolicy,
};
use gate_core::{Baseline, Cutoff, GateConfig, GateError, Mode, OrderPool};
use gate_optimizer::{ProfitObjective, Recommendation, ThresholdRecommender};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::dirty_tracking::{DirtyReason, DirtyTracker};

/// 決策工作階段
#[derive(Debug)]
pub struct DecisionSession {
    pool: Arc<OrderPool>,
    baseline: Baseline,
    policy: ThresholdPolicy,
    projector: ImpactProjector,
    tracker: DirtyTracker,
    report: Option<Arc<ImpactReport>>,
}

impl DecisionSession {
    /// 創建新的工作階段，初始門檻為平衡模式
    pub fn new(
        pool: Arc<OrderPool>,
        baseline: Baseline,
        config: GateConfig,
    ) -> gate_core::Result<Self> {
        config.validate()?;
        baseline.validate()?;

        Ok(Self {
            pool,
            baseline,
            policy: ThresholdPolicy::new(config.mode_presets),
            projector: ImpactProjector::new(config),
            tracker: DirtyTracker::new(),
            report: None,
        })
    }

    /// 訂閱門檻變更
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CutoffChange) + Send + 'static,
    {
        self.policy.subscribe(listener);
    }

    /// 選擇模式
    pub fn set_mode(&mut self, mode: Mode) -> Cutoff {
        let cutoff = self.policy.set_mode(mode);
        self.tracker.mark_dirty(DirtyReason::Cutoff);
        cutoff
    }

    /// 直接設定門檻（超出範圍會被夾緊）
    pub fn set_cutoff(&mut self, value: Decimal) -> Cutoff {
        let cutoff = self.policy.set_cutoff(value);
        self.tracker.mark_dirty(DirtyReason::Cutoff);
        cutoff
    }

    /// 以本工作階段的配置建立推薦器
    pub fn recommender(&self, objective: ProfitObjective) -> gate_core::Result<ThresholdRecommender> {
        ThresholdRecommender::new(self.projector.config().clone(), objective)
    }

    /// 執行推薦並把結果回寫為目前門檻
    ///
    /// 推薦器的配置必須與本工作階段相同，否則推薦結果與 `report()` 的推估模型不一致，
    /// 回傳 `InvalidConfig`。掃描期間持有訂單池快照的引用，之後的刷新不影響本次掃描。
    pub fn auto_tune(
        &mut self,
        recommender: &ThresholdRecommender,
    ) -> gate_core::Result<Recommendation> {
        if recommender.config() != self.projector.config() {
            return Err(GateError::InvalidConfig(
                "推薦器配置與工作階段配置不一致".to_string(),
            ));
        }

        let snapshot = Arc::clone(&self.pool);
        let recommendation =
            recommender.recommend(&snapshot, &self.baseline, self.policy.current())?;

        self.policy.apply_recommendation(recommendation.cutoff);
        self.tracker.mark_dirty(DirtyReason::Cutoff);

        Ok(recommendation)
    }

    /// 替換訂單池快照；比目前快照舊的會被忽略
    pub fn replace_pool(&mut self, pool: Arc<OrderPool>) -> bool {
        if pool.snapshot_at() < self.pool.snapshot_at() {
            tracing::warn!(
                "忽略過時的訂單池快照 {}（目前 {}）",
                pool.snapshot_at(),
                self.pool.snapshot_at()
            );
            return false;
        }

        tracing::debug!("訂單池刷新：{} 筆", pool.len());
        self.pool = pool;
        self.tracker.mark_dirty(DirtyReason::Pool);
        true
    }

    /// 替換基準線
    pub fn replace_baseline(&mut self, baseline: Baseline) -> gate_core::Result<()> {
        baseline.validate()?;
        self.baseline = baseline;
        self.tracker.mark_dirty(DirtyReason::Baseline);
        Ok(())
    }

    /// 目前的影響報告（需要時才重算，整份替換）
    pub fn report(&mut self) -> Arc<ImpactReport> {
        if let (false, Some(report)) = (self.tracker.is_dirty(), &self.report) {
            return Arc::clone(report);
        }

        tracing::debug!(
            "重算影響報告，原因 {:?}，門檻 {}",
            self.tracker.reasons(),
            self.policy.current()
        );

        let partition = ShipDecisionEngine::partition(self.pool.orders(), self.policy.current());
        let report = Arc::new(self.projector.project(&partition, &self.baseline));

        self.report = Some(Arc::clone(&report));
        self.tracker.clear();
        report
    }

    /// 目前門檻下的分割
    pub fn partition(&self) -> Partition<'_> {
        ShipDecisionEngine::partition(self.pool.orders(), self.policy.current())
    }

    /// 目前門檻
    pub fn cutoff(&self) -> Cutoff {
        self.policy.current()
    }

    /// 目前門檻來源
    pub fn source(&self) -> CutoffSource {
        self.policy.source()
    }

    /// 目前的訂單池快照
    pub fn pool(&self) -> &Arc<OrderPool> {
        &self.pool
    }

    /// 目前的基準線
    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// 是否需要重算
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }
}
