//! 門檻推薦器

use gate_calc::{ImpactProjector, ScoreIndex};
use gate_core::{Baseline, Cutoff, GateConfig, GateError, OrderPool};
use rayon::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::objective::ProfitObjective;
use crate::{CandidateScore, Recommendation};

/// 門檻推薦器
///
/// 在 [0, 100] 以整數步長掃描門檻，取淨利最大者；同分取較低門檻（多出貨）。
/// 目標函數不一定平滑（成本可能分級跳動），因此只做離散掃描。
#[derive(Debug, Clone)]
pub struct ThresholdRecommender {
    projector: ImpactProjector,
    objective: ProfitObjective,
    step: u32,
}

impl ThresholdRecommender {
    /// 創建新的推薦器
    pub fn new(config: GateConfig, objective: ProfitObjective) -> gate_core::Result<Self> {
        config.validate()?;
        let step = config.recommender_step;
        Ok(Self {
            projector: ImpactProjector::new(config),
            objective,
            step,
        })
    }

    /// 目標函數
    pub fn objective(&self) -> &ProfitObjective {
        &self.objective
    }

    /// 推估所用的配置
    pub fn config(&self) -> &GateConfig {
        self.projector.config()
    }

    /// 候選門檻（遞增，必含 0 與 100）
    pub fn candidates(&self) -> Vec<Cutoff> {
        let mut values: Vec<u32> = (0..=100).step_by(self.step as usize).collect();
        if values.last() != Some(&100) {
            values.push(100);
        }
        values.into_iter().map(Cutoff::from_percent).collect()
    }

    /// 推薦門檻
    ///
    /// 整個掃描只讀取傳入的同一份訂單池快照。沒有任何候選嚴格優於目前門檻時，
    /// 回傳目前門檻並標記 `improved = false`。
    pub fn recommend(
        &self,
        pool: &OrderPool,
        baseline: &Baseline,
        current: Cutoff,
    ) -> gate_core::Result<Recommendation> {
        baseline.validate()?;

        tracing::info!(
            "開始門檻推薦：訂單 {} 筆，目前門檻 {}，步長 {}",
            pool.len(),
            current,
            self.step
        );
        let start_time = std::time::Instant::now();

        let index = ScoreIndex::new(pool.orders());
        let ship_all_cost = self
            .objective
            .ship_all_cost(pool.orders(), &self.projector, baseline)?;

        // Step 1: 平行評估所有候選（collect 保持遞增順序）
        let candidates: Vec<CandidateScore> = self
            .candidates()
            .into_par_iter()
            .map(|cutoff| self.evaluate(&index, cutoff, baseline, ship_all_cost))
            .collect::<gate_core::Result<_>>()?;

        // Step 2: 循序選出最大值，嚴格大於才替換，因此同分保留較低門檻
        let best = candidates
            .iter()
            .fold(None::<&CandidateScore>, |best, candidate| match best {
                Some(b) if candidate.objective_value <= b.objective_value => Some(b),
                _ => Some(candidate),
            })
            .ok_or_else(|| GateError::CalculationError("沒有候選門檻".to_string()))?;

        // Step 3: 與目前門檻比較
        let current_score = self.evaluate(&index, current, baseline, ship_all_cost)?;
        let improved = best.objective_value > current_score.objective_value;

        let chosen = if improved {
            best.clone()
        } else {
            tracing::info!("沒有候選門檻優於目前門檻 {}，維持不變", current);
            current_score.clone()
        };

        let recommendation = Recommendation {
            cutoff: chosen.cutoff,
            objective_value: round_money(chosen.objective_value),
            current_objective_value: round_money(current_score.objective_value),
            improved,
            report: chosen.report,
            candidates: candidates
                .into_iter()
                .map(|mut c| {
                    c.objective_value = round_money(c.objective_value);
                    c
                })
                .collect(),
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        };

        tracing::info!(
            "門檻推薦完成，耗時 {:?}，推薦門檻 {}（淨利 {}）",
            start_time.elapsed(),
            recommendation.cutoff,
            recommendation.objective_value
        );

        Ok(recommendation)
    }

    fn evaluate(
        &self,
        index: &ScoreIndex<'_>,
        cutoff: Cutoff,
        baseline: &Baseline,
        ship_all_cost: Decimal,
    ) -> gate_core::Result<CandidateScore> {
        let partition = index.partition_at(cutoff);
        let report = self.projector.project(&partition, baseline);
        let objective_value = self.objective.evaluate(&partition, &report, ship_all_cost)?;

        Ok(CandidateScore {
            cutoff,
            objective_value,
            report,
        })
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
