//! # Gate Optimizer
//!
//! 門檻推薦（離散掃描淨利目標函數）

pub mod objective;
pub mod recommender;

// Re-export 主要類型
pub use objective::ProfitObjective;
pub use recommender::ThresholdRecommender;

use gate_calc::ImpactReport;
use gate_core::Cutoff;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單一候選門檻的評估結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub cutoff: Cutoff,
    pub objective_value: Decimal,
    pub report: ImpactReport,
}

/// 推薦結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// 推薦門檻（未改善時等於目前門檻）
    pub cutoff: Cutoff,

    /// 推薦門檻的目標值
    pub objective_value: Decimal,

    /// 目前門檻的目標值
    pub current_objective_value: Decimal,

    /// 是否嚴格優於目前門檻
    pub improved: bool,

    /// 推薦門檻的影響報告
    pub report: ImpactReport,

    /// 所有候選門檻（依門檻遞增）
    pub candidates: Vec<CandidateScore>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl Recommendation {
    /// 目標值相對目前門檻的提升
    pub fn uplift(&self) -> Decimal {
        self.objective_value - self.current_objective_value
    }

    /// 查詢指定門檻的候選結果
    pub fn candidate(&self, cutoff: Cutoff) -> Option<&CandidateScore> {
        self.candidates.iter().find(|c| c.cutoff == cutoff)
    }
}
