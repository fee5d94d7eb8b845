//! 門檻策略：模式 → 門檻、直接設定門檻、推薦回寫

use gate_core::{Cutoff, Mode, ModePresets};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 目前門檻的來源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CutoffSource {
    /// 使用者直接設定（拖拉/輸入）
    UserSet,
    /// 由模式設定
    ModeSet(Mode),
    /// 由推薦器自動設定
    AutoRecommended,
}

/// 門檻變更事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffChange {
    pub previous: Cutoff,
    pub current: Cutoff,
    pub source: CutoffSource,
}

type Listener = Box<dyn FnMut(&CutoffChange) + Send>;

/// 門檻策略
pub struct ThresholdPolicy {
    presets: ModePresets,
    current: Cutoff,
    source: CutoffSource,
    listeners: Vec<Listener>,
}

impl ThresholdPolicy {
    /// 創建新的策略，初始為平衡模式
    pub fn new(presets: ModePresets) -> Self {
        Self {
            presets,
            current: presets.cutoff_for(Mode::Balanced),
            source: CutoffSource::ModeSet(Mode::Balanced),
            listeners: Vec::new(),
        }
    }

    /// 以指定門檻創建策略（來源視為使用者設定）
    pub fn with_initial_cutoff(presets: ModePresets, cutoff: Cutoff) -> Self {
        Self {
            presets,
            current: cutoff,
            source: CutoffSource::UserSet,
            listeners: Vec::new(),
        }
    }

    /// 訂閱門檻變更
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&CutoffChange) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// 選擇模式，覆寫目前門檻
    pub fn set_mode(&mut self, mode: Mode) -> Cutoff {
        let cutoff = self.presets.cutoff_for(mode);
        tracing::debug!("選擇模式 {} → 門檻 {}", mode, cutoff);
        self.apply(cutoff, CutoffSource::ModeSet(mode))
    }

    /// 直接設定門檻；超出 [0, 100] 會被夾緊而非拒絕
    pub fn set_cutoff(&mut self, value: Decimal) -> Cutoff {
        let (cutoff, clamped) = Cutoff::clamped(value);
        if clamped {
            tracing::warn!("門檻 {} 超出範圍，已夾緊為 {}", value, cutoff);
        }
        self.apply(cutoff, CutoffSource::UserSet)
    }

    /// 套用推薦器的結果
    pub fn apply_recommendation(&mut self, cutoff: Cutoff) -> Cutoff {
        tracing::debug!("套用推薦門檻 {}", cutoff);
        self.apply(cutoff, CutoffSource::AutoRecommended)
    }

    /// 目前門檻
    pub fn current(&self) -> Cutoff {
        self.current
    }

    /// 目前門檻來源
    pub fn source(&self) -> CutoffSource {
        self.source
    }

    /// 模式預設門檻
    pub fn presets(&self) -> &ModePresets {
        &self.presets
    }

    fn apply(&mut self, cutoff: Cutoff, source: CutoffSource) -> Cutoff {
        let change = CutoffChange {
            previous: self.current,
            current: cutoff,
            source,
        };

        self.current = cutoff;
        self.source = source;

        for listener in self.listeners.iter_mut() {
            listener(&change);
        }

        cutoff
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(ModePresets::default())
    }
}

impl fmt::Debug for ThresholdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThresholdPolicy")
            .field("presets", &self.presets)
            .field("current", &self.current)
            .field("source", &self.source)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_initial_state() {
        let policy = ThresholdPolicy::default();

        assert_eq!(policy.current(), Cutoff::from_percent(75));
        assert_eq!(policy.source(), CutoffSource::ModeSet(Mode::Balanced));
    }

    #[rstest]
    #[case(Mode::Aggressive, 60)]
    #[case(Mode::Balanced, 75)]
    #[case(Mode::Maximum, 90)]
    fn test_set_mode(#[case] mode: Mode, #[case] expected: u32) {
        let mut policy = ThresholdPolicy::default();

        assert_eq!(policy.set_mode(mode), Cutoff::from_percent(expected));
        assert_eq!(policy.current(), Cutoff::from_percent(expected));
        assert_eq!(policy.source(), CutoffSource::ModeSet(mode));
    }

    #[rstest]
    #[case(Decimal::from(-20), 0)]
    #[case(Decimal::from(42), 42)]
    #[case(Decimal::from(180), 100)]
    fn test_set_cutoff_clamps(#[case] input: Decimal, #[case] expected: u32) {
        let mut policy = ThresholdPolicy::default();

        assert_eq!(policy.set_cutoff(input), Cutoff::from_percent(expected));
        assert_eq!(policy.source(), CutoffSource::UserSet);
    }

    #[test]
    fn test_manual_cutoff_does_not_map_back_to_mode() {
        let mut policy = ThresholdPolicy::default();
        policy.set_mode(Mode::Maximum);

        // 手動設定為平衡模式的值，來源仍是使用者
        policy.set_cutoff(Decimal::from(75));
        assert_eq!(policy.source(), CutoffSource::UserSet);
    }

    #[test]
    fn test_listeners_receive_changes() {
        let seen: Arc<Mutex<Vec<CutoffChange>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut policy = ThresholdPolicy::default();
        policy.subscribe(move |change| sink.lock().unwrap().push(*change));

        policy.set_mode(Mode::Aggressive);
        policy.set_cutoff(Decimal::from(82));
        policy.apply_recommendation(Cutoff::from_percent(68));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].previous, Cutoff::from_percent(75));
        assert_eq!(seen[0].current, Cutoff::from_percent(60));
        assert_eq!(seen[1].source, CutoffSource::UserSet);
        assert_eq!(seen[2].previous, Cutoff::from_percent(82));
        assert_eq!(seen[2].source, CutoffSource::AutoRecommended);
    }
}
