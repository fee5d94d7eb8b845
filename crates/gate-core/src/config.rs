//! 出貨閘門配置模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cutoff::{Cutoff, Mode};
use crate::order::ShippingClass;
use crate::{GateError, Result};

/// 閘門整體配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// 模式對應的預設門檻
    pub mode_presets: ModePresets,

    /// 簽收率插值曲線
    pub delivery_curve: DeliveryCurve,

    /// 運費等級成本倍數
    pub class_multipliers: ClassMultipliers,

    /// 日節省換算月節省的倍數
    pub monthly_multiplier: u32,

    /// 推薦器掃描步長（整數百分點）
    pub recommender_step: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            mode_presets: ModePresets::default(),
            delivery_curve: DeliveryCurve::HoldShare,
            class_multipliers: ClassMultipliers::default(),
            monthly_multiplier: 30,
            recommender_step: 1,
        }
    }
}

impl GateConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GateError::InvalidConfig(format!("JSON 解析失敗: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置模式門檻
    pub fn with_mode_presets(mut self, presets: ModePresets) -> Self {
        self.mode_presets = presets;
        self
    }

    /// 建構器模式：設置簽收率曲線
    pub fn with_delivery_curve(mut self, curve: DeliveryCurve) -> Self {
        self.delivery_curve = curve;
        self
    }

    /// 建構器模式：設置運費等級倍數
    pub fn with_class_multipliers(mut self, multipliers: ClassMultipliers) -> Self {
        self.class_multipliers = multipliers;
        self
    }

    /// 建構器模式：設置月換算倍數
    pub fn with_monthly_multiplier(mut self, multiplier: u32) -> Self {
        self.monthly_multiplier = multiplier;
        self
    }

    /// 建構器模式：設置推薦掃描步長
    pub fn with_recommender_step(mut self, step: u32) -> Self {
        self.recommender_step = step;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.recommender_step == 0 || self.recommender_step > 100 {
            return Err(GateError::InvalidConfig(format!(
                "推薦掃描步長必須介於 1 與 100 之間: {}",
                self.recommender_step
            )));
        }

        self.mode_presets.validate()?;
        self.class_multipliers.validate()?;

        Ok(())
    }
}

/// 模式預設門檻
///
/// 反序列化時不經過 `Cutoff` 的夾緊，由 `validate` 拒絕超出範圍的值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModePresets {
    pub aggressive: Decimal,
    pub balanced: Decimal,
    pub maximum: Decimal,
}

impl Default for ModePresets {
    fn default() -> Self {
        Self {
            aggressive: Decimal::from(60),
            balanced: Decimal::from(75),
            maximum: Decimal::from(90),
        }
    }
}

impl ModePresets {
    /// 取得模式對應的門檻
    pub fn cutoff_for(&self, mode: Mode) -> Cutoff {
        let value = match mode {
            Mode::Aggressive => self.aggressive,
            Mode::Balanced => self.balanced,
            Mode::Maximum => self.maximum,
        };
        Cutoff::new(value)
    }

    fn validate(&self) -> Result<()> {
        for mode in Mode::ALL {
            let value = match mode {
                Mode::Aggressive => self.aggressive,
                Mode::Balanced => self.balanced,
                Mode::Maximum => self.maximum,
            };
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(GateError::InvalidConfig(format!(
                    "模式 {} 的門檻必須介於 0 與 100 之間: {}",
                    mode, value
                )));
            }
        }

        if !(self.aggressive <= self.balanced && self.balanced <= self.maximum) {
            return Err(GateError::InvalidConfig(
                "模式門檻必須滿足 aggressive <= balanced <= maximum".to_string(),
            ));
        }

        Ok(())
    }
}

/// 簽收率插值曲線
///
/// 兩種曲線都滿足：門檻 0 時等於歷史簽收率，門檻 100 時等於 100%，且隨門檻單調不減。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryCurve {
    /// 依實際暫扣比例插值（暫扣訂單數 / 訂單總數）
    HoldShare,
    /// 依門檻線性插值（門檻 / 100）
    LinearCutoff,
}

/// 運費等級成本倍數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMultipliers {
    pub standard: Decimal,
    pub express: Decimal,
    pub heavy: Decimal,
}

impl Default for ClassMultipliers {
    fn default() -> Self {
        Self {
            standard: Decimal::ONE,
            express: Decimal::new(15, 1),
            heavy: Decimal::from(2),
        }
    }
}

impl ClassMultipliers {
    /// 取得運費等級的倍數
    pub fn for_class(&self, class: ShippingClass) -> Decimal {
        match class {
            ShippingClass::Standard => self.standard,
            ShippingClass::Express => self.express,
            ShippingClass::Heavy => self.heavy,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.standard < Decimal::ZERO || self.express < Decimal::ZERO || self.heavy < Decimal::ZERO
        {
            return Err(GateError::InvalidConfig("運費等級倍數不可為負".to_string()));
        }
        let cap = Decimal::ONE_HUNDRED;
        if self.standard > cap || self.express > cap || self.heavy > cap {
            return Err(GateError::InvalidConfig(format!("運費等級倍數不可超過 {}", cap)));
        }
        Ok(())
    }
}
