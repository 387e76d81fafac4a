//! 計劃參數配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MrpError, Result};

/// 百分比參數上限（%）
pub const MAX_PERCENT_PARAMETER: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// 安全庫存倍數上限
pub const MAX_SAFETY_STOCK_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// 計劃時界上限（天）
pub const MAX_PLANNING_HORIZON_DAYS: u32 = 3660;

/// 單次 MRP 計算的全域參數
///
/// 參數由呼叫端持有；任何一項改變都必須以新參數重新執行完整計算。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningParameters {
    /// 安全庫存倍數（≥ 0）
    pub safety_stock_multiplier: Decimal,

    /// 計劃時界（天，≥ 1），用於日均需求與庫存可用天數
    pub planning_horizon_days: u32,

    /// 需求預測放大（%，≥ 0），100 表示不調整
    pub demand_forecast_boost: Decimal,

    /// 全域損耗係數（%，≥ 0）
    pub scrap_factor: Decimal,
}

impl Default for PlanningParameters {
    fn default() -> Self {
        Self {
            safety_stock_multiplier: Decimal::ONE,
            planning_horizon_days: 30,
            demand_forecast_boost: Decimal::ONE_HUNDRED,
            scrap_factor: Decimal::ZERO,
        }
    }
}

impl PlanningParameters {
    /// 創建預設參數
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 讀取參數，缺少的欄位使用預設值
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// 建構器模式：設置安全庫存倍數
    pub fn with_safety_stock_multiplier(mut self, multiplier: Decimal) -> Self {
        self.safety_stock_multiplier = multiplier;
        self
    }

    /// 建構器模式：設置計劃時界
    pub fn with_planning_horizon(mut self, days: u32) -> Self {
        self.planning_horizon_days = days;
        self
    }

    /// 建構器模式：設置需求預測放大
    pub fn with_demand_forecast_boost(mut self, boost_pct: Decimal) -> Self {
        self.demand_forecast_boost = boost_pct;
        self
    }

    /// 建構器模式：設置損耗係數
    pub fn with_scrap_factor(mut self, scrap_pct: Decimal) -> Self {
        self.scrap_factor = scrap_pct;
        self
    }

    /// 檢查參數範圍
    pub fn validate(&self) -> Result<()> {
        check_range(
            "safetyStockMultiplier",
            self.safety_stock_multiplier,
            MAX_SAFETY_STOCK_MULTIPLIER,
        )?;
        if !(1..=MAX_PLANNING_HORIZON_DAYS).contains(&self.planning_horizon_days) {
            return Err(MrpError::InvalidParameter(format!(
                "planningHorizonDays 必須介於 1 與 {}: {}",
                MAX_PLANNING_HORIZON_DAYS, self.planning_horizon_days
            )));
        }
        check_range(
            "demandForecastBoost",
            self.demand_forecast_boost,
            MAX_PERCENT_PARAMETER,
        )?;
        check_range("scrapFactor", self.scrap_factor, MAX_PERCENT_PARAMETER)
    }

    /// 毛需求放大倍數 `(boost / 100) × (1 + scrap / 100)`
    ///
    /// 未經 `validate` 的極端值在溢位時飽和為 `Decimal::MAX`。
    pub fn demand_multiplier(&self) -> Decimal {
        (self.demand_forecast_boost / Decimal::ONE_HUNDRED)
            .saturating_mul(Decimal::ONE + self.scrap_factor / Decimal::ONE_HUNDRED)
    }
}

fn check_range(name: &str, value: Decimal, max: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(MrpError::InvalidParameter(format!("{name} 不可為負: {value}")));
    }
    if value > max {
        return Err(MrpError::InvalidParameter(format!(
            "{name} 不可超過 {max}: {value}"
        )));
    }
    Ok(())
}
