//! # MRP Calculation Engine
//!
//! 核心 MRP 計算引擎：需求彙總、淨需求、分類與優先級、BOM 展開、成本彙總。
//! 所有計算都是 `(快照, 參數) -> 結果` 的純函式，不保留任何狀態。

pub mod calculator;
pub mod classify;
pub mod cost_rollup;
pub mod coverage;
pub mod demand;
pub mod explosion;
pub mod index;
pub mod netting;
mod overflow;

// Re-export 主要類型
pub use calculator::{compute_plan, MrpCalculator};
pub use classify::Classifier;
pub use cost_rollup::{CostRollupCalculator, CostRollupLine, CostRollupSummary};
pub use coverage::CoverageMetrics;
pub use demand::{DemandAggregator, DemandProfile};
pub use explosion::{BomExplosion, BomExplosionEngine, ExplosionNode};
pub use index::{AmbiguousBom, BomIndex, ReferenceIndex};
pub use netting::{NetRequirement, NettingCalculator};

use mrp_core::{NetRequirementRow, PlanSummary, PlanningParameters};
use serde::Serialize;

/// MRP 計算結果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResult {
    /// 計算所用的快照版本
    pub snapshot_version: u64,

    /// 計算所用的參數
    pub parameters: PlanningParameters,

    /// 所有參與計算的物料（依物料主檔順序）
    pub rows: Vec<NetRequirementRow>,

    /// 需補貨的物料，依優先級排序
    pub recommendations: Vec<NetRequirementRow>,

    /// 彙總指標
    pub summary: PlanSummary,

    /// 警告信息
    pub warnings: Vec<MrpWarning>,
}

impl PlanResult {
    /// 依物料ID查詢計算列
    pub fn row(&self, item_id: &str) -> Option<&NetRequirementRow> {
        self.rows.iter().find(|row| row.item_id == item_id)
    }
}

/// MRP 警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MrpWarning {
    pub item_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl MrpWarning {
    pub fn new(item_id: impl Into<String>, message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            item_id: item_id.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn info(item_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(item_id, message, WarningSeverity::Info)
    }

    pub fn warning(item_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(item_id, message, WarningSeverity::Warning)
    }

    pub fn error(item_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(item_id, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

/// 記錄警告並寫入日誌
pub(crate) fn push_warning(warnings: &mut Vec<MrpWarning>, warning: MrpWarning) {
    tracing::warn!(
        item_id = %warning.item_id,
        severity = ?warning.severity,
        "{}",
        warning.message
    );
    warnings.push(warning);
}
