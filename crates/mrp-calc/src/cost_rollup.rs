//! BOM 成本彙總（單層）

use mrp_core::{Bom, BomLine, UNKNOWN_NAME};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::index::ReferenceIndex;
use crate::overflow::{overflow_warning, OverflowGuard};
use crate::{push_warning, MrpWarning};

/// 成本明細行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRollupLine {
    pub line_id: String,
    pub component_id: Option<String>,
    pub component_name: String,
    pub position: i64,
    pub quantity: Decimal,
    pub scrap_pct: Decimal,
    /// 子件標準成本
    pub unit_cost: Decimal,
    /// 材料成本 = 單價 × 用量
    pub material_cost: Decimal,
    /// 損耗預留 = 延伸成本 - 材料成本
    pub scrap_allowance: Decimal,
    /// 延伸成本 = 單價 × 用量 × (1 + 損耗率)
    pub extended_cost: Decimal,
}

/// 成本彙總
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostRollupSummary {
    pub bom_id: String,
    pub parent_item_id: Option<String>,
    pub parent_name: String,
    pub yield_pct: Decimal,
    pub lines: Vec<CostRollupLine>,
    /// 材料成本合計
    pub material_total: Decimal,
    /// 損耗預留合計
    pub scrap_total: Decimal,
    /// 延伸成本合計（僅計入正值明細）
    pub raw_total: Decimal,
    /// 良率調整後成本
    pub yield_adjusted_total: Decimal,
    /// 數值溢位等警告
    pub warnings: Vec<MrpWarning>,
}

impl CostRollupSummary {
    /// 良率損失造成的額外成本
    pub fn yield_loss(&self) -> Decimal {
        self.yield_adjusted_total.saturating_sub(self.raw_total)
    }
}

/// 成本彙總計算器
pub struct CostRollupCalculator;

impl CostRollupCalculator {
    /// 計算 BOM 的單層成本彙總
    ///
    /// 良率 ≤ 0 時不做良率調整。金額溢位時飽和並附上 Error 等級警告。
    pub fn rollup(bom: &Bom, lines: &[&BomLine], index: &ReferenceIndex<'_>) -> CostRollupSummary {
        let mut summary = CostRollupSummary {
            bom_id: bom.id.clone(),
            parent_item_id: bom.item_id.clone(),
            parent_name: bom
                .item_id
                .as_deref()
                .map(|id| index.display_name(id))
                .unwrap_or(UNKNOWN_NAME)
                .to_string(),
            yield_pct: bom.yield_pct,
            lines: Vec::with_capacity(lines.len()),
            material_total: Decimal::ZERO,
            scrap_total: Decimal::ZERO,
            raw_total: Decimal::ZERO,
            yield_adjusted_total: Decimal::ZERO,
            warnings: Vec::new(),
        };
        let mut totals = OverflowGuard::new();

        for line in lines {
            let component_id = line.component_id.clone();
            let (component_name, unit_cost) = match component_id.as_deref() {
                Some(id) => (index.display_name(id).to_string(), index.standard_cost(id)),
                None => (UNKNOWN_NAME.to_string(), Decimal::ZERO),
            };

            let mut guard = OverflowGuard::new();
            let material_cost = guard.mul(unit_cost, line.quantity);
            let extended_cost = guard.mul(material_cost, line.scrap_multiplier());
            let scrap_allowance = guard.sub(extended_cost, material_cost);
            if guard.overflowed() {
                push_warning(
                    &mut summary.warnings,
                    overflow_warning(
                        component_id.as_deref().unwrap_or(UNKNOWN_NAME),
                        &format!("BOM 明細 {} 的成本", line.id),
                    ),
                );
            }

            if extended_cost > Decimal::ZERO {
                summary.material_total = totals.add(summary.material_total, material_cost);
                summary.scrap_total = totals.add(summary.scrap_total, scrap_allowance);
                summary.raw_total = totals.add(summary.raw_total, extended_cost);
            }

            summary.lines.push(CostRollupLine {
                line_id: line.id.clone(),
                component_id,
                component_name,
                position: line.position,
                quantity: line.quantity,
                scrap_pct: line.scrap_pct,
                unit_cost,
                material_cost,
                scrap_allowance,
                extended_cost,
            });
        }

        summary.yield_adjusted_total = if bom.yield_pct > Decimal::ZERO {
            totals.div(summary.raw_total, bom.yield_pct / Decimal::ONE_HUNDRED)
        } else {
            summary.raw_total
        };
        if totals.overflowed() {
            push_warning(
                &mut summary.warnings,
                overflow_warning(
                    bom.item_id.as_deref().unwrap_or(UNKNOWN_NAME),
                    &format!("BOM {} 的成本合計", bom.id),
                ),
            );
        }

        summary
    }
}
