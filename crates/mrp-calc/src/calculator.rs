//! MRP 主計算器

use mrp_core::{MrpError, NetRequirementRow, PlanSummary, PlanningParameters, Snapshot};
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::classify::Classifier;
use crate::cost_rollup::{CostRollupCalculator, CostRollupSummary};
use crate::coverage::CoverageMetrics;
use crate::demand::DemandAggregator;
use crate::explosion::{BomExplosion, BomExplosionEngine};
use crate::index::{BomIndex, ReferenceIndex};
use crate::netting::NettingCalculator;
use crate::overflow::overflow_warning;
use crate::{push_warning, PlanResult};

/// 以快照與參數執行一次完整的淨需求計算
pub fn compute_plan(snapshot: &Snapshot, params: &PlanningParameters) -> mrp_core::Result<PlanResult> {
    MrpCalculator::new(snapshot).compute_plan(params)
}

/// MRP 計算器
///
/// 持有快照的唯讀參照與由它建立的索引；淨需求、BOM 展開與成本彙總共用同一組索引。
pub struct MrpCalculator<'a> {
    snapshot: &'a Snapshot,
    index: ReferenceIndex<'a>,
    boms: BomIndex<'a>,
}

impl<'a> MrpCalculator<'a> {
    /// 建立索引；同一物料有多張生效 BOM 時取快照中的第一張，並記錄於 [`BomIndex::ambiguities`]
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let index = ReferenceIndex::build(&snapshot.items, &snapshot.inventory);
        let boms = BomIndex::build(&snapshot.boms, &snapshot.bom_lines);

        Self {
            snapshot,
            index,
            boms,
        }
    }

    /// 主 MRP 計算入口
    pub fn compute_plan(&self, params: &PlanningParameters) -> mrp_core::Result<PlanResult> {
        params.validate()?;

        tracing::info!(
            "開始 MRP 計算：快照版本 {}，物料 {} 筆，銷售明細 {} 筆，工單 {} 筆",
            self.snapshot.version,
            self.snapshot.items.len(),
            self.snapshot.sales_order_lines.len(),
            self.snapshot.production_orders.len()
        );
        let start_time = std::time::Instant::now();

        // Step 1: 需求彙總
        tracing::debug!("Step 1: 需求彙總");
        let mut warnings = Vec::new();
        for ambiguity in self.boms.ambiguities() {
            push_warning(&mut warnings, ambiguity.to_warning());
        }
        let demand = DemandAggregator::aggregate(
            &self.snapshot.sales_order_lines,
            &self.snapshot.production_orders,
            &self.index,
            &self.boms,
            &mut warnings,
        );

        // Step 2: 逐物料計算淨需求、分類與覆蓋指標
        tracing::debug!("Step 2: 淨需求計算");
        let mut rows = Vec::new();
        let mut seen = HashSet::new();

        for item in &self.snapshot.items {
            if !seen.insert(item.id.as_str()) {
                continue;
            }

            let gross = demand.gross(&item.id);
            let on_hand = self.index.on_hand(&item.id);
            if gross <= Decimal::ZERO && on_hand <= Decimal::ZERO {
                continue;
            }

            let net = NettingCalculator::calculate(item, gross, on_hand, params);
            let earliest_due_date = demand.earliest_due_date(&item.id);
            let coverage = CoverageMetrics::evaluate(
                item,
                on_hand,
                net.adjusted_gross,
                earliest_due_date,
                params.planning_horizon_days,
            );
            if net.overflowed || coverage.overflowed {
                push_warning(&mut warnings, overflow_warning(&item.id, "淨需求"));
            }

            rows.push(NetRequirementRow {
                item_id: item.id.clone(),
                sku: item.sku.clone(),
                name: item.display_name().to_string(),
                item_type: item.item_type,
                direct_demand: demand.direct(&item.id),
                indirect_demand: demand.indirect(&item.id),
                gross_requirement: net.gross_requirement,
                on_hand,
                adjusted_gross: net.adjusted_gross,
                effective_safety_stock: net.effective_safety_stock,
                net_requirement: net.net_requirement,
                action_qty: net.action_qty,
                estimated_cost: net.estimated_cost,
                action: Classifier::action(item.item_type, net.net_requirement),
                priority: Classifier::priority(net.net_requirement, net.effective_safety_stock),
                lead_time_days: item.lead_time_days,
                below_reorder_point: coverage.below_reorder_point,
                days_of_coverage: coverage.days_of_coverage,
                earliest_due_date,
                order_by_date: coverage.order_by_date,
            });
        }

        // Step 3: 建議清單與彙總
        tracing::debug!("Step 3: 建議排序");
        let recommendations = Classifier::recommendations(&rows);
        let summary = PlanSummary::from_rows(&rows, &recommendations);

        tracing::info!(
            "MRP 計算完成，耗時 {:?}，物料 {} 筆，建議 {} 筆，預估成本 {}",
            start_time.elapsed(),
            summary.items_evaluated,
            summary.recommendation_count,
            summary.total_estimated_cost
        );

        Ok(PlanResult {
            snapshot_version: self.snapshot.version,
            parameters: params.clone(),
            rows,
            recommendations,
            summary,
            warnings,
        })
    }

    /// 多層展開指定物料
    pub fn explode(&self, item_id: &str, quantity: Decimal) -> BomExplosion {
        BomExplosionEngine::new(&self.index, &self.boms).explode(item_id, quantity)
    }

    /// 指定 BOM 的成本彙總
    pub fn cost_rollup(&self, bom_id: &str) -> mrp_core::Result<CostRollupSummary> {
        let bom = self
            .boms
            .bom(bom_id)
            .ok_or_else(|| MrpError::BomNotFound(bom_id.to_string()))?;

        Ok(CostRollupCalculator::rollup(
            bom,
            self.boms.lines(&bom.id),
            &self.index,
        ))
    }

    /// 物料生效 BOM 的成本彙總；物料沒有生效 BOM 時為 `None`
    pub fn cost_rollup_for_item(&self, item_id: &str) -> Option<CostRollupSummary> {
        let bom = self.boms.active_bom(item_id)?;
        Some(CostRollupCalculator::rollup(
            bom,
            self.boms.lines(&bom.id),
            &self.index,
        ))
    }

    /// 物料與庫存索引
    pub fn index(&self) -> &ReferenceIndex<'a> {
        &self.index
    }

    /// BOM 索引
    pub fn boms(&self) -> &BomIndex<'a> {
        &self.boms
    }

    /// 快照參照
    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }
}
