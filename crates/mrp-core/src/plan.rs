//! 淨需求計劃結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ItemType;

/// 建議動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlannedAction {
    /// 採購
    Purchase,
    /// 生產
    Production,
    /// 無需動作
    None,
}

/// 優先級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// 排序權重（數字越小越緊急）
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// 單一物料的淨需求計算列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetRequirementRow {
    /// 物料ID
    pub item_id: String,
    /// 料號
    pub sku: String,
    /// 顯示名稱
    pub name: String,
    /// 物料類型
    pub item_type: ItemType,

    /// 銷售訂單直接需求
    pub direct_demand: Decimal,
    /// 工單展開的間接需求
    pub indirect_demand: Decimal,
    /// 總需求（直接 + 間接）
    pub gross_requirement: Decimal,
    /// 現有庫存
    pub on_hand: Decimal,

    /// 調整後總需求（預測放大、損耗）
    pub adjusted_gross: Decimal,
    /// 有效安全庫存（乘以倍數）
    pub effective_safety_stock: Decimal,
    /// 淨需求
    pub net_requirement: Decimal,
    /// 建議數量
    pub action_qty: Decimal,
    /// 預估成本（兩位小數）
    pub estimated_cost: Decimal,

    /// 建議動作
    pub action: PlannedAction,
    /// 優先級
    pub priority: Priority,

    /// 提前期（天）
    pub lead_time_days: u32,
    /// 是否已低於再訂購點
    pub below_reorder_point: bool,
    /// 現有庫存可支撐天數（無需求時為空）
    pub days_of_coverage: Option<Decimal>,
    /// 未結銷售訂單中最早的交期
    pub earliest_due_date: Option<NaiveDate>,
    /// 最晚下單日（最早交期減提前期）
    pub order_by_date: Option<NaiveDate>,
}

impl NetRequirementRow {
    /// 是否需要補貨
    pub fn needs_action(&self) -> bool {
        self.net_requirement > Decimal::ZERO
    }
}

/// 計劃彙總（儀表板指標）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    /// 參與計算的物料數
    pub items_evaluated: usize,
    /// 建議數
    pub recommendation_count: usize,
    /// 採購建議數
    pub purchase_count: usize,
    /// 生產建議數
    pub production_count: usize,
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    /// 建議總成本
    pub total_estimated_cost: Decimal,
}

impl PlanSummary {
    /// 由計算列與建議清單彙總
    pub fn from_rows(rows: &[NetRequirementRow], recommendations: &[NetRequirementRow]) -> Self {
        let mut summary = Self {
            items_evaluated: rows.len(),
            recommendation_count: recommendations.len(),
            ..Self::default()
        };

        for row in recommendations {
            match row.action {
                PlannedAction::Purchase => summary.purchase_count += 1,
                PlannedAction::Production => summary.production_count += 1,
                PlannedAction::None => {}
            }
            match row.priority {
                Priority::Critical => summary.critical_count += 1,
                Priority::High => summary.high_count += 1,
                Priority::Medium => summary.medium_count += 1,
                Priority::Low => summary.low_count += 1,
            }
            summary.total_estimated_cost =
                summary.total_estimated_cost.saturating_add(row.estimated_cost);
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(action: PlannedAction, priority: Priority, cost: i64) -> NetRequirementRow {
        NetRequirementRow {
            item_id: "ITEM".to_string(),
            sku: String::new(),
            name: String::new(),
            item_type: ItemType::RawMaterial,
            direct_demand: Decimal::ZERO,
            indirect_demand: Decimal::ZERO,
            gross_requirement: Decimal::ZERO,
            on_hand: Decimal::ZERO,
            adjusted_gross: Decimal::ZERO,
            effective_safety_stock: Decimal::ZERO,
            net_requirement: Decimal::ONE,
            action_qty: Decimal::ONE,
            estimated_cost: Decimal::from(cost),
            action,
            priority,
            lead_time_days: 0,
            below_reorder_point: false,
            days_of_coverage: None,
            earliest_due_date: None,
            order_by_date: None,
        }
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::Critical.rank() < Priority::High.rank());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_summary_from_rows() {
        let recommendations = vec![
            row(PlannedAction::Purchase, Priority::Critical, 280),
            row(PlannedAction::Production, Priority::Medium, 120),
            row(PlannedAction::Purchase, Priority::High, 50),
        ];
        let mut rows = recommendations.clone();
        rows.push(row(PlannedAction::None, Priority::Low, 0));

        let summary = PlanSummary::from_rows(&rows, &recommendations);

        assert_eq!(summary.items_evaluated, 4);
        assert_eq!(summary.recommendation_count, 3);
        assert_eq!(summary.purchase_count, 2);
        assert_eq!(summary.production_count, 1);
        assert_eq!(summary.critical_count, 1);
        assert_eq!(summary.low_count, 0);
        assert_eq!(summary.total_estimated_cost, Decimal::from(450));
    }
}
