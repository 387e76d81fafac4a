//! 建議動作分類與優先級

use mrp_core::{ItemType, NetRequirementRow, PlannedAction, Priority};
use rust_decimal::Decimal;

/// 分類器
pub struct Classifier;

impl Classifier {
    /// 建議動作：無淨需求不動作；原物料與耗材採購，其餘生產
    pub fn action(item_type: ItemType, net_requirement: Decimal) -> PlannedAction {
        if net_requirement <= Decimal::ZERO {
            PlannedAction::None
        } else if item_type.is_purchased() {
            PlannedAction::Purchase
        } else {
            PlannedAction::Production
        }
    }

    /// 依淨需求相對有效安全庫存的比例決定優先級
    pub fn priority(net_requirement: Decimal, effective_safety_stock: Decimal) -> Priority {
        if effective_safety_stock > Decimal::ZERO {
            if net_requirement > effective_safety_stock * Decimal::TWO {
                return Priority::Critical;
            }
            if net_requirement > effective_safety_stock {
                return Priority::High;
            }
        }

        if net_requirement > Decimal::ZERO {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// 建議清單：淨需求 > 0 的物料，依優先級穩定排序
    pub fn recommendations(rows: &[NetRequirementRow]) -> Vec<NetRequirementRow> {
        let mut recommendations: Vec<NetRequirementRow> =
            rows.iter().filter(|row| row.needs_action()).cloned().collect();
        recommendations.sort_by_key(|row| row.priority.rank());
        recommendations
    }
}
