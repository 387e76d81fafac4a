//! 淨需求計算

use mrp_core::{Item, PlanningParameters};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::overflow::OverflowGuard;

/// 淨需求計算結果
#[derive(Debug, Clone, PartialEq)]
pub struct NetRequirement {
    /// 總需求
    pub gross_requirement: Decimal,
    /// 調整後總需求
    pub adjusted_gross: Decimal,
    /// 有效安全庫存
    pub effective_safety_stock: Decimal,
    /// 淨需求
    pub net_requirement: Decimal,
    /// 建議數量
    pub action_qty: Decimal,
    /// 預估成本
    pub estimated_cost: Decimal,
    /// 計算中有數值溢位（相關欄位已飽和）
    pub overflowed: bool,
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 計算單一物料的淨需求
    ///
    /// - 調整後總需求 = 總需求 × (預測放大 / 100) × (1 + 損耗係數 / 100)
    /// - 有效安全庫存 = 安全庫存 × 倍數
    /// - 淨需求 = max(0, 調整後總需求 - 現有庫存 + 有效安全庫存)
    /// - 建議數量 = 淨需求 > 0 時取 max(淨需求, 最小訂購量)，否則為 0
    ///
    /// 溢位時結果飽和，並設置 `overflowed`。
    pub fn calculate(
        item: &Item,
        gross_requirement: Decimal,
        on_hand: Decimal,
        params: &PlanningParameters,
    ) -> NetRequirement {
        let mut guard = OverflowGuard::new();
        let adjusted_gross = guard.mul(gross_requirement, params.demand_multiplier());
        let effective_safety_stock = guard.mul(item.safety_stock, params.safety_stock_multiplier);

        let shortfall = guard.sub(adjusted_gross, on_hand);
        let net_requirement = guard
            .add(shortfall, effective_safety_stock)
            .max(Decimal::ZERO);

        let action_qty = if net_requirement > Decimal::ZERO {
            net_requirement.max(item.min_order_qty)
        } else {
            Decimal::ZERO
        };

        let estimated_cost = guard
            .mul(action_qty, item.standard_cost)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        NetRequirement {
            gross_requirement,
            adjusted_gross,
            effective_safety_stock,
            net_requirement,
            action_qty,
            estimated_cost,
            overflowed: guard.overflowed(),
        }
    }
}
