//! 庫存覆蓋與下單時點

use chrono::{Days, NaiveDate};
use mrp_core::Item;
use rust_decimal::Decimal;

use crate::overflow::OverflowGuard;

/// 覆蓋指標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverageMetrics {
    /// 現有庫存可支撐天數（無需求時為空）
    pub days_of_coverage: Option<Decimal>,
    /// 最晚下單日
    pub order_by_date: Option<NaiveDate>,
    /// 是否已低於再訂購點
    pub below_reorder_point: bool,
    /// 可支撐天數溢位（已飽和）
    pub overflowed: bool,
}

impl CoverageMetrics {
    /// 計算覆蓋指標
    ///
    /// 日均需求 = 調整後總需求 / 計劃時界；日均需求為 0 時不計算可支撐天數。
    /// 沒有可解析交期時不計算下單日。
    pub fn evaluate(
        item: &Item,
        on_hand: Decimal,
        adjusted_gross: Decimal,
        earliest_due_date: Option<NaiveDate>,
        planning_horizon_days: u32,
    ) -> Self {
        let horizon = Decimal::from(planning_horizon_days.max(1));
        let daily_demand = adjusted_gross / horizon;

        let mut guard = OverflowGuard::new();
        let days_of_coverage = if daily_demand > Decimal::ZERO {
            Some(guard.div(on_hand.max(Decimal::ZERO), daily_demand).round_dp(1))
        } else {
            None
        };

        let order_by_date = earliest_due_date
            .and_then(|due| due.checked_sub_days(Days::new(u64::from(item.lead_time_days))));

        let below_reorder_point =
            item.reorder_point > Decimal::ZERO && on_hand <= item.reorder_point;

        Self {
            days_of_coverage,
            order_by_date,
            below_reorder_point,
            overflowed: guard.overflowed(),
        }
    }
}
