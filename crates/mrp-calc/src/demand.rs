//! 需求彙總
//!
//! 總需求來自兩個來源：
//! - 未結銷售訂單明細的未出貨數量（直接需求）
//! - 未結生產工單的剩餘數量，經父件生效 BOM 展開一層後的子件用量（間接需求）

use chrono::NaiveDate;
use mrp_core::{ProductionOrder, SalesOrderLine};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

use crate::index::{BomIndex, ReferenceIndex};
use crate::overflow::{overflow_warning, OverflowGuard};
use crate::{push_warning, MrpWarning};

/// 各物料的需求彙總
#[derive(Debug, Clone, Default)]
pub struct DemandProfile<'a> {
    direct: HashMap<&'a str, Decimal>,
    indirect: HashMap<&'a str, Decimal>,
    earliest_due: HashMap<&'a str, NaiveDate>,
}

impl<'a> DemandProfile<'a> {
    /// 直接需求
    pub fn direct(&self, item_id: &str) -> Decimal {
        self.direct.get(item_id).copied().unwrap_or(Decimal::ZERO)
    }

    /// 間接需求
    pub fn indirect(&self, item_id: &str) -> Decimal {
        self.indirect.get(item_id).copied().unwrap_or(Decimal::ZERO)
    }

    /// 總需求 = 直接 + 間接（溢位時飽和）
    pub fn gross(&self, item_id: &str) -> Decimal {
        self.direct(item_id).saturating_add(self.indirect(item_id))
    }

    /// 未結銷售需求中最早的可解析交期
    pub fn earliest_due_date(&self, item_id: &str) -> Option<NaiveDate> {
        self.earliest_due.get(item_id).copied()
    }

    /// 累加直接需求，溢位時回傳 `true`
    fn add_direct(&mut self, item_id: &'a str, quantity: Decimal) -> bool {
        accumulate(self.direct.entry(item_id).or_insert(Decimal::ZERO), quantity)
    }

    /// 累加間接需求，溢位時回傳 `true`
    fn add_indirect(&mut self, item_id: &'a str, quantity: Decimal) -> bool {
        accumulate(self.indirect.entry(item_id).or_insert(Decimal::ZERO), quantity)
    }

    fn note_due_date(&mut self, item_id: &'a str, due: NaiveDate) {
        self.earliest_due
            .entry(item_id)
            .and_modify(|current| {
                if due < *current {
                    *current = due;
                }
            })
            .or_insert(due);
    }
}

fn accumulate(total: &mut Decimal, quantity: Decimal) -> bool {
    let mut guard = OverflowGuard::new();
    *total = guard.add(*total, quantity);
    guard.overflowed()
}

/// 需求彙總器
pub struct DemandAggregator;

impl DemandAggregator {
    /// 彙總直接與間接需求
    ///
    /// 未知物料與數量溢位的警告每個物料只回報一次。
    pub fn aggregate<'a>(
        sales_order_lines: &'a [SalesOrderLine],
        production_orders: &'a [ProductionOrder],
        index: &ReferenceIndex<'a>,
        boms: &BomIndex<'a>,
        warnings: &mut Vec<MrpWarning>,
    ) -> DemandProfile<'a> {
        let mut profile = DemandProfile::default();
        let mut unknown_reported: HashSet<&'a str> = HashSet::new();
        let mut overflow_reported: HashSet<&'a str> = HashSet::new();

        for line in sales_order_lines.iter().filter(|l| l.is_open()) {
            let Some(item_id) = line.item_id.as_deref() else {
                continue;
            };
            if !index.contains(item_id) && unknown_reported.insert(item_id) {
                push_warning(
                    warnings,
                    MrpWarning::warning(
                        item_id,
                        format!("銷售訂單明細 {} 參照的物料不存在", line.id),
                    ),
                );
            }

            let open_qty = line.open_quantity();
            if profile.add_direct(item_id, open_qty) && overflow_reported.insert(item_id) {
                push_warning(warnings, overflow_warning(item_id, "直接需求"));
            }

            if open_qty > Decimal::ZERO {
                if let Some(due) = line.due_date {
                    profile.note_due_date(item_id, due);
                }
            }
        }

        for order in production_orders.iter().filter(|o| o.is_open()) {
            let remaining = order.remaining_quantity();
            if remaining <= Decimal::ZERO {
                continue;
            }
            let Some(parent_id) = order.item_id.as_deref() else {
                continue;
            };

            // 只展開一層；更深層級由 BOM 展開引擎處理
            for &bom_line in boms.active_lines(parent_id) {
                let Some(component_id) = bom_line.component_id.as_deref() else {
                    continue;
                };
                if !index.contains(component_id) && unknown_reported.insert(component_id) {
                    push_warning(
                        warnings,
                        MrpWarning::warning(
                            component_id,
                            format!("BOM 明細 {} 參照的子件不存在", bom_line.id),
                        ),
                    );
                }

                let mut guard = OverflowGuard::new();
                let required = guard.saturate(bom_line.required_for(remaining));
                let overflowed = profile.add_indirect(component_id, required) || guard.overflowed();
                if overflowed && overflow_reported.insert(component_id) {
                    push_warning(warnings, overflow_warning(component_id, "間接需求"));
                }
            }
        }

        tracing::debug!(
            "需求彙總: 直接需求物料 {} 個, 間接需求物料 {} 個",
            profile.direct.len(),
            profile.indirect.len()
        );

        profile
    }
}
