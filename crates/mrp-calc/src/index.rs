//! 參照索引：物料、庫存與 BOM 的查詢表

use mrp_core::{Bom, BomLine, InventoryRecord, Item, UNKNOWN_NAME};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::MrpWarning;

/// 物料與現有庫存索引
///
/// 找不到的參照一律視為未知：庫存為 0、名稱為 `Unknown`。
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex<'a> {
    items: HashMap<&'a str, &'a Item>,
    on_hand: HashMap<&'a str, Decimal>,
}

impl<'a> ReferenceIndex<'a> {
    /// 建立索引（同一物料多筆庫存加總，溢位時飽和）
    pub fn build(items: &'a [Item], inventory: &'a [InventoryRecord]) -> Self {
        let mut item_map = HashMap::with_capacity(items.len());
        for item in items {
            item_map.entry(item.id.as_str()).or_insert(item);
        }

        let mut on_hand: HashMap<&'a str, Decimal> = HashMap::new();
        for record in inventory {
            if let Some(item_id) = record.item_id.as_deref() {
                let total = on_hand.entry(item_id).or_insert(Decimal::ZERO);
                *total = total.saturating_add(record.quantity_on_hand);
            }
        }

        Self {
            items: item_map,
            on_hand,
        }
    }

    /// 查詢物料
    pub fn item(&self, item_id: &str) -> Option<&'a Item> {
        self.items.get(item_id).copied()
    }

    /// 現有庫存（無記錄時為 0）
    pub fn on_hand(&self, item_id: &str) -> Decimal {
        self.on_hand.get(item_id).copied().unwrap_or(Decimal::ZERO)
    }

    /// 顯示名稱（找不到物料時為 `Unknown`）
    pub fn display_name(&self, item_id: &str) -> &'a str {
        self.item(item_id)
            .map(Item::display_name)
            .unwrap_or(UNKNOWN_NAME)
    }

    /// 標準成本（找不到物料時為 0）
    pub fn standard_cost(&self, item_id: &str) -> Decimal {
        self.item(item_id)
            .map(|item| item.standard_cost)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// 同一父件有多張生效 BOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguousBom {
    pub item_id: String,
    /// 所有生效 BOM（快照順序，第一張為實際採用者）
    pub bom_ids: Vec<String>,
}

impl AmbiguousBom {
    /// 轉為 Error 等級警告
    pub fn to_warning(&self) -> MrpWarning {
        MrpWarning::error(
            self.item_id.as_str(),
            format!(
                "物料 {} 有多張生效 BOM {:?}，採用第一張 {}",
                self.item_id, self.bom_ids, self.bom_ids[0]
            ),
        )
    }
}

/// BOM 索引
///
/// 每個父件應只有一張生效 BOM。違反時採用快照中的第一張，並記錄於 `ambiguities`。
#[derive(Debug, Clone, Default)]
pub struct BomIndex<'a> {
    boms: HashMap<&'a str, &'a Bom>,
    active_by_item: HashMap<&'a str, &'a Bom>,
    lines_by_bom: HashMap<&'a str, Vec<&'a BomLine>>,
    ambiguities: Vec<AmbiguousBom>,
}

impl<'a> BomIndex<'a> {
    /// 建立索引，明細依 `position` 升冪排序（同位置保持原順序）
    pub fn build(boms: &'a [Bom], lines: &'a [BomLine]) -> Self {
        let mut bom_map = HashMap::with_capacity(boms.len());
        let mut active_by_item: HashMap<&'a str, &'a Bom> = HashMap::new();
        let mut active_ids: HashMap<&'a str, Vec<String>> = HashMap::new();
        let mut parents = Vec::new();

        for bom in boms {
            bom_map.entry(bom.id.as_str()).or_insert(bom);

            if !bom.is_active() {
                continue;
            }
            let Some(item_id) = bom.item_id.as_deref() else {
                continue;
            };

            active_by_item.entry(item_id).or_insert(bom);
            let ids = active_ids.entry(item_id).or_insert_with(|| {
                parents.push(item_id);
                Vec::new()
            });
            ids.push(bom.id.clone());
        }

        let ambiguities: Vec<AmbiguousBom> = parents
            .into_iter()
            .filter_map(|item_id| {
                let bom_ids = active_ids.remove(item_id)?;
                (bom_ids.len() > 1).then(|| AmbiguousBom {
                    item_id: item_id.to_string(),
                    bom_ids,
                })
            })
            .collect();

        let mut lines_by_bom: HashMap<&'a str, Vec<&'a BomLine>> = HashMap::new();
        for line in lines {
            if let Some(bom_id) = line.bom_id.as_deref() {
                lines_by_bom.entry(bom_id).or_default().push(line);
            }
        }
        for bom_lines in lines_by_bom.values_mut() {
            bom_lines.sort_by_key(|line| line.position);
        }

        Self {
            boms: bom_map,
            active_by_item,
            lines_by_bom,
            ambiguities,
        }
    }

    /// 有多張生效 BOM 的父件（快照順序）
    pub fn ambiguities(&self) -> &[AmbiguousBom] {
        &self.ambiguities
    }

    /// 查詢父件的生效 BOM 衝突
    pub fn ambiguity(&self, item_id: &str) -> Option<&AmbiguousBom> {
        self.ambiguities.iter().find(|a| a.item_id == item_id)
    }

    /// 依 ID 查詢 BOM（不限狀態）
    pub fn bom(&self, bom_id: &str) -> Option<&'a Bom> {
        self.boms.get(bom_id).copied()
    }

    /// 父件的生效 BOM
    pub fn active_bom(&self, item_id: &str) -> Option<&'a Bom> {
        self.active_by_item.get(item_id).copied()
    }

    /// BOM 明細（已排序）
    pub fn lines(&self, bom_id: &str) -> &[&'a BomLine] {
        self.lines_by_bom
            .get(bom_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 父件生效 BOM 的明細；無生效 BOM 時為空
    pub fn active_lines(&self, item_id: &str) -> &[&'a BomLine] {
        match self.active_bom(item_id) {
            Some(bom) => self.lines(&bom.id),
            None => &[],
        }
    }
}
