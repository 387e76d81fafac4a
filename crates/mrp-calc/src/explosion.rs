//! BOM 多層展開
//!
//! 從指定物料與數量出發，沿生效 BOM 遞迴展開，計算每個節點的需求量、可用量與缺口。
//! 展開以每條路徑的祖先集合偵測循環，並以最大層數作為終止保護；
//! 兩種情況都會在節點上標記並回報警告。

use mrp_core::MAX_EXPLOSION_DEPTH;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

use crate::index::{BomIndex, ReferenceIndex};
use crate::overflow::{overflow_warning, OverflowGuard};
use crate::{push_warning, MrpWarning};

/// 展開樹節點
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosionNode {
    /// 物料ID
    pub item_id: String,
    /// 顯示名稱
    pub name: String,
    /// 層級（根節點為 0）
    pub depth: usize,
    /// 需求量
    pub required_qty: Decimal,
    /// 現有庫存
    pub available_qty: Decimal,
    /// 缺口 `min(0, 可用 - 需求)`，負值表示不足
    pub shortage: Decimal,
    /// 標準成本
    pub unit_cost: Decimal,
    /// 需求量 × 標準成本
    pub extended_cost: Decimal,
    /// 需求量或成本超出數值範圍（已飽和為上限）
    pub overflowed: bool,
    /// 因達到最大層數而停止展開
    pub truncated: bool,
    /// 物料已出現在祖先路徑上（循環 BOM）
    pub cycle: bool,
    /// 子件
    pub children: Vec<ExplosionNode>,
}

impl ExplosionNode {
    /// 是否為葉節點
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// 前序走訪所有節點
    pub fn iter(&self) -> impl Iterator<Item = &ExplosionNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// 節點總數
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// 樹的最大層級
    pub fn max_depth(&self) -> usize {
        self.iter().map(|node| node.depth).max().unwrap_or(self.depth)
    }

    /// 有缺口的節點
    pub fn shortages(&self) -> Vec<&ExplosionNode> {
        self.iter()
            .filter(|node| node.shortage < Decimal::ZERO)
            .collect()
    }

    /// 是否有節點因層數限制被截斷
    pub fn has_truncation(&self) -> bool {
        self.iter().any(|node| node.truncated)
    }

    /// 是否偵測到循環
    pub fn has_cycle(&self) -> bool {
        self.iter().any(|node| node.cycle)
    }
}

/// 展開結果
#[derive(Debug, Clone, Serialize)]
pub struct BomExplosion {
    pub root: ExplosionNode,
    pub warnings: Vec<MrpWarning>,
}

/// BOM 展開引擎
pub struct BomExplosionEngine<'i, 'a> {
    index: &'i ReferenceIndex<'a>,
    boms: &'i BomIndex<'a>,
    max_depth: usize,
}

impl<'i, 'a> BomExplosionEngine<'i, 'a> {
    /// 創建展開引擎（預設最大層數 8）
    pub fn new(index: &'i ReferenceIndex<'a>, boms: &'i BomIndex<'a>) -> Self {
        Self {
            index,
            boms,
            max_depth: MAX_EXPLOSION_DEPTH,
        }
    }

    /// 建構器模式：設置最大層數
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 展開指定物料
    pub fn explode(&self, root_item_id: &str, quantity: Decimal) -> BomExplosion {
        let mut walk = Walk::default();

        let root = self.explode_node(root_item_id, quantity, 0, &mut walk);

        tracing::debug!(
            "BOM 展開 {}: 節點 {} 個, 最大層級 {}",
            root_item_id,
            root.node_count(),
            root.max_depth()
        );

        BomExplosion {
            root,
            warnings: walk.warnings,
        }
    }

    fn explode_node(
        &self,
        item_id: &str,
        required_qty: Decimal,
        depth: usize,
        walk: &mut Walk,
    ) -> ExplosionNode {
        let mut node = self.leaf(item_id, required_qty, depth);
        if node.overflowed {
            walk.report_overflow(item_id);
        }

        if walk.path.iter().any(|ancestor| ancestor == item_id) {
            node.cycle = true;
            push_warning(
                &mut walk.warnings,
                MrpWarning::error(
                    item_id,
                    format!("BOM 循環: {} -> {}", walk.path.join(" -> "), item_id),
                ),
            );
            return node;
        }

        let lines = self.boms.active_lines(item_id);
        if lines.is_empty() {
            return node;
        }

        if let Some(ambiguity) = self.boms.ambiguity(item_id) {
            if walk.ambiguous_reported.insert(item_id.to_string()) {
                push_warning(&mut walk.warnings, ambiguity.to_warning());
            }
        }

        if depth >= self.max_depth {
            node.truncated = true;
            push_warning(
                &mut walk.warnings,
                MrpWarning::warning(
                    item_id,
                    format!("展開達到最大層數 {}，以下層級未展開", self.max_depth),
                ),
            );
            return node;
        }

        walk.path.push(item_id.to_string());
        for line in lines {
            let Some(component_id) = line.component_id.as_deref() else {
                push_warning(
                    &mut walk.warnings,
                    MrpWarning::warning(item_id, format!("BOM 明細 {} 未指定子件", line.id)),
                );
                continue;
            };
            let mut guard = OverflowGuard::new();
            let child_qty = guard.saturate(line.required_for(required_qty));
            if guard.overflowed() {
                walk.report_overflow(component_id);
            }
            let mut child = self.explode_node(component_id, child_qty, depth + 1, walk);
            child.overflowed |= guard.overflowed();
            node.children.push(child);
        }
        walk.path.pop();

        node
    }

    fn leaf(&self, item_id: &str, required_qty: Decimal, depth: usize) -> ExplosionNode {
        let available_qty = self.index.on_hand(item_id);
        let unit_cost = self.index.standard_cost(item_id);
        let mut guard = OverflowGuard::new();
        let extended_cost = guard.mul(required_qty, unit_cost);

        ExplosionNode {
            item_id: item_id.to_string(),
            name: self.index.display_name(item_id).to_string(),
            depth,
            required_qty,
            available_qty,
            shortage: available_qty
                .saturating_sub(required_qty)
                .min(Decimal::ZERO),
            unit_cost,
            extended_cost,
            overflowed: guard.overflowed(),
            truncated: false,
            cycle: false,
            children: Vec::new(),
        }
    }
}

/// 單次展開的走訪狀態
#[derive(Default)]
struct Walk {
    /// 目前路徑上的祖先
    path: Vec<String>,
    warnings: Vec<MrpWarning>,
    overflow_reported: HashSet<String>,
    ambiguous_reported: HashSet<String>,
}

impl Walk {
    fn report_overflow(&mut self, item_id: &str) {
        if self.overflow_reported.insert(item_id.to_string()) {
            push_warning(&mut self.warnings, overflow_warning(item_id, "展開需求量"));
        }
    }
}
