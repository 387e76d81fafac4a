//! 物料清單（BOM）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{
    deserialize_decimal, deserialize_id, deserialize_integer, deserialize_lenient, deserialize_ref,
};

/// BOM 狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BomStatus {
    /// 生效
    Active,
    /// 草稿
    Draft,
    /// 停用
    Inactive,
    /// 其他狀態
    #[default]
    #[serde(other)]
    Other,
}

/// BOM 表頭
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bom {
    /// BOM ID
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// 父件物料ID
    #[serde(default, deserialize_with = "deserialize_ref")]
    pub item_id: Option<String>,

    /// 狀態
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub status: BomStatus,

    /// 良率（0–100），0 表示不做良率調整
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub yield_pct: Decimal,
}

impl Bom {
    /// 創建新的 BOM
    pub fn new(id: impl Into<String>, item_id: impl Into<String>, status: BomStatus) -> Self {
        Self {
            id: id.into(),
            item_id: Some(item_id.into()),
            status,
            yield_pct: Decimal::ONE_HUNDRED,
        }
    }

    /// 建構器模式：設置良率
    pub fn with_yield_pct(mut self, yield_pct: Decimal) -> Self {
        self.yield_pct = yield_pct;
        self
    }

    /// 是否可參與展開與需求傳遞
    pub fn is_active(&self) -> bool {
        self.status == BomStatus::Active
    }
}

/// BOM 明細行
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    /// 明細ID
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// 所屬 BOM
    #[serde(default, deserialize_with = "deserialize_ref")]
    pub bom_id: Option<String>,

    /// 子件物料ID
    #[serde(default, deserialize_with = "deserialize_ref")]
    pub component_id: Option<String>,

    /// 單位用量（每個父件）
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub quantity: Decimal,

    /// 損耗率（%）
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub scrap_pct: Decimal,

    /// 排列順序
    #[serde(default, deserialize_with = "deserialize_integer")]
    pub position: i64,
}

impl BomLine {
    /// 創建新的 BOM 明細行
    pub fn new(
        id: impl Into<String>,
        bom_id: impl Into<String>,
        component_id: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            bom_id: Some(bom_id.into()),
            component_id: Some(component_id.into()),
            quantity,
            scrap_pct: Decimal::ZERO,
            position: 0,
        }
    }

    /// 建構器模式：設置損耗率
    pub fn with_scrap_pct(mut self, scrap_pct: Decimal) -> Self {
        self.scrap_pct = scrap_pct;
        self
    }

    /// 建構器模式：設置排列順序
    pub fn with_position(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    /// 損耗放大倍數 `1 + scrap% / 100`
    pub fn scrap_multiplier(&self) -> Decimal {
        Decimal::ONE + self.scrap_pct / Decimal::ONE_HUNDRED
    }

    /// 父件數量展開到本行所需的子件數量（無條件進位）
    ///
    /// 超出 `Decimal` 範圍時回傳 `None`。
    pub fn required_for(&self, parent_qty: Decimal) -> Option<Decimal> {
        parent_qty
            .checked_mul(self.quantity)?
            .checked_mul(self.scrap_multiplier())
            .map(|qty| qty.ceil())
    }
}
