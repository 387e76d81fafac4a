//! 物料主檔模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{deserialize_decimal, deserialize_id, deserialize_integer, deserialize_lenient};

/// 物料類型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// 原物料
    #[serde(rename = "Raw Material", alias = "RawMaterial")]
    RawMaterial,
    /// 半成品
    #[serde(rename = "Semi-Finished", alias = "SemiFinished")]
    SemiFinished,
    /// 成品
    #[serde(rename = "Finished Good", alias = "FinishedGood")]
    FinishedGood,
    /// 耗材
    Consumable,
    /// 未知類型
    #[default]
    #[serde(other)]
    Unknown,
}

impl ItemType {
    /// 是否以採購方式補充（原物料、耗材）
    pub fn is_purchased(&self) -> bool {
        matches!(self, ItemType::RawMaterial | ItemType::Consumable)
    }
}

/// 物料
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// 物料ID
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// 料號
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub sku: String,

    /// 品名
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub name: String,

    /// 物料類型
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub item_type: ItemType,

    /// 標準成本
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub standard_cost: Decimal,

    /// 安全庫存
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub safety_stock: Decimal,

    /// 再訂購點
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub reorder_point: Decimal,

    /// 最小訂購量
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub min_order_qty: Decimal,

    /// 提前期（天）
    #[serde(default, deserialize_with = "deserialize_integer")]
    pub lead_time_days: u32,
}

impl Item {
    /// 創建新的物料
    pub fn new(id: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            id: id.into(),
            sku: String::new(),
            name: String::new(),
            item_type,
            standard_cost: Decimal::ZERO,
            safety_stock: Decimal::ZERO,
            reorder_point: Decimal::ZERO,
            min_order_qty: Decimal::ZERO,
            lead_time_days: 0,
        }
    }

    /// 建構器模式：設置料號
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// 建構器模式：設置品名
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置標準成本
    pub fn with_standard_cost(mut self, cost: Decimal) -> Self {
        self.standard_cost = cost;
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, stock: Decimal) -> Self {
        self.safety_stock = stock;
        self
    }

    /// 建構器模式：設置再訂購點
    pub fn with_reorder_point(mut self, point: Decimal) -> Self {
        self.reorder_point = point;
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_min_order_qty(mut self, qty: Decimal) -> Self {
        self.min_order_qty = qty;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 顯示名稱（品名優先，其次料號）
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.sku.is_empty() {
            &self.sku
        } else {
            crate::UNKNOWN_NAME
        }
    }
}
