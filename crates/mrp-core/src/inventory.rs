//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{deserialize_decimal, deserialize_lenient, deserialize_ref};

/// 庫存記錄（同一物料可有多筆，計算時加總）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// 記錄ID
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub id: String,

    /// 物料ID
    #[serde(default, deserialize_with = "deserialize_ref")]
    pub item_id: Option<String>,

    /// 現有庫存
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub quantity_on_hand: Decimal,
}

impl InventoryRecord {
    /// 創建新的庫存記錄
    pub fn new(item_id: impl Into<String>, quantity_on_hand: Decimal) -> Self {
        Self {
            id: String::new(),
            item_id: Some(item_id.into()),
            quantity_on_hand,
        }
    }
}
