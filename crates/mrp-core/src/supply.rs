//! 生產工單模型
//!
//! 工單對父件而言是在途供應，對其子件則是相依需求的來源。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{deserialize_decimal, deserialize_id, deserialize_lenient, deserialize_ref};

/// 工單狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionOrderStatus {
    /// 已計劃
    Planned,
    /// 已下達
    Released,
    /// 生產中
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    /// 已完工
    Completed,
    /// 已取消
    Cancelled,
    /// 其他狀態
    #[default]
    #[serde(other)]
    Other,
}

/// 生產工單
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionOrder {
    /// 工單ID
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// 生產物料ID
    #[serde(default, deserialize_with = "deserialize_ref")]
    pub item_id: Option<String>,

    /// 計劃數量
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub planned_quantity: Decimal,

    /// 已完工數量
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub completed_quantity: Decimal,

    /// 狀態
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub status: ProductionOrderStatus,
}

impl ProductionOrder {
    /// 創建新的生產工單
    pub fn new(
        id: impl Into<String>,
        item_id: impl Into<String>,
        planned_quantity: Decimal,
        status: ProductionOrderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            item_id: Some(item_id.into()),
            planned_quantity,
            completed_quantity: Decimal::ZERO,
            status,
        }
    }

    /// 建構器模式：設置已完工數量
    pub fn with_completed_quantity(mut self, completed: Decimal) -> Self {
        self.completed_quantity = completed;
        self
    }

    /// 是否仍在進行（非完工、非取消）
    pub fn is_open(&self) -> bool {
        !matches!(
            self.status,
            ProductionOrderStatus::Completed | ProductionOrderStatus::Cancelled
        )
    }

    /// 剩餘數量 `max(0, 計劃 - 完工)`
    pub fn remaining_quantity(&self) -> Decimal {
        self.planned_quantity
            .saturating_sub(self.completed_quantity)
            .max(Decimal::ZERO)
    }
}
