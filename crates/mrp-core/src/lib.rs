//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod bom;
pub mod config;
pub mod demand;
pub mod inventory;
pub mod item;
pub mod plan;
pub mod record;
pub mod snapshot;
pub mod supply;

// Re-export 主要類型
pub use bom::{Bom, BomLine, BomStatus};
pub use config::PlanningParameters;
pub use demand::{SalesOrderLine, SalesOrderStatus};
pub use inventory::InventoryRecord;
pub use item::{Item, ItemType};
pub use plan::{NetRequirementRow, PlanSummary, PlannedAction, Priority};
pub use snapshot::Snapshot;
pub use supply::{ProductionOrder, ProductionOrderStatus};

/// 找不到參照時的顯示名稱
pub const UNKNOWN_NAME: &str = "Unknown";

/// BOM 展開最大層數
pub const MAX_EXPLOSION_DEPTH: usize = 8;

/// MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    #[error("找不到 BOM: {0}")]
    BomNotFound(String),

    #[error("無效的計劃參數: {0}")]
    InvalidParameter(String),

    #[error("無效的記錄資料: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MrpError>;
