//! 計算快照：一次 MRP 計算所需的全部輸入記錄

use serde::{Deserialize, Serialize};

use crate::{Bom, BomLine, InventoryRecord, Item, ProductionOrder, Result, SalesOrderLine};

/// 資料快照
///
/// 由外部資料存取層一次取得；計算期間視為唯讀。
/// `version` 由呼叫端維護，資料變動時遞增，供計劃快取判斷是否失效。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    /// 快照版本
    pub version: u64,
    pub items: Vec<Item>,
    pub boms: Vec<Bom>,
    pub bom_lines: Vec<BomLine>,
    pub inventory: Vec<InventoryRecord>,
    pub sales_order_lines: Vec<SalesOrderLine>,
    pub production_orders: Vec<ProductionOrder>,
}

impl Snapshot {
    /// 創建空快照
    pub fn new(version: u64) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// 從 JSON 文件解析快照
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 建構器模式：設置物料
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// 建構器模式：設置 BOM 表頭與明細
    pub fn with_boms(mut self, boms: Vec<Bom>, bom_lines: Vec<BomLine>) -> Self {
        self.boms = boms;
        self.bom_lines = bom_lines;
        self
    }

    /// 建構器模式：設置庫存
    pub fn with_inventory(mut self, inventory: Vec<InventoryRecord>) -> Self {
        self.inventory = inventory;
        self
    }

    /// 建構器模式：設置銷售訂單明細
    pub fn with_sales_order_lines(mut self, lines: Vec<SalesOrderLine>) -> Self {
        self.sales_order_lines = lines;
        self
    }

    /// 建構器模式：設置生產工單
    pub fn with_production_orders(mut self, orders: Vec<ProductionOrder>) -> Self {
        self.production_orders = orders;
        self
    }

    /// 記錄總筆數
    pub fn record_count(&self) -> usize {
        self.items.len()
            + self.boms.len()
            + self.bom_lines.len()
            + self.inventory.len()
            + self.sales_order_lines.len()
            + self.production_orders.len()
    }
}
