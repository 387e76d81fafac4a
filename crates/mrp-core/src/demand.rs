//! 需求來源：銷售訂單明細

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{
    deserialize_date, deserialize_decimal, deserialize_id, deserialize_lenient, deserialize_ref,
};

/// 銷售訂單狀態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesOrderStatus {
    /// 草稿
    Draft,
    /// 已確認
    Confirmed,
    /// 部分出貨
    #[serde(rename = "Partially Shipped", alias = "PartiallyShipped")]
    PartiallyShipped,
    /// 已出貨
    Shipped,
    /// 已交貨
    Delivered,
    /// 已取消
    Cancelled,
    /// 其他狀態
    #[default]
    #[serde(other)]
    Other,
}

/// 銷售訂單明細
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderLine {
    /// 明細ID
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// 物料ID
    #[serde(default, deserialize_with = "deserialize_ref")]
    pub item_id: Option<String>,

    /// 訂購數量
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub quantity: Decimal,

    /// 已出貨數量
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub shipped_quantity: Decimal,

    /// 狀態
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub status: SalesOrderStatus,

    /// 交期（格式錯誤時為空）
    #[serde(default, deserialize_with = "deserialize_date")]
    pub due_date: Option<NaiveDate>,
}

impl SalesOrderLine {
    /// 創建新的銷售訂單明細
    pub fn new(
        id: impl Into<String>,
        item_id: impl Into<String>,
        quantity: Decimal,
        status: SalesOrderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            item_id: Some(item_id.into()),
            quantity,
            shipped_quantity: Decimal::ZERO,
            status,
            due_date: None,
        }
    }

    /// 建構器模式：設置已出貨數量
    pub fn with_shipped_quantity(mut self, shipped: Decimal) -> Self {
        self.shipped_quantity = shipped;
        self
    }

    /// 建構器模式：設置交期
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// 是否仍為未結需求（非取消、非已交貨）
    pub fn is_open(&self) -> bool {
        !matches!(
            self.status,
            SalesOrderStatus::Cancelled | SalesOrderStatus::Delivered
        )
    }

    /// 未出貨數量 `max(0, 訂購 - 已出貨)`
    pub fn open_quantity(&self) -> Decimal {
        self.quantity
            .saturating_sub(self.shipped_quantity)
            .max(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(SalesOrderStatus::Confirmed, true)]
    #[case(SalesOrderStatus::PartiallyShipped, true)]
    #[case(SalesOrderStatus::Shipped, true)]
    #[case(SalesOrderStatus::Other, true)]
    #[case(SalesOrderStatus::Delivered, false)]
    #[case(SalesOrderStatus::Cancelled, false)]
    fn test_is_open(#[case] status: SalesOrderStatus, #[case] open: bool) {
        let line = SalesOrderLine::new("SOL-1", "BIKE-001", Decimal::from(10), status);
        assert_eq!(line.is_open(), open);
    }

    #[test]
    fn test_open_quantity_never_negative() {
        let line = SalesOrderLine::new("SOL-2", "BIKE-001", Decimal::from(10), SalesOrderStatus::Confirmed)
            .with_shipped_quantity(Decimal::from(12));

        assert_eq!(line.open_quantity(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_bad_due_date() {
        let line: SalesOrderLine = serde_json::from_value(json!({
            "id": "recSOL3",
            "itemId": ["recBIKE"],
            "quantity": 20,
            "shippedQuantity": 5,
            "status": "Partially Shipped",
            "dueDate": "next tuesday"
        }))
        .unwrap();

        assert_eq!(line.status, SalesOrderStatus::PartiallyShipped);
        assert_eq!(line.open_quantity(), Decimal::from(15));
        assert_eq!(line.due_date, None);
    }
}
