//! 溢位偵測的飽和運算

use rust_decimal::Decimal;

use crate::MrpWarning;

/// 以 checked 運算計算；溢位時結果飽和為 `Decimal::MAX` / `Decimal::MIN` 並記下旗標
#[derive(Debug, Default)]
pub(crate) struct OverflowGuard {
    overflowed: bool,
}

impl OverflowGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn add(&mut self, lhs: Decimal, rhs: Decimal) -> Decimal {
        lhs.checked_add(rhs).unwrap_or_else(|| {
            self.overflowed = true;
            lhs.saturating_add(rhs)
        })
    }

    pub fn sub(&mut self, lhs: Decimal, rhs: Decimal) -> Decimal {
        lhs.checked_sub(rhs).unwrap_or_else(|| {
            self.overflowed = true;
            lhs.saturating_sub(rhs)
        })
    }

    pub fn mul(&mut self, lhs: Decimal, rhs: Decimal) -> Decimal {
        lhs.checked_mul(rhs).unwrap_or_else(|| {
            self.overflowed = true;
            lhs.saturating_mul(rhs)
        })
    }

    /// 除數須非 0
    pub fn div(&mut self, lhs: Decimal, rhs: Decimal) -> Decimal {
        lhs.checked_div(rhs).unwrap_or_else(|| {
            self.overflowed = true;
            if lhs.is_sign_negative() != rhs.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
    }

    /// 已由 checked 運算得出的結果，`None` 視為正向溢位
    pub fn saturate(&mut self, value: Option<Decimal>) -> Decimal {
        value.unwrap_or_else(|| {
            self.overflowed = true;
            Decimal::MAX
        })
    }
}

/// 數值溢位的 Error 等級警告
pub(crate) fn overflow_warning(item_id: &str, context: &str) -> MrpWarning {
    MrpWarning::error(item_id, format!("{context}超出數值範圍，結果以上限值代替"))
}
