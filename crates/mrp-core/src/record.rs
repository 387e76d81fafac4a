//! 記錄欄位正規化
//!
//! 外部記錄儲存提供的是扁平的鍵值記錄，欄位形狀並不一致：
//! 參照欄位可能是單一 ID，也可能是只含一個 ID 的陣列；數值可能是數字、字串或 null。
//! 這裡的反序列化函式在邊界處把它們統一成固定型別，核心計算不再處理形狀分支。

use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 將參照欄位正規化為單一 ID
///
/// 接受字串、數字，或陣列（取第一個元素）；空字串、空陣列與 null 視為缺值。
pub fn normalize_ref(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.first().and_then(normalize_ref),
        _ => None,
    }
}

/// 解析記錄日期（`YYYY-MM-DD` 或 RFC 3339），無法解析則回傳 `None`
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn value_to_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => return items.first().and_then(value_to_decimal),
        _ => return None,
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn value_to_integer(value: &Value) -> Option<i64> {
    let number = value_to_decimal(value)?;
    if !number.fract().is_zero() {
        return None;
    }
    number.to_i64()
}

/// 必填 ID 欄位
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    normalize_ref(&value).ok_or_else(|| D::Error::custom("記錄缺少 id"))
}

/// 選填參照欄位（單一 ID 或單元素陣列）
pub fn deserialize_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(normalize_ref))
}

/// 數值欄位，缺值或無法解析時為 0
pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_to_decimal)
        .unwrap_or(Decimal::ZERO))
}

/// 日期欄位，格式不正確時為 `None`
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_record_date))
}

/// 整數欄位
///
/// 與數值欄位接受相同形狀（`7`、`7.0`、`"7"`、`[7]`）；
/// 帶小數、超出目標型別範圍或無法解析時為預設值。
pub fn deserialize_integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_to_integer)
        .and_then(|n| T::try_from(n).ok())
        .unwrap_or_default())
}

/// 寬鬆欄位：無法轉換成目標型別時退回預設值
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default())
}
