//! # MRP Cache
//!
//! 計劃結果快取：以 `(快照版本, 計劃參數)` 為鍵保存完整計算結果。
//! 不做增量計算；未命中時一律呼叫純函式 `compute_plan` 重新計算。

pub mod plan_cache;

// Re-export 主要類型
pub use plan_cache::{CacheStats, PlanCache, PlanKey};
