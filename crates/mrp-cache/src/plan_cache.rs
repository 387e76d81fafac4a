//! 計劃結果快取

use mrp_calc::PlanResult;
use mrp_core::{PlanningParameters, Snapshot};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// 快取鍵
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanKey {
    pub snapshot_version: u64,
    pub parameters: PlanningParameters,
}

impl PlanKey {
    pub fn new(snapshot_version: u64, parameters: &PlanningParameters) -> Self {
        Self {
            snapshot_version,
            parameters: parameters.clone(),
        }
    }
}

/// 命中統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// 計劃結果快取
///
/// 容量有上限，超過時淘汰最早放入的結果。計算失敗的結果不會被快取。
pub struct PlanCache {
    capacity: usize,
    entries: HashMap<PlanKey, Arc<PlanResult>>,
    insertion_order: VecDeque<PlanKey>,
    stats: CacheStats,
}

impl PlanCache {
    /// 創建快取（容量至少為 1）
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            insertion_order: VecDeque::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    /// 取得快取結果，未命中時重新計算並保存
    pub fn get_or_compute(
        &mut self,
        snapshot: &Snapshot,
        params: &PlanningParameters,
    ) -> mrp_core::Result<Arc<PlanResult>> {
        let key = PlanKey::new(snapshot.version, params);

        if let Some(result) = self.entries.get(&key) {
            self.stats.hits += 1;
            tracing::debug!("計劃快取命中: 快照版本 {}", snapshot.version);
            return Ok(Arc::clone(result));
        }

        self.stats.misses += 1;
        tracing::debug!("計劃快取未命中: 快照版本 {}", snapshot.version);

        let result = Arc::new(mrp_calc::compute_plan(snapshot, params)?);
        self.insert(key, Arc::clone(&result));
        Ok(result)
    }

    /// 查詢快取（不計算）
    pub fn get(&self, snapshot_version: u64, params: &PlanningParameters) -> Option<Arc<PlanResult>> {
        self.entries
            .get(&PlanKey::new(snapshot_version, params))
            .cloned()
    }

    /// 使某個快照版本的所有結果失效，回傳移除筆數
    pub fn invalidate_snapshot(&mut self, snapshot_version: u64) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|key, _| key.snapshot_version != snapshot_version);
        self.insertion_order
            .retain(|key| key.snapshot_version != snapshot_version);
        before - self.entries.len()
    }

    /// 清除所有結果
    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn insert(&mut self, key: PlanKey, result: Arc<PlanResult>) {
        while self.entries.len() >= self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, result);
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(16)
    }
}
