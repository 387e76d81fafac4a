//! # MRP Dashboard Engine
//!
//! 製造 ERP 儀表板的計劃核心：淨需求建議、BOM 多層展開、BOM 成本彙總。
//!
//! ```no_run
//! use mrp_dashboard::{compute_plan, PlanningParameters, Snapshot};
//!
//! # fn main() -> mrp_dashboard::Result<()> {
//! let snapshot = Snapshot::from_json(r#"{ "version": 1, "items": [] }"#)?;
//! let plan = compute_plan(&snapshot, &PlanningParameters::default())?;
//! assert!(plan.recommendations.is_empty());
//! # Ok(())
//! # }
//! ```

pub use mrp_cache::{CacheStats, PlanCache, PlanKey};
pub use mrp_calc::{
    compute_plan, AmbiguousBom, BomExplosion, BomExplosionEngine, BomIndex, Classifier,
    CostRollupCalculator, CostRollupLine, CostRollupSummary, CoverageMetrics, DemandAggregator,
    DemandProfile, ExplosionNode, MrpCalculator, MrpWarning, NetRequirement, NettingCalculator,
    PlanResult, ReferenceIndex, WarningSeverity,
};
pub use mrp_core::{
    Bom, BomLine, BomStatus, InventoryRecord, Item, ItemType, MrpError, NetRequirementRow,
    PlanSummary, PlannedAction, PlanningParameters, Priority, ProductionOrder,
    ProductionOrderStatus, Result, SalesOrderLine, SalesOrderStatus, Snapshot,
    MAX_EXPLOSION_DEPTH, UNKNOWN_NAME,
};
