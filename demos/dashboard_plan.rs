//! 腳踏車工廠 MRP 儀表板範例
//!
//! 建立一份快照，計算淨需求建議、展開成品 BOM 並列出成本彙總。
//!
//! ```bash
//! RUST_LOG=debug cargo run --example dashboard_plan
//! ```

use mrp_dashboard::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("===== Bike MRP Dashboard =====\n");

    // [1] 快照
    let snapshot = create_bike_snapshot();
    println!("[1] Snapshot v{}: {} records\n", snapshot.version, snapshot.record_count());

    // [2] 淨需求與建議
    let params = PlanningParameters::new()
        .with_safety_stock_multiplier(Decimal::new(12, 1))
        .with_demand_forecast_boost(Decimal::from(110));
    let mut cache = PlanCache::default();
    let plan = cache.get_or_compute(&snapshot, &params)?;

    println!("[2] Recommendations");
    println!(
        "    {:<8} {:<12} {:>10} {:>10} {:>12} {:<10} {:<8}",
        "Item", "Name", "Net", "Qty", "Cost", "Action", "Priority"
    );
    for row in &plan.recommendations {
        println!(
            "    {:<8} {:<12} {:>10} {:>10} {:>12} {:<10} {:<8}",
            row.item_id,
            row.name,
            row.net_requirement.round_dp(2),
            row.action_qty.round_dp(2),
            row.estimated_cost,
            format!("{:?}", row.action),
            format!("{:?}", row.priority),
        );
    }
    let summary = &plan.summary;
    println!(
        "    total: {} items, {} purchase, {} production, cost {}\n",
        summary.recommendation_count,
        summary.purchase_count,
        summary.production_count,
        summary.total_estimated_cost
    );

    // [3] BOM 展開
    let calculator = MrpCalculator::new(&snapshot);
    let explosion = calculator.explode("BIKE", Decimal::from(25));
    println!("[3] Explosion of BIKE x 25");
    for node in explosion.root.iter() {
        println!(
            "    {}{} required {} available {} shortage {}",
            "  ".repeat(node.depth),
            node.name,
            node.required_qty,
            node.available_qty,
            node.shortage
        );
    }
    for warning in &explosion.warnings {
        println!("    ! {}", warning.message);
    }
    println!();

    // [4] 成本彙總
    println!("[4] Cost rollup");
    for bom in snapshot.boms.iter().filter(|b| b.is_active()) {
        let rollup = calculator.cost_rollup(&bom.id)?;
        println!(
            "    {:<10} {:<12} raw {:>10} yield {:>5}% adjusted {:>10}",
            rollup.bom_id,
            rollup.parent_name,
            rollup.raw_total.round_dp(2),
            rollup.yield_pct,
            rollup.yield_adjusted_total.round_dp(2)
        );
        for warning in &rollup.warnings {
            println!("    ! {}", warning.message);
        }
    }

    // 參數不變時直接取用快取
    let again = cache.get_or_compute(&snapshot, &params)?;
    let stats = cache.stats();
    println!(
        "\n[5] Cache: {} hits, {} misses, same plan: {}",
        stats.hits,
        stats.misses,
        again.summary == plan.summary
    );

    Ok(())
}

fn create_bike_snapshot() -> Snapshot {
    Snapshot::new(1)
        .with_items(vec![
            Item::new("BIKE", ItemType::FinishedGood)
                .with_name("Bike")
                .with_standard_cost(Decimal::from(320))
                .with_safety_stock(Decimal::from(5))
                .with_lead_time_days(10),
            Item::new("FRAME", ItemType::SemiFinished)
                .with_name("Frame")
                .with_standard_cost(Decimal::new(8550, 2))
                .with_safety_stock(Decimal::from(10)),
            Item::new("WHEEL", ItemType::SemiFinished)
                .with_name("Wheel")
                .with_standard_cost(Decimal::from(40)),
            Item::new("TUBE", ItemType::RawMaterial)
                .with_name("Steel Tube")
                .with_standard_cost(Decimal::new(425, 2))
                .with_safety_stock(Decimal::from(50))
                .with_min_order_qty(Decimal::from(200))
                .with_lead_time_days(7),
            Item::new("SPOKE", ItemType::Consumable)
                .with_name("Spoke")
                .with_standard_cost(Decimal::new(10, 2))
                .with_min_order_qty(Decimal::from(5000)),
        ])
        .with_boms(
            vec![
                Bom::new("BOM-BIKE", "BIKE", BomStatus::Active),
                Bom::new("BOM-FRAME", "FRAME", BomStatus::Active)
                    .with_yield_pct(Decimal::from(90)),
                Bom::new("BOM-WHEEL", "WHEEL", BomStatus::Active),
            ],
            vec![
                BomLine::new("L1", "BOM-BIKE", "FRAME", Decimal::ONE)
                    .with_scrap_pct(Decimal::from(5))
                    .with_position(10),
                BomLine::new("L2", "BOM-BIKE", "WHEEL", Decimal::TWO).with_position(20),
                BomLine::new("L3", "BOM-FRAME", "TUBE", Decimal::from(3))
                    .with_scrap_pct(Decimal::from(10)),
                BomLine::new("L4", "BOM-WHEEL", "SPOKE", Decimal::from(32)),
            ],
        )
        .with_inventory(vec![
            InventoryRecord::new("BIKE", Decimal::from(3)),
            InventoryRecord::new("FRAME", Decimal::from(6)),
            InventoryRecord::new("TUBE", Decimal::from(60)),
            InventoryRecord::new("SPOKE", Decimal::from(2500)),
        ])
        .with_sales_order_lines(vec![
            SalesOrderLine::new("SOL-1", "BIKE", Decimal::from(30), SalesOrderStatus::Confirmed),
            SalesOrderLine::new(
                "SOL-2",
                "BIKE",
                Decimal::from(12),
                SalesOrderStatus::PartiallyShipped,
            )
            .with_shipped_quantity(Decimal::from(4)),
        ])
        .with_production_orders(vec![
            ProductionOrder::new("WO-1", "FRAME", Decimal::from(20), ProductionOrderStatus::Released),
            ProductionOrder::new("WO-2", "WHEEL", Decimal::from(40), ProductionOrderStatus::InProgress)
                .with_completed_quantity(Decimal::from(10)),
        ])
}
