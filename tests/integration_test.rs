//! 集成測試

use chrono::NaiveDate;
use mrp_dashboard::*;
use rstest::rstest;
use rust_decimal::Decimal;

/// 腳踏車工廠快照（外部記錄格式，參照欄位混用單值與陣列）
///
///   BIKE (成品)
///     ├── FRAME x1 (半成品, 損耗 5%)
///     │   └── TUBE x3 (原物料, 損耗 10%)
///     └── WHEEL x2 (半成品)
///         └── SPOKE x32 (耗材)
const BIKE_FACTORY: &str = r#"{
    "version": 7,
    "items": [
        { "id": "BIKE",  "sku": "BK-100", "name": "City Bike", "itemType": "Finished Good",
          "standardCost": 320, "safetyStock": 5, "minOrderQty": 1, "leadTimeDays": 10 },
        { "id": "FRAME", "sku": "FR-100", "name": "Frame", "itemType": "Semi-Finished",
          "standardCost": "85.50", "safetyStock": 10, "leadTimeDays": 5 },
        { "id": "WHEEL", "sku": "WH-100", "name": "Wheel", "itemType": "Semi-Finished",
          "standardCost": 40, "safetyStock": 0 },
        { "id": "TUBE",  "sku": "TB-100", "name": "Steel Tube", "itemType": "Raw Material",
          "standardCost": "4.25", "safetyStock": 50, "reorderPoint": 60, "minOrderQty": 200, "leadTimeDays": 7 },
        { "id": "SPOKE", "sku": "SP-100", "name": "Spoke", "itemType": "Consumable",
          "standardCost": "0.10", "safetyStock": 1000, "minOrderQty": 5000 }
    ],
    "boms": [
        { "id": "BOM-BIKE",  "itemId": ["BIKE"],  "status": "Active", "yieldPct": 100 },
        { "id": "BOM-FRAME", "itemId": "FRAME",   "status": "Active", "yieldPct": 80 },
        { "id": "BOM-WHEEL", "itemId": ["WHEEL"], "status": "Active" },
        { "id": "BOM-WHEEL-OLD", "itemId": ["WHEEL"], "status": "Inactive" }
    ],
    "bomLines": [
        { "id": "L-BW", "bomId": ["BOM-BIKE"], "componentId": ["WHEEL"], "quantity": 2, "position": 20 },
        { "id": "L-BF", "bomId": ["BOM-BIKE"], "componentId": ["FRAME"], "quantity": 1, "scrapPct": 5, "position": 10 },
        { "id": "L-FT", "bomId": "BOM-FRAME", "componentId": "TUBE", "quantity": 3, "scrapPct": 10 },
        { "id": "L-WS", "bomId": ["BOM-WHEEL"], "componentId": ["SPOKE"], "quantity": 32 },
        { "id": "L-OLD", "bomId": ["BOM-WHEEL-OLD"], "componentId": ["TUBE"], "quantity": 9 }
    ],
    "inventory": [
        { "itemId": ["BIKE"],  "quantityOnHand": 3 },
        { "itemId": ["FRAME"], "quantityOnHand": 6 },
        { "itemId": ["TUBE"],  "quantityOnHand": 40 },
        { "itemId": ["TUBE"],  "quantityOnHand": 20 },
        { "itemId": ["SPOKE"], "quantityOnHand": 2500 }
    ],
    "salesOrderLines": [
        { "id": "SOL-1", "itemId": ["BIKE"], "quantity": 30, "shippedQuantity": 10,
          "status": "Partially Shipped", "dueDate": "2025-11-20" },
        { "id": "SOL-2", "itemId": ["BIKE"], "quantity": 5, "status": "Confirmed", "dueDate": "soon" },
        { "id": "SOL-3", "itemId": ["BIKE"], "quantity": 50, "status": "Cancelled", "dueDate": "2025-11-01" },
        { "id": "SOL-4", "itemId": ["BIKE"], "quantity": 12, "status": "Delivered" }
    ],
    "productionOrders": [
        { "id": "WO-1", "itemId": ["FRAME"], "plannedQuantity": 20, "completedQuantity": 5, "status": "In Progress" },
        { "id": "WO-2", "itemId": ["WHEEL"], "plannedQuantity": 40, "status": "Released" },
        { "id": "WO-3", "itemId": ["WHEEL"], "plannedQuantity": 40, "status": "Completed" }
    ]
}"#;

fn factory() -> Snapshot {
    Snapshot::from_json(BIKE_FACTORY).unwrap()
}

#[test]
fn test_full_plan_from_records() {
    let snapshot = factory();
    let plan = compute_plan(&snapshot, &PlanningParameters::default()).unwrap();

    // BIKE: 直接需求 (30 - 10) + 5 = 25，庫存 3，安全庫存 5 → 27
    let bike = plan.row("BIKE").unwrap();
    assert_eq!(bike.direct_demand, Decimal::from(25));
    assert_eq!(bike.net_requirement, Decimal::from(27));
    assert_eq!(bike.action, PlannedAction::Production);
    assert_eq!(bike.priority, Priority::Critical);
    assert_eq!(bike.estimated_cost, Decimal::from(8640));
    // 交期 "soon" 無法解析，只採用 11/20；提前期 10 天
    assert_eq!(bike.earliest_due_date, NaiveDate::from_ymd_opt(2025, 11, 20));
    assert_eq!(bike.order_by_date, NaiveDate::from_ymd_opt(2025, 11, 10));

    // TUBE: WO-1 剩餘 15 → ceil(15 × 3 × 1.1) = 50；庫存 40 + 20
    let tube = plan.row("TUBE").unwrap();
    assert_eq!(tube.indirect_demand, Decimal::from(50));
    assert_eq!(tube.on_hand, Decimal::from(60));
    assert_eq!(tube.net_requirement, Decimal::from(40));
    assert_eq!(tube.action_qty, Decimal::from(200));
    assert_eq!(tube.action, PlannedAction::Purchase);
    assert_eq!(tube.priority, Priority::Medium);
    assert!(tube.below_reorder_point);

    // SPOKE: WO-2 剩餘 40 → 40 × 32 = 1280；1280 - 2500 + 1000 < 0
    let spoke = plan.row("SPOKE").unwrap();
    assert_eq!(spoke.gross_requirement, Decimal::from(1280));
    assert_eq!(spoke.net_requirement, Decimal::ZERO);
    assert_eq!(spoke.action, PlannedAction::None);
    assert_eq!(spoke.priority, Priority::Low);

    // WHEEL 無需求也無庫存
    assert!(plan.row("WHEEL").is_none());

    let order: Vec<_> = plan
        .recommendations
        .iter()
        .map(|r| r.item_id.as_str())
        .collect();
    // TUBE 與 FRAME 同為 Medium，保持物料順序
    assert_eq!(order, vec!["BIKE", "FRAME", "TUBE"]);
    assert!(plan.recommendations.iter().all(|r| r.net_requirement > Decimal::ZERO));
    assert_eq!(plan.summary.production_count, 2);
    assert_eq!(plan.summary.purchase_count, 1);
    assert!(plan.warnings.is_empty());
}

#[test]
fn test_simple_purchase_recommendation() {
    let snapshot = Snapshot::new(1)
        .with_items(vec![Item::new("X", ItemType::RawMaterial)
            .with_safety_stock(Decimal::from(50))
            .with_min_order_qty(Decimal::from(20))
            .with_standard_cost(Decimal::new(200, 2))])
        .with_inventory(vec![InventoryRecord::new("X", Decimal::from(10))])
        .with_sales_order_lines(vec![SalesOrderLine::new(
            "SOL-1",
            "X",
            Decimal::from(100),
            SalesOrderStatus::Confirmed,
        )]);

    let plan = compute_plan(&snapshot, &PlanningParameters::default()).unwrap();
    let row = &plan.recommendations[0];

    assert_eq!(row.adjusted_gross, Decimal::from(100));
    assert_eq!(row.net_requirement, Decimal::from(140));
    assert_eq!(row.action_qty, Decimal::from(140));
    assert_eq!(row.action, PlannedAction::Purchase);
    assert_eq!(row.estimated_cost, Decimal::new(28000, 2));
    assert_eq!(row.priority, Priority::Critical);
}

#[rstest]
#[case(250, Some(Priority::Critical))]
#[case(150, Some(Priority::High))]
#[case(50, Some(Priority::Medium))]
#[case(0, None)]
fn test_priority_thresholds_end_to_end(#[case] net: i64, #[case] expected: Option<Priority>) {
    // 安全庫存 100、庫存 100：淨需求 = 需求量
    let mut snapshot = Snapshot::new(1)
        .with_items(vec![Item::new("P", ItemType::Consumable).with_safety_stock(Decimal::from(100))])
        .with_inventory(vec![InventoryRecord::new("P", Decimal::from(100))]);
    if net > 0 {
        snapshot.sales_order_lines.push(SalesOrderLine::new(
            "SOL-1",
            "P",
            Decimal::from(net),
            SalesOrderStatus::Confirmed,
        ));
    }

    let plan = compute_plan(&snapshot, &PlanningParameters::default()).unwrap();

    assert_eq!(plan.row("P").unwrap().net_requirement, Decimal::from(net));
    assert_eq!(plan.recommendations.first().map(|r| r.priority), expected);
}

#[test]
fn test_multi_level_explosion() {
    let snapshot = factory();
    let calculator = MrpCalculator::new(&snapshot);

    let explosion = calculator.explode("BIKE", Decimal::from(10));
    let root = &explosion.root;

    assert_eq!(root.name, "City Bike");
    assert_eq!(root.shortage, Decimal::from(-7));

    // 子件依 position 排序：FRAME(10) 在 WHEEL(20) 之前
    let frame = &root.children[0];
    let wheel = &root.children[1];
    assert_eq!(frame.item_id, "FRAME");
    assert_eq!(frame.required_qty, Decimal::from(11)); // ceil(10 × 1.05)
    assert_eq!(frame.shortage, Decimal::from(-5));
    assert_eq!(wheel.required_qty, Decimal::from(20));

    let tube = &frame.children[0];
    assert_eq!(tube.required_qty, Decimal::from(37)); // ceil(11 × 3 × 1.1) = ceil(36.3)
    assert_eq!(tube.shortage, Decimal::ZERO);

    let spoke = &wheel.children[0];
    assert_eq!(spoke.required_qty, Decimal::from(640));
    assert_eq!(spoke.depth, 2);

    assert_eq!(root.node_count(), 5);
    assert_eq!(root.max_depth(), 2);
    let short: Vec<_> = root.shortages().iter().map(|n| n.item_id.as_str()).collect();
    assert_eq!(short, vec!["BIKE", "FRAME", "WHEEL"]);
    assert!(explosion.warnings.is_empty());
}

#[test]
fn test_explosion_shortage_scenario() {
    let snapshot = Snapshot::new(1)
        .with_items(vec![
            Item::new("ROOT", ItemType::FinishedGood),
            Item::new("C", ItemType::RawMaterial),
        ])
        .with_boms(
            vec![Bom::new("BOM-R", "ROOT", BomStatus::Active)],
            vec![BomLine::new("L1", "BOM-R", "C", Decimal::ONE).with_scrap_pct(Decimal::from(10))],
        )
        .with_inventory(vec![InventoryRecord::new("C", Decimal::from(50))]);

    let calculator = MrpCalculator::new(&snapshot);
    let child = calculator.explode("ROOT", Decimal::from(100)).root.children.remove(0);

    assert_eq!(child.required_qty, Decimal::from(110));
    assert_eq!(child.shortage, Decimal::from(-60));
}

#[test]
fn test_cyclic_bom_terminates_with_warning() {
    let snapshot = Snapshot::new(1).with_boms(
        vec![
            Bom::new("BOM-A", "A", BomStatus::Active),
            Bom::new("BOM-B", "B", BomStatus::Active),
        ],
        vec![
            BomLine::new("L1", "BOM-A", "B", Decimal::ONE),
            BomLine::new("L2", "BOM-B", "A", Decimal::ONE),
        ],
    );

    let calculator = MrpCalculator::new(&snapshot);
    let explosion = calculator.explode("A", Decimal::from(5));

    assert!(explosion.root.max_depth() <= MAX_EXPLOSION_DEPTH);
    assert!(explosion.root.has_cycle());
    assert_eq!(explosion.warnings[0].severity, WarningSeverity::Error);
    // 未知物料顯示 Unknown
    assert_eq!(explosion.root.name, UNKNOWN_NAME);
}

#[test]
fn test_cost_rollup_with_yield() {
    let snapshot = factory();
    let calculator = MrpCalculator::new(&snapshot);

    let rollup = calculator.cost_rollup("BOM-FRAME").unwrap();

    // 4.25 × 3 = 12.75 材料，× 1.1 = 14.025，良率 80% → 17.53125
    assert_eq!(rollup.parent_name, "Frame");
    assert_eq!(rollup.material_total, Decimal::new(1275, 2));
    assert_eq!(rollup.raw_total, Decimal::new(14025, 3));
    assert_eq!(rollup.scrap_total, Decimal::new(1275, 3));
    assert_eq!(rollup.yield_adjusted_total, Decimal::new(1753125, 5));

    let bike = calculator.cost_rollup_for_item("BIKE").unwrap();
    let ids: Vec<_> = bike.lines.iter().map(|l| l.line_id.as_str()).collect();
    assert_eq!(ids, vec!["L-BF", "L-BW"]);
}

#[test]
fn test_ambiguous_active_bom_is_reported() {
    let baseline = compute_plan(&factory(), &PlanningParameters::default()).unwrap();
    let mut snapshot = factory();
    snapshot.boms.push(Bom::new("BOM-BIKE-B", "BIKE", BomStatus::Active));

    let plan = compute_plan(&snapshot, &PlanningParameters::default()).unwrap();

    // 採用第一張 BOM-BIKE，計算結果不變
    assert_eq!(plan.rows, baseline.rows);
    let error = plan
        .warnings
        .iter()
        .find(|w| w.severity == WarningSeverity::Error)
        .unwrap();
    assert_eq!(error.item_id, "BIKE");
    assert!(error.message.contains("BOM-BIKE-B"));

    let calculator = MrpCalculator::new(&snapshot);
    let explosion = calculator.explode("BIKE", Decimal::from(10));
    assert_eq!(explosion.root.node_count(), 5);
    assert!(explosion.warnings.iter().any(|w| w.item_id == "BIKE"));
}

#[test]
fn test_ambiguous_bom_does_not_affect_unrelated_items() {
    let snapshot = Snapshot::new(1)
        .with_items(vec![
            Item::new("X", ItemType::RawMaterial).with_standard_cost(Decimal::TWO),
            Item::new("P", ItemType::FinishedGood),
        ])
        .with_boms(
            vec![
                Bom::new("B1", "P", BomStatus::Active),
                Bom::new("B2", "P", BomStatus::Active),
            ],
            vec![],
        )
        .with_sales_order_lines(vec![SalesOrderLine::new(
            "SOL-X",
            "X",
            Decimal::from(100),
            SalesOrderStatus::Confirmed,
        )]);

    let plan = compute_plan(&snapshot, &PlanningParameters::default()).unwrap();

    let x = plan.row("X").unwrap();
    assert_eq!(x.net_requirement, Decimal::from(100));
    assert_eq!(x.action, PlannedAction::Purchase);
    assert_eq!(plan.recommendations.len(), 1);
    let warning = &plan.warnings[0];
    assert_eq!(warning.item_id, "P");
    assert_eq!(warning.severity, WarningSeverity::Error);
    assert!(warning.message.contains("B1") && warning.message.contains("B2"));
}

#[test]
fn test_out_of_range_parameters_rejected() {
    assert!(matches!(
        PlanningParameters::from_json(r#"{ "demandForecastBoost": 1e23 }"#),
        Err(MrpError::InvalidParameter(_))
    ));

    let params = PlanningParameters::new().with_demand_forecast_boost(Decimal::from(20_000));
    assert!(matches!(
        compute_plan(&factory(), &params),
        Err(MrpError::InvalidParameter(_))
    ));
}

#[test]
fn test_deep_bom_chain_saturates() {
    let ids: Vec<String> = (0..10).map(|level| format!("L{level}")).collect();
    let boms = ids[..9]
        .iter()
        .map(|id| Bom::new(format!("BOM-{id}"), id.clone(), BomStatus::Active))
        .collect();
    let lines = ids
        .windows(2)
        .map(|pair| {
            BomLine::new(
                format!("E-{}", pair[1]),
                format!("BOM-{}", pair[0]),
                pair[1].clone(),
                Decimal::from(10_000),
            )
        })
        .collect();
    let snapshot = Snapshot::new(1).with_boms(boms, lines).with_production_orders(vec![
        ProductionOrder::new("WO-1", "L6", Decimal::MAX, ProductionOrderStatus::Released),
    ]);

    let explosion = MrpCalculator::new(&snapshot).explode("L0", Decimal::from(1000));
    assert!(explosion.root.iter().any(|node| node.required_qty == Decimal::MAX));
    assert!(explosion.warnings.iter().any(|w| w.severity == WarningSeverity::Error));

    // 工單展開一層：MAX × 10 000 飽和
    let plan = compute_plan(&snapshot, &PlanningParameters::default()).unwrap();
    assert!(plan
        .warnings
        .iter()
        .any(|w| w.item_id == "L7" && w.severity == WarningSeverity::Error));
}

#[test]
fn test_parameters_scale_plan() {
    let snapshot = factory();
    let params = PlanningParameters::from_json(
        r#"{ "safetyStockMultiplier": 2, "demandForecastBoost": 120, "scrapFactor": 5, "planningHorizonDays": 60 }"#,
    )
    .unwrap();

    let plan = compute_plan(&snapshot, &params).unwrap();
    let bike = plan.row("BIKE").unwrap();

    // 25 × 1.2 × 1.05 = 31.5；31.5 - 3 + 10 = 38.5
    assert_eq!(bike.adjusted_gross, Decimal::new(315, 1));
    assert_eq!(bike.effective_safety_stock, Decimal::from(10));
    assert_eq!(bike.net_requirement, Decimal::new(385, 1));
    // 日均 31.5 / 60 = 0.525，3 / 0.525 ≈ 5.7 天
    assert_eq!(bike.days_of_coverage, Some(Decimal::new(57, 1)));
}

#[test]
fn test_plan_cache_reuses_results() {
    let snapshot = factory();
    let mut cache = PlanCache::new(8);
    let params = PlanningParameters::default();

    let first = cache.get_or_compute(&snapshot, &params).unwrap();
    let again = cache.get_or_compute(&snapshot, &params).unwrap();

    assert_eq!(first.rows, again.rows);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.invalidate_snapshot(snapshot.version), 1);
}

#[test]
fn test_plan_serializes_for_presentation() {
    let snapshot = factory();
    let plan = compute_plan(&snapshot, &PlanningParameters::default()).unwrap();

    let json = serde_json::to_value(&plan).unwrap();

    assert_eq!(json["snapshotVersion"], 7);
    assert_eq!(json["recommendations"][0]["itemId"], "BIKE");
    assert_eq!(json["recommendations"][0]["priority"], "Critical");
    assert_eq!(json["recommendations"][0]["action"], "Production");
}
