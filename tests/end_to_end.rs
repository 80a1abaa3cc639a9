use replenishment_planner::io::{demand, reporting};
use replenishment_planner::model::recommendation::{DaysOfCover, Risk};
use replenishment_planner::planning::config::PlannerConfig;
use replenishment_planner::planning::engine::ReplenishmentEngine;

const HEADER: &str = "sku,date,demand_qty,on_hand,incoming,lead_time_days,moq\n";

// SKU A: eight weeks at 10 then a 20 week, split across two days in week 1.
// SKU Z: stocked but never sold.
// SKU M: comfortable cover.
fn demand_csv() -> String {
    let mut csv = String::from(HEADER);
    csv.push_str("A,2024-01-01,4,60,0,14,10\n");
    csv.push_str("A,2024-01-03,6,55,0,14,10\n");
    for (day, qty) in [
        ("2024-01-08", 10),
        ("2024-01-15", 10),
        ("2024-01-22", 10),
        ("2024-01-29", 10),
        ("2024-02-05", 10),
        ("2024-02-12", 10),
        ("2024-02-19", 20),
    ] {
        csv.push_str(&format!("A,{day},{qty},5,0,14,10\n"));
    }
    csv.push_str("Z,2024-02-19,0,100,0,7,12\n");
    csv.push_str("Z,2024-02-20,,100,0,7,12\n");
    csv.push_str("M,2024-02-12,7,30,10,7,0\n");
    csv.push_str("M,2024-02-19,7,30,10,7,0\n");
    csv
}

#[test]
fn plans_uploaded_demand_end_to_end() {
    let records = demand::load_demand(demand_csv().as_bytes()).unwrap();
    let recommendations = ReplenishmentEngine::new(PlannerConfig::default()).run(&records);

    let skus: Vec<_> = recommendations.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(skus, vec!["A", "M", "Z"]);

    let a = &recommendations[0];
    assert!((a.forecast - 13.0).abs() < 1e-9);
    assert!((a.variability - 12.5_f64.sqrt()).abs() < 1e-9);
    assert_eq!(a.on_hand, 5.0);
    assert_eq!(a.order_qty, 30.0);
    assert_eq!(a.risk, Risk::StockoutRisk);

    // M: forecast 7, net stock 40 -> 40 days of cover, lead time 7 days
    let m = &recommendations[1];
    assert!((m.forecast - 7.0).abs() < 1e-9);
    assert_eq!(m.order_qty, 0.0);
    assert_eq!(m.risk, Risk::Ok);

    let z = &recommendations[2];
    assert_eq!(z.days_of_cover, DaysOfCover::Unbounded);
    assert_eq!(z.order_qty, 0.0);
    assert_eq!(z.risk, Risk::ExcessRisk);
}

#[test]
fn exported_table_is_sorted_by_order_quantity() {
    let records = demand::load_demand(demand_csv().as_bytes()).unwrap();
    let recommendations = ReplenishmentEngine::default().run(&records);
    let report = reporting::build_report(&recommendations);

    let mut buf = Vec::new();
    reporting::write_report(&mut buf, &report).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(
        lines[0],
        "SKU,Forecast (avg weekly),On Hand,Incoming,Days of Cover,Safety Stock,Recommended Order Qty,Risk"
    );
    assert_eq!(lines[1], "A,13.0,5.0,0.0,2.7,8.25,30.0,Stockout Risk");
    // M and Z tie at zero and keep SKU order
    assert!(lines[2].starts_with("M,7.0,30.0,10.0,40.0,"));
    assert_eq!(lines[3], "Z,0.0,100.0,0.0,999.0,0.0,0.0,Excess Risk");
}

#[test]
fn tighter_service_level_raises_safety_stock() {
    let records = demand::load_demand(demand_csv().as_bytes()).unwrap();
    let strict = PlannerConfig {
        service_level_z: 2.33,
        ..PlannerConfig::default()
    };

    let base = ReplenishmentEngine::default().run(&records);
    let tight = ReplenishmentEngine::new(strict).run(&records);

    assert!(tight[0].safety_stock > base[0].safety_stock);
}
