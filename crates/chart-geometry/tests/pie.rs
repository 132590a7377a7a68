// File: crates/chart-geometry/tests/pie.rs
// Purpose: Pie slices, percentages, angular layout, radii and slice lookup.

use std::f64::consts::TAU;

use chart_geometry::geometry::{Point, Size};
use chart_geometry::pie::build_slices;
use chart_geometry::{ActiveSlice, PieChart, PieChartConfig, PieSort, RadiusSpec, Record};
use serde_json::json;

fn records(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).expect("records")
}

fn sample() -> Vec<Record> {
    records(json!([
        { "name": "A", "value": 10 },
        { "name": "B", "value": 20 },
        { "name": "C", "value": 30 },
    ]))
}

#[test]
fn percentages_normalise_to_one() {
    let pie = build_slices(&sample(), "value", Some("name"), None, &[]);
    assert_eq!(pie.total, 60.0);
    let pct: Vec<f64> = pie.slices.iter().map(|s| s.percentage).collect();
    for (got, want) in pct.iter().zip([1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0]) {
        assert!((got - want).abs() < 1e-9);
    }
    assert!((pct.iter().sum::<f64>() - 1.0).abs() < 1e-9);
}

#[test]
fn zero_negative_and_invalid_values_are_excluded() {
    let data = records(json!([
        { "name": "A", "value": 0 },
        { "name": "B", "value": -4 },
        { "name": "C", "value": "x" },
        { "name": "D", "value": 8 },
    ]));
    let pie = build_slices(&data, "value", Some("name"), None, &[]);
    assert_eq!(pie.slices.len(), 1);
    assert_eq!(pie.slices[0].id, "D-3");
    assert_eq!(pie.slices[0].index, 0);
    assert_eq!(pie.slices[0].percentage, 1.0);
}

#[test]
fn arcs_sweep_clockwise_from_top() {
    let model = PieChart::new(PieChartConfig::new(sample(), "name", "value")).build(&Size::new(200.0, 200.0));
    assert_eq!(model.arcs.len(), 3);
    assert_eq!(model.arcs[0].start_angle, 0.0);
    assert!((model.arcs[0].end_angle - TAU / 6.0).abs() < 1e-9);
    assert!((model.arcs[2].end_angle - TAU).abs() < 1e-9);
    assert!(model.arcs.iter().all(|a| a.path.starts_with('M') && a.path.ends_with('Z')));
}

#[test]
fn sort_changes_angles_not_slice_order() {
    let config = PieChartConfig::new(sample(), "name", "value").with_sort(PieSort::Descending);
    let model = PieChart::new(config).build(&Size::new(200.0, 200.0));
    let labels: Vec<&str> = model.data.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
    // Largest slice first.
    assert_eq!(model.arcs[2].start_angle, 0.0);
    assert!((model.arcs[0].end_angle - TAU).abs() < 1e-9);
}

#[test]
fn radii_resolve_against_available_space() {
    let config = PieChartConfig::new(sample(), "name", "value")
        .with_radii(RadiusSpec::Percent(0.5), RadiusSpec::Pixels(500.0));
    let model = PieChart::new(config).build(&Size::new(400.0, 200.0));
    // min(400, 200) / 2 - 8 padding
    assert_eq!(model.outer_radius, 92.0);
    assert_eq!(model.inner_radius, 46.0);
    assert_eq!(model.center, Point::new(200.0, 100.0));
}

#[test]
fn pad_angle_leaves_gaps() {
    let config = PieChartConfig::new(sample(), "name", "value").with_pad_angle(0.1);
    let model = PieChart::new(config).build(&Size::new(200.0, 200.0));
    for w in model.arcs.windows(2) {
        assert!((w[1].start_angle - w[0].end_angle - 0.1).abs() < 1e-9);
    }
}

#[test]
fn pointer_lookup_and_dimming() {
    let config = PieChartConfig::new(sample(), "name", "value")
        .with_radii(RadiusSpec::Percent(0.5), RadiusSpec::Percent(1.0));
    let model = PieChart::new(config).build(&Size::new(200.0, 200.0));
    // Just right of 12 o'clock, inside the ring.
    let hit = model.slice_at(Point::new(110.0, 30.0)).expect("slice A");
    assert_eq!(hit.label, "A");
    // Donut hole: no direct hit, nearest by angle still resolves.
    assert!(model.slice_at(Point::new(100.0, 90.0)).is_none());
    assert_eq!(model.nearest_slice(Point::new(90.0, 100.0)).map(|s| s.label.as_str()), Some("C"));
    // Outside the pie.
    assert!(model.nearest_slice(Point::new(199.0, 199.0)).is_none());

    let mut active = ActiveSlice::default();
    active.activate(hit.id.clone());
    assert!(!active.is_dimmed(&hit.id));
    assert!(model.data.slices.iter().filter(|s| active.is_dimmed(&s.id)).count() == 2);
}

#[test]
fn aria_labels_and_empty_state() {
    let model = PieChart::new(PieChartConfig::new(sample(), "name", "value")).build(&Size::new(200.0, 200.0));
    assert_eq!(model.aria_label(), "Pie chart");
    assert_eq!(model.slice_aria_label("B-1").as_deref(), Some("B: 20 (33.3%)"));
    assert!(!model.is_empty());

    let empty = PieChart::new(PieChartConfig::new(records(json!([{ "name": "Z", "value": 0 }])), "name", "value"))
        .build(&Size::new(200.0, 200.0));
    assert!(empty.is_empty());
    assert!(empty.arcs.is_empty());
}

#[test]
fn config_parses_from_json() {
    let config = PieChartConfig::from_json_str(
        r#"{ "valueKey": "value", "nameKey": "name", "innerRadius": { "percent": 0.6 }, "sort": "ascending" }"#,
    )
    .unwrap();
    assert_eq!(config.inner_radius, RadiusSpec::Percent(0.6));
    assert_eq!(config.sort, PieSort::Ascending);
    assert!(PieChartConfig::from_json_str("{}").is_err());
}
