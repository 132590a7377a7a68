// File: crates/chart-geometry/tests/area_chart.rs
// Purpose: End-to-end area chart model: layout, ticks, paths, hit testing, ARIA text and config parsing.

use chart_geometry::geometry::{Point, Size};
use chart_geometry::types::{Insets, MIN_CONTAINER_SIZE};
use chart_geometry::{
    AreaChart, AreaChartConfig, ChartError, ChartSlots, Curve, Domain, PointerEvent, Record, SeriesSpec, SortPoints,
};
use serde_json::json;

fn records(value: serde_json::Value) -> Vec<Record> {
    serde_json::from_value(value).expect("records")
}

fn months() -> Vec<Record> {
    records(json!([
        { "m": "Jan", "v": 10 },
        { "m": "Feb", "v": "bad" },
        { "m": "Mar", "v": 30 },
    ]))
}

fn config() -> AreaChartConfig {
    let mut c = AreaChartConfig::new(months(), "m", "v").with_sort(SortPoints::Insertion);
    c.insets = Insets::new(40.0, 10.0, 10.0, 30.0);
    c
}

#[test]
fn end_to_end_scenario() {
    let model = AreaChart::new(config()).build(&Size::new(450.0, 240.0));
    assert!(!model.needs_remeasure);
    assert!(!model.is_empty());

    let series = &model.data.series[0];
    assert_eq!(series.points.len(), 2);
    assert_eq!(series.total, 40.0);
    assert_eq!(model.data.x_domain, Domain::new(0.0, 2.0));
    assert_eq!(model.data.y_domain.min, 0.0);

    // Plot spans x 40..440; Jan at index 0 sits on the left edge, Mar at index 2 on the right.
    let markers = &model.geometry[0].markers;
    assert_eq!(markers[0].x, 40.0);
    assert_eq!(markers[1].x, 440.0);
    assert!(model.geometry[0].line_path.as_deref().is_some_and(|p| p.starts_with("M40,")));
    assert!(model.geometry[0].area_path.as_deref().is_some_and(|p| p.ends_with('Z')));
}

#[test]
fn ticks_are_positioned_on_the_plot() {
    let model = AreaChart::new(config()).build(&Size::new(450.0, 240.0));
    let y_labels: Vec<&str> = model.y_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(y_labels.first(), Some(&"0"));
    // Zero sits on the plot bottom.
    assert_eq!(model.y_ticks[0].position, 210.0);
    assert!(model.y_ticks.iter().all(|t| t.position >= 10.0 && t.position <= 210.0));

    let x_labels: Vec<&str> = model.x_ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(x_labels, vec!["Jan", "Mar"]);
}

#[test]
fn hit_test_finds_nearest_point_inside_plot() {
    let model = AreaChart::new(config()).build(&Size::new(450.0, 240.0));
    let hit = model.hit_test(PointerEvent::Move(Point::new(300.0, 100.0))).expect("hit");
    assert_eq!(hit.point.point_id, "v-2");
    assert!((hit.data_x - 1.3).abs() < 1e-9);

    let touch = model.hit_test(PointerEvent::TouchStart(Point::new(60.0, 100.0))).expect("touch hit");
    assert_eq!(touch.point.point_id, "v-0");

    assert!(model.hit_test(PointerEvent::Move(Point::new(5.0, 100.0))).is_none());
    assert!(model.hit_test(PointerEvent::Leave).is_none());
}

#[test]
fn aria_text_combines_series_label_and_value() {
    let mut c = config().with_slots(ChartSlots { title: Some("Revenue".into()), ..ChartSlots::default() });
    c.label = Some("Sales".into());
    let model = AreaChart::new(c).build(&Size::new(450.0, 240.0));
    assert_eq!(model.aria_label(), "Revenue");
    assert_eq!(model.point_aria_label("v-0").as_deref(), Some("Sales, Jan: 10"));
    assert_eq!(model.point_aria_label("v-1"), None);

    let untitled = AreaChart::new(config()).build(&Size::new(450.0, 240.0));
    assert_eq!(untitled.aria_label(), "Area chart");
}

#[test]
fn formatters_flow_into_labels() {
    let c = config()
        .with_value_formatter(|p, ctx| format!("{:.0}%", p.value / ctx.total * 100.0))
        .with_label_formatter(|p, _| p.label.to_uppercase());
    let model = AreaChart::new(c).build(&Size::new(450.0, 240.0));
    assert_eq!(model.point_aria_label("v-2").as_deref(), Some("V, MAR: 75%"));
    assert_eq!(model.x_ticks[0].label, "JAN");
}

#[test]
fn tooltip_anchors_at_marker() {
    let model = AreaChart::new(config()).build(&Size::new(450.0, 240.0));
    let tip = Size::new(80.0, 40.0);
    let placement = model.tooltip_for("v-0", tip).expect("placement");
    let anchor = model.anchor_of("v-0").expect("anchor");
    assert!(!placement.rect(tip).covers(anchor));
    assert!(model.tooltip_for("missing", tip).is_none());
}

#[test]
fn unmeasured_container_uses_fallback_and_retries() {
    let model = AreaChart::new(config()).build(&|| Size::new(0.0, 0.0));
    assert!(model.needs_remeasure);
    assert_eq!(model.layout.container, MIN_CONTAINER_SIZE);
}

#[test]
fn fewer_than_two_points_is_empty() {
    let c = AreaChartConfig::new(records(json!([{ "x": 1, "y": 2 }, { "x": 2, "y": null }])), "x", "y");
    let model = AreaChart::new(c).build(&Size::new(400.0, 300.0));
    assert!(model.is_empty());
    assert!(model.geometry[0].line_path.is_none());
    assert!(model.hit_test(PointerEvent::Move(Point::new(100.0, 100.0))).is_none());
}

#[test]
fn curves_change_path_commands() {
    let data = records(json!([{ "x": 0, "y": 1 }, { "x": 1, "y": 4 }, { "x": 2, "y": 2 }]));
    let build = |curve| {
        let c = AreaChartConfig::new(data.clone(), "x", "y").with_curve(curve);
        AreaChart::new(c).build(&Size::new(400.0, 300.0)).geometry[0].line_path.clone().unwrap()
    };
    assert!(!build(Curve::Linear).contains('C'));
    assert!(build(Curve::Monotone).contains('C'));
    assert!(build(Curve::Natural).contains('C'));
    assert_eq!(build(Curve::Step).matches('L').count(), 6);
}

#[test]
fn overlay_series_are_hit_tested_together() {
    let data = records(json!([{ "x": 0, "a": 1, "b": 5 }, { "x": 10, "a": 2, "b": 6 }]));
    let c = AreaChartConfig::new(data, "x", "a").with_series(SeriesSpec::new("b"));
    let model = AreaChart::new(c).build(&Size::new(400.0, 300.0));
    assert_eq!(model.geometry.len(), 2);
    assert_eq!(model.point_ids().count(), 4);
    // Equal x distance: first series wins.
    let hit = model.hit_test(PointerEvent::Move(Point::new(60.0, 100.0))).unwrap();
    assert_eq!(hit.point.series_index, 0);
}

#[test]
fn config_from_json() {
    let c = AreaChartConfig::from_json_str(
        r##"{
            "data": [{ "day": "2024-01-01", "sales": 3 }, { "day": "2024-01-02", "sales": "4" }],
            "xKey": "day",
            "yKey": "sales",
            "sortPoints": true,
            "curve": "monotone",
            "palette": ["#000000"],
            "slots": { "title": "Daily sales" }
        }"##,
    )
    .unwrap();
    assert!(matches!(c.sort_points, SortPoints::Ascending));
    assert_eq!(c.curve, Curve::Monotone);
    assert_eq!(c.x_axis_label(), "Day");
    let model = AreaChart::new(c).build(&Size::new(400.0, 300.0));
    assert_eq!(model.data.series[0].color, "#000000");
    assert_eq!(model.aria_label(), "Daily sales");

    assert!(matches!(AreaChartConfig::from_json_str("{}"), Err(ChartError::MissingKey(_))));
    assert!(matches!(AreaChartConfig::from_json_str("{"), Err(ChartError::Config(_))));
}
