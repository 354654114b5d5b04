use chart_sync::config::series::datetime_to_unix_seconds;
use chart_sync::config::{DataPoint, OhlcBar, SeriesData, SeriesSpec};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;

#[test]
fn datetime_converts_to_fractional_unix_seconds() {
    let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        + chrono::Duration::milliseconds(250);
    assert_eq!(
        datetime_to_unix_seconds(time),
        1_714_564_800.25
    );
}

#[test]
fn data_point_from_decimal_time_converts_both_fields() {
    let time = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let point = DataPoint::from_decimal_time(time, Decimal::new(42_500, 3)).expect("point");
    assert_eq!(point.time, 1_714_521_600.0);
    assert_eq!(point.value, 42.5);
}

#[test]
fn ohlc_bar_from_decimal_time_converts_all_fields() {
    let time = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let bar = OhlcBar::from_decimal_time(
        time,
        Decimal::new(100, 0),
        Decimal::new(105, 0),
        Decimal::new(95, 0),
        Decimal::new(102, 0),
    )
    .expect("bar");
    assert_eq!(bar.open, 100.0);
    assert_eq!(bar.high, 105.0);
    assert_eq!(bar.low, 95.0);
    assert_eq!(bar.close, 102.0);
}

#[test]
fn series_spec_round_trips_through_json() {
    let spec = SeriesSpec::new(SeriesData::Points(vec![DataPoint::new(1.0, 10.0)]))
        .with_id("price")
        .with_options(json!({ "color": "#2196F3", "lineWidth": 2 }))
        .with_legend("Price");

    let encoded = serde_json::to_string(&spec).expect("serialize");
    let decoded: SeriesSpec = serde_json::from_str(&encoded).expect("deserialize");
    assert_eq!(decoded, spec);
}

#[test]
fn legend_color_reads_the_color_option() {
    let spec = SeriesSpec::default().with_options(json!({ "color": "#FF0000" }));
    assert_eq!(spec.legend_color().as_deref(), Some("#FF0000"));

    let colorless = SeriesSpec::default().with_options(json!({ "lineWidth": 2 }));
    assert_eq!(colorless.legend_color(), None);

    // Non-string color values are ignored rather than coerced.
    let numeric = SeriesSpec::default().with_options(json!({ "color": 7 }));
    assert_eq!(numeric.legend_color(), None);
}
