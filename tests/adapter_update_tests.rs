use std::cell::Cell;
use std::rc::Rc;

use chart_sync::adapter::ChartAdapter;
use chart_sync::config::{ChartConfig, DataPoint, SeriesData, SeriesKind, SeriesSpec};
use chart_sync::engine::{EngineCall, HeadlessSurface, NullEngine};
use chart_sync::events::{Callback, PointerEvent, VisibleRange};

fn line_config(id: &str) -> ChartConfig {
    ChartConfig::new().with_series(
        SeriesKind::Line,
        vec![SeriesSpec::new(SeriesData::Points(vec![DataPoint::new(1.0, 10.0)])).with_id(id)],
    )
}

fn mounted(config: ChartConfig) -> ChartAdapter<NullEngine, HeadlessSurface> {
    let mut adapter = ChartAdapter::new(HeadlessSurface::new(640, 480));
    adapter.mount(NullEngine::new(), config).expect("mount");
    adapter
}

fn noop_pointer_handler() -> Callback<PointerEvent> {
    Callback::new(|_event: &PointerEvent| {})
}

fn noop_range_handler() -> Callback<VisibleRange> {
    Callback::new(|_range: &VisibleRange| {})
}

#[test]
fn changing_one_handler_swaps_the_full_handler_set() {
    let config = line_config("a")
        .with_on_click(noop_pointer_handler())
        .with_on_crosshair_move(noop_pointer_handler())
        .with_on_time_range_move(noop_range_handler());
    let mut adapter = mounted(config.clone());

    let next = config.with_on_click(noop_pointer_handler());
    adapter.update(next.clone()).expect("update");

    let engine = adapter.engine().expect("engine");
    assert_eq!(engine.click_unsubscribes, 1);
    // User crosshair handler plus the internal legend handler.
    assert_eq!(engine.crosshair_unsubscribes, 2);
    assert_eq!(engine.time_range_unsubscribes, 1);
    assert_eq!(engine.click_handlers.len(), 1);
    assert_eq!(engine.crosshair_handlers.len(), 2);
    assert_eq!(engine.time_range_handlers.len(), 1);
    assert_eq!(engine.click_handlers[0], next.on_click.clone().expect("handler"));
}

#[test]
fn stable_handlers_are_not_resubscribed() {
    let config = line_config("a")
        .with_on_click(noop_pointer_handler())
        .with_on_crosshair_move(noop_pointer_handler());
    let mut adapter = mounted(config.clone());

    adapter.update(config).expect("update");

    let engine = adapter.engine().expect("engine");
    assert_eq!(engine.click_unsubscribes, 0);
    assert_eq!(engine.crosshair_unsubscribes, 0);
    assert_eq!(engine.click_handlers.len(), 1);
    assert_eq!(engine.crosshair_handlers.len(), 2);
}

#[test]
fn subscribed_click_handler_receives_engine_events() {
    let clicks = Rc::new(Cell::new(0usize));
    let counter = Rc::clone(&clicks);
    let config = line_config("a").with_on_click(Callback::new(move |_event: &PointerEvent| {
        counter.set(counter.get() + 1);
    }));
    let adapter = mounted(config);

    adapter
        .engine()
        .expect("engine")
        .emit_click(&PointerEvent::at_time(7.0));

    assert_eq!(clicks.get(), 1);
}

#[test]
fn subscribed_time_range_handler_receives_engine_events() {
    let seen = Rc::new(Cell::new(None));
    let latest = Rc::clone(&seen);
    let config = line_config("a").with_on_time_range_move(Callback::new(
        move |range: &VisibleRange| {
            latest.set(Some(*range));
        },
    ));
    let adapter = mounted(config);

    adapter
        .engine()
        .expect("engine")
        .emit_time_range_change(&VisibleRange::new(10.0, 20.0));

    assert_eq!(seen.get(), Some(VisibleRange::new(10.0, 20.0)));
}

#[test]
fn full_sync_never_duplicates_subscriptions() {
    let config = line_config("a")
        .with_on_click(noop_pointer_handler())
        .with_on_crosshair_move(noop_pointer_handler())
        .with_on_time_range_move(noop_range_handler());
    let mut adapter = mounted(config.clone());

    // Visual-only change: the full sync swaps the handler set but must leave
    // exactly one registration per handler behind.
    adapter
        .update(config.clone().with_dark_theme(true))
        .expect("update");
    adapter
        .update(config.with_dark_theme(false))
        .expect("update");

    let engine = adapter.engine().expect("engine");
    assert_eq!(engine.click_handlers.len(), 1);
    assert_eq!(engine.crosshair_handlers.len(), 2);
    assert_eq!(engine.time_range_handlers.len(), 1);
}

#[test]
fn theme_toggle_triggers_exactly_one_full_sync() {
    let config = line_config("a");
    let mut adapter = mounted(config.clone());
    adapter.engine_mut().expect("engine").take_calls();

    adapter
        .update(config.with_dark_theme(true))
        .expect("update");

    let sync_count = adapter
        .engine()
        .expect("engine")
        .calls
        .iter()
        .filter(|call| matches!(call, EngineCall::ApplyOptions))
        .count();
    assert_eq!(sync_count, 1);
}

#[test]
fn mount_resizes_immediately() {
    let adapter = mounted(line_config("a").with_size(300, 200));

    let engine = adapter.engine().expect("engine");
    assert!(engine.calls.contains(&EngineCall::Resize {
        width: None,
        height: Some(200),
    }));
}

#[test]
fn resize_uses_parent_dimensions_only_when_auto_sizing() {
    let mut adapter = mounted(line_config("a").with_auto_width().with_auto_height());
    adapter.engine_mut().expect("engine").take_calls();

    adapter.handle_resize().expect("resize");
    assert_eq!(
        adapter.engine().expect("engine").calls,
        vec![EngineCall::Resize {
            width: Some(640),
            height: Some(480),
        }]
    );
}

#[test]
fn fixed_height_defaults_to_500() {
    let mut adapter = mounted(line_config("a"));
    adapter.engine_mut().expect("engine").take_calls();

    adapter.handle_resize().expect("resize");
    assert_eq!(
        adapter.engine().expect("engine").calls,
        vec![EngineCall::Resize {
            width: None,
            height: Some(500),
        }]
    );
}

#[test]
fn auto_height_falls_back_to_configured_height_when_unmeasurable() {
    let mut adapter = ChartAdapter::new(HeadlessSurface::unmeasured());
    adapter
        .mount(
            NullEngine::new(),
            line_config("a").with_size(300, 240).with_auto_height(),
        )
        .expect("mount");
    adapter.engine_mut().expect("engine").take_calls();

    adapter.handle_resize().expect("resize");
    assert_eq!(
        adapter.engine().expect("engine").calls,
        vec![EngineCall::Resize {
            width: None,
            height: Some(240),
        }]
    );
}

#[test]
fn auto_sizing_attaches_the_resize_listener() {
    let adapter = mounted(line_config("a").with_auto_width());
    assert!(adapter.surface().resize_listener_attached);
}

#[test]
fn disabling_auto_sizing_detaches_the_resize_listener() {
    let config = line_config("a").with_auto_width();
    let mut adapter = mounted(config.clone());
    assert!(adapter.surface().resize_listener_attached);

    let mut next = config;
    next.auto_width = false;
    adapter.update(next).expect("update");

    assert!(!adapter.surface().resize_listener_attached);
}

#[test]
fn fixed_size_mount_leaves_the_resize_listener_detached() {
    let adapter = mounted(line_config("a").with_size(300, 200));
    assert!(!adapter.surface().resize_listener_attached);
}

#[test]
fn update_before_mount_is_a_no_op() {
    let mut adapter: ChartAdapter<NullEngine, HeadlessSurface> =
        ChartAdapter::new(HeadlessSurface::new(640, 480));
    adapter.update(line_config("a")).expect("update");
    assert!(!adapter.is_mounted());
}

#[test]
fn unmount_clears_all_adapter_state() {
    let mut adapter = mounted(
        line_config("a")
            .with_auto_width()
            .with_legend("Main")
            .with_on_click(noop_pointer_handler()),
    );

    adapter.unmount();

    assert!(!adapter.is_mounted());
    assert!(adapter.engine().is_none());
    assert!(adapter.tracked_series().is_empty());
    assert!(adapter.legend_rows().is_empty());
    assert!(adapter.legend_entries().is_empty());
    assert!(!adapter.surface().resize_listener_attached);
}
