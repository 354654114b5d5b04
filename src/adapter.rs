//! Stateful adapter keeping one engine instance in sync with a declarative
//! configuration.
//!
//! The host drives three entry points: [`ChartAdapter::mount`],
//! [`ChartAdapter::update`], and [`ChartAdapter::unmount`], plus
//! [`ChartAdapter::handle_resize`] wired to its own resize events. No
//! framework base class is involved; the adapter's full state is the owned
//! engine, the tracked-series list, the legend, the subscribed handler set,
//! and the one-shot initial-range flag.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value, json};
use tracing::{debug, trace};

use crate::config::{ChartConfig, DEFAULT_HEIGHT, SeriesKind, SeriesSpec, merge_options};
use crate::engine::{ChartEngine, DrawingSurface, SeriesId};
use crate::error::AdapterResult;
use crate::events::{Callback, PointerEvent, VisibleRange};
use crate::legend::{LegendEntry, LegendRow, LegendState};

/// Adapter-side record of one live engine series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedSeries {
    pub id: Option<String>,
    pub handle: SeriesId,
    pub legend_title: Option<String>,
}

/// Handlers currently registered with the engine.
///
/// Kept separately from the configuration so unsubscription always targets
/// what was actually subscribed, never what a stale configuration claims.
#[derive(Debug, Default)]
struct ActiveSubscriptions {
    click: Option<Callback<PointerEvent>>,
    crosshair: Option<Callback<PointerEvent>>,
    time_range: Option<Callback<VisibleRange>>,
    legend: Option<Callback<PointerEvent>>,
}

/// Owns one chart-engine instance for the lifetime of a mounted component and
/// reconciles it against each new configuration.
pub struct ChartAdapter<E: ChartEngine, S: DrawingSurface> {
    surface: S,
    engine: Option<E>,
    config: ChartConfig,
    tracked: Vec<TrackedSeries>,
    legend: Rc<RefCell<LegendState>>,
    subscriptions: ActiveSubscriptions,
    init_time_scale: bool,
}

impl<E: ChartEngine, S: DrawingSurface> ChartAdapter<E, S> {
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            engine: None,
            config: ChartConfig::default(),
            tracked: Vec::new(),
            legend: Rc::new(RefCell::new(LegendState::default())),
            subscriptions: ActiveSubscriptions::default(),
            init_time_scale: true,
        }
    }

    /// Binds the engine instance the host created against the surface, runs
    /// the first full synchronization, sizes the chart, and applies the
    /// initial visible range (consuming the one-shot flag).
    pub fn mount(&mut self, engine: E, config: ChartConfig) -> AdapterResult<()> {
        debug!("mounting chart adapter");
        self.engine = Some(engine);
        self.config = config;
        self.init_time_scale = true;
        if let Some(engine) = self.engine.as_mut() {
            full_sync(
                engine,
                &mut self.surface,
                &mut self.tracked,
                &self.legend,
                &mut self.subscriptions,
                &self.config,
            )?;
            resize_engine(engine, &self.surface, &self.config)?;
            apply_visible_range(engine, &self.config)?;
        }
        self.init_time_scale = false;
        Ok(())
    }

    /// Synchronizes the engine with `next`, re-doing only the work whose
    /// inputs changed since the previous configuration.
    pub fn update(&mut self, next: ChartConfig) -> AdapterResult<()> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };

        if !next.auto_width && !next.auto_height {
            self.surface.detach_resize_listener();
        }

        if next.events_differ(&self.config) {
            // Full handler-set swap, never partial; old handlers come off
            // before any new one goes on so no event is delivered twice.
            unsubscribe_all(engine, &mut self.subscriptions);
            subscribe_all(engine, &mut self.subscriptions, &next, &self.legend);
        }

        if next.visuals_differ(&self.config) {
            full_sync(
                engine,
                &mut self.surface,
                &mut self.tracked,
                &self.legend,
                &mut self.subscriptions,
                &next,
            )?;
        }

        if next.from != self.config.from || next.to != self.config.to || self.init_time_scale {
            apply_visible_range(engine, &next)?;
            self.init_time_scale = false;
        }

        self.config = next;
        Ok(())
    }

    /// Drops the engine and clears all adapter state. The engine-side
    /// teardown is the engine's own destructor; the adapter only guarantees
    /// it holds no handles afterwards.
    pub fn unmount(&mut self) {
        debug!("unmounting chart adapter");
        self.surface.detach_resize_listener();
        self.engine = None;
        self.tracked.clear();
        self.subscriptions = ActiveSubscriptions::default();
        self.legend.borrow_mut().clear();
    }

    /// Re-applies chart dimensions from the current configuration and the
    /// measured surface. Hosts call this from their resize listener; it also
    /// runs once at mount so initial sizing never waits for an event.
    pub fn handle_resize(&mut self) -> AdapterResult<()> {
        let Some(engine) = self.engine.as_mut() else {
            return Ok(());
        };
        resize_engine(engine, &self.surface, &self.config)
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.engine.is_some()
    }

    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn tracked_series(&self) -> &[TrackedSeries] {
        &self.tracked
    }

    /// Current legend rows for the host to paint.
    #[must_use]
    pub fn legend_rows(&self) -> Vec<LegendRow> {
        self.legend.borrow().rows().to_vec()
    }

    #[must_use]
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.legend.borrow().entries().to_vec()
    }

    /// Theme text color for host-painted legend chrome.
    #[must_use]
    pub fn text_color(&self) -> &'static str {
        self.config.theme().text_color()
    }
}

fn full_sync<E: ChartEngine, S: DrawingSurface>(
    engine: &mut E,
    surface: &mut S,
    tracked: &mut Vec<TrackedSeries>,
    legend: &Rc<RefCell<LegendState>>,
    subscriptions: &mut ActiveSubscriptions,
    config: &ChartConfig,
) -> AdapterResult<()> {
    surface.detach_resize_listener();

    let options = merged_sync_options(config, surface);
    engine.apply_options(&options)?;

    legend.borrow_mut().reset(config.legend.clone());

    reconcile_series(engine, tracked, legend, config)?;

    unsubscribe_all(engine, subscriptions);
    subscribe_all(engine, subscriptions, config, legend);

    if config.auto_width || config.auto_height {
        surface.attach_resize_listener();
    }
    Ok(())
}

/// Theme preset deep-merged with computed dimensions and the user override.
///
/// The override object is assembled in the same precedence order as the
/// original wrapper: computed `width`/`height` first, then user options, so
/// an explicit user dimension wins over the computed one.
fn merged_sync_options<S: DrawingSurface>(config: &ChartConfig, surface: &S) -> Value {
    let mut overrides = Map::new();

    let width = if config.auto_width {
        surface.parent_width()
    } else {
        config.width
    };
    if let Some(width) = width {
        overrides.insert("width".to_owned(), json!(width));
    }

    let height = if config.auto_height {
        surface.parent_height()
    } else {
        Some(config.height.unwrap_or(DEFAULT_HEIGHT))
    };
    if let Some(height) = height {
        overrides.insert("height".to_owned(), json!(height));
    }

    if let Some(user) = config.options.as_object() {
        for (key, value) in user {
            overrides.insert(key.clone(), value.clone());
        }
    }

    merge_options(&config.theme().options(), &Value::Object(overrides))
}

/// Id-matched series reconciliation.
///
/// Specs with an id matching a previously tracked entry reuse the engine
/// handle (options and data re-applied in place); everything else is created
/// fresh. Unmatched leftovers are destroyed only after the whole matching
/// pass, so an id can never match an already-removed entry.
fn reconcile_series<E: ChartEngine>(
    engine: &mut E,
    tracked: &mut Vec<TrackedSeries>,
    legend: &Rc<RefCell<LegendState>>,
    config: &ChartConfig,
) -> AdapterResult<()> {
    let mut remaining = std::mem::take(tracked);
    let mut next_tracked = Vec::new();
    let mut created = 0usize;
    let mut updated = 0usize;

    for kind in SeriesKind::ALL {
        for spec in config.series(kind) {
            let matched = spec.id.as_deref().and_then(|id| {
                remaining
                    .iter()
                    .position(|entry| entry.id.as_deref() == Some(id))
            });
            match matched {
                Some(index) => {
                    let entry = remaining.remove(index);
                    engine.apply_series_options(entry.handle, &spec.options)?;
                    engine.set_series_data(entry.handle, &spec.data)?;
                    next_tracked.push(entry);
                    updated += 1;
                }
                None => {
                    next_tracked.push(create_series(engine, legend, kind, spec)?);
                    created += 1;
                }
            }
        }
    }

    let removed = remaining.len();
    for stale in remaining {
        engine.remove_series(stale.handle)?;
        if let Some(title) = &stale.legend_title {
            legend.borrow_mut().remove_by_title(title);
        }
    }

    *tracked = next_tracked;
    debug!(created, updated, removed, "reconciled series");
    Ok(())
}

fn create_series<E: ChartEngine>(
    engine: &mut E,
    legend: &Rc<RefCell<LegendState>>,
    kind: SeriesKind,
    spec: &SeriesSpec,
) -> AdapterResult<TrackedSeries> {
    let handle = engine.add_series(kind, &spec.options)?;
    engine.set_series_data(handle, &spec.data)?;
    if !spec.markers.is_empty() {
        engine.set_series_markers(handle, &spec.markers)?;
    }
    for line in &spec.price_lines {
        engine.create_price_line(handle, line)?;
    }
    if let Some(title) = &spec.legend {
        legend
            .borrow_mut()
            .register(handle, spec.legend_color(), title.clone());
    }
    Ok(TrackedSeries {
        id: spec.id.clone(),
        handle,
        legend_title: spec.legend.clone(),
    })
}

fn subscribe_all<E: ChartEngine>(
    engine: &mut E,
    subscriptions: &mut ActiveSubscriptions,
    config: &ChartConfig,
    legend: &Rc<RefCell<LegendState>>,
) {
    if let Some(handler) = &config.on_click {
        engine.subscribe_click(handler.clone());
        subscriptions.click = Some(handler.clone());
    }
    if let Some(handler) = &config.on_crosshair_move {
        engine.subscribe_crosshair_move(handler.clone());
        subscriptions.crosshair = Some(handler.clone());
    }
    if let Some(handler) = &config.on_time_range_move {
        engine.subscribe_time_range_change(handler.clone());
        subscriptions.time_range = Some(handler.clone());
    }

    // Internal legend refresh rides crosshair-move regardless of whether the
    // host subscribed its own handler.
    let legend = Rc::clone(legend);
    let legend_handler = Callback::new(move |event: &PointerEvent| {
        legend.borrow_mut().on_crosshair_move(event);
    });
    engine.subscribe_crosshair_move(legend_handler.clone());
    subscriptions.legend = Some(legend_handler);
}

fn unsubscribe_all<E: ChartEngine>(engine: &mut E, subscriptions: &mut ActiveSubscriptions) {
    if let Some(handler) = subscriptions.click.take() {
        engine.unsubscribe_click(&handler);
    }
    if let Some(handler) = subscriptions.crosshair.take() {
        engine.unsubscribe_crosshair_move(&handler);
    }
    if let Some(handler) = subscriptions.time_range.take() {
        engine.unsubscribe_time_range_change(&handler);
    }
    if let Some(handler) = subscriptions.legend.take() {
        engine.unsubscribe_crosshair_move(&handler);
    }
}

fn resize_engine<E: ChartEngine, S: DrawingSurface>(
    engine: &mut E,
    surface: &S,
    config: &ChartConfig,
) -> AdapterResult<()> {
    let width = if config.auto_width {
        surface.parent_width()
    } else {
        None
    };
    let fixed_height = config.height.unwrap_or(DEFAULT_HEIGHT);
    let height = if config.auto_height {
        surface.parent_height().unwrap_or(fixed_height)
    } else {
        fixed_height
    };
    trace!(?width, height, "resizing chart");
    engine.resize(width, Some(height))
}

fn apply_visible_range<E: ChartEngine>(engine: &mut E, config: &ChartConfig) -> AdapterResult<()> {
    if let Some(range) = config.visible_range() {
        trace!(from = range.from, to = range.to, "applying visible range");
        engine.set_visible_range(range)?;
    }
    Ok(())
}
