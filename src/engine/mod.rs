//! Capability surface consumed from the wrapped charting engine.

pub mod null_engine;

pub use null_engine::{EngineCall, NullEngine};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{PriceLine, SeriesData, SeriesKind, SeriesMarker};
use crate::error::AdapterResult;
use crate::events::{Callback, PointerEvent, VisibleRange};

/// Opaque handle to one engine-side series.
///
/// Minted by the engine on series creation; the adapter never fabricates or
/// reuses handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeriesId(pub u64);

/// Contract the adapter requires from a charting engine.
///
/// Modeled on the Lightweight Charts instance API. The engine owns all
/// rendering, scaling, and hit-testing; the adapter only issues these calls
/// and relies on the engine to raise its own failures.
pub trait ChartEngine {
    fn add_series(&mut self, kind: SeriesKind, options: &Value) -> AdapterResult<SeriesId>;

    fn remove_series(&mut self, series: SeriesId) -> AdapterResult<()>;

    fn apply_series_options(&mut self, series: SeriesId, options: &Value) -> AdapterResult<()>;

    fn set_series_data(&mut self, series: SeriesId, data: &SeriesData) -> AdapterResult<()>;

    fn set_series_markers(
        &mut self,
        series: SeriesId,
        markers: &[SeriesMarker],
    ) -> AdapterResult<()>;

    fn create_price_line(&mut self, series: SeriesId, line: &PriceLine) -> AdapterResult<()>;

    fn apply_options(&mut self, options: &Value) -> AdapterResult<()>;

    /// Resizes the drawing surface. `None` for a dimension means the engine
    /// keeps or computes its own value.
    fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> AdapterResult<()>;

    fn set_visible_range(&mut self, range: VisibleRange) -> AdapterResult<()>;

    fn subscribe_click(&mut self, handler: Callback<PointerEvent>);

    fn unsubscribe_click(&mut self, handler: &Callback<PointerEvent>);

    fn subscribe_crosshair_move(&mut self, handler: Callback<PointerEvent>);

    fn unsubscribe_crosshair_move(&mut self, handler: &Callback<PointerEvent>);

    fn subscribe_time_range_change(&mut self, handler: Callback<VisibleRange>);

    fn unsubscribe_time_range_change(&mut self, handler: &Callback<VisibleRange>);
}

/// Host surface the chart is mounted into.
///
/// Dimension getters return `None` while the surface is not mounted or not
/// measurable yet. Listener attach/detach must be idempotent; detaching a
/// never-attached listener is a no-op.
pub trait DrawingSurface {
    fn parent_width(&self) -> Option<u32>;

    fn parent_height(&self) -> Option<u32>;

    fn attach_resize_listener(&mut self);

    fn detach_resize_listener(&mut self);
}

/// In-memory surface for headless adapter usage and tests.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub parent_width: Option<u32>,
    pub parent_height: Option<u32>,
    pub resize_listener_attached: bool,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new(parent_width: u32, parent_height: u32) -> Self {
        Self {
            parent_width: Some(parent_width),
            parent_height: Some(parent_height),
            resize_listener_attached: false,
        }
    }

    /// Surface with no measurable parent, as before mounting completes.
    #[must_use]
    pub fn unmeasured() -> Self {
        Self::default()
    }
}

impl DrawingSurface for HeadlessSurface {
    fn parent_width(&self) -> Option<u32> {
        self.parent_width
    }

    fn parent_height(&self) -> Option<u32> {
        self.parent_height
    }

    fn attach_resize_listener(&mut self) {
        self.resize_listener_attached = true;
    }

    fn detach_resize_listener(&mut self) {
        self.resize_listener_attached = false;
    }
}
