//! Event payloads and handler types exchanged with the wrapped engine.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::SeriesId;

/// Shared handler invoked by the engine on event delivery.
///
/// Handlers compare by pointer identity: two `Callback`s are equal only when
/// they wrap the same allocation. Subscription change detection relies on
/// this, so hosts should create a handler once and clone it into each
/// configuration rather than rebuilding the closure every pass.
pub struct Callback<T>(Rc<dyn Fn(&T)>);

impl<T> Callback<T> {
    pub fn new(handler: impl Fn(&T) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, event: &T) {
        (self.0)(event);
    }
}

impl<T> Clone for Callback<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Callback<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
}

impl SurfacePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Price reported for one series at the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SeriesPrice {
    Scalar(f64),
    Ohlc {
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    },
}

/// Payload delivered for click and crosshair-move events.
///
/// `time` is absent when the cursor leaves the data area or hovers a slot
/// with no associated sample.
#[derive(Debug, Clone, Default)]
pub struct PointerEvent {
    pub time: Option<f64>,
    pub point: Option<SurfacePoint>,
    pub series_prices: IndexMap<SeriesId, SeriesPrice>,
}

impl PointerEvent {
    #[must_use]
    pub fn at_time(time: f64) -> Self {
        Self {
            time: Some(time),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_point(mut self, point: SurfacePoint) -> Self {
        self.point = Some(point);
        self
    }

    #[must_use]
    pub fn with_price(mut self, series: SeriesId, price: SeriesPrice) -> Self {
        self.series_prices.insert(series, price);
        self
    }
}

/// Logical time-axis window, in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleRange {
    pub from: f64,
    pub to: f64,
}

impl VisibleRange {
    #[must_use]
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }
}
