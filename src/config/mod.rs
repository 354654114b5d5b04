//! Declarative configuration consumed by the adapter.

pub mod markers;
pub mod options;
pub mod series;
pub mod theme;

pub use markers::{MarkerPosition, MarkerShape, PriceLine, SeriesMarker};
pub use options::merge_options;
pub use series::{DataPoint, OhlcBar, SeriesData, SeriesKind, SeriesSpec};
pub use theme::ThemePreset;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::events::{Callback, PointerEvent, VisibleRange};

/// Fixed height applied when neither `height` nor `auto_height` is set.
pub const DEFAULT_HEIGHT: u32 = 500;

/// Full declarative chart configuration.
///
/// The host rebuilds this on every render pass; the adapter diffs consecutive
/// configurations structurally, so equal content means no engine work
/// regardless of allocation identity. Callbacks are the one exception: they
/// compare by pointer identity and are skipped during serialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub auto_width: bool,
    #[serde(default)]
    pub auto_height: bool,
    #[serde(default)]
    pub dark_theme: bool,
    /// Engine options override, deep-merged over the theme preset.
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub candlestick_series: Vec<SeriesSpec>,
    #[serde(default)]
    pub line_series: Vec<SeriesSpec>,
    #[serde(default)]
    pub area_series: Vec<SeriesSpec>,
    #[serde(default)]
    pub bar_series: Vec<SeriesSpec>,
    #[serde(default)]
    pub histogram_series: Vec<SeriesSpec>,
    /// Visible-range bounds, unix seconds. Applied only when both are set.
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    /// Static label shown as the first legend row.
    #[serde(default)]
    pub legend: Option<String>,
    #[serde(skip)]
    pub on_click: Option<Callback<PointerEvent>>,
    #[serde(skip)]
    pub on_crosshair_move: Option<Callback<PointerEvent>>,
    #[serde(skip)]
    pub on_time_range_move: Option<Callback<VisibleRange>>,
}

impl ChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn with_auto_width(mut self) -> Self {
        self.auto_width = true;
        self
    }

    #[must_use]
    pub fn with_auto_height(mut self) -> Self {
        self.auto_height = true;
        self
    }

    #[must_use]
    pub fn with_dark_theme(mut self, dark_theme: bool) -> Self {
        self.dark_theme = dark_theme;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_series(mut self, kind: SeriesKind, specs: Vec<SeriesSpec>) -> Self {
        *self.series_mut(kind) = specs;
        self
    }

    #[must_use]
    pub fn with_visible_range(mut self, from: f64, to: f64) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, label: impl Into<String>) -> Self {
        self.legend = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_on_click(mut self, handler: Callback<PointerEvent>) -> Self {
        self.on_click = Some(handler);
        self
    }

    #[must_use]
    pub fn with_on_crosshair_move(mut self, handler: Callback<PointerEvent>) -> Self {
        self.on_crosshair_move = Some(handler);
        self
    }

    #[must_use]
    pub fn with_on_time_range_move(mut self, handler: Callback<VisibleRange>) -> Self {
        self.on_time_range_move = Some(handler);
        self
    }

    #[must_use]
    pub fn theme(&self) -> ThemePreset {
        ThemePreset::from_flag(self.dark_theme)
    }

    #[must_use]
    pub fn series(&self, kind: SeriesKind) -> &[SeriesSpec] {
        match kind {
            SeriesKind::Candlestick => &self.candlestick_series,
            SeriesKind::Line => &self.line_series,
            SeriesKind::Area => &self.area_series,
            SeriesKind::Bar => &self.bar_series,
            SeriesKind::Histogram => &self.histogram_series,
        }
    }

    fn series_mut(&mut self, kind: SeriesKind) -> &mut Vec<SeriesSpec> {
        match kind {
            SeriesKind::Candlestick => &mut self.candlestick_series,
            SeriesKind::Line => &mut self.line_series,
            SeriesKind::Area => &mut self.area_series,
            SeriesKind::Bar => &mut self.bar_series,
            SeriesKind::Histogram => &mut self.histogram_series,
        }
    }

    /// Visible range when both bounds are configured.
    #[must_use]
    pub fn visible_range(&self) -> Option<VisibleRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some(VisibleRange::new(from, to)),
            _ => None,
        }
    }

    /// True when the engine event handler 3-tuple differs from `other`.
    ///
    /// Handlers compare by pointer identity, matching how hosts are expected
    /// to thread stable callbacks through successive configurations.
    #[must_use]
    pub fn events_differ(&self, other: &Self) -> bool {
        self.on_click != other.on_click
            || self.on_crosshair_move != other.on_crosshair_move
            || self.on_time_range_move != other.on_time_range_move
    }

    /// True when any input of the visual synchronization gate differs.
    ///
    /// The gate is deliberately coarse: a change to any one series kind
    /// re-synchronizes every kind.
    #[must_use]
    pub fn visuals_differ(&self, other: &Self) -> bool {
        self.options != other.options
            || self.dark_theme != other.dark_theme
            || SeriesKind::ALL
                .iter()
                .any(|&kind| self.series(kind) != other.series(kind))
    }
}
