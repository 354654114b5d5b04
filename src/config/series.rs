use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AdapterError, AdapterResult};

use super::{PriceLine, SeriesMarker};

/// Supported engine series categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesKind {
    Candlestick,
    Line,
    Area,
    Bar,
    Histogram,
}

impl SeriesKind {
    /// Fixed reconciliation order; series are processed kind by kind in this
    /// sequence, then in array order within each kind.
    pub const ALL: [SeriesKind; 5] = [
        SeriesKind::Candlestick,
        SeriesKind::Line,
        SeriesKind::Area,
        SeriesKind::Bar,
        SeriesKind::Histogram,
    ];
}

fn decimal_to_f64(value: Decimal, field_name: &str) -> AdapterResult<f64> {
    value.to_f64().ok_or_else(|| {
        AdapterError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Single sample for line, area, and histogram series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub time: f64,
    pub value: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    pub fn from_decimal_time(time: DateTime<Utc>, value: Decimal) -> AdapterResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(time),
            value: decimal_to_f64(value, "value")?,
        })
    }
}

/// Single sample for candlestick and bar series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub time: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcBar {
    #[must_use]
    pub fn new(time: f64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
        }
    }

    pub fn from_decimal_time(
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> AdapterResult<Self> {
        Ok(Self {
            time: datetime_to_unix_seconds(time),
            open: decimal_to_f64(open, "open")?,
            high: decimal_to_f64(high, "high")?,
            low: decimal_to_f64(low, "low")?,
            close: decimal_to_f64(close, "close")?,
        })
    }
}

/// Series payload handed to the engine on every synchronization.
///
/// The adapter never inspects or validates samples; malformed data fails
/// inside the engine with whatever signal the engine raises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesData {
    Points(Vec<DataPoint>),
    Bars(Vec<OhlcBar>),
}

impl SeriesData {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Points(points) => points.len(),
            SeriesData::Bars(bars) => bars.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SeriesData {
    fn default() -> Self {
        SeriesData::Points(Vec::new())
    }
}

/// Declarative description of one engine series.
///
/// Specs carrying an `id` preserve engine-side identity across
/// synchronizations; specs without one are treated as disposable and are
/// recreated on every full synchronization pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesSpec {
    #[serde(default)]
    pub id: Option<String>,
    /// Engine series options, an open camelCase object in the engine's own
    /// vocabulary. Passed through verbatim.
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub data: SeriesData,
    #[serde(default)]
    pub markers: Vec<SeriesMarker>,
    #[serde(default)]
    pub price_lines: Vec<PriceLine>,
    /// Legend row title; registering one entry per titled series.
    #[serde(default)]
    pub legend: Option<String>,
}

impl SeriesSpec {
    #[must_use]
    pub fn new(data: SeriesData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: Vec<SeriesMarker>) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn with_price_lines(mut self, price_lines: Vec<PriceLine>) -> Self {
        self.price_lines = price_lines;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, title: impl Into<String>) -> Self {
        self.legend = Some(title.into());
        self
    }

    /// Legend color as declared in the series options, when present.
    #[must_use]
    pub fn legend_color(&self) -> Option<String> {
        self.options
            .get("color")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}
