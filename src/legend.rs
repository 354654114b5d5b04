//! Legend bookkeeping and abstract row rendering.
//!
//! The adapter never touches a rendering surface directly; it maintains a
//! list of [`LegendRow`]s and the host paints them however it likes.

use crate::engine::SeriesId;
use crate::events::{PointerEvent, SeriesPrice};

/// Fallback row color, also used for rising OHLC rows.
pub const LEGEND_GREEN: &str = "rgba(0, 150, 136, 0.8)";
/// Row color for falling OHLC rows.
pub const LEGEND_RED: &str = "rgba(255, 82, 82, 0.8)";

/// Registration linking a titled series to its legend presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub series: SeriesId,
    pub color: Option<String>,
    pub title: String,
}

/// One paintable legend row. `color` is `None` for the static header row,
/// where the host applies its theme text color instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub text: String,
    pub color: Option<String>,
}

/// Mutable legend state shared between the adapter and its internal
/// crosshair-move handler.
#[derive(Debug, Default)]
pub(crate) struct LegendState {
    header: Option<String>,
    entries: Vec<LegendEntry>,
    rows: Vec<LegendRow>,
}

impl LegendState {
    /// Full-synchronization reset: rows collapse to the static header (when
    /// configured); entry registrations persist with their series.
    pub(crate) fn reset(&mut self, header: Option<String>) {
        self.header = header;
        self.rows.clear();
        if let Some(label) = &self.header {
            self.rows.push(LegendRow {
                text: label.clone(),
                color: None,
            });
        }
    }

    pub(crate) fn register(&mut self, series: SeriesId, color: Option<String>, title: String) {
        self.entries.push(LegendEntry {
            series,
            color,
            title,
        });
    }

    /// Removes the first entry with a matching title.
    ///
    /// Title-based matching can delete the wrong entry when two series share
    /// a legend title; this mirrors the historical behavior and is pinned by
    /// tests rather than silently fixed.
    pub(crate) fn remove_by_title(&mut self, title: &str) {
        if let Some(index) = self.entries.iter().position(|entry| entry.title == title) {
            self.entries.remove(index);
        }
    }

    /// Rebuilds rows for the cursor position carried by a crosshair event.
    ///
    /// Events without a timestamp leave the current rows untouched; the
    /// previous rendering stays up while the cursor hovers outside the data.
    pub(crate) fn on_crosshair_move(&mut self, event: &PointerEvent) {
        if event.time.is_none() || self.entries.is_empty() {
            return;
        }
        self.rows.clear();
        for entry in &self.entries {
            if let Some(price) = event.series_prices.get(&entry.series) {
                self.rows.push(price_row(entry, *price));
            }
        }
    }

    pub(crate) fn rows(&self) -> &[LegendRow] {
        &self.rows
    }

    pub(crate) fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub(crate) fn clear(&mut self) {
        self.header = None;
        self.entries.clear();
        self.rows.clear();
    }
}

fn price_row(entry: &LegendEntry, price: SeriesPrice) -> LegendRow {
    match price {
        SeriesPrice::Scalar(value) => LegendRow {
            text: format!("{} {}", entry.title, value),
            color: Some(
                entry
                    .color
                    .clone()
                    .unwrap_or_else(|| LEGEND_GREEN.to_owned()),
            ),
        },
        SeriesPrice::Ohlc {
            open,
            high,
            low,
            close,
        } => {
            let color = if close >= open { LEGEND_GREEN } else { LEGEND_RED };
            LegendRow {
                text: format!("{} O: {open}, H: {high}, L: {low}, C: {close}", entry.title),
                color: Some(color.to_owned()),
            }
        }
    }
}
