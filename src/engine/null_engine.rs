use serde_json::Value;

use crate::config::{PriceLine, SeriesData, SeriesKind, SeriesMarker};
use crate::error::AdapterResult;
use crate::events::{Callback, PointerEvent, VisibleRange};

use super::{ChartEngine, SeriesId};

/// One recorded engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    AddSeries { series: SeriesId, kind: SeriesKind },
    RemoveSeries { series: SeriesId },
    ApplySeriesOptions { series: SeriesId },
    SetSeriesData { series: SeriesId, len: usize },
    SetSeriesMarkers { series: SeriesId, len: usize },
    CreatePriceLine { series: SeriesId },
    ApplyOptions,
    Resize { width: Option<u32>, height: Option<u32> },
    SetVisibleRange { range: VisibleRange },
}

/// No-op engine used by tests and headless adapter usage.
///
/// Every capability call is recorded in order, subscribed handlers are
/// retained so tests can emit synthetic events, and series handles are minted
/// from a monotonic counter.
#[derive(Debug, Default)]
pub struct NullEngine {
    pub calls: Vec<EngineCall>,
    pub live_series: Vec<SeriesId>,
    pub last_options: Option<Value>,
    pub click_handlers: Vec<Callback<PointerEvent>>,
    pub crosshair_handlers: Vec<Callback<PointerEvent>>,
    pub time_range_handlers: Vec<Callback<VisibleRange>>,
    pub click_unsubscribes: usize,
    pub crosshair_unsubscribes: usize,
    pub time_range_unsubscribes: usize,
    next_series: u64,
}

impl NullEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the call log, leaving subscription and series state intact.
    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }

    #[must_use]
    pub fn created_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, EngineCall::AddSeries { .. }))
            .count()
    }

    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, EngineCall::RemoveSeries { .. }))
            .count()
    }

    #[must_use]
    pub fn updated_in_place_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, EngineCall::ApplySeriesOptions { .. }))
            .count()
    }

    /// Delivers a click event to every subscribed click handler.
    pub fn emit_click(&self, event: &PointerEvent) {
        for handler in &self.click_handlers {
            handler.call(event);
        }
    }

    /// Delivers a crosshair-move event to every subscribed handler.
    pub fn emit_crosshair_move(&self, event: &PointerEvent) {
        for handler in &self.crosshair_handlers {
            handler.call(event);
        }
    }

    /// Delivers a visible-time-range change to every subscribed handler.
    pub fn emit_time_range_change(&self, range: &VisibleRange) {
        for handler in &self.time_range_handlers {
            handler.call(range);
        }
    }
}

fn remove_handler<T>(handlers: &mut Vec<Callback<T>>, handler: &Callback<T>) -> bool {
    match handlers.iter().position(|candidate| candidate == handler) {
        Some(index) => {
            handlers.remove(index);
            true
        }
        None => false,
    }
}

impl ChartEngine for NullEngine {
    fn add_series(&mut self, kind: SeriesKind, _options: &Value) -> AdapterResult<SeriesId> {
        let series = SeriesId(self.next_series);
        self.next_series += 1;
        self.live_series.push(series);
        self.calls.push(EngineCall::AddSeries { series, kind });
        Ok(series)
    }

    fn remove_series(&mut self, series: SeriesId) -> AdapterResult<()> {
        self.live_series.retain(|&live| live != series);
        self.calls.push(EngineCall::RemoveSeries { series });
        Ok(())
    }

    fn apply_series_options(&mut self, series: SeriesId, _options: &Value) -> AdapterResult<()> {
        self.calls.push(EngineCall::ApplySeriesOptions { series });
        Ok(())
    }

    fn set_series_data(&mut self, series: SeriesId, data: &SeriesData) -> AdapterResult<()> {
        self.calls.push(EngineCall::SetSeriesData {
            series,
            len: data.len(),
        });
        Ok(())
    }

    fn set_series_markers(
        &mut self,
        series: SeriesId,
        markers: &[SeriesMarker],
    ) -> AdapterResult<()> {
        self.calls.push(EngineCall::SetSeriesMarkers {
            series,
            len: markers.len(),
        });
        Ok(())
    }

    fn create_price_line(&mut self, series: SeriesId, _line: &PriceLine) -> AdapterResult<()> {
        self.calls.push(EngineCall::CreatePriceLine { series });
        Ok(())
    }

    fn apply_options(&mut self, options: &Value) -> AdapterResult<()> {
        self.last_options = Some(options.clone());
        self.calls.push(EngineCall::ApplyOptions);
        Ok(())
    }

    fn resize(&mut self, width: Option<u32>, height: Option<u32>) -> AdapterResult<()> {
        self.calls.push(EngineCall::Resize { width, height });
        Ok(())
    }

    fn set_visible_range(&mut self, range: VisibleRange) -> AdapterResult<()> {
        self.calls.push(EngineCall::SetVisibleRange { range });
        Ok(())
    }

    fn subscribe_click(&mut self, handler: Callback<PointerEvent>) {
        self.click_handlers.push(handler);
    }

    fn unsubscribe_click(&mut self, handler: &Callback<PointerEvent>) {
        if remove_handler(&mut self.click_handlers, handler) {
            self.click_unsubscribes += 1;
        }
    }

    fn subscribe_crosshair_move(&mut self, handler: Callback<PointerEvent>) {
        self.crosshair_handlers.push(handler);
    }

    fn unsubscribe_crosshair_move(&mut self, handler: &Callback<PointerEvent>) {
        if remove_handler(&mut self.crosshair_handlers, handler) {
            self.crosshair_unsubscribes += 1;
        }
    }

    fn subscribe_time_range_change(&mut self, handler: Callback<VisibleRange>) {
        self.time_range_handlers.push(handler);
    }

    fn unsubscribe_time_range_change(&mut self, handler: &Callback<VisibleRange>) {
        if remove_handler(&mut self.time_range_handlers, handler) {
            self.time_range_unsubscribes += 1;
        }
    }
}
