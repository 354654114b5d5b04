//! chart-sync: declarative-to-imperative chart synchronization.
//!
//! This crate binds a declarative configuration (series, options, event
//! callbacks, visible range) to an imperative Lightweight Charts-style engine
//! consumed through the [`engine::ChartEngine`] trait. The adapter's whole
//! job is diffing and synchronization: deciding per update which series to
//! add, update in place, or remove, when to swap event subscriptions, and
//! when to resize or reset the visible range, without rebuilding engine
//! resources on trivial re-renders and without leaking subscriptions.

pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod legend;
pub mod telemetry;

pub use adapter::{ChartAdapter, TrackedSeries};
pub use config::{ChartConfig, SeriesKind, SeriesSpec};
pub use error::{AdapterError, AdapterResult};
