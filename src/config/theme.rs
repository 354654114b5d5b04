use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Built-in engine option presets.
///
/// Presets carry only layout and grid colors; everything else stays at the
/// engine's defaults until overridden through [`ChartConfig::options`].
///
/// [`ChartConfig::options`]: super::ChartConfig::options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreset {
    Dark,
    Light,
}

impl ThemePreset {
    #[must_use]
    pub fn from_flag(dark_theme: bool) -> Self {
        if dark_theme {
            ThemePreset::Dark
        } else {
            ThemePreset::Light
        }
    }

    /// Engine options object for this preset.
    #[must_use]
    pub fn options(self) -> Value {
        match self {
            ThemePreset::Dark => json!({
                "layout": {
                    "backgroundColor": "#131722",
                    "lineColor": "#2B2B43",
                    "textColor": "#D9D9D9",
                },
                "grid": {
                    "vertLines": { "color": "#363c4e" },
                    "horzLines": { "color": "#363c4e" },
                },
            }),
            ThemePreset::Light => json!({
                "layout": {
                    "backgroundColor": "#FFFFFF",
                    "lineColor": "#2B2B43",
                    "textColor": "#191919",
                },
                "grid": {
                    "vertLines": { "color": "#e1ecf2" },
                    "horzLines": { "color": "#e1ecf2" },
                },
            }),
        }
    }

    /// Text color the host should use for legend rows it paints.
    #[must_use]
    pub fn text_color(self) -> &'static str {
        match self {
            ThemePreset::Dark => "#D9D9D9",
            ThemePreset::Light => "#191919",
        }
    }
}
