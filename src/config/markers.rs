use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerPosition {
    AboveBar,
    BelowBar,
    InBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Circle,
    Square,
    ArrowUp,
    ArrowDown,
}

/// Annotation marker attached to a series at a given time slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMarker {
    pub time: f64,
    pub position: MarkerPosition,
    pub shape: MarkerShape,
    pub color: Option<String>,
    pub text: Option<String>,
}

impl SeriesMarker {
    #[must_use]
    pub fn new(time: f64, position: MarkerPosition, shape: MarkerShape) -> Self {
        Self {
            time,
            position,
            shape,
            color: None,
            text: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Horizontal line pinned to a price level on one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    pub price: f64,
    pub color: Option<String>,
    pub line_width: Option<f64>,
    pub title: Option<String>,
}

impl PriceLine {
    #[must_use]
    pub fn new(price: f64) -> Self {
        Self {
            price,
            color: None,
            line_width: None,
            title: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = Some(line_width);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
