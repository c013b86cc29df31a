use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{VizError, VizResult};

const DEFAULT_HEIGHT_PX: f64 = 280.0;
const OVER_CHART_DESIGN_HEIGHT: f64 = 450.0;
const OVER_CHART_DESIGN_WIDTH: f64 = 720.0;
const PARTNERSHIP_DESIGN_HEIGHT: f64 = 350.0;
const PARTNERSHIP_DESIGN_WIDTH: f64 = 560.0;

/// Geometry shared by the inning charts.
///
/// Charts are drawn in design units and scaled by `height_px / design_height`,
/// so one layout renders identically at any pixel height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    #[serde(default = "default_height_px")]
    pub height_px: f64,
    #[serde(default = "default_design_height")]
    pub design_height: f64,
    #[serde(default = "default_design_width")]
    pub design_width: f64,
    #[serde(default = "default_over_count")]
    pub over_count: u32,
    /// Opacity for out-of-range or non-hovered elements.
    #[serde(default = "default_dimmed_opacity")]
    pub dimmed_opacity: f64,
    /// Opacity for timeline series outside the range or the hovered team.
    #[serde(default = "default_faded_opacity")]
    pub faded_opacity: f64,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self::over_chart()
    }
}

impl ChartLayout {
    /// Layout of the skyline, over-summary, and timeline charts.
    #[must_use]
    pub fn over_chart() -> Self {
        Self {
            height_px: default_height_px(),
            design_height: default_design_height(),
            design_width: default_design_width(),
            over_count: default_over_count(),
            dimmed_opacity: default_dimmed_opacity(),
            faded_opacity: default_faded_opacity(),
            font_size_px: default_font_size_px(),
        }
    }

    /// Layout of the partnership matrix and bars.
    #[must_use]
    pub fn partnership_chart() -> Self {
        Self {
            design_height: PARTNERSHIP_DESIGN_HEIGHT,
            design_width: PARTNERSHIP_DESIGN_WIDTH,
            ..Self::over_chart()
        }
    }

    #[must_use]
    pub fn with_height(mut self, height_px: f64) -> Self {
        self.height_px = height_px;
        self
    }

    #[must_use]
    pub fn with_dimmed_opacity(mut self, opacity: f64) -> Self {
        self.dimmed_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_faded_opacity(mut self, opacity: f64) -> Self {
        self.faded_opacity = opacity;
        self
    }

    /// Converts design units to pixels.
    #[must_use]
    pub fn units(self, design: f64) -> f64 {
        design * self.height_px / self.design_height
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        self.units(self.design_width)
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        Viewport::new(self.width_px(), self.height_px)
    }

    pub fn validate(self) -> VizResult<()> {
        for (name, value) in [
            ("height_px", self.height_px),
            ("design_height", self.design_height),
            ("design_width", self.design_width),
            ("font_size_px", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(VizError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        if self.over_count == 0 {
            return Err(VizError::InvalidData(
                "layout `over_count` must be >= 1".to_owned(),
            ));
        }
        for (name, value) in [
            ("dimmed_opacity", self.dimmed_opacity),
            ("faded_opacity", self.faded_opacity),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidData(format!(
                    "layout `{name}` must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    pub fn to_json_pretty(self) -> VizResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize layout: {e}")))
    }

    /// Parses and validates a layout; omitted fields take over-chart defaults.
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        let layout: Self = serde_json::from_str(input)
            .map_err(|e| VizError::InvalidData(format!("failed to parse layout: {e}")))?;
        layout.validate()?;
        Ok(layout)
    }
}

fn default_height_px() -> f64 {
    DEFAULT_HEIGHT_PX
}

fn default_design_height() -> f64 {
    OVER_CHART_DESIGN_HEIGHT
}

fn default_design_width() -> f64 {
    OVER_CHART_DESIGN_WIDTH
}

fn default_over_count() -> u32 {
    50
}

fn default_dimmed_opacity() -> f64 {
    0.2
}

fn default_faded_opacity() -> f64 {
    0.1
}

fn default_font_size_px() -> f64 {
    12.0
}
