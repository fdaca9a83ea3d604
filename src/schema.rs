use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub canvas: Canvas,
    pub chart: Chart,
}

impl Manifest {
    pub fn validate(&self) -> Result<()> {
        self.canvas.validate()?;
        self.chart.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!(
                "canvas must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        Ok(())
    }
}

/// One chart: styling parameters plus the data series. The series is either
/// a raw `values` list (already normalized) or a `contributions` calendar of
/// per-day counts, never both.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chart {
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub style: Style,
    #[serde(default = "default_color")]
    pub color: ColorRgba,
    #[serde(default = "default_row_count")]
    pub row_count: u32,
    #[serde(default)]
    pub row_start: u32,
    #[serde(default = "default_pulse_padding")]
    pub pulse_padding: f32,
    #[serde(default)]
    pub values: Option<Vec<f32>>,
    #[serde(default)]
    pub contributions: Option<BTreeMap<NaiveDate, u64>>,
}

impl Chart {
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;
        self.color.validate("chart.color")?;

        if self.row_count == 0 {
            bail!("chart.row_count must be at least 1");
        }
        if self.row_start >= self.row_count {
            bail!(
                "chart.row_start ({}) must be less than chart.row_count ({})",
                self.row_start,
                self.row_count
            );
        }
        if !self.pulse_padding.is_finite() || self.pulse_padding < 0.0 {
            bail!(
                "chart.pulse_padding must be finite and >= 0, got {}",
                self.pulse_padding
            );
        }

        match (&self.values, &self.contributions) {
            (Some(values), None) => {
                for (index, value) in values.iter().enumerate() {
                    if !value.is_finite() || *value < 0.0 || *value > 1.0 {
                        bail!(
                            "chart.values[{index}] must be a normalized value in [0, 1], got {value}"
                        );
                    }
                }
            }
            (None, Some(contributions)) => {
                if contributions.is_empty() {
                    bail!("chart.contributions must name at least one date");
                }
                if self.row_count != WEEK_ROW_COUNT {
                    bail!(
                        "chart.contributions implies a weekly layout; row_count must be {WEEK_ROW_COUNT}, got {}",
                        self.row_count
                    );
                }
                if self.row_start != 0 {
                    bail!("chart.row_start is derived from the earliest contribution date; do not set it alongside contributions");
                }
            }
            (Some(_), Some(_)) => {
                bail!("chart cannot set both values and contributions")
            }
            (None, None) => bail!("chart must set either values or contributions"),
        }

        Ok(())
    }
}

pub const WEEK_ROW_COUNT: u32 = 7;

fn default_color() -> ColorRgba {
    ColorRgba {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    }
}

fn default_row_count() -> u32 {
    WEEK_ROW_COUNT
}

fn default_pulse_padding() -> f32 {
    4.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    #[default]
    Square,
    Squircle,
}

/// How a normalized value maps onto a pulse's opacity and size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum Style {
    /// Value drives opacity between `min` and `max`; pulses fill their cell.
    Alpha {
        #[serde(default)]
        min: f32,
        #[serde(default = "default_alpha_max")]
        max: f32,
    },
    /// Value drives size; pulses are fully opaque. `overshoot` lets a pulse
    /// grow past its cell.
    Size {
        #[serde(default = "default_overshoot")]
        overshoot: f32,
    },
    /// Value drives both, with independent sub-configurations.
    AlphaSize {
        #[serde(default)]
        alpha: AlphaRamp,
        #[serde(default)]
        size: SizeRamp,
    },
}

impl Default for Style {
    fn default() -> Self {
        Self::Alpha { min: 0.0, max: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlphaRamp {
    #[serde(default)]
    pub min: f32,
    #[serde(default = "default_alpha_max")]
    pub max: f32,
}

impl Default for AlphaRamp {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRamp {
    #[serde(default = "default_overshoot")]
    pub overshoot: f32,
}

impl Default for SizeRamp {
    fn default() -> Self {
        Self { overshoot: 1.0 }
    }
}

fn default_alpha_max() -> f32 {
    1.0
}

fn default_overshoot() -> f32 {
    1.0
}

/// A value resolved against a style: the opacity to draw with and the factor
/// to apply to the cell side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPulse {
    pub alpha: f32,
    pub size_scale: f32,
}

impl Style {
    pub fn resolve(&self, value: f32) -> ResolvedPulse {
        match self {
            Style::Alpha { min, max } => ResolvedPulse {
                alpha: value * (max - min) + min,
                size_scale: 1.0,
            },
            Style::Size { overshoot } => ResolvedPulse {
                alpha: 1.0,
                size_scale: value * overshoot,
            },
            Style::AlphaSize { alpha, size } => ResolvedPulse {
                alpha: value * (alpha.max - alpha.min) + alpha.min,
                size_scale: value * size.overshoot,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Style::Alpha { min, max } => validate_alpha_ramp(*min, *max),
            Style::Size { overshoot } => validate_overshoot(*overshoot),
            Style::AlphaSize { alpha, size } => {
                validate_alpha_ramp(alpha.min, alpha.max)?;
                validate_overshoot(size.overshoot)
            }
        }
    }
}

fn validate_alpha_ramp(min: f32, max: f32) -> Result<()> {
    for (label, value) in [("min", min), ("max", max)] {
        if !value.is_finite() || value < 0.0 || value > 1.0 {
            bail!("style alpha {label} must be in [0, 1], got {value}");
        }
    }
    if min > max {
        bail!("style alpha min ({min}) must not exceed max ({max})");
    }
    Ok(())
}

fn validate_overshoot(overshoot: f32) -> Result<()> {
    if !overshoot.is_finite() || overshoot <= 0.0 {
        bail!("style size overshoot must be > 0, got {overshoot}");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha_max")]
    pub a: f32,
}

impl ColorRgba {
    pub fn as_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn validate(&self, label: &str) -> Result<()> {
        for (channel, value) in [("r", self.r), ("g", self.g), ("b", self.b), ("a", self.a)] {
            if !value.is_finite() || value < 0.0 || value > 1.0 {
                bail!("{label}.{channel} must be in [0, 1], got {value}");
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
