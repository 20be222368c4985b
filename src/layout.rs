//! Layout calculator - pure functions from text metrics and canvas bounds
//! to pixel offsets.
//!
//! Nothing here is cached: font metrics change with the window insets, so
//! every offset is recomputed for every frame. The pixel biases depend on
//! the screen size and come from a [`LayoutTuning`].

use embedded_graphics::primitives::Rectangle;

use crate::config::{
    BADGE_GAP, BATTERY_HEIGHT_FACTOR, INFO_BAR_BIAS, INFO_BAR_ICON_MARGIN,
    PANEL_BADGE_GAP, PANEL_BATTERY_HEIGHT_FACTOR, PANEL_INFO_BAR_BIAS,
    PANEL_INFO_BAR_ICON_MARGIN, PANEL_TIME_BASELINE_BIAS, PANEL_WEATHER_ICON_DROP,
    TIME_BASELINE_BIAS, WEATHER_ICON_DROP,
};
use crate::paint::TextPaint;

/// Canvas rectangle, right/bottom exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) as f32 * 0.5
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) as f32 * 0.5
    }
}

impl From<Rectangle> for Bounds {
    fn from(rect: Rectangle) -> Self {
        Self::new(
            rect.top_left.x,
            rect.top_left.y,
            rect.top_left.x + rect.size.width as i32,
            rect.top_left.y + rect.size.height as i32,
        )
    }
}

/// Measured size of a string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    /// Ink height of the string's glyphs.
    pub height: f32,
}

/// Font metrics source, normally the canvas that will draw the text.
pub trait Measure {
    fn measure(&self, text: &str, paint: &TextPaint) -> TextExtent;
}

/// X offset that centres `text` horizontally in `bounds`.
pub fn horizontal_center<M: Measure + ?Sized>(
    metrics: &M,
    text: &str,
    paint: &TextPaint,
    bounds: Bounds,
) -> f32 {
    bounds.center_x() - metrics.measure(text, paint).width / 2.0
}

/// Pixel biases for one screen size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutTuning {
    /// Upward shift of the time baseline from the vertical centre.
    pub time_baseline_bias: f32,
    /// Gap below the time baseline before the info bar baseline.
    pub info_bar_bias: f32,
    /// Space around the weather icon; halved without a temperature.
    pub icon_margin: f32,
    /// How far the weather icon hangs below the info bar baseline.
    pub icon_drop: f32,
    pub badge_gap: f32,
    /// Battery baseline height above the bottom edge, in text heights.
    pub battery_height_factor: f32,
}

impl LayoutTuning {
    /// Full-size watch screens, roughly 400 px across.
    pub const WATCH: Self = Self {
        time_baseline_bias: TIME_BASELINE_BIAS,
        info_bar_bias: INFO_BAR_BIAS,
        icon_margin: INFO_BAR_ICON_MARGIN,
        icon_drop: WEATHER_ICON_DROP,
        badge_gap: BADGE_GAP,
        battery_height_factor: BATTERY_HEIGHT_FACTOR,
    };

    /// The 128x64 OLED with compact fonts.
    pub const PANEL_128X64: Self = Self {
        time_baseline_bias: PANEL_TIME_BASELINE_BIAS,
        info_bar_bias: PANEL_INFO_BAR_BIAS,
        icon_margin: PANEL_INFO_BAR_ICON_MARGIN,
        icon_drop: PANEL_WEATHER_ICON_DROP,
        badge_gap: PANEL_BADGE_GAP,
        battery_height_factor: PANEL_BATTERY_HEIGHT_FACTOR,
    };

    /// Baseline of the time text, nudged up from the vertical centre.
    pub fn time_baseline<M: Measure + ?Sized>(
        &self,
        metrics: &M,
        text: &str,
        paint: &TextPaint,
        bounds: Bounds,
    ) -> f32 {
        bounds.center_y() + metrics.measure(text, paint).height / 2.0 - self.time_baseline_bias
    }

    /// Distance from the time baseline down to the info bar baseline.
    pub fn info_bar_offset<M: Measure + ?Sized>(
        &self,
        metrics: &M,
        text: &str,
        paint: &TextPaint,
    ) -> f32 {
        metrics.measure(text, paint).height + self.info_bar_bias
    }

    /// Baseline of the battery text near the bottom edge.
    pub fn battery_baseline<M: Measure + ?Sized>(
        &self,
        metrics: &M,
        text: &str,
        paint: &TextPaint,
        bounds: Bounds,
    ) -> f32 {
        bounds.bottom as f32 - metrics.measure(text, paint).height * self.battery_height_factor
    }

    /// Top edge of the weather icon so it hangs slightly below the info bar baseline.
    pub fn weather_icon_top(&self, info_baseline: f32, icon_height: f32) -> f32 {
        info_baseline - icon_height + self.icon_drop
    }

    /// Top-left corner of the badge, centred above the time text.
    pub fn badge_origin(
        &self,
        bounds: Bounds,
        time_baseline: f32,
        width: f32,
        height: f32,
    ) -> (f32, f32) {
        let x = bounds.center_x() - width / 2.0;
        let y = time_baseline - time_baseline / 2.0 - height - self.badge_gap;
        (x, y)
    }
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self::WATCH
    }
}

/// Horizontal placement of the info bar segments.
///
/// Segments run left to right as date, icon, temperature. An absent segment
/// takes no space; the icon margin is halved when only the icon is shown
/// and dropped when neither icon nor temperature is shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InfoBarLayout {
    pub total_width: f32,
    pub date_x: f32,
    pub icon_x: Option<f32>,
    pub temperature_x: Option<f32>,
}

impl InfoBarLayout {
    pub fn compute(
        tuning: &LayoutTuning,
        center_x: f32,
        date_width: f32,
        icon_width: Option<f32>,
        temperature_width: Option<f32>,
    ) -> Self {
        let margin = match (icon_width, temperature_width) {
            (_, Some(_)) => tuning.icon_margin,
            (Some(_), None) => tuning.icon_margin / 2.0,
            (None, None) => 0.0,
        };
        let icon = icon_width.unwrap_or(0.0);
        let total_width = date_width + margin + icon + temperature_width.unwrap_or(0.0);
        let left = center_x - total_width / 2.0;

        Self {
            total_width,
            date_x: left,
            icon_x: icon_width.map(|_| left + date_width + tuning.icon_margin / 2.0),
            temperature_x: temperature_width.map(|_| left + date_width + margin + icon),
        }
    }

    pub fn left(&self) -> f32 {
        self.date_x
    }
}

/// Round half away from zero to a whole pixel.
pub fn round_px(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}
