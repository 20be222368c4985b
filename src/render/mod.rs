//! Frame renderer.
//!
//! [`render_frame`] draws one complete face from read-only snapshots. It
//! knows nothing about fonts or pixels: everything goes through the
//! [`Canvas`] trait, which also supplies the text metrics the layout
//! calculator needs.

pub mod graphics;


use crate::battery::BatteryLevel;
use crate::clock::Clock;
use crate::error::Result;
use crate::icons::{Badges, Icon};
use crate::layout::{horizontal_center, round_px, Bounds, InfoBarLayout, LayoutTuning, Measure};
use crate::mode::DisplayMode;
use crate::paint::TextPaint;
use crate::settings::Settings;

/// Drawing surface for one frame.
pub trait Canvas: Measure {
    /// Fill `bounds` with the background.
    fn clear(&mut self, bounds: Bounds);

    /// Draw `text` starting at `x` with its alphabetic baseline on `baseline`.
    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, paint: &TextPaint);

    /// Blit `icon` with its top-left corner at (`x`, `top`).
    fn draw_icon(&mut self, icon: &Icon, x: i32, top: i32);
}

/// Everything one frame is drawn from. Borrowed, so nothing can change mid-frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub mode: &'a DisplayMode,
    pub settings: &'a Settings,
    pub clock: &'a Clock,
    /// `None` until the first battery reading arrives.
    pub battery: Option<BatteryLevel>,
    /// Formatted temperature, if a report has one.
    pub temperature: Option<&'a str>,
    /// Resolved weather icon, if any.
    pub weather_icon: Option<&'a Icon>,
    pub badges: &'a Badges,
    pub layout: &'a LayoutTuning,
    pub bounds: Bounds,
}

/// Draw background, time, info bar, battery and badge, in that order.
pub fn render_frame<C: Canvas + ?Sized>(canvas: &mut C, frame: &Frame<'_>) -> Result<()> {
    let Frame {
        mode,
        settings,
        clock,
        layout,
        bounds,
        ..
    } = *frame;
    let paints = mode.paints();

    canvas.clear(bounds);

    let time = clock.time_text(settings.use_24_hour_time)?;
    let time_x = horizontal_center(&*canvas, &time, &paints.time, bounds);
    let time_y = layout.time_baseline(&*canvas, &time, &paints.time, bounds);
    canvas.draw_text(&time, round_px(time_x), round_px(time_y), &paints.time);

    if mode.info_bar_visible(settings) {
        draw_info_bar(canvas, frame, time_y)?;
    }

    if let Some(battery) = frame.battery.filter(|_| settings.show_battery) {
        let text = battery.text()?;
        let x = horizontal_center(&*canvas, &text, &paints.info, bounds);
        let y = layout.battery_baseline(&*canvas, &text, &paints.info, bounds);
        canvas.draw_text(&text, round_px(x), round_px(y), &paints.info);
    }

    let badge = frame.badges.for_mode(mode.is_ambient());
    let (x, y) = layout.badge_origin(bounds, time_y, badge.width() as f32, badge.height() as f32);
    canvas.draw_icon(badge, round_px(x), round_px(y));

    Ok(())
}

/// Date, then weather icon, then temperature, centred as one row under the time.
fn draw_info_bar<C: Canvas + ?Sized>(canvas: &mut C, frame: &Frame<'_>, time_y: f32) -> Result<()> {
    let settings = frame.settings;
    let layout = frame.layout;
    let paint = &frame.mode.paints().info;

    let date = frame.clock.date_text(settings.use_european_date_format)?;
    let baseline = time_y + layout.info_bar_offset(&*canvas, &date, paint);

    let icon = frame.weather_icon.filter(|_| settings.show_weather_icon);
    let temperature = frame.temperature.filter(|_| settings.show_temperature);

    let bar = InfoBarLayout::compute(
        layout,
        frame.bounds.center_x(),
        canvas.measure(&date, paint).width,
        icon.map(|icon| icon.width() as f32),
        temperature.map(|text| canvas.measure(text, paint).width),
    );

    let y = round_px(baseline);
    canvas.draw_text(&date, round_px(bar.date_x), y, paint);
    if let (Some(icon), Some(x)) = (icon, bar.icon_x) {
        let top = layout.weather_icon_top(baseline, icon.height() as f32);
        canvas.draw_icon(icon, round_px(x), round_px(top));
    }
    if let (Some(text), Some(x)) = (temperature, bar.temperature_x) {
        canvas.draw_text(text, round_px(x), y, paint);
    }
    Ok(())
}
