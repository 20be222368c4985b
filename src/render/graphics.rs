//! [`Canvas`] backend for monochrome embedded-graphics targets.
//!
//! Paints map onto ISO-8859-1 mono fonts so the degree sign renders.
//! A 1-bit panel has no grey and no anti-aliasing, so the ambient colour
//! and the anti-alias flag only matter on richer targets; stroke paints
//! are drawn as glyph outlines.

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::iso_8859_1::{
    FONT_10X20, FONT_6X10, FONT_7X13, FONT_9X15, FONT_9X18_BOLD,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;

use super::Canvas;
use crate::icons::Icon;
use crate::layout::{Bounds, Measure, TextExtent};
use crate::paint::{PaintStyle, TextPaint, TextRole, Typeface};

/// Font used for `paint`. Round screens get the larger sizes.
pub fn font_for(paint: &TextPaint) -> &'static MonoFont<'static> {
    match (paint.role, paint.typeface, paint.compact) {
        (TextRole::Time, Typeface::Thin, _) => &FONT_9X15,
        (TextRole::Time, Typeface::Regular, true) => &FONT_9X18_BOLD,
        (TextRole::Time, Typeface::Regular, false) => &FONT_10X20,
        (TextRole::Info, _, true) => &FONT_6X10,
        (TextRole::Info, _, false) => &FONT_7X13,
    }
}

/// Draws frames onto any `BinaryColor` draw target, e.g. the SSD1306 buffer.
pub struct GraphicsCanvas<'a, D> {
    target: &'a mut D,
}

impl<'a, D> GraphicsCanvas<'a, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self { target }
    }

    fn text(&mut self, text: &str, origin: Point, font: &MonoFont<'_>, color: BinaryColor) {
        let style = MonoTextStyle::new(font, color);
        let _ = Text::new(text, origin, style).draw(&mut *self.target);
    }
}

impl<D> Measure for GraphicsCanvas<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn measure(&self, text: &str, paint: &TextPaint) -> TextExtent {
        let font = font_for(paint);
        let chars = text.chars().count() as u32;
        let width = match chars {
            0 => 0,
            n => n * font.character_size.width + (n - 1) * font.character_spacing,
        };
        TextExtent {
            width: width as f32,
            height: font.baseline as f32,
        }
    }
}

impl<D> Canvas for GraphicsCanvas<'_, D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn clear(&mut self, bounds: Bounds) {
        let area = Rectangle::with_corners(
            Point::new(bounds.left, bounds.top),
            Point::new(bounds.right - 1, bounds.bottom - 1),
        );
        let _ = self.target.fill_solid(&area, BinaryColor::Off);
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, paint: &TextPaint) {
        let font = font_for(paint);
        let origin = Point::new(x, baseline);
        match paint.style {
            PaintStyle::Fill => self.text(text, origin, font, BinaryColor::On),
            PaintStyle::Stroke => {
                for offset in [Point::new(1, 0), Point::new(-1, 0), Point::new(0, 1), Point::new(0, -1)] {
                    self.text(text, origin + offset, font, BinaryColor::On);
                }
                self.text(text, origin, font, BinaryColor::Off);
            }
        }
    }

    fn draw_icon(&mut self, icon: &Icon, x: i32, top: i32) {
        let raw = ImageRaw::<BinaryColor>::new(icon.data(), icon.width());
        let _ = Image::new(&raw, Point::new(x, top)).draw(&mut *self.target);
    }
}
