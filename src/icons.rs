//! 1-bit icon bitmaps: weather pictograms and the centre badge.
//!
//! Icons are rasterised on demand with embedded-graphics primitives into a
//! fixed buffer, so the weather snapshot can cache one without allocating.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};

use crate::config::{BADGE_AMBIENT_SIZE, BADGE_SIZE, MAX_ICON_SIZE, WEATHER_ICON_SIZE};

const MAX_STRIDE: usize = (MAX_ICON_SIZE as usize + 7) / 8;
const MAX_ICON_BYTES: usize = MAX_STRIDE * MAX_ICON_SIZE as usize;

/// Monochrome bitmap, row-major, MSB first, each row padded to a whole byte.
///
/// This is the layout `ImageRaw<BinaryColor>` expects, so a canvas can blit
/// [`Icon::data`] directly.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    width: u32,
    height: u32,
    data: [u8; MAX_ICON_BYTES],
}

impl Icon {
    /// Blank icon. Dimensions are capped at [`MAX_ICON_SIZE`].
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.min(MAX_ICON_SIZE),
            height: height.min(MAX_ICON_SIZE),
            data: [0; MAX_ICON_BYTES],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn stride(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// Packed rows, exactly `stride * height` bytes.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.stride() * self.height as usize]
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.stride() + x as usize / 8;
        self.data[index] & (0x80 >> (x % 8)) != 0
    }

    fn set_pixel(&mut self, point: Point, on: bool) {
        if point.x < 0 || point.y < 0 {
            return;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.stride() + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if on {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }
}

impl core::fmt::Debug for Icon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl OriginDimensions for Icon {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Icon {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color.is_on());
        }
        Ok(())
    }
}

/// Resolves a weather icon identifier to a bitmap.
pub trait IconSource {
    /// `None` when the identifier is unknown.
    fn render(&self, id: &str) -> Option<Icon>;
}

/// Built-in pictograms for the common weather icon identifiers.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinIcons;

impl IconSource for BuiltinIcons {
    fn render(&self, id: &str) -> Option<Icon> {
        let mut icon = Icon::new(WEATHER_ICON_SIZE, WEATHER_ICON_SIZE);
        match id {
            "clear-day" => sun(&mut icon, Point::new(8, 8), 8, true),
            "clear-night" => moon(&mut icon, Point::new(8, 8), 12),
            "cloudy" => cloud(&mut icon, Point::new(1, 4)),
            "partly-cloudy-day" => {
                sun(&mut icon, Point::new(10, 5), 7, false);
                cloud(&mut icon, Point::new(0, 6));
            }
            "partly-cloudy-night" => {
                moon(&mut icon, Point::new(10, 5), 8);
                cloud(&mut icon, Point::new(0, 6));
            }
            "rain" => {
                cloud(&mut icon, Point::new(1, 1));
                for x in [4, 8, 12] {
                    line(&mut icon, Point::new(x, 12), Point::new(x - 1, 15));
                }
            }
            "snow" => {
                cloud(&mut icon, Point::new(1, 1));
                for (x, y) in [(3, 12), (7, 13), (11, 12)] {
                    dot(&mut icon, Point::new(x, y));
                }
            }
            "sleet" => {
                cloud(&mut icon, Point::new(1, 1));
                line(&mut icon, Point::new(4, 12), Point::new(3, 15));
                dot(&mut icon, Point::new(7, 13));
                line(&mut icon, Point::new(12, 12), Point::new(11, 15));
            }
            "wind" => {
                line(&mut icon, Point::new(1, 4), Point::new(11, 4));
                line(&mut icon, Point::new(1, 8), Point::new(14, 8));
                line(&mut icon, Point::new(1, 12), Point::new(9, 12));
            }
            "fog" => {
                for (row, y) in [3, 6, 9, 12].into_iter().enumerate() {
                    let inset = if row % 2 == 0 { 1 } else { 3 };
                    line(&mut icon, Point::new(inset, y), Point::new(14 - inset + 1, y));
                }
            }
            _ => return None,
        }
        Some(icon)
    }
}

/// Badge bitmaps for both modes, rendered once at engine start.
#[derive(Clone, Debug)]
pub struct Badges {
    interactive: Icon,
    ambient: Icon,
}

impl Badges {
    pub fn new() -> Self {
        let mut interactive = Icon::new(BADGE_SIZE, BADGE_SIZE);
        let _ = Circle::new(Point::zero(), BADGE_SIZE)
            .into_styled(stroke())
            .draw(&mut interactive);
        let _ = Circle::with_center(Point::new(8, 8), 4)
            .into_styled(fill(BinaryColor::On))
            .draw(&mut interactive);

        // Outline only; lights fewer pixels on the always-on screen.
        let mut ambient = Icon::new(BADGE_AMBIENT_SIZE, BADGE_AMBIENT_SIZE);
        let _ = Circle::new(Point::zero(), BADGE_AMBIENT_SIZE)
            .into_styled(stroke())
            .draw(&mut ambient);

        Self {
            interactive,
            ambient,
        }
    }

    pub fn for_mode(&self, ambient: bool) -> &Icon {
        if ambient {
            &self.ambient
        } else {
            &self.interactive
        }
    }
}

impl Default for Badges {
    fn default() -> Self {
        Self::new()
    }
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

fn fill(color: BinaryColor) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(color)
}

fn line(icon: &mut Icon, from: Point, to: Point) {
    let _ = Line::new(from, to).into_styled(stroke()).draw(icon);
}

fn dot(icon: &mut Icon, at: Point) {
    let _ = Rectangle::new(at, Size::new(2, 2))
        .into_styled(fill(BinaryColor::On))
        .draw(icon);
}

fn sun(icon: &mut Icon, center: Point, diameter: u32, rays: bool) {
    let _ = Circle::with_center(center, diameter)
        .into_styled(stroke())
        .draw(icon);
    if rays {
        let reach = diameter as i32 / 2 + 3;
        let start = diameter as i32 / 2 + 1;
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            line(
                icon,
                center + Point::new(dx * start, dy * start),
                center + Point::new(dx * reach, dy * reach),
            );
        }
    }
}

fn moon(icon: &mut Icon, center: Point, diameter: u32) {
    let _ = Circle::with_center(center, diameter)
        .into_styled(fill(BinaryColor::On))
        .draw(icon);
    let shift = Point::new(diameter as i32 / 3, -(diameter as i32) / 4);
    let _ = Circle::with_center(center + shift, diameter)
        .into_styled(fill(BinaryColor::Off))
        .draw(icon);
}

/// Filled cloud, 15 x 9 px from `top_left`.
fn cloud(icon: &mut Icon, top_left: Point) {
    let style = fill(BinaryColor::On);
    let _ = Circle::new(top_left + Point::new(0, 3), 6)
        .into_styled(style)
        .draw(icon);
    let _ = Circle::new(top_left + Point::new(4, 0), 8)
        .into_styled(style)
        .draw(icon);
    let _ = Circle::new(top_left + Point::new(9, 3), 6)
        .into_styled(style)
        .draw(icon);
    let _ = Rectangle::new(top_left + Point::new(3, 5), Size::new(9, 4))
        .into_styled(style)
        .draw(icon);
}
