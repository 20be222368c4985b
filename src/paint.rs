//! Text paints selected by the mode state machine.
//!
//! A paint describes *how* a string should look; the [`Canvas`] backend
//! decides which concrete font and raster operations realise it.
//!
//! [`Canvas`]: crate::render::Canvas

/// Which line of the face a paint is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextRole {
    /// Large `H:MM` digits.
    Time,
    /// Date, temperature and battery text.
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PaintStyle {
    Fill,
    /// Outlined glyphs; lights far fewer pixels in ambient mode.
    Stroke,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Typeface {
    Regular,
    Thin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextColor {
    Primary,
    /// Dimmed colour for the ambient info bar.
    Ambient,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextPaint {
    pub role: TextRole,
    pub style: PaintStyle,
    pub typeface: Typeface,
    pub color: TextColor,
    pub anti_alias: bool,
    /// Smaller text size for rectangular screens.
    pub compact: bool,
}

impl TextPaint {
    /// Interactive-mode paint for `role`.
    pub const fn new(role: TextRole, compact: bool) -> Self {
        Self {
            role,
            style: PaintStyle::Fill,
            typeface: Typeface::Regular,
            color: TextColor::Primary,
            anti_alias: true,
            compact,
        }
    }
}

/// The two paints every frame is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paints {
    pub time: TextPaint,
    pub info: TextPaint,
}

impl Paints {
    pub const fn interactive(compact: bool) -> Self {
        Self {
            time: TextPaint::new(TextRole::Time, compact),
            info: TextPaint::new(TextRole::Info, compact),
        }
    }
}
