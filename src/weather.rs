//! Current weather as last posted by the background job.

use core::fmt::Write;

use heapless::String;

use crate::icons::{Icon, IconSource};

/// Weather icon identifier, e.g. `"partly-cloudy-day"`.
pub type IconId = String<24>;

/// `"-12°C"`.
pub type TemperatureText = String<12>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    fn symbol(self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    pub value: f32,
    pub unit: TemperatureUnit,
}

/// One weather report. Either half may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Weather {
    pub temperature: Option<Temperature>,
    pub icon_id: Option<IconId>,
}

impl Weather {
    /// Report with both halves. An identifier too long to be known is dropped.
    pub fn new(value: f32, unit: TemperatureUnit, icon_id: &str) -> Self {
        Self {
            temperature: Some(Temperature { value, unit }),
            icon_id: IconId::try_from(icon_id).ok(),
        }
    }
}

/// Weather read by the renderer, plus the icon rendered for it.
///
/// The icon is rendered on first use and reused until a report with a
/// different identifier arrives.
#[derive(Clone, Debug, Default)]
pub struct WeatherSnapshot {
    current: Weather,
    cached: Option<(IconId, Option<Icon>)>,
}

impl WeatherSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Weather {
        &self.current
    }

    /// Replace the report. Returns `true` when the icon cache was dropped.
    pub fn apply(&mut self, weather: Weather) -> bool {
        let invalidate = self.current.icon_id != weather.icon_id && self.cached.is_some();
        if invalidate {
            self.cached = None;
        }
        self.current = weather;
        invalidate
    }

    /// Temperature rounded to a whole degree with its unit.
    pub fn temperature_text(&self) -> Option<TemperatureText> {
        let temperature = self.current.temperature?;
        let mut text = TemperatureText::new();
        write!(
            text,
            "{}°{}",
            round_degrees(temperature.value),
            temperature.unit.symbol()
        )
        .ok()?;
        Some(text)
    }

    /// Icon for the current identifier, rendering it on a cache miss.
    /// `None` when there is no identifier or `source` does not know it.
    pub fn icon<S: IconSource + ?Sized>(&mut self, source: &S) -> Option<&Icon> {
        let id = self.current.icon_id.as_ref()?;
        let hit = matches!(&self.cached, Some((cached, _)) if cached == id);
        if !hit {
            self.cached = Some((id.clone(), source.render(id)));
        }
        self.cached.as_ref().and_then(|(_, icon)| icon.as_ref())
    }
}

fn round_degrees(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}
