//! Battery level as reported by the host's battery broadcast.

use core::fmt::Write;

use heapless::String;

use crate::config::{BATTERY_EMPTY_MV, BATTERY_FULL_MV};
use crate::error::{Error, Result};

/// Text shown for the battery, e.g. `"42%"`.
pub type BatteryText = String<8>;

/// Battery charge in percent, always within `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryLevel(u8);

impl BatteryLevel {
    pub const FULL: Self = Self(100);

    /// Clamp a raw broadcast value into range.
    pub fn new(raw: i32) -> Self {
        Self(raw.clamp(0, 100) as u8)
    }

    /// Linear estimate from the cell voltage.
    pub fn from_millivolts(mv: u32) -> Self {
        let span = BATTERY_FULL_MV - BATTERY_EMPTY_MV;
        let above = mv.saturating_sub(BATTERY_EMPTY_MV).min(span);
        Self((above * 100 / span) as u8)
    }

    pub const fn percent(self) -> u8 {
        self.0
    }

    pub fn text(self) -> Result<BatteryText> {
        let mut text = BatteryText::new();
        write!(text, "{}%", self.0).map_err(|_| Error::TextOverflow)?;
        Ok(text)
    }
}
