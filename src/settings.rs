//! User settings snapshot and its companion-app wire format.
//!
//! The companion app writes a data map to [`SETTINGS_PATH`]. The map holds
//! one nested map keyed by [`SETTINGS_NAMESPACE`] whose members are the
//! individual flags:
//!
//! ```text
//! {
//!   "com.corvettecole.pixelwatchface": {
//!     "use24HourTime": true,
//!     "showTemperature": false,
//!     ...
//!   }
//! }
//! ```
//!
//! Unknown members are ignored and missing members keep their current value.
//! A payload that is not an object, lacks the namespace, or carries a
//! non-boolean flag is rejected as a whole.
//!
//! [`SETTINGS_PATH`]: crate::config::SETTINGS_PATH

use core::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;

use crate::config::SETTINGS_NAMESPACE;
use crate::error::{Error, Result};

/// Complete settings snapshot read by the renderer every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub use_24_hour_time: bool,
    /// Day before month in the date line.
    pub use_european_date_format: bool,
    pub show_temperature: bool,
    pub show_weather_icon: bool,
    pub show_battery: bool,
    /// Keep the date/weather line on screen in ambient mode.
    pub show_info_bar_ambient: bool,
    /// Thin filled time digits in ambient mode instead of outlines.
    pub use_thin_ambient: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_24_hour_time: false,
            use_european_date_format: false,
            show_temperature: true,
            show_weather_icon: true,
            show_battery: true,
            show_info_bar_ambient: true,
            use_thin_ambient: false,
        }
    }
}

impl Settings {
    /// Whether any weather element is enabled.
    pub fn wants_weather(&self) -> bool {
        self.show_temperature || self.show_weather_icon
    }

    /// Whether the flags that drive weather fetching differ.
    pub fn weather_flags_differ(&self, other: &Settings) -> bool {
        self.show_temperature != other.show_temperature
            || self.show_weather_icon != other.show_weather_icon
    }

    /// Copy of `self` with every flag present in `update` replaced.
    pub fn merged(&self, update: &SettingsUpdate) -> Settings {
        Settings {
            use_24_hour_time: update.use_24_hour_time.unwrap_or(self.use_24_hour_time),
            use_european_date_format: update
                .use_european_date_format
                .unwrap_or(self.use_european_date_format),
            show_temperature: update.show_temperature.unwrap_or(self.show_temperature),
            show_weather_icon: update.show_weather_icon.unwrap_or(self.show_weather_icon),
            show_battery: update.show_battery.unwrap_or(self.show_battery),
            show_info_bar_ambient: update
                .show_info_bar_ambient
                .unwrap_or(self.show_info_bar_ambient),
            use_thin_ambient: update.use_thin_ambient.unwrap_or(self.use_thin_ambient),
        }
    }
}

/// Flags carried by one companion payload. `None` means "not sent".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsUpdate {
    #[serde(rename = "use24HourTime")]
    pub use_24_hour_time: Option<bool>,
    #[serde(rename = "useEuropeanDateFormat")]
    pub use_european_date_format: Option<bool>,
    #[serde(rename = "showTemperature")]
    pub show_temperature: Option<bool>,
    #[serde(rename = "showWeatherIcon")]
    pub show_weather_icon: Option<bool>,
    #[serde(rename = "showBattery")]
    pub show_battery: Option<bool>,
    #[serde(rename = "showInfoBarAmbient")]
    pub show_info_bar_ambient: Option<bool>,
    #[serde(rename = "useThinAmbient")]
    pub use_thin_ambient: Option<bool>,
}

impl SettingsUpdate {
    /// Decode a raw companion payload.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let envelope: Envelope =
            serde_json::from_slice(payload).map_err(|_| Error::MalformedPayload)?;
        envelope.0.ok_or(Error::MissingNamespace)
    }
}

/// Outer data map; only the member under our namespace is kept.
struct Envelope(Option<SettingsUpdate>);

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EnvelopeVisitor)
    }
}

struct EnvelopeVisitor;

impl<'de> Visitor<'de> for EnvelopeVisitor {
    type Value = Envelope;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a settings data map")
    }

    fn visit_map<A>(self, mut map: A) -> core::result::Result<Envelope, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut update = None;
        while let Some(NamespaceKey(ours)) = map.next_key::<NamespaceKey>()? {
            if ours {
                update = Some(map.next_value::<SettingsUpdate>()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(Envelope(update))
    }
}

/// Map key, `true` when it names this application.
struct NamespaceKey(bool);

impl<'de> Deserialize<'de> for NamespaceKey {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = NamespaceKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a namespace key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<NamespaceKey, E> {
                Ok(NamespaceKey(v == SETTINGS_NAMESPACE))
            }
        }

        deserializer.deserialize_identifier(KeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reads_namespaced_flags() {
        let payload = br#"{"com.corvettecole.pixelwatchface":{"use24HourTime":true,"showBattery":false}}"#;
        let update = SettingsUpdate::decode(payload).unwrap();
        assert_eq!(update.use_24_hour_time, Some(true));
        assert_eq!(update.show_battery, Some(false));
        assert_eq!(update.show_temperature, None);
    }

    #[test]
    fn decode_ignores_unknown_members() {
        let payload = br#"{"other.app":{"x":1},"com.corvettecole.pixelwatchface":{"useThinAmbient":true,"useCelsius":true}}"#;
        let update = SettingsUpdate::decode(payload).unwrap();
        assert_eq!(update.use_thin_ambient, Some(true));
    }

    #[test]
    fn decode_rejects_missing_namespace() {
        let payload = br#"{"use24HourTime":true}"#;
        assert_eq!(SettingsUpdate::decode(payload), Err(Error::MissingNamespace));
    }

    #[test]
    fn decode_rejects_malformed_payloads() {
        assert_eq!(SettingsUpdate::decode(b""), Err(Error::MalformedPayload));
        assert_eq!(SettingsUpdate::decode(b"[1,2]"), Err(Error::MalformedPayload));
        assert_eq!(
            SettingsUpdate::decode(br#"{"com.corvettecole.pixelwatchface":{"showBattery":"yes"}}"#),
            Err(Error::MalformedPayload)
        );
        assert_eq!(
            SettingsUpdate::decode(br#"{"com.corvettecole.pixelwatchface":{"showBattery":true}"#),
            Err(Error::MalformedPayload)
        );
    }

    #[test]
    fn merge_keeps_unsent_flags() {
        let current = Settings {
            use_24_hour_time: true,
            ..Settings::default()
        };
        let update = SettingsUpdate {
            show_battery: Some(false),
            ..SettingsUpdate::default()
        };
        let merged = current.merged(&update);
        assert!(merged.use_24_hour_time);
        assert!(!merged.show_battery);
        assert_eq!(merged.show_temperature, current.show_temperature);
    }

    #[test]
    fn weather_flags() {
        let base = Settings::default();
        let hidden = Settings {
            show_temperature: false,
            show_weather_icon: false,
            ..base
        };
        assert!(base.wants_weather());
        assert!(!hidden.wants_weather());
        assert!(base.weather_flags_differ(&hidden));
        let battery_off = Settings {
            show_battery: false,
            ..base
        };
        assert!(!base.weather_flags_differ(&battery_off));
    }
}
