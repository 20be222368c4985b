//! Settings ingestion from the companion sync channel.

use crate::config::SETTINGS_PATH;
use crate::error::Error;
use crate::settings::{Settings, SettingsUpdate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncEventKind {
    Changed,
    Deleted,
}

/// One data item event from the sync channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncEvent<'a> {
    pub kind: SyncEventKind,
    pub path: &'a str,
    pub payload: &'a [u8],
}

impl<'a> SyncEvent<'a> {
    pub fn changed(path: &'a str, payload: &'a [u8]) -> Self {
        Self {
            kind: SyncEventKind::Changed,
            path,
            payload,
        }
    }

    pub fn deleted(path: &'a str) -> Self {
        Self {
            kind: SyncEventKind::Deleted,
            path,
            payload: &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IngestOutcome {
    /// Not a settings change.
    Ignored,
    /// Payload could not be decoded; settings untouched.
    Rejected(Error),
    Unchanged,
    Changed {
        /// `show_temperature` or `show_weather_icon` flipped.
        weather_flags_changed: bool,
    },
}

impl IngestOutcome {
    /// Any event on the settings path redraws, even a rejected one.
    pub fn requests_redraw(&self) -> bool {
        !matches!(self, IngestOutcome::Ignored)
    }

    pub fn forces_weather_refresh(&self) -> bool {
        matches!(
            self,
            IngestOutcome::Changed {
                weather_flags_changed: true
            }
        )
    }
}

/// Decode `event` and replace `settings` wholesale if anything differs.
pub fn apply_sync_event(settings: &mut Settings, event: &SyncEvent<'_>) -> IngestOutcome {
    if event.kind != SyncEventKind::Changed || event.path != SETTINGS_PATH {
        debug!("sync: ignoring {:?} event", event.kind);
        return IngestOutcome::Ignored;
    }

    let update = match SettingsUpdate::decode(event.payload) {
        Ok(update) => update,
        Err(e) => {
            warn!("sync: rejected settings payload: {:?}", e);
            return IngestOutcome::Rejected(e);
        }
    };

    let candidate = settings.merged(&update);
    if candidate == *settings {
        debug!("sync: settings unchanged");
        return IngestOutcome::Unchanged;
    }

    let weather_flags_changed = candidate.weather_flags_differ(settings);
    *settings = candidate;
    info!("sync: settings updated");
    IngestOutcome::Changed {
        weather_flags_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_WEATHER: &[u8] = br#"{"com.corvettecole.pixelwatchface":{"showTemperature":false,"showWeatherIcon":false}}"#;

    #[test]
    fn identical_payload_twice_is_unchanged() {
        let mut settings = Settings::default();
        let event = SyncEvent::changed("/settings", NO_WEATHER);

        assert_eq!(
            apply_sync_event(&mut settings, &event),
            IngestOutcome::Changed {
                weather_flags_changed: true
            }
        );
        let after_first = settings;

        let outcome = apply_sync_event(&mut settings, &event);
        assert_eq!(outcome, IngestOutcome::Unchanged);
        assert!(!outcome.forces_weather_refresh());
        assert!(outcome.requests_redraw());
        assert_eq!(settings, after_first);
    }

    #[test]
    fn non_weather_change_does_not_force_refresh() {
        let mut settings = Settings::default();
        let payload = br#"{"com.corvettecole.pixelwatchface":{"use24HourTime":true}}"#;
        let outcome = apply_sync_event(&mut settings, &SyncEvent::changed("/settings", payload));
        assert_eq!(
            outcome,
            IngestOutcome::Changed {
                weather_flags_changed: false
            }
        );
        assert!(!outcome.forces_weather_refresh());
        assert!(settings.use_24_hour_time);
    }

    #[test]
    fn malformed_payload_leaves_settings_untouched() {
        let mut settings = Settings::default();
        let outcome = apply_sync_event(&mut settings, &SyncEvent::changed("/settings", b"{oops"));
        assert_eq!(outcome, IngestOutcome::Rejected(Error::MalformedPayload));
        assert!(outcome.requests_redraw());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partially_bad_payload_is_rejected_whole() {
        let mut settings = Settings::default();
        let payload =
            br#"{"com.corvettecole.pixelwatchface":{"use24HourTime":true,"showBattery":1}}"#;
        let outcome = apply_sync_event(&mut settings, &SyncEvent::changed("/settings", payload));
        assert_eq!(outcome, IngestOutcome::Rejected(Error::MalformedPayload));
        assert!(!settings.use_24_hour_time);
    }

    #[test]
    fn other_paths_and_deletions_are_ignored() {
        let mut settings = Settings::default();
        let outcome = apply_sync_event(&mut settings, &SyncEvent::changed("/weather", NO_WEATHER));
        assert_eq!(outcome, IngestOutcome::Ignored);
        assert!(!outcome.requests_redraw());

        let outcome = apply_sync_event(&mut settings, &SyncEvent::deleted("/settings"));
        assert_eq!(outcome, IngestOutcome::Ignored);
        assert_eq!(settings, Settings::default());
    }
}
