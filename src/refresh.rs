//! Weather refresh gate.
//!
//! Decides what a weather refresh request turns into: nothing, a
//! (throttled) location permission request, or a background job. The
//! engine carries the decision out against its host.

use crate::config::{
    PERMISSION_REQUEST_THROTTLE_MS, WEATHER_BACKOFF_DELAY_MINS, WEATHER_UPDATE_INTERVAL_MINS,
    WEATHER_UPDATE_WORKER,
};
use crate::settings::Settings;

/// Retry policy for a failed job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Backoff {
    Linear { delay_mins: u32 },
}

/// What happens when a unique job with the same name already exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExistingJobPolicy {
    /// Leave the existing job alone and drop the new one.
    Keep,
}

/// Background weather job handed to the host's job scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JobRequest {
    OneShot {
        requires_network: bool,
        backoff: Backoff,
    },
    UniquePeriodic {
        name: &'static str,
        /// Tag used to cancel the job at teardown.
        tag: &'static str,
        period_mins: u32,
        requires_network: bool,
        backoff: Backoff,
        policy: ExistingJobPolicy,
    },
}

impl JobRequest {
    /// Immediate fetch after a settings change.
    pub const fn forced() -> Self {
        JobRequest::OneShot {
            requires_network: true,
            backoff: Backoff::Linear {
                delay_mins: WEATHER_BACKOFF_DELAY_MINS,
            },
        }
    }

    /// The recurring fetch; registering it again is a no-op on the host.
    pub const fn periodic() -> Self {
        JobRequest::UniquePeriodic {
            name: WEATHER_UPDATE_WORKER,
            tag: WEATHER_UPDATE_WORKER,
            period_mins: WEATHER_UPDATE_INTERVAL_MINS,
            requires_network: true,
            backoff: Backoff::Linear {
                delay_mins: WEATHER_BACKOFF_DELAY_MINS,
            },
            policy: ExistingJobPolicy::Keep,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshDecision {
    /// No weather element is shown.
    Disabled,
    /// Ask the host for location permission; nothing is enqueued.
    RequestPermission,
    /// Permission is missing and was requested too recently to ask again.
    PermissionThrottled,
    Enqueue(JobRequest),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeatherRefreshGate {
    last_permission_request_at: Option<u64>,
}

impl WeatherRefreshGate {
    pub const fn new() -> Self {
        Self {
            last_permission_request_at: None,
        }
    }

    pub fn last_permission_request_at(&self) -> Option<u64> {
        self.last_permission_request_at
    }

    /// Decide a refresh. `has_permission` must be freshly read from the host.
    pub fn decide(
        &mut self,
        settings: &Settings,
        has_permission: bool,
        force: bool,
        now_ms: u64,
    ) -> RefreshDecision {
        if !settings.wants_weather() {
            return RefreshDecision::Disabled;
        }

        if !has_permission {
            let due = match self.last_permission_request_at {
                None => true,
                Some(last) => now_ms.saturating_sub(last) > PERMISSION_REQUEST_THROTTLE_MS,
            };
            if !due {
                debug!("weather: permission request throttled");
                return RefreshDecision::PermissionThrottled;
            }
            self.last_permission_request_at = Some(now_ms);
            info!("weather: requesting location permission");
            return RefreshDecision::RequestPermission;
        }

        if force {
            RefreshDecision::Enqueue(JobRequest::forced())
        } else {
            RefreshDecision::Enqueue(JobRequest::periodic())
        }
    }
}
