//! Application-wide constants and compile-time configuration.
//!
//! Layout biases, scheduling cadence, weather job parameters and the
//! firmware's hardware settings live here so they can be tuned in one place.

// Redraw scheduling

/// Interactive redraw cadence (ms). Wakes land on multiples of this value.
pub const INTERACTIVE_UPDATE_RATE_MS: u64 = 60_000;

// Layout

/// Upward shift of the time baseline from the vertical centre (px).
pub const TIME_BASELINE_BIAS: f32 = 25.0;

/// Gap added below the time baseline before the info bar baseline (px).
pub const INFO_BAR_BIAS: f32 = 27.0;

/// Space reserved around the weather icon in the info bar (px).
/// Halved when the icon is shown without a temperature.
pub const INFO_BAR_ICON_MARGIN: f32 = 20.0;

/// How far the weather icon hangs below the info bar baseline (px).
pub const WEATHER_ICON_DROP: f32 = 6.0;

/// Gap between the badge and the upper half of the time text (px).
pub const BADGE_GAP: f32 = 16.0;

/// Battery baseline sits this many text heights above the bottom edge.
pub const BATTERY_HEIGHT_FACTOR: f32 = 1.5;

// Layout, 128x64 panel with compact fonts
//
// Rows from the top: badge 0..16, time 17..35 (stroke halo 16..36),
// weather icon 36..52, date 43..53, battery 54..64.

pub const PANEL_TIME_BASELINE_BIAS: f32 = 8.5;
pub const PANEL_INFO_BAR_BIAS: f32 = 13.0;
pub const PANEL_INFO_BAR_ICON_MARGIN: f32 = 8.0;
pub const PANEL_WEATHER_ICON_DROP: f32 = 2.0;
/// Negative: the badge tucks one row closer to the time.
pub const PANEL_BADGE_GAP: f32 = -1.0;
pub const PANEL_BATTERY_HEIGHT_FACTOR: f32 = 0.5;

// Icons

/// Edge length of the rendered weather icons (px).
pub const WEATHER_ICON_SIZE: u32 = 16;

/// Edge length of the interactive badge (px).
pub const BADGE_SIZE: u32 = 16;

/// Edge length of the ambient badge (px).
pub const BADGE_AMBIENT_SIZE: u32 = 14;

/// Largest icon edge the bitmap buffer can hold (px).
pub const MAX_ICON_SIZE: u32 = 16;

// Weather refresh

/// Minimum spacing between two location permission requests (ms).
pub const PERMISSION_REQUEST_THROTTLE_MS: u64 = 60_000;

/// Period of the background weather job (minutes).
pub const WEATHER_UPDATE_INTERVAL_MINS: u32 = 30;

/// Linear backoff step for failed weather jobs (minutes).
pub const WEATHER_BACKOFF_DELAY_MINS: u32 = 1;

/// Unique name and cancellation tag of the periodic weather job.
pub const WEATHER_UPDATE_WORKER: &str = "weather_update_worker";

// Sync channel

/// Data path the companion app writes settings to.
pub const SETTINGS_PATH: &str = "/settings";

/// Key of the nested map holding this watch face's settings.
pub const SETTINGS_NAMESPACE: &str = "com.corvettecole.pixelwatchface";

// Firmware (nRF52840-DK + SSD1306 128x64 over I2C)
//
//   I2C SDA        -> P0.26
//   I2C SCL        -> P0.27
//   Button         -> P0.11
//   Battery (1:2)  -> P0.31 / AIN7

/// OLED panel width (px).
pub const DISPLAY_WIDTH: u32 = 128;

/// OLED panel height (px).
pub const DISPLAY_HEIGHT: u32 = 64;

/// Depth of the engine event queue.
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Inactivity before the firmware drops into ambient mode (seconds).
pub const AMBIENT_TIMEOUT_SECS: u64 = 15;

/// Interval between battery samples (seconds).
pub const BATTERY_POLL_SECS: u64 = 60;

/// Heap reserved for settings payload decoding (bytes).
pub const HEAP_SIZE: usize = 4096;

/// UTC offset of the board's wall clock (seconds east of Greenwich).
pub const TIMEZONE_OFFSET_SECS: i32 = 0;

/// Battery voltage at 0 % and 100 % (mV), read through a 1:2 divider.
pub const BATTERY_EMPTY_MV: u32 = 3_450;
pub const BATTERY_FULL_MV: u32 = 4_200;
