//! Integration tests for the pixel-face engine driven through its public API.

use chrono::FixedOffset;
use pixel_face::config::{SETTINGS_PATH, WEATHER_UPDATE_WORKER};
use pixel_face::layout::{Measure, TextExtent};
use pixel_face::paint::{TextPaint, TextRole};
use pixel_face::{
    Bounds, Canvas, Engine, Event, Host, Icon, IngestOutcome, JobRequest, Receiver,
    RefreshDecision, Settings, SyncEvent, TemperatureUnit, Weather,
};

// 2024-01-01 09:05:00 UTC, a Monday.
const MORNING: u64 = 1_704_099_900_000;

const BOUNDS: Bounds = Bounds::from_size(128, 64);

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Invalidate,
    Register(Receiver),
    Unregister(Receiver),
    RequestPermission,
    Enqueue(JobRequest),
    CancelTag(String),
    AddListener,
    RemoveListener,
}

struct RecordingHost {
    calls: Vec<Call>,
    permission: bool,
}

impl RecordingHost {
    fn new(permission: bool) -> Self {
        Self {
            calls: Vec::new(),
            permission,
        }
    }

    fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl Host for RecordingHost {
    fn invalidate(&mut self) {
        self.calls.push(Call::Invalidate);
    }

    fn register_receiver(&mut self, receiver: Receiver) {
        self.calls.push(Call::Register(receiver));
    }

    fn unregister_receiver(&mut self, receiver: Receiver) {
        self.calls.push(Call::Unregister(receiver));
    }

    fn system_timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn has_location_permission(&self) -> bool {
        self.permission
    }

    fn request_location_permission(&mut self) {
        self.calls.push(Call::RequestPermission);
    }

    fn enqueue_job(&mut self, job: JobRequest) {
        self.calls.push(Call::Enqueue(job));
    }

    fn cancel_jobs_by_tag(&mut self, tag: &str) {
        self.calls.push(Call::CancelTag(tag.into()));
    }

    fn add_sync_listener(&mut self) {
        self.calls.push(Call::AddListener);
    }

    fn remove_sync_listener(&mut self) {
        self.calls.push(Call::RemoveListener);
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Draw {
    Text {
        text: String,
        x: i32,
        baseline: i32,
        role: TextRole,
    },
    Icon {
        size: (u32, u32),
        x: i32,
        top: i32,
    },
}

/// Fixed-advance metrics: time glyphs 12x20 px, info glyphs 6x10 px.
#[derive(Default)]
struct RecordingCanvas {
    draws: Vec<Draw>,
}

impl RecordingCanvas {
    fn text(&self, wanted: &str) -> Option<(i32, i32)> {
        self.draws.iter().find_map(|d| match d {
            Draw::Text {
                text, x, baseline, ..
            } if text == wanted => Some((*x, *baseline)),
            _ => None,
        })
    }

    fn info_texts(&self) -> Vec<&str> {
        self.draws
            .iter()
            .filter_map(|d| match d {
                Draw::Text {
                    text,
                    role: TextRole::Info,
                    ..
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn icon_sizes(&self) -> Vec<(u32, u32)> {
        self.draws
            .iter()
            .filter_map(|d| match d {
                Draw::Icon { size, .. } => Some(*size),
                _ => None,
            })
            .collect()
    }
}

impl Measure for RecordingCanvas {
    fn measure(&self, text: &str, paint: &TextPaint) -> TextExtent {
        let (advance, height) = match paint.role {
            TextRole::Time => (12.0, 20.0),
            TextRole::Info => (6.0, 10.0),
        };
        TextExtent {
            width: text.chars().count() as f32 * advance,
            height,
        }
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, _bounds: Bounds) {
        self.draws.clear();
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, paint: &TextPaint) {
        self.draws.push(Draw::Text {
            text: text.into(),
            x,
            baseline,
            role: paint.role,
        });
    }

    fn draw_icon(&mut self, icon: &Icon, x: i32, top: i32) {
        self.draws.push(Draw::Icon {
            size: (icon.width(), icon.height()),
            x,
            top,
        });
    }
}

fn settings_24h() -> Settings {
    Settings {
        use_24_hour_time: true,
        ..Settings::default()
    }
}

fn visible_engine(permission: bool, settings: Settings) -> Engine<RecordingHost> {
    let mut engine = Engine::with_builtin_icons(RecordingHost::new(permission), settings, MORNING);
    engine.handle(Event::VisibilityChanged(true), MORNING);
    engine
}

fn render(engine: &mut Engine<RecordingHost>, now_ms: u64) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::default();
    engine.render(&mut canvas, BOUNDS, now_ms);
    canvas
}

#[test]
fn interactive_frame_shows_time_and_battery() {
    let mut engine = visible_engine(true, settings_24h());
    engine.handle(Event::BatteryChanged(42), MORNING);

    let canvas = render(&mut engine, MORNING);

    // "09:05" is 60 px wide, centred on x = 64.
    let (x, _) = canvas.text("09:05").expect("time drawn");
    assert_eq!(x, 34);
    // Battery sits 1.5 text heights above the bottom edge.
    assert_eq!(canvas.text("42%"), Some((55, 49)));
    assert!(canvas.info_texts().contains(&"Mon, Jan 1"));
}

#[test]
fn battery_line_appears_with_first_reading() {
    let mut engine = visible_engine(true, settings_24h());
    let canvas = render(&mut engine, MORNING);
    assert!(!canvas.info_texts().iter().any(|t| t.ends_with('%')));

    engine.handle(Event::BatteryChanged(7), MORNING);
    let canvas = render(&mut engine, MORNING);
    assert!(canvas.info_texts().contains(&"7%"));
}

#[test]
fn twelve_hour_time_drops_leading_zero() {
    let mut engine = visible_engine(true, Settings::default());
    let canvas = render(&mut engine, MORNING);
    assert!(canvas.text("9:05").is_some());
}

#[test]
fn ambient_without_info_bar_draws_time_and_battery_only() {
    let settings = Settings {
        show_info_bar_ambient: false,
        ..settings_24h()
    };
    let mut engine = visible_engine(true, settings);
    engine.handle(
        Event::WeatherUpdated(Weather::new(21.0, TemperatureUnit::Celsius, "rain")),
        MORNING,
    );
    engine.handle(Event::BatteryChanged(42), MORNING);
    engine.handle(Event::AmbientModeChanged(true), MORNING);

    let canvas = render(&mut engine, MORNING);
    assert!(canvas.text("09:05").is_some());
    assert_eq!(canvas.info_texts(), ["42%"]);
    // Only the ambient badge remains.
    assert_eq!(canvas.icon_sizes(), [(14, 14)]);
}

#[test]
fn ambient_cancels_the_redraw_wake() {
    let mut engine = visible_engine(true, Settings::default());
    assert_eq!(engine.next_wake(), Some(MORNING));

    engine.handle(Event::AmbientModeChanged(true), MORNING);
    assert_eq!(engine.next_wake(), None);

    engine.handle(Event::AmbientModeChanged(false), MORNING + 5_000);
    assert_eq!(engine.next_wake(), Some(MORNING + 5_000));
    assert!(engine.on_wake(MORNING + 5_000));
    assert_eq!(engine.next_wake(), Some(MORNING + 60_000));
}

#[test]
fn hidden_engine_keeps_no_wake() {
    let mut engine = visible_engine(true, Settings::default());
    engine.handle(Event::VisibilityChanged(false), MORNING);
    assert_eq!(engine.next_wake(), None);

    let host = engine.host();
    assert_eq!(host.count(&Call::Unregister(Receiver::Battery)), 1);
    assert_eq!(host.count(&Call::Unregister(Receiver::TimeZone)), 1);
}

#[test]
fn repeated_settings_payload_redraws_without_refetch() {
    let mut engine = visible_engine(true, Settings::default());
    let payload = br#"{"com.corvettecole.pixelwatchface":{"showWeatherIcon":false}}"#;

    let first = engine.apply_settings(&SyncEvent::changed(SETTINGS_PATH, payload), MORNING);
    assert_eq!(
        first,
        IngestOutcome::Changed {
            weather_flags_changed: true
        }
    );
    let second = engine.apply_settings(&SyncEvent::changed(SETTINGS_PATH, payload), MORNING);
    assert_eq!(second, IngestOutcome::Unchanged);

    let host = engine.host();
    assert_eq!(host.count(&Call::Enqueue(JobRequest::forced())), 1);
    assert_eq!(host.calls.last(), Some(&Call::Invalidate));
    assert!(!engine.settings().show_weather_icon);
}

#[test]
fn malformed_payload_keeps_settings() {
    let mut engine = visible_engine(true, Settings::default());
    let before = *engine.settings();

    let outcome = engine.apply_settings(&SyncEvent::changed(SETTINGS_PATH, b"{oops"), MORNING);
    assert!(matches!(outcome, IngestOutcome::Rejected(_)));
    assert_eq!(*engine.settings(), before);

    let other = engine.apply_settings(&SyncEvent::changed("/elsewhere", b"{}"), MORNING);
    assert_eq!(other, IngestOutcome::Ignored);
}

#[test]
fn permission_requests_are_throttled() {
    let mut engine = visible_engine(false, Settings::default());

    assert_eq!(
        engine.refresh_weather(false, MORNING),
        RefreshDecision::RequestPermission
    );
    assert_eq!(
        engine.refresh_weather(false, MORNING + 10_000),
        RefreshDecision::PermissionThrottled
    );
    assert_eq!(engine.host().count(&Call::RequestPermission), 1);

    assert_eq!(
        engine.refresh_weather(false, MORNING + 70_000),
        RefreshDecision::RequestPermission
    );
    assert_eq!(engine.host().count(&Call::RequestPermission), 2);
}

#[test]
fn weather_disabled_enqueues_nothing() {
    let settings = Settings {
        show_temperature: false,
        show_weather_icon: false,
        ..Settings::default()
    };
    let mut engine = visible_engine(true, settings);
    engine.handle(Event::TimeTick, MORNING);

    assert_eq!(engine.refresh_weather(true, MORNING), RefreshDecision::Disabled);
    assert!(!engine
        .host()
        .calls
        .iter()
        .any(|c| matches!(c, Call::Enqueue(_) | Call::RequestPermission)));
}

#[test]
fn weather_icon_and_temperature_follow_updates() {
    let mut engine = visible_engine(true, settings_24h());
    engine.handle(
        Event::WeatherUpdated(Weather::new(21.4, TemperatureUnit::Celsius, "rain")),
        MORNING,
    );

    let canvas = render(&mut engine, MORNING);
    assert!(canvas.info_texts().contains(&"21°C"));
    assert!(canvas.icon_sizes().contains(&(16, 16)));

    // An unknown icon id leaves only the temperature.
    engine.handle(
        Event::WeatherUpdated(Weather::new(70.0, TemperatureUnit::Fahrenheit, "tornado")),
        MORNING,
    );
    let canvas = render(&mut engine, MORNING);
    assert!(canvas.info_texts().contains(&"70°F"));
    assert_eq!(canvas.icon_sizes(), [(16, 16)]);
}

#[test]
fn timezone_change_moves_the_clock() {
    let mut engine = visible_engine(true, settings_24h());
    let offset = FixedOffset::east_opt(2 * 3600).unwrap();
    engine.handle(Event::TimezoneChanged(offset), MORNING);

    let canvas = render(&mut engine, MORNING);
    assert!(canvas.text("11:05").is_some());
    assert_eq!(engine.clock().timezone(), offset);
}

#[test]
fn destroy_releases_everything() {
    let mut engine = visible_engine(true, Settings::default());
    engine.destroy();
    engine.destroy();

    let host = engine.host();
    assert_eq!(host.count(&Call::AddListener), 1);
    assert_eq!(host.count(&Call::RemoveListener), 1);
    assert_eq!(host.count(&Call::Unregister(Receiver::Battery)), 1);
    assert_eq!(
        host.calls.last(),
        Some(&Call::CancelTag(WEATHER_UPDATE_WORKER.into()))
    );
    assert_eq!(engine.next_wake(), None);

    let before = engine.host().calls.len();
    engine.handle(Event::TimeTick, MORNING + 60_000);
    assert!(!engine.on_wake(MORNING + 60_000));
    assert_eq!(engine.host().calls.len(), before);
}
