//! The watch face engine.
//!
//! [`Engine`] owns every snapshot (mode, settings, weather, clock, battery)
//! plus the redraw scheduler and the weather refresh gate. All mutation goes
//! through `&mut Engine` from one event loop, so a frame always sees a
//! consistent set of snapshots.
//!
//! The platform is abstracted by [`Host`]: the engine asks it to redraw,
//! (un)register broadcast receivers, request permission and schedule
//! background jobs. Time is passed in explicitly as UTC milliseconds.

use chrono::FixedOffset;

use crate::battery::BatteryLevel;
use crate::clock::Clock;
use crate::config::WEATHER_UPDATE_WORKER;
use crate::icons::{Badges, BuiltinIcons, IconSource};
use crate::ingest::{apply_sync_event, IngestOutcome, SyncEvent};
use crate::layout::{Bounds, LayoutTuning};
use crate::mode::{DisplayMode, ModeEffects, ModeEvent};
use crate::refresh::{JobRequest, RefreshDecision, WeatherRefreshGate};
use crate::render::{render_frame, Canvas, Frame};
use crate::scheduler::RedrawScheduler;
use crate::settings::Settings;
use crate::weather::{Weather, WeatherSnapshot};

/// Broadcast receivers the engine listens on while visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Receiver {
    Battery,
    TimeZone,
}

/// Platform services used by the engine.
pub trait Host {
    /// Schedule a redraw; the host later calls [`Engine::render`].
    fn invalidate(&mut self);

    fn register_receiver(&mut self, receiver: Receiver);

    fn unregister_receiver(&mut self, receiver: Receiver);

    fn system_timezone(&self) -> FixedOffset;

    /// Re-read on every refresh; the user may grant or revoke at any time.
    fn has_location_permission(&self) -> bool;

    fn request_location_permission(&mut self);

    fn enqueue_job(&mut self, job: JobRequest);

    fn cancel_jobs_by_tag(&mut self, tag: &str);

    fn add_sync_listener(&mut self);

    fn remove_sync_listener(&mut self);
}

/// Everything the host can tell the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Event<'a> {
    VisibilityChanged(bool),
    AmbientModeChanged(bool),
    PropertiesChanged {
        low_bit_ambient: bool,
        burn_in_protection: bool,
    },
    WindowInsets {
        round: bool,
    },
    /// Once-a-minute tick delivered by the host while ambient.
    TimeTick,
    TimezoneChanged(FixedOffset),
    /// Raw battery percentage; clamped to `0..=100`.
    BatteryChanged(i32),
    Sync(SyncEvent<'a>),
    WeatherUpdated(Weather),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Receivers {
    battery: bool,
    timezone: bool,
}

pub struct Engine<H, S = BuiltinIcons> {
    host: H,
    icons: S,
    mode: DisplayMode,
    settings: Settings,
    weather: WeatherSnapshot,
    clock: Clock,
    battery: Option<BatteryLevel>,
    badges: Badges,
    layout: LayoutTuning,
    scheduler: RedrawScheduler,
    gate: WeatherRefreshGate,
    receivers: Receivers,
    destroyed: bool,
}

impl<H: Host> Engine<H> {
    /// Engine with the built-in weather icons.
    pub fn with_builtin_icons(host: H, settings: Settings, now_ms: u64) -> Self {
        Engine::new(host, BuiltinIcons, settings, now_ms)
    }
}

impl<H: Host, S: IconSource> Engine<H, S> {
    /// Start hidden, with the persisted `settings`, and attach to the sync channel.
    pub fn new(mut host: H, icons: S, settings: Settings, now_ms: u64) -> Self {
        let clock = Clock::new(now_ms as i64, host.system_timezone());
        host.add_sync_listener();

        let mut mode = DisplayMode::new();
        mode.refresh_paints(&settings);
        info!("engine: started");

        Self {
            host,
            icons,
            mode,
            settings,
            weather: WeatherSnapshot::new(),
            clock,
            battery: None,
            badges: Badges::new(),
            layout: LayoutTuning::default(),
            scheduler: RedrawScheduler::new(),
            gate: WeatherRefreshGate::new(),
            receivers: Receivers::default(),
            destroyed: false,
        }
    }

    /// Use `layout` instead of the full-size watch biases.
    pub fn with_layout(mut self, layout: LayoutTuning) -> Self {
        self.layout = layout;
        self
    }

    /// Dispatch one event. Ignored once the engine is destroyed.
    pub fn handle(&mut self, event: Event<'_>, now_ms: u64) {
        if self.destroyed {
            debug!("engine: event after teardown dropped");
            return;
        }

        match event {
            Event::VisibilityChanged(visible) => {
                self.transition(ModeEvent::VisibilityChanged(visible), now_ms)
            }
            Event::AmbientModeChanged(ambient) => {
                self.transition(ModeEvent::AmbientModeChanged(ambient), now_ms)
            }
            Event::PropertiesChanged {
                low_bit_ambient,
                burn_in_protection,
            } => self.transition(
                ModeEvent::PropertiesChanged {
                    low_bit_ambient,
                    burn_in_protection,
                },
                now_ms,
            ),
            Event::WindowInsets { round } => {
                self.transition(ModeEvent::WindowInsets { round }, now_ms)
            }
            Event::TimeTick => {
                self.host.invalidate();
                self.refresh_weather(false, now_ms);
            }
            Event::TimezoneChanged(offset) => {
                self.clock.set_timezone(offset);
                self.host.invalidate();
            }
            Event::BatteryChanged(raw) => {
                self.battery = Some(BatteryLevel::new(raw));
                self.host.invalidate();
            }
            Event::Sync(sync) => {
                self.apply_settings(&sync, now_ms);
            }
            Event::WeatherUpdated(weather) => self.apply_weather(weather),
        }
    }

    /// Settings entry point for the sync channel.
    pub fn apply_settings(&mut self, event: &SyncEvent<'_>, now_ms: u64) -> IngestOutcome {
        if self.destroyed {
            return IngestOutcome::Ignored;
        }

        let outcome = apply_sync_event(&mut self.settings, event);
        if let IngestOutcome::Changed { .. } = outcome {
            self.mode.refresh_paints(&self.settings);
        }
        if outcome.forces_weather_refresh() {
            self.refresh_weather(true, now_ms);
        }
        if outcome.requests_redraw() {
            self.host.invalidate();
        }
        outcome
    }

    /// Weather entry point for the background job's result.
    pub fn apply_weather(&mut self, weather: Weather) {
        if self.destroyed {
            return;
        }
        if self.weather.apply(weather) {
            debug!("weather: icon changed");
        }
        self.host.invalidate();
    }

    /// Request fresh weather. `force` asks for an immediate one-shot fetch;
    /// otherwise the periodic job is (re)registered.
    pub fn refresh_weather(&mut self, force: bool, now_ms: u64) -> RefreshDecision {
        if self.destroyed {
            return RefreshDecision::Disabled;
        }

        let has_permission = self.host.has_location_permission();
        let decision = self
            .gate
            .decide(&self.settings, has_permission, force, now_ms);
        match decision {
            RefreshDecision::RequestPermission => self.host.request_location_permission(),
            RefreshDecision::Enqueue(job) => {
                info!("weather: enqueue {:?}", job);
                self.host.enqueue_job(job);
            }
            RefreshDecision::Disabled | RefreshDecision::PermissionThrottled => {}
        }
        decision
    }

    /// Deadline of the pending redraw wake, if any.
    pub fn next_wake(&self) -> Option<u64> {
        self.scheduler.pending_wake()
    }

    /// Run the scheduled redraw if it is due. Returns whether it fired.
    pub fn on_wake(&mut self, now_ms: u64) -> bool {
        if self.destroyed || !self.scheduler.fire(now_ms) {
            return false;
        }
        self.host.invalidate();
        if self.mode.scheduler_eligible() {
            self.scheduler.schedule_next(now_ms);
        }
        true
    }

    /// Draw one frame for wall time `now_ms`.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, bounds: Bounds, now_ms: u64) {
        self.clock.set_time(now_ms as i64);

        let show_weather = self.mode.info_bar_visible(&self.settings);
        let temperature = self
            .weather
            .temperature_text()
            .filter(|_| show_weather && self.settings.show_temperature);
        let weather_icon = if show_weather && self.settings.show_weather_icon {
            self.weather.icon(&self.icons)
        } else {
            None
        };

        let frame = Frame {
            mode: &self.mode,
            settings: &self.settings,
            clock: &self.clock,
            battery: self.battery,
            temperature: temperature.as_deref(),
            weather_icon,
            badges: &self.badges,
            layout: &self.layout,
            bounds,
        };
        if let Err(e) = render_frame(canvas, &frame) {
            error!("render: {:?}", e);
        }
    }

    /// Detach from every source and cancel all pending work. A second call
    /// does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        self.host.remove_sync_listener();
        self.unregister_receivers();
        self.scheduler.cancel();
        self.host.cancel_jobs_by_tag(WEATHER_UPDATE_WORKER);
        info!("engine: destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        &self.weather
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// `None` until the host reports a first reading.
    pub fn battery(&self) -> Option<BatteryLevel> {
        self.battery
    }

    pub fn layout(&self) -> &LayoutTuning {
        &self.layout
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn transition(&mut self, event: ModeEvent, now_ms: u64) {
        let effects = self.mode.transition(event, &self.settings);
        self.apply_effects(effects, now_ms);
    }

    fn apply_effects(&mut self, effects: ModeEffects, now_ms: u64) {
        if effects.register_receivers {
            self.register_receivers();
        }
        if effects.unregister_receivers {
            self.unregister_receivers();
        }
        if effects.refresh_timezone {
            self.clock.set_timezone(self.host.system_timezone());
        }
        if effects.redraw {
            self.host.invalidate();
        }
        if effects.reschedule {
            self.scheduler
                .update(self.mode.scheduler_eligible(), now_ms);
        }
    }

    fn register_receivers(&mut self) {
        if !self.receivers.battery {
            self.receivers.battery = true;
            self.host.register_receiver(Receiver::Battery);
        }
        if !self.receivers.timezone {
            self.receivers.timezone = true;
            self.host.register_receiver(Receiver::TimeZone);
        }
    }

    fn unregister_receivers(&mut self) {
        if self.receivers.timezone {
            self.receivers.timezone = false;
            self.host.unregister_receiver(Receiver::TimeZone);
        }
        if self.receivers.battery {
            self.receivers.battery = false;
            self.host.unregister_receiver(Receiver::Battery);
        }
    }
}
