//! pixel-face firmware for an nRF52840 with an SSD1306 OLED.
//!
//! Task layout:
//!
//! - `button_task`: debounced button presses onto the event channel
//! - `battery_task`: periodic SAADC battery samples onto the event channel
//! - `main`: the single engine loop. It drains the channel, fires the
//!   minute-aligned redraw wake, delivers the ambient time tick, and drops
//!   into ambient mode after a period without input.
//!
//! The engine is only ever touched from `main`, so it needs no locking.

#![no_std]
#![no_main]

mod board;
mod display;

use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_nrf::gpio::{AnyPin, Input, Pin, Pull};
use embassy_nrf::saadc::{self, ChannelConfig, Resolution, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::{Duration, Instant, Timer};
use embedded_alloc::LlffHeap as Heap;
use panic_probe as _;

use pixel_face::config::{
    AMBIENT_TIMEOUT_SECS, BATTERY_POLL_SECS, BUTTON_DEBOUNCE_MS, EVENT_QUEUE_DEPTH, HEAP_SIZE,
    SETTINGS_PATH,
};
use pixel_face::layout::LayoutTuning;
use pixel_face::scheduler::delay_to_next_boundary;
use pixel_face::{BatteryLevel, Engine, Event, Settings, SyncEvent};

use board::BoardHost;

// serde_json decodes settings payloads through `alloc`.
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Wall clock at build time, written by build.rs.
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Inputs from the board's tasks.
#[derive(Clone, Copy, defmt::Format)]
enum BoardEvent {
    Button,
    Battery(BatteryLevel),
}

type EventSender = Sender<'static, CriticalSectionRawMutex, BoardEvent, EVENT_QUEUE_DEPTH>;

static EVENTS: Channel<CriticalSectionRawMutex, BoardEvent, EVENT_QUEUE_DEPTH> = Channel::new();

const USE_24H: &[u8] = br#"{"com.corvettecole.pixelwatchface":{"use24HourTime":true}}"#;
const USE_12H: &[u8] = br#"{"com.corvettecole.pixelwatchface":{"use24HourTime":false}}"#;

/// Wall-clock UTC milliseconds.
fn wall_ms() -> u64 {
    BUILD_UTC_MS + Instant::now().as_millis()
}

/// Monotonic instant at which the wall clock reads `wall`.
fn instant_at(wall: u64) -> Instant {
    Instant::from_millis(wall.saturating_sub(BUILD_UTC_MS))
}

/// Waits for a press (active-low), debounces, sends the event, then waits
/// for release before repeating.
#[embassy_executor::task]
async fn button_task(pin: AnyPin, tx: EventSender) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        btn.wait_for_falling_edge().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            tx.send(BoardEvent::Button).await;

            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}

/// Samples the battery divider and reports the estimated charge.
#[embassy_executor::task]
async fn battery_task(mut adc: Saadc<'static, 1>, tx: EventSender) -> ! {
    loop {
        let mut buf = [0i16; 1];
        adc.sample(&mut buf).await;
        // 12-bit, 0.6 V reference, 1/6 gain, 1:2 divider.
        let mv = buf[0].max(0) as u32 * 2000 / 1241;
        tx.send(BoardEvent::Battery(BatteryLevel::from_millivolts(mv)))
            .await;
        Timer::after(Duration::from_secs(BATTERY_POLL_SECS)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    {
        static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
        unsafe { HEAP.init(addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }
    }

    let p = embassy_nrf::init(Default::default());
    info!("pixel-face starting");

    let mut i2c_config = twim::Config::default();
    i2c_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, i2c_config);
    let mut display = display::init(i2c);

    let mut saadc_config = saadc::Config::default();
    saadc_config.resolution = Resolution::_12BIT;
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let adc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    adc.calibrate().await;

    unwrap!(spawner.spawn(button_task(p.P0_11.degrade(), EVENTS.sender())));
    unwrap!(spawner.spawn(battery_task(adc, EVENTS.sender())));

    let now = wall_ms();
    let mut engine = Engine::with_builtin_icons(BoardHost::default(), Settings::default(), now)
        .with_layout(LayoutTuning::PANEL_128X64);
    engine.handle(Event::WindowInsets { round: false }, now);
    engine.handle(
        Event::PropertiesChanged {
            low_bit_ambient: true,
            burn_in_protection: true,
        },
        now,
    );
    engine.handle(Event::VisibilityChanged(true), now);

    let mut ambient = false;
    let mut use_24h = false;
    let mut last_input = now;
    let mut next_tick = now + delay_to_next_boundary(now);

    loop {
        if engine.host_mut().take_dirty() {
            display::draw_face(&mut display, &mut engine, wall_ms());
        }

        // Earliest of: redraw wake, ambient tick, ambient timeout.
        let idle_deadline = last_input + AMBIENT_TIMEOUT_SECS * 1000;
        let mut deadline = if ambient { next_tick } else { idle_deadline };
        if let Some(wake) = engine.next_wake() {
            deadline = deadline.min(wake);
        }

        match select(EVENTS.receive(), Timer::at(instant_at(deadline))).await {
            Either::First(BoardEvent::Button) => {
                let now = wall_ms();
                last_input = now;
                if ambient {
                    ambient = false;
                    display::set_ambient(&mut display, false);
                    engine.handle(Event::AmbientModeChanged(false), now);
                } else {
                    use_24h = !use_24h;
                    let payload = if use_24h { USE_24H } else { USE_12H };
                    engine.handle(Event::Sync(SyncEvent::changed(SETTINGS_PATH, payload)), now);
                }
            }
            Either::First(BoardEvent::Battery(level)) => {
                if engine.host().battery_listening() {
                    engine.handle(Event::BatteryChanged(level.percent() as i32), wall_ms());
                }
            }
            Either::Second(()) => {
                let now = wall_ms();
                engine.on_wake(now);
                if ambient && now >= next_tick {
                    engine.handle(Event::TimeTick, now);
                    next_tick = now + delay_to_next_boundary(now);
                }
                if !ambient && now >= idle_deadline {
                    info!("Idle, entering ambient");
                    ambient = true;
                    next_tick = now + delay_to_next_boundary(now);
                    display::set_ambient(&mut display, true);
                    engine.handle(Event::AmbientModeChanged(true), now);
                }
            }
        }
    }
}
