//! Library interface for pixel-face.
//!
//! Everything here is `no_std` and hardware independent, so the whole
//! engine is exercised by host tests. The nRF52840 firmware in `main.rs`
//! is a thin shell that feeds events into [`Engine`] and blits its frames.
//!
//! Usage: `cargo test` for the engine, `cargo build --release --features
//! embedded --target thumbv7em-none-eabihf` for the firmware.
//!
//! Module map, leaves first:
//!
//! - [`layout`]: text metrics and canvas bounds to pixel offsets
//! - [`settings`], [`weather`], [`clock`], [`battery`]: per-frame snapshots
//! - [`icons`]: weather pictograms and badges as 1-bit bitmaps
//! - [`mode`]: interactive/ambient state machine and paint selection
//! - [`scheduler`]: minute-aligned redraw wake
//! - [`render`]: draws one frame through a [`render::Canvas`]
//! - [`ingest`]: companion settings sync
//! - [`refresh`]: weather refresh gate
//! - [`engine`]: owns all of the above and dispatches events

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod battery;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod icons;
pub mod ingest;
pub mod layout;
pub mod mode;
pub mod paint;
pub mod refresh;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod weather;

pub use battery::BatteryLevel;
pub use clock::Clock;
pub use engine::{Engine, Event, Host, Receiver};
pub use error::{Error, Result};
pub use icons::{BuiltinIcons, Icon, IconSource};
pub use ingest::{IngestOutcome, SyncEvent, SyncEventKind};
pub use layout::{Bounds, LayoutTuning};
pub use mode::{DisplayMode, ModeEvent, Phase};
pub use refresh::{JobRequest, RefreshDecision};
pub use render::graphics::GraphicsCanvas;
pub use render::Canvas;
pub use settings::Settings;
pub use weather::{TemperatureUnit, Weather};
