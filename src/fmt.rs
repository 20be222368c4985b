//! Logging shims.
//!
//! On target the engine logs through `defmt`; hosted builds can route the
//! same call sites through the `log` facade instead. With neither feature
//! enabled the macros only type-check their arguments. `defmt` wins if
//! both are on.

#![allow(unused_macros, unused_imports)]

#[cfg(feature = "defmt")]
macro_rules! trace { ($($arg:tt)*) => { ::defmt::trace!($($arg)*) }; }
#[cfg(feature = "defmt")]
macro_rules! debug { ($($arg:tt)*) => { ::defmt::debug!($($arg)*) }; }
#[cfg(feature = "defmt")]
macro_rules! info { ($($arg:tt)*) => { ::defmt::info!($($arg)*) }; }
#[cfg(feature = "defmt")]
macro_rules! warn { ($($arg:tt)*) => { ::defmt::warn!($($arg)*) }; }
#[cfg(feature = "defmt")]
macro_rules! error { ($($arg:tt)*) => { ::defmt::error!($($arg)*) }; }

#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! trace { ($($arg:tt)*) => { ::log::trace!($($arg)*) }; }
#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! debug { ($($arg:tt)*) => { ::log::debug!($($arg)*) }; }
#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! info { ($($arg:tt)*) => { ::log::info!($($arg)*) }; }
#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! warn { ($($arg:tt)*) => { ::log::warn!($($arg)*) }; }
#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! error { ($($arg:tt)*) => { ::log::error!($($arg)*) }; }

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! trace { ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }}; }
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! debug { ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }}; }
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! info { ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }}; }
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! warn { ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }}; }
#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! error { ($($arg:tt)*) => {{ let _ = ::core::format_args!($($arg)*); }}; }
