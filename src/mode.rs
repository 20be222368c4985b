//! Display mode state machine.
//!
//! The host surface reports visibility, ambient switches, display properties
//! and screen shape. Each report is a [`ModeEvent`]; [`DisplayMode::transition`]
//! applies it and returns the side effects the engine must carry out.
//!
//! ```text
//!            visible(true)             ambient(true)
//!   Hidden ───────────────▶ Interactive ────────────▶ Ambient
//!          ◀─────────────── Visible     ◀──────────── Visible
//!            visible(false)            ambient(false)
//! ```
//!
//! Hiding an ambient face also returns to `Hidden`.
//!
//! Low-bit ambient and burn-in protection are flags orthogonal to the phase.

use crate::paint::{PaintStyle, Paints, TextColor, Typeface};
use crate::settings::Settings;

/// Coarse state seen by the scheduler and renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Hidden,
    InteractiveVisible,
    AmbientVisible,
}

/// Host surface lifecycle report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    VisibilityChanged(bool),
    AmbientModeChanged(bool),
    PropertiesChanged {
        low_bit_ambient: bool,
        burn_in_protection: bool,
    },
    /// Screen shape, reported once before the first frame.
    WindowInsets { round: bool },
}

/// Work requested by a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeEffects {
    pub register_receivers: bool,
    pub unregister_receivers: bool,
    /// Re-read the system timezone; it may have changed while hidden.
    pub refresh_timezone: bool,
    pub redraw: bool,
    /// Scheduler eligibility may have changed.
    pub reschedule: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode {
    visible: bool,
    ambient: bool,
    low_bit_ambient: bool,
    burn_in_protection: bool,
    round: bool,
    paints: Paints,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayMode {
    /// Hidden, interactive, rectangular screen.
    pub const fn new() -> Self {
        Self {
            visible: false,
            ambient: false,
            low_bit_ambient: false,
            burn_in_protection: false,
            round: false,
            paints: Paints::interactive(true),
        }
    }

    pub fn transition(&mut self, event: ModeEvent, settings: &Settings) -> ModeEffects {
        let effects = match event {
            ModeEvent::VisibilityChanged(true) => {
                self.visible = true;
                ModeEffects {
                    register_receivers: true,
                    refresh_timezone: true,
                    redraw: true,
                    reschedule: true,
                    ..ModeEffects::default()
                }
            }
            ModeEvent::VisibilityChanged(false) => {
                self.visible = false;
                ModeEffects {
                    unregister_receivers: true,
                    reschedule: true,
                    ..ModeEffects::default()
                }
            }
            ModeEvent::AmbientModeChanged(ambient) => {
                self.ambient = ambient;
                self.refresh_paints(settings);
                ModeEffects {
                    redraw: true,
                    reschedule: true,
                    ..ModeEffects::default()
                }
            }
            ModeEvent::PropertiesChanged {
                low_bit_ambient,
                burn_in_protection,
            } => {
                self.low_bit_ambient = low_bit_ambient;
                self.burn_in_protection = burn_in_protection;
                ModeEffects::default()
            }
            ModeEvent::WindowInsets { round } => {
                self.round = round;
                self.refresh_paints(settings);
                ModeEffects {
                    redraw: true,
                    ..ModeEffects::default()
                }
            }
        };
        debug!("mode: {:?} -> {:?}", event, self.phase());
        effects
    }

    pub fn phase(&self) -> Phase {
        match (self.visible, self.ambient) {
            (false, _) => Phase::Hidden,
            (true, false) => Phase::InteractiveVisible,
            (true, true) => Phase::AmbientVisible,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_ambient(&self) -> bool {
        self.ambient
    }

    pub fn low_bit_ambient(&self) -> bool {
        self.low_bit_ambient
    }

    pub fn burn_in_protection(&self) -> bool {
        self.burn_in_protection
    }

    pub fn is_round(&self) -> bool {
        self.round
    }

    /// Only an interactive, visible face redraws on its own every minute.
    pub fn scheduler_eligible(&self) -> bool {
        self.visible && !self.ambient
    }

    /// The info bar is always drawn interactively, and in ambient only on request.
    pub fn info_bar_visible(&self, settings: &Settings) -> bool {
        !self.ambient || settings.show_info_bar_ambient
    }

    pub fn paints(&self) -> &Paints {
        &self.paints
    }

    /// Re-derive the paints from the current flags and `settings`.
    pub fn refresh_paints(&mut self, settings: &Settings) {
        let mut paints = Paints::interactive(!self.round);
        if self.ambient {
            if self.low_bit_ambient {
                paints.time.anti_alias = false;
                paints.info.anti_alias = false;
            }
            if settings.use_thin_ambient {
                paints.time.typeface = Typeface::Thin;
            } else {
                paints.time.style = PaintStyle::Stroke;
            }
            if settings.show_info_bar_ambient {
                paints.info.color = TextColor::Ambient;
            }
        }
        self.paints = paints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible() -> DisplayMode {
        let mut mode = DisplayMode::new();
        mode.transition(ModeEvent::VisibilityChanged(true), &Settings::default());
        mode
    }

    #[test]
    fn starts_hidden_and_ineligible() {
        let mode = DisplayMode::new();
        assert_eq!(mode.phase(), Phase::Hidden);
        assert!(!mode.scheduler_eligible());
        assert_eq!(mode.paints(), &Paints::interactive(true));
    }

    #[test]
    fn becoming_visible_registers_and_redraws() {
        let mut mode = DisplayMode::new();
        let effects = mode.transition(ModeEvent::VisibilityChanged(true), &Settings::default());
        assert!(effects.register_receivers);
        assert!(effects.refresh_timezone);
        assert!(effects.redraw);
        assert!(effects.reschedule);
        assert!(!effects.unregister_receivers);
        assert_eq!(mode.phase(), Phase::InteractiveVisible);
        assert!(mode.scheduler_eligible());
    }

    #[test]
    fn hiding_unregisters_without_redraw() {
        let mut mode = visible();
        let effects = mode.transition(ModeEvent::VisibilityChanged(false), &Settings::default());
        assert!(effects.unregister_receivers);
        assert!(effects.reschedule);
        assert!(!effects.redraw);
        assert_eq!(mode.phase(), Phase::Hidden);
        assert!(!mode.scheduler_eligible());
    }

    #[test]
    fn ambient_is_not_eligible() {
        let mut mode = visible();
        let effects = mode.transition(ModeEvent::AmbientModeChanged(true), &Settings::default());
        assert!(effects.reschedule);
        assert_eq!(mode.phase(), Phase::AmbientVisible);
        assert!(!mode.scheduler_eligible());

        mode.transition(ModeEvent::AmbientModeChanged(false), &Settings::default());
        assert!(mode.scheduler_eligible());
    }

    #[test]
    fn ambient_while_hidden_stays_hidden() {
        let mut mode = DisplayMode::new();
        mode.transition(ModeEvent::AmbientModeChanged(true), &Settings::default());
        assert_eq!(mode.phase(), Phase::Hidden);
        mode.transition(ModeEvent::VisibilityChanged(true), &Settings::default());
        assert_eq!(mode.phase(), Phase::AmbientVisible);
    }

    #[test]
    fn properties_only_update_flags() {
        let mut mode = visible();
        let before = *mode.paints();
        let effects = mode.transition(
            ModeEvent::PropertiesChanged {
                low_bit_ambient: true,
                burn_in_protection: true,
            },
            &Settings::default(),
        );
        assert_eq!(effects, ModeEffects::default());
        assert!(mode.low_bit_ambient());
        assert!(mode.burn_in_protection());
        assert_eq!(mode.paints(), &before);
    }

    #[test]
    fn ambient_paints_stroke_by_default() {
        let mut mode = visible();
        mode.transition(ModeEvent::AmbientModeChanged(true), &Settings::default());
        let paints = mode.paints();
        assert_eq!(paints.time.style, PaintStyle::Stroke);
        assert_eq!(paints.time.typeface, Typeface::Regular);
        assert_eq!(paints.info.color, TextColor::Ambient);
        assert!(paints.time.anti_alias);
    }

    #[test]
    fn thin_ambient_keeps_fill() {
        let settings = Settings {
            use_thin_ambient: true,
            show_info_bar_ambient: false,
            ..Settings::default()
        };
        let mut mode = visible();
        mode.transition(ModeEvent::AmbientModeChanged(true), &settings);
        let paints = mode.paints();
        assert_eq!(paints.time.style, PaintStyle::Fill);
        assert_eq!(paints.time.typeface, Typeface::Thin);
        assert_eq!(paints.info.color, TextColor::Primary);
        assert!(!mode.info_bar_visible(&settings));
    }

    #[test]
    fn low_bit_ambient_drops_anti_aliasing() {
        let mut mode = visible();
        mode.transition(
            ModeEvent::PropertiesChanged {
                low_bit_ambient: true,
                burn_in_protection: false,
            },
            &Settings::default(),
        );
        mode.transition(ModeEvent::AmbientModeChanged(true), &Settings::default());
        assert!(!mode.paints().time.anti_alias);
        assert!(!mode.paints().info.anti_alias);

        mode.transition(ModeEvent::AmbientModeChanged(false), &Settings::default());
        assert!(mode.paints().time.anti_alias);
    }

    #[test]
    fn leaving_ambient_restores_interactive_paints() {
        let settings = Settings {
            use_thin_ambient: true,
            ..Settings::default()
        };
        let mut mode = visible();
        mode.transition(ModeEvent::AmbientModeChanged(true), &settings);
        mode.transition(ModeEvent::AmbientModeChanged(false), &settings);
        assert_eq!(mode.paints(), &Paints::interactive(true));
    }

    #[test]
    fn round_insets_select_large_text() {
        let mut mode = DisplayMode::new();
        let effects = mode.transition(ModeEvent::WindowInsets { round: true }, &Settings::default());
        assert!(effects.redraw);
        assert!(mode.is_round());
        assert!(!mode.paints().time.compact);
        assert!(!mode.paints().info.compact);
    }

    #[test]
    fn info_bar_always_visible_interactively() {
        let settings = Settings {
            show_info_bar_ambient: false,
            ..Settings::default()
        };
        let mode = visible();
        assert!(mode.info_bar_visible(&settings));
    }
}
