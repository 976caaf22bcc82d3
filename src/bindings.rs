//! Secondary key/button bindings (§4.14): compositor-wide chords that
//! aren't part of any grab's own state machine. This module only resolves
//! *which* binding a chord names and applies the small pieces of clamped
//! arithmetic the spec assigns to each one — actually decoding physical
//! input devices and dispatching the resulting action (zooming the
//! renderer, setting a backlight, exiting the process) is the compositor's
//! job, same division of labour as the grabs and the lock orchestrator.

use std::collections::HashMap;

use smithay::input::keyboard::{keysyms, ModifiersState};
use smithay::output::Output;
use tracing::debug;

/// The modifier weston's desktop-shell binds all of its own chords under.
pub fn is_binding_modifier(mods: &ModifiersState) -> bool {
    mods.logo
}

/// A keyboard chord recognised while [`is_binding_modifier`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    ZoomIn,
    ZoomOut,
    BrightnessUp,
    BrightnessDown,
    Terminate,
    ToggleDebugOverlay,
    InstallSwitcher,
}

/// `Terminate` is bound under Ctrl+Alt regardless of the shell's own
/// modifier, matching a hardwired emergency-exit chord rather than a
/// shell-configurable one.
pub fn resolve_key_binding(mods: &ModifiersState, sym: smithay::input::keyboard::Keysym) -> Option<KeyBinding> {
    if mods.ctrl && mods.alt && sym == keysyms::KEY_BackSpace {
        return Some(KeyBinding::Terminate);
    }

    if !is_binding_modifier(mods) {
        return None;
    }

    match sym {
        keysyms::KEY_Up => Some(KeyBinding::ZoomIn),
        keysyms::KEY_Down => Some(KeyBinding::ZoomOut),
        keysyms::KEY_F9 => Some(KeyBinding::BrightnessDown),
        keysyms::KEY_F10 => Some(KeyBinding::BrightnessUp),
        keysyms::KEY_space => Some(KeyBinding::ToggleDebugOverlay),
        keysyms::KEY_Tab => Some(KeyBinding::InstallSwitcher),
        _ => None,
    }
}

/// A pointer-button chord that starts one of the four move/resize/rotate
/// grabs (popup doesn't start from a binding — it's driven by the client's
/// own `set_popup` request, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerBinding {
    Move,
    Resize,
    Rotate,
}

pub fn resolve_pointer_binding(mods: &ModifiersState, button: u32) -> Option<PointerBinding> {
    if !is_binding_modifier(mods) {
        return None;
    }
    // Linux evdev button codes: BTN_LEFT=0x110, BTN_RIGHT=0x111, BTN_MIDDLE=0x112.
    match button {
        0x110 => Some(PointerBinding::Move),
        0x112 => Some(PointerBinding::Resize),
        0x111 => Some(PointerBinding::Rotate),
        _ => None,
    }
}

/// Smallest zoom step. Individual compositors may expose this as a config
/// knob; the spec fixes it as a constant increment per keypress.
pub const ZOOM_INCREMENT: f64 = 0.05;

/// Per-output zoom level, clamped to `[ZOOM_INCREMENT, 1.0]` (§4.14). A
/// level of `1.0` means "not zoomed"; reaching it removes the output's
/// entry entirely so [`ZoomState::level`] can cheaply default unzoomed
/// outputs to `1.0` without growing the map.
#[derive(Debug, Default)]
pub struct ZoomState {
    levels: HashMap<Output, f64>,
}

impl ZoomState {
    pub fn new() -> Self {
        ZoomState::default()
    }

    pub fn level(&self, output: &Output) -> f64 {
        self.levels.get(output).copied().unwrap_or(1.0)
    }

    /// `delta` is negative to zoom in, positive to zoom out; returns the
    /// resulting level.
    fn adjust(&mut self, output: &Output, delta: f64) -> f64 {
        let current = self.level(output);
        let next = (current + delta).clamp(ZOOM_INCREMENT, 1.0);
        if next >= 1.0 {
            self.levels.remove(output);
        } else {
            self.levels.insert(output.clone(), next);
        }
        debug!(?next, "zoom level adjusted");
        next
    }

    pub fn zoom_in(&mut self, output: &Output) -> f64 {
        self.adjust(output, -ZOOM_INCREMENT)
    }

    pub fn zoom_out(&mut self, output: &Output) -> f64 {
        self.adjust(output, ZOOM_INCREMENT)
    }
}

/// Backlight current for the default output, clamped to `[1, 10]` (§4.14).
#[derive(Debug, Clone, Copy)]
pub struct Brightness(u32);

impl Brightness {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 10;

    pub fn new(value: u32) -> Self {
        Brightness(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn up(&mut self) -> u32 {
        self.0 = (self.0 + 1).clamp(Self::MIN, Self::MAX);
        self.0
    }

    pub fn down(&mut self) -> u32 {
        self.0 = self.0.saturating_sub(1).clamp(Self::MIN, Self::MAX);
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness(Self::MAX)
    }
}

/// Translucent red full-output overlay toggled by `Modifier+Space`, used to
/// visually detect partial repaints (§4.14). This crate doesn't render
/// anything; it only tracks whether the overlay should currently be shown.
#[derive(Debug, Default)]
pub struct DebugOverlay {
    visible: bool,
}

impl DebugOverlay {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns the new visibility. The caller clears damage on the overlay
    /// surface immediately after creating it so only subsequently-damaged
    /// regions get recoloured, per the spec's note on this binding.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(logo: bool, ctrl: bool, alt: bool) -> ModifiersState {
        ModifiersState {
            ctrl,
            alt,
            shift: false,
            caps_lock: false,
            logo,
            num_lock: false,
            serialized: (0, 0, 0, 0),
        }
    }

    #[test]
    fn terminate_ignores_the_shell_modifier() {
        let m = mods(false, true, true);
        assert_eq!(
            resolve_key_binding(&m, keysyms::KEY_BackSpace),
            Some(KeyBinding::Terminate)
        );
    }

    #[test]
    fn other_bindings_require_the_shell_modifier() {
        let m = mods(false, false, false);
        assert_eq!(resolve_key_binding(&m, keysyms::KEY_Up), None);
        let m = mods(true, false, false);
        assert_eq!(resolve_key_binding(&m, keysyms::KEY_Up), Some(KeyBinding::ZoomIn));
    }

    #[test]
    fn brightness_clamps_to_one_through_ten() {
        let mut b = Brightness::new(1);
        assert_eq!(b.down(), 1);
        let mut b = Brightness::new(10);
        assert_eq!(b.up(), 10);
    }

    #[test]
    fn debug_overlay_toggles() {
        let mut overlay = DebugOverlay::default();
        assert!(!overlay.is_visible());
        assert!(overlay.toggle());
        assert!(!overlay.toggle());
    }
}
