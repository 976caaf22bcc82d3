//! Switcher grab (§4.9): a keyboard grab cycling through toplevel surfaces
//! while a modifier is held, mirroring the shape of anvil's pointer grabs
//! but against [`KeyboardGrab`] instead.

use smithay::backend::input::KeyState;
use smithay::input::keyboard::{
    keysyms, GrabStartData as KeyboardGrabStartData, KeyboardGrab, KeyboardInnerHandle, ModifiersState,
};
use smithay::utils::{IsAlive, Serial};
use tracing::{debug, instrument};

use crate::error::{Result, ShellError};
use crate::shell::{ShellHandler, ShellSurface};

/// Alpha applied to every candidate except the one currently selected,
/// dimming the rest of the screen while the switcher is up (§4.9): 64/255.
pub const DIM_ALPHA: f32 = 64.0 / 255.0;

pub struct SwitcherGrab<D: ShellHandler> {
    pub start_data: KeyboardGrabStartData<D>,
    candidates: Vec<ShellSurface>,
    current: usize,
    cancelled: bool,
}

impl<D: ShellHandler> SwitcherGrab<D> {
    /// Refuses to install with nothing to switch between (§9): an empty
    /// eligible-surface list would make every subsequent `Tab` a no-op over
    /// an out-of-bounds index.
    pub fn new(start_data: KeyboardGrabStartData<D>, candidates: Vec<ShellSurface>) -> Result<Self> {
        if candidates.is_empty() {
            return Err(ShellError::EmptySwitcherList);
        }
        Ok(SwitcherGrab {
            start_data,
            candidates,
            current: 0,
            cancelled: false,
        })
    }

    pub fn current(&self) -> &ShellSurface {
        &self.candidates[self.current]
    }

    /// Per-candidate alpha for the caller's renderer to apply: the
    /// currently-selected surface is full brightness, every other eligible
    /// surface is dimmed.
    pub fn alpha_for(&self, surface: &ShellSurface) -> f32 {
        if surface == self.current() {
            1.0
        } else {
            DIM_ALPHA
        }
    }

    #[instrument(skip(self))]
    fn advance(&mut self) {
        // Surfaces that died mid-switch are skipped rather than removed, so
        // `current` stays a stable index; a grab this short-lived isn't
        // worth compacting the vector for.
        let len = self.candidates.len();
        for _ in 0..len {
            self.current = (self.current + 1) % len;
            if self.candidates[self.current].alive() {
                break;
            }
        }
        debug!(index = self.current, "switcher advanced");
    }

    /// `true` if the switcher was dismissed with `Escape` rather than
    /// committed; the caller should restore whatever surface had focus
    /// before the grab started instead of activating `current()`.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// If the currently-selected surface died, move on to the next live one
    /// (§9's destruction-subscription auto-advance). Returns `false` if no
    /// live candidate remains.
    pub fn skip_dead(&mut self) -> bool {
        if self.current().alive() {
            return true;
        }
        let len = self.candidates.len();
        for _ in 0..len {
            self.current = (self.current + 1) % len;
            if self.candidates[self.current].alive() {
                return true;
            }
        }
        false
    }
}

impl<D: ShellHandler> KeyboardGrab<D> for SwitcherGrab<D> {
    fn input(
        &mut self,
        data: &mut D,
        handle: &mut KeyboardInnerHandle<'_, D>,
        keycode: smithay::input::keyboard::Keycode,
        state: KeyState,
        modifiers: Option<ModifiersState>,
        serial: Serial,
        time: u32,
    ) {
        if state != KeyState::Pressed {
            if let Some(mods) = modifiers {
                if !mods.alt {
                    // The modifier chord was released: commit the selection
                    // and hand control back to normal keyboard dispatch.
                    handle.unset_grab(data, serial, true);
                }
            }
            return;
        }

        let sym = handle.keysym_handle(keycode).modified_sym();
        match sym {
            keysyms::KEY_Tab | keysyms::KEY_ISO_Left_Tab => self.advance(),
            keysyms::KEY_Escape => {
                self.cancelled = true;
                handle.unset_grab(data, serial, true);
            }
            _ => {}
        }
    }

    fn set_focus(
        &mut self,
        _data: &mut D,
        _handle: &mut KeyboardInnerHandle<'_, D>,
        _focus: Option<<D as smithay::input::SeatHandler>::KeyboardFocus>,
        _serial: Serial,
    ) {
        // The switcher owns focus for its own duration; the caller restores
        // real keyboard focus to the selection after `unset`.
    }

    fn start_data(&self) -> &KeyboardGrabStartData<D> {
        &self.start_data
    }

    fn unset(&mut self, _data: &mut D) {}
}

#[cfg(test)]
mod tests {
    #[test]
    fn dim_alpha_is_below_full_brightness() {
        assert!(super::DIM_ALPHA < 1.0);
        assert!(super::DIM_ALPHA > 0.0);
    }
}
