//! Move grab (§4.3).

use smithay::input::pointer::{
    ButtonEvent, GrabStartData as PointerGrabStartData, MotionEvent, PointerGrab, PointerInnerHandle,
};
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use smithay::utils::{IsAlive, Logical, Point};

use crate::grabs::forward_pointer_grab_passthrough;
use crate::shell::{ShellHandler, ShellSurface};

/// Translates `window` by the pointer's motion since grab start. Installed
/// by a compositor-defined pointer chord, or by the client's `move`
/// request once the caller has validated grab time, pressed-button state
/// and pointer focus (§4.3).
pub struct MoveGrab<D: ShellHandler> {
    pub start_data: PointerGrabStartData<D>,
    pub window: ShellSurface,
    pub initial_window_location: Point<i32, Logical>,
}

impl<D: ShellHandler> PointerGrab<D> for MoveGrab<D> {
    fn motion(
        &mut self,
        data: &mut D,
        handle: &mut PointerInnerHandle<'_, D>,
        _focus: Option<(WlSurface, Point<i32, Logical>)>,
        event: &MotionEvent,
    ) {
        // While the grab is active, no client has pointer focus.
        handle.motion(data, None, event);

        if !self.window.alive() {
            handle.unset_grab(data, event.serial, event.time, true);
            return;
        }

        let delta = event.location - self.start_data.location;
        let new_location = self.initial_window_location.to_f64() + delta;
        self.window.set_location(new_location.to_i32_round());
    }

    forward_pointer_grab_passthrough!(D);

    fn button(&mut self, data: &mut D, handle: &mut PointerInnerHandle<'_, D>, event: &ButtonEvent) {
        handle.button(data, event);
        if handle.current_pressed().is_empty() {
            handle.unset_grab(data, event.serial, event.time, true);
        }
    }

    fn start_data(&self) -> &PointerGrabStartData<D> {
        &self.start_data
    }
}

#[cfg(test)]
mod tests {
    // MoveGrab::motion's geometry math is a plain point translation;
    // exercising it end-to-end needs a live PointerInnerHandle, which needs
    // a running Seat. See the crate-level integration tests for scenario 1.
}
