//! Popup grab (§4.6). Unlike move/resize/rotate, this grab doesn't drive
//! the popup's geometry — it just watches for the "dismiss" conditions
//! weston's own popup grab watches for: a button press/release that lands
//! outside the popup's client, once an initial debounce window has passed
//! (so the very click that opened the popup doesn't immediately close it).

use smithay::input::pointer::{
    ButtonEvent, GrabStartData as PointerGrabStartData, MotionEvent, PointerGrab, PointerInnerHandle,
};
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use smithay::utils::{IsAlive, Logical, Point};
use tracing::debug;

use crate::grabs::forward_pointer_grab_passthrough;
use crate::shell::{ShellHandler, ShellSurface};

/// Clicks landing outside the popup's client within this long of grab
/// start don't dismiss it (§4.6).
pub const INITIAL_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(500);

pub struct PopupGrab<D: ShellHandler> {
    pub start_data: PointerGrabStartData<D>,
    pub popup: ShellSurface,
    pub client: smithay::reexports::wayland_server::backend::ClientId,
    pub grab_start_time: u32,
    /// Run once when the grab dismisses the popup, so the caller can send
    /// `popup_done` and tear down the role: this crate has no wire codec of
    /// its own, so termination is reported back through a callback instead
    /// of being sent directly.
    pub on_done: Box<dyn FnMut(&mut D) + 'static>,
    done: bool,
}

impl<D: ShellHandler> PopupGrab<D> {
    pub fn new(
        start_data: PointerGrabStartData<D>,
        popup: ShellSurface,
        client: smithay::reexports::wayland_server::backend::ClientId,
        grab_start_time: u32,
        on_done: Box<dyn FnMut(&mut D) + 'static>,
    ) -> Self {
        PopupGrab {
            start_data,
            popup,
            client,
            grab_start_time,
            on_done,
            done: false,
        }
    }

    fn dismiss(&mut self, data: &mut D) {
        if self.done {
            return;
        }
        self.done = true;
        debug!("dismissing popup grab");
        (self.on_done)(data);
    }

    fn within_debounce(&self, event_time: u32) -> bool {
        event_time.saturating_sub(self.grab_start_time) < INITIAL_DEBOUNCE.as_millis() as u32
    }
}

impl<D: ShellHandler> PointerGrab<D> for PopupGrab<D> {
    fn motion(
        &mut self,
        data: &mut D,
        handle: &mut PointerInnerHandle<'_, D>,
        focus: Option<(WlSurface, Point<i32, Logical>)>,
        event: &MotionEvent,
    ) {
        handle.motion(data, focus, event);

        if !self.popup.alive() {
            self.dismiss(data);
            handle.unset_grab(data, event.serial, event.time, true);
        }
    }

    forward_pointer_grab_passthrough!(D);

    fn button(&mut self, data: &mut D, handle: &mut PointerInnerHandle<'_, D>, event: &ButtonEvent) {
        handle.button(data, event);

        if self.within_debounce(event.time) {
            return;
        }

        let outside_client = handle
            .current_focus()
            .map(|(focus, _)| focus.client_id() != self.client)
            .unwrap_or(true);

        if outside_client {
            self.dismiss(data);
            handle.unset_grab(data, event.serial, event.time, true);
        }
    }

    fn start_data(&self) -> &PointerGrabStartData<D> {
        &self.start_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_window_is_half_a_second() {
        assert_eq!(INITIAL_DEBOUNCE.as_millis(), 500);
    }
}
