//! Rotate grab (§4.8). Computes a continuous [`Transform2D`] from the
//! pointer's offset from the surface's centre, rather than from an angle
//! directly — mirrors the vector-ratio construction anvil-style grabs use
//! for scale/rotate math, adapted here to [`Transform2D::rotation_from_offset`].

use smithay::input::pointer::{
    ButtonEvent, GrabStartData as PointerGrabStartData, MotionEvent, PointerGrab, PointerInnerHandle,
};
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use smithay::utils::{IsAlive, Logical, Point};

use crate::grabs::forward_pointer_grab_passthrough;
use crate::shell::{ShellHandler, ShellSurface};
use crate::transform::Transform2D;

/// Below this distance (px) from the surface's centre, the pointer offset
/// is too close to the origin for `rotation_from_offset` to be numerically
/// stable, so the grab freezes the last good transform instead (§4.8).
const DEADZONE: f64 = 20.0;

pub struct RotateGrab<D: ShellHandler> {
    pub start_data: PointerGrabStartData<D>,
    pub window: ShellSurface,
    /// Surface centre in the global (or parent-transformed) coordinate
    /// space the pointer location is reported in, snapshotted at grab
    /// start: the surface is expected to stay put while being rotated.
    pub center: Point<f64, Logical>,
    pub initial_transform: Option<Transform2D>,
}

impl<D: ShellHandler> PointerGrab<D> for RotateGrab<D> {
    fn motion(
        &mut self,
        data: &mut D,
        handle: &mut PointerInnerHandle<'_, D>,
        _focus: Option<(WlSurface, Point<i32, Logical>)>,
        event: &MotionEvent,
    ) {
        handle.motion(data, None, event);

        if !self.window.alive() {
            handle.unset_grab(data, event.serial, event.time, true);
            return;
        }

        let dx = event.location.x - self.center.x;
        let dy = event.location.y - self.center.y;
        let r = (dx * dx + dy * dy).sqrt();

        if r < DEADZONE {
            return;
        }

        let delta = Transform2D::rotation_from_offset(dx, dy, r);
        let rotated = match self.initial_transform {
            Some(base) => base.then(&delta),
            None => delta,
        };
        let transform = rotated.about(self.center.x, self.center.y);
        self.window.set_transform(Some(transform));
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
    use super::DEADZONE;

    #[test]
    fn deadzone_is_positive() {
        assert!(DEADZONE > 0.0);
    }
}
