//! Resize grab (§4.4).

use smithay::input::pointer::{
    ButtonEvent, GrabStartData as PointerGrabStartData, MotionEvent, PointerGrab, PointerInnerHandle,
};
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use smithay::utils::{IsAlive, Logical, Point, Serial, Size};
use tracing::trace;

use crate::grabs::forward_pointer_grab_passthrough;
use crate::shell::surface::ResizeEdge;
use crate::shell::{ShellHandler, ShellSurface};

/// Resize state tracked on the surface across the grab's lifetime,
/// mirroring anvil's own `ResizeState`: the grab updates geometry eagerly
/// on every motion, then the caller (the protocol layer) is responsible
/// for sending the actual `configure` event and waiting for the client's
/// ack/commit before calling `commit` here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizeState {
    #[default]
    NotResizing,
    Resizing(ResizeData),
    WaitingForFinalAck(ResizeData, Serial),
    WaitingForCommit(ResizeData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeData {
    pub edges: ResizeEdge,
    pub initial_window_location: Point<i32, Logical>,
    pub initial_window_size: Size<i32, Logical>,
}

pub struct ResizeGrab<D: ShellHandler> {
    pub start_data: PointerGrabStartData<D>,
    pub window: ShellSurface,
    pub edges: ResizeEdge,
    pub initial_window_location: Point<i32, Logical>,
    pub initial_window_size: Size<i32, Logical>,
    pub last_window_size: Size<i32, Logical>,
}

impl<D: ShellHandler> PointerGrab<D> for ResizeGrab<D> {
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

        let (mut dx, mut dy) = (event.location - self.start_data.location).into();

        let mut new_width = self.initial_window_size.w;
        let mut new_height = self.initial_window_size.h;

        let left_right = ResizeEdge::LEFT | ResizeEdge::RIGHT;
        let top_bottom = ResizeEdge::TOP | ResizeEdge::BOTTOM;

        if self.edges.intersects(left_right) {
            if self.edges.intersects(ResizeEdge::LEFT) {
                dx = -dx;
            }
            new_width = (self.initial_window_size.w as f64 + dx).max(1.0) as i32;
        }

        if self.edges.intersects(top_bottom) {
            if self.edges.intersects(ResizeEdge::TOP) {
                dy = -dy;
            }
            new_height = (self.initial_window_size.h as f64 + dy).max(1.0) as i32;
        }

        self.last_window_size = Size::from((new_width, new_height));
        trace!(?self.last_window_size, "resize grab motion");
        // The caller sends the actual `configure(edges, width, height)`
        // event (§4.4); this grab only tracks the target size so the
        // caller can read it back via `last_window_size`.
    }

    forward_pointer_grab_passthrough!(D);

    fn button(&mut self, data: &mut D, handle: &mut PointerInnerHandle<'_, D>, event: &ButtonEvent) {
        handle.button(data, event);
        if handle.current_pressed().is_empty() {
            handle.unset_grab(data, event.serial, event.time, true);

            if !self.window.alive() {
                return;
            }

            if self.edges.intersects(ResizeEdge::TOP_LEFT) {
                let mut location = self.window.location();
                let geometry = self.window.geometry();

                if self.edges.intersects(ResizeEdge::LEFT) {
                    location.x =
                        self.initial_window_location.x + (self.initial_window_size.w - geometry.size.w);
                }
                if self.edges.intersects(ResizeEdge::TOP) {
                    location.y =
                        self.initial_window_location.y + (self.initial_window_size.h - geometry.size.h);
                }
                self.window.set_location(location);
            }
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
    fn resize_data_rejects_invalid_edge_combos() {
        assert!(!(ResizeEdge::LEFT | ResizeEdge::RIGHT).is_valid());
    }
}
