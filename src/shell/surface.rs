//! The shell-surface role record: the per-surface state machine described
//! in §4.1 of the design.

use std::cell::RefCell;
use std::rc::Rc;

use smithay::output::Output;
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use smithay::utils::signaling::{Signaler, SignalToken};
use smithay::utils::{IsAlive, Logical, Point, Serial, Size};

use crate::transform::Transform2D;

/// Fullscreen presentation strategy requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenMethod {
    /// Geometry is left untouched; the compositor decides.
    Default,
    /// The surface buffer is scaled to fill the output, preserving aspect
    /// by width (see §4.5 — height-fit is not attempted).
    Scale,
    /// The compositor should switch the output's video mode.
    Driver,
    /// Declared, intentionally a no-op: see the design notes on the `fill`
    /// method for why no transform is applied here.
    Fill,
}

bitflags::bitflags! {
    /// Edges a resize grab or client `resize` request is operating on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ResizeEdge: u32 {
        const NONE        = 0;
        const TOP         = 1;
        const BOTTOM      = 2;
        const LEFT         = 4;
        const TOP_LEFT    = 5;
        const BOTTOM_LEFT = 6;
        const RIGHT        = 8;
        const TOP_RIGHT    = 9;
        const BOTTOM_RIGHT = 10;
    }
}

impl ResizeEdge {
    /// `false` for the empty set or a set naming both edges of one axis —
    /// the configurations the resize grab and the `resize` request reject.
    pub fn is_valid(self) -> bool {
        if self.is_empty() {
            return false;
        }
        let both_horizontal = self.contains(ResizeEdge::LEFT | ResizeEdge::RIGHT);
        let both_vertical = self.contains(ResizeEdge::TOP | ResizeEdge::BOTTOM);
        !both_horizontal && !both_vertical
    }
}

/// State attached to a surface with the `fullscreen` role.
#[derive(Clone)]
pub struct FullscreenState {
    pub method: FullscreenMethod,
    pub framerate: u32,
    pub output: Output,
    /// The opaque backdrop stacked immediately below the surface. Tracked
    /// as a full shell-surface handle (rather than a bare `WlSurface`) so
    /// it can be located in the fullscreen layer by identity when the
    /// owning surface leaves fullscreen (§4.1).
    pub black_surface: ShellSurface,
    pub transform: Option<Transform2D>,
}

impl std::fmt::Debug for FullscreenState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenState")
            .field("method", &self.method)
            .field("framerate", &self.framerate)
            .finish()
    }
}

/// State attached to a surface with the `maximized` role.
#[derive(Debug, Clone)]
pub struct MaximizedState {
    pub output: Output,
}

/// State attached to a surface with the `transient` role.
#[derive(Debug, Clone)]
pub struct TransientState {
    pub parent: WlSurface,
    pub location: Point<i32, Logical>,
    /// "Inactive" transients (e.g. tooltips) are never activated on map.
    pub inactive: bool,
}

/// State attached to a surface with the `popup` role. The pointer/keyboard
/// grab object itself lives in [`crate::grabs::popup_grab`]; this just
/// records the anchor data the grab needs to reconstruct geometry.
#[derive(Debug, Clone)]
pub struct PopupState {
    pub parent: WlSurface,
    pub grab_serial: Serial,
    /// Parent transform snapshot at grab start (§4.6).
    pub parent_transform: Transform2D,
    pub local_anchor: Point<i32, Logical>,
}

/// The closed set of roles a shell-surface can hold.
#[derive(Debug, Clone)]
pub enum Role {
    None,
    Toplevel,
    Transient(TransientState),
    Popup(PopupState),
    Fullscreen(FullscreenState),
    Maximized(MaximizedState),
    Panel { output: Output },
    Background { output: Output },
    Lock,
    Screensaver { output: Output },
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::None => "none",
            Role::Toplevel => "toplevel",
            Role::Transient(_) => "transient",
            Role::Popup(_) => "popup",
            Role::Fullscreen(_) => "fullscreen",
            Role::Maximized(_) => "maximized",
            Role::Panel { .. } => "panel",
            Role::Background { .. } => "background",
            Role::Lock => "lock",
            Role::Screensaver { .. } => "screensaver",
        }
    }

    /// Roles the reset protocol (§4.1) refuses to transition away from.
    pub fn is_locked_role(&self) -> bool {
        matches!(self, Role::Lock | Role::Screensaver { .. })
    }
}

/// The inner, ref-counted record for a surface that has requested a shell
/// role. Shared via [`ShellSurface`]; grabs and layer links hold weak
/// references so the owning surface's destruction is what tears everything
/// down, not the other way around (§9).
pub struct ShellSurfaceInner {
    /// `None` for the synthetic black backdrop surfaces fullscreen
    /// allocates (§4.5): those are owned by the compositor, not backed by
    /// a client's `wl_surface` protocol object.
    pub surface: Option<WlSurface>,
    pub role: Role,
    /// Saved position, valid iff `saved_position.is_some()`. Captured on
    /// entry to fullscreen/maximized, restored on exit (§3, invariant 3).
    pub saved_position: Option<Point<i32, Logical>>,
    pub geometry: smithay::utils::Rectangle<i32, Logical>,
    /// Active rotation/scale transform, if any is installed by a grab or
    /// fullscreen placement.
    pub transform: Option<Transform2D>,
    pub destroyed: Signaler<()>,
    _destroy_token: Option<SignalToken>,
}

impl std::fmt::Debug for ShellSurfaceInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShellSurfaceInner")
            .field("role", &self.role.name())
            .field("saved_position", &self.saved_position)
            .field("geometry", &self.geometry)
            .finish()
    }
}

/// Cheaply-cloned handle to a shell-surface record.
#[derive(Clone)]
pub struct ShellSurface(pub(crate) Rc<RefCell<ShellSurfaceInner>>);

impl std::fmt::Debug for ShellSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.borrow().fmt(f)
    }
}

impl PartialEq for ShellSurface {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl IsAlive for ShellSurface {
    fn alive(&self) -> bool {
        match &self.0.borrow().surface {
            Some(s) => s.alive(),
            // A backdrop has no protocol object to be destroyed; it lives
            // exactly as long as its fullscreen owner keeps it registered.
            None => true,
        }
    }
}

impl ShellSurface {
    pub fn new(surface: WlSurface) -> ShellSurface {
        let destroyed = Signaler::new();
        let signaler = destroyed.clone();
        let token = smithay::wayland::compositor::add_destruction_hook(&surface, move |_data| {
            signaler.signal(());
        });

        ShellSurface(Rc::new(RefCell::new(ShellSurfaceInner {
            surface: Some(surface),
            role: Role::None,
            saved_position: None,
            geometry: smithay::utils::Rectangle::from_loc_and_size((0, 0), (0, 0)),
            transform: None,
            destroyed,
            _destroy_token: Some(token),
        })))
    }

    /// A synthetic backdrop surface: no client, no protocol object, no
    /// destruction subscription to wire up.
    pub(crate) fn new_backdrop() -> ShellSurface {
        ShellSurface(Rc::new(RefCell::new(ShellSurfaceInner {
            surface: None,
            role: Role::None,
            saved_position: None,
            geometry: smithay::utils::Rectangle::from_loc_and_size((0, 0), (0, 0)),
            transform: None,
            destroyed: Signaler::new(),
            _destroy_token: None,
        })))
    }

    pub fn is_backdrop(&self) -> bool {
        self.0.borrow().surface.is_none()
    }

    pub fn wl_surface(&self) -> Option<WlSurface> {
        self.0.borrow().surface.clone()
    }

    pub fn role_name(&self) -> &'static str {
        // SAFETY-free: short-lived borrow, name() doesn't leak the reference.
        let inner = self.0.borrow();
        inner.role.name()
    }

    pub fn with_role<R>(&self, f: impl FnOnce(&Role) -> R) -> R {
        f(&self.0.borrow().role)
    }

    pub fn geometry(&self) -> smithay::utils::Rectangle<i32, Logical> {
        self.0.borrow().geometry
    }

    pub fn set_geometry(&self, geo: smithay::utils::Rectangle<i32, Logical>) {
        self.0.borrow_mut().geometry = geo;
    }

    pub fn location(&self) -> Point<i32, Logical> {
        self.geometry().loc
    }

    pub fn set_location(&self, loc: Point<i32, Logical>) {
        self.0.borrow_mut().geometry.loc = loc;
    }

    pub fn size(&self) -> Size<i32, Logical> {
        self.geometry().size
    }

    pub fn transform(&self) -> Option<Transform2D> {
        self.0.borrow().transform
    }

    pub fn set_transform(&self, transform: Option<Transform2D>) {
        self.0.borrow_mut().transform = transform;
    }

    /// Subscribe to this surface's destruction. The returned token must be
    /// kept alive for as long as the callback should remain registered.
    #[must_use]
    pub fn on_destroy(&self, f: impl FnMut(&()) + 'static) -> SignalToken {
        self.0.borrow().destroyed.register(f)
    }

    /// Save the current position if none is saved yet. Idempotent: entering
    /// fullscreen while already fullscreen must not clobber the original
    /// windowed position.
    pub fn save_position(&self) {
        let mut inner = self.0.borrow_mut();
        if inner.saved_position.is_none() {
            inner.saved_position = Some(inner.geometry.loc);
        }
    }

    /// Restore and clear the saved position, if any.
    pub fn restore_position(&self) {
        let mut inner = self.0.borrow_mut();
        if let Some(pos) = inner.saved_position.take() {
            inner.geometry.loc = pos;
        }
    }

    pub(crate) fn set_role(&self, role: Role) {
        self.0.borrow_mut().role = role;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_edge_rejects_opposite_pairs() {
        assert!(!(ResizeEdge::LEFT | ResizeEdge::RIGHT).is_valid());
        assert!(!(ResizeEdge::TOP | ResizeEdge::BOTTOM).is_valid());
        assert!(!ResizeEdge::NONE.is_valid());
    }

    #[test]
    fn resize_edge_accepts_corners_and_single_edges() {
        assert!(ResizeEdge::TOP.is_valid());
        assert!(ResizeEdge::TOP_LEFT.is_valid());
        assert!((ResizeEdge::TOP | ResizeEdge::LEFT).is_valid());
    }

    #[test]
    fn locked_roles_reject_reset() {
        assert!(Role::Lock.is_locked_role());
        assert!(Role::None.is_locked_role() == false);
    }
}
