//! Surface role state machine and layer stacking: the heart of the shell.
//!
//! [`ShellState`] is the single piece of state the compositor embeds (one
//! instance per running compositor). Everything else in this crate —
//! grabs, the lock orchestrator, the protocol bindings — borrows it through
//! the [`ShellHandler`] trait so that a compositor can store it alongside
//! its own state without this crate dictating the surrounding struct.

pub mod activation;
pub mod layer;
pub mod map_configure;
pub mod surface;
pub mod transitions;

use std::collections::HashMap;

use smithay::input::SeatHandler;
use smithay::output::Output;
use smithay::reexports::wayland_server::backend::ObjectId;
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use tracing::{debug, instrument, warn};

use crate::error::{Result, ShellError};
use crate::lock::LockState;

pub use layer::{Layer, LayerKind, LayerStack};
pub use surface::{
    FullscreenMethod, FullscreenState, MaximizedState, PopupState, ResizeEdge, Role, ShellSurface,
    TransientState,
};

/// What a host compositor state type must provide so grabs and hooks in
/// this crate can reach the shell's bookkeeping and present the right
/// focus type to smithay's seat machinery.
///
/// Mirrors the shape of anvil's `Backend` trait: the compositor picks its
/// own top-level state struct, and this crate is generic over it rather
/// than owning the event loop itself.
pub trait ShellHandler:
    SeatHandler<PointerFocus = WlSurface, KeyboardFocus = WlSurface> + Sized + 'static
{
    fn shell_state(&mut self) -> &mut ShellState;
}

/// All shell-policy state for one compositor instance.
pub struct ShellState {
    pub layers: LayerStack,
    pub lock: LockState,
    surfaces: HashMap<ObjectId, ShellSurface>,
    panels: HashMap<ObjectId, ShellSurface>,
    backgrounds: HashMap<ObjectId, ShellSurface>,
    screensavers: HashMap<ObjectId, ShellSurface>,
    /// Maps a fullscreen black backdrop's identity to the fullscreen
    /// surface it belongs to, so a pointer hit on the backdrop can redirect
    /// to the real surface (§4.7). Backdrops have no `wl_surface`, so this
    /// is keyed by pointer identity rather than `ObjectId`.
    backdrop_owners_by_ptr: HashMap<usize, ShellSurface>,
    pub(crate) helper_client: Option<smithay::reexports::wayland_server::backend::ClientId>,
}

impl Default for ShellState {
    fn default() -> Self {
        ShellState::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        ShellState {
            layers: LayerStack::new(),
            lock: LockState::new(),
            surfaces: HashMap::new(),
            panels: HashMap::new(),
            backgrounds: HashMap::new(),
            screensavers: HashMap::new(),
            backdrop_owners_by_ptr: HashMap::new(),
            helper_client: None,
        }
    }

    /// Backdrops don't have a `wl_surface` to key by; they get a stable
    /// identity from the `Rc` pointer of their `ShellSurfaceInner` instead.
    fn backdrop_key(backdrop: &ShellSurface) -> usize {
        std::rc::Rc::as_ptr(&backdrop.0) as usize
    }

    pub(crate) fn register_backdrop(&mut self, backdrop: &ShellSurface, owner: &ShellSurface) {
        self.backdrop_owners_by_ptr
            .insert(Self::backdrop_key(backdrop), owner.clone());
    }

    pub(crate) fn unregister_backdrop(&mut self, backdrop: &ShellSurface) {
        self.backdrop_owners_by_ptr.remove(&Self::backdrop_key(backdrop));
    }

    pub(crate) fn backdrop_owner(&self, candidate: &ShellSurface) -> Option<ShellSurface> {
        self.backdrop_owners_by_ptr
            .get(&Self::backdrop_key(candidate))
            .cloned()
    }

    /// Register a brand-new shell-surface for `surface`. Fails per
    /// invariant 1 (§3/§8) if one already exists.
    #[instrument(skip(self, surface))]
    pub fn create_shell_surface(&mut self, surface: &WlSurface) -> Result<ShellSurface> {
        let id = surface.id();
        if self.surfaces.contains_key(&id) {
            return Err(ShellError::AlreadyHasRole);
        }
        let handle = ShellSurface::new(surface.clone());
        self.surfaces.insert(id, handle.clone());
        debug!("created shell surface");
        Ok(handle)
    }

    pub fn shell_surface(&self, surface: &WlSurface) -> Option<ShellSurface> {
        self.surfaces.get(&surface.id()).cloned()
    }

    /// Drop bookkeeping for a destroyed surface. Called from the surface's
    /// destruction subscription, never synchronously from client request
    /// handling (§3 lifecycles).
    pub fn forget_surface(&mut self, surface: &ShellSurface) {
        let id = surface
            .wl_surface()
            .expect("forget_surface is only called for client surfaces")
            .id();
        self.surfaces.remove(&id);
        self.panels.remove(&id);
        self.backgrounds.remove(&id);
        self.screensavers.remove(&id);
        self.layers.remove_everywhere(surface);
    }

    /// Register a just-created screensaver surface (§4.1's `screensaver.set_surface`).
    pub(crate) fn register_screensaver(&mut self, surface: ShellSurface) {
        let id = surface
            .wl_surface()
            .expect("screensaver surfaces are always client surfaces")
            .id();
        self.screensavers.insert(id, surface);
    }

    /// Every registered screensaver surface (§3's "lists of background,
    /// panel, and screensaver surfaces"). Callers deciding whether the
    /// screensaver is showing (§4.10) should filter these by [`IsAlive`].
    ///
    /// [`IsAlive`]: smithay::utils::IsAlive
    pub fn screensaver_surfaces(&self) -> impl Iterator<Item = &ShellSurface> {
        self.screensavers.values()
    }

    /// The role-reset protocol (§4.1): every public role-transition request
    /// runs this first. Returns an error without mutating state when the
    /// surface is locked into `lock`/`screensaver`.
    pub fn reset_role(&mut self, surface: &ShellSurface) -> Result<()> {
        let current = surface.with_role(|r| r.clone());
        if current.is_locked_role() {
            warn!(role = current.name(), "refused to reassign locked role");
            return Err(ShellError::CannotReassignRole);
        }

        match current {
            Role::Fullscreen(state) => {
                surface.set_transform(None);
                self.layers.fullscreen.remove(&state.black_surface);
                self.unregister_backdrop(&state.black_surface);
                surface.restore_position();
            }
            Role::Maximized(_) => {
                surface.restore_position();
            }
            Role::Panel { .. } => {
                if let Some(s) = surface.wl_surface() {
                    self.panels.remove(&s.id());
                }
                self.layers.panel.remove(surface);
            }
            Role::Background { .. } => {
                if let Some(s) = surface.wl_surface() {
                    self.backgrounds.remove(&s.id());
                }
                self.layers.background.remove(surface);
            }
            _ => {}
        }

        surface.set_role(Role::None);
        Ok(())
    }

    /// Evict whatever panel is currently bound to `output` (invariant 5,
    /// §3/§8) and bind `surface` as the new one.
    pub fn set_panel(&mut self, surface: ShellSurface, output: Output) -> Result<()> {
        self.reset_role(&surface)?;
        if let Some(previous) = self
            .panels
            .values()
            .find(|p| p.with_role(|r| matches!(r, Role::Panel { output: o } if *o == output)))
            .cloned()
        {
            self.reset_role(&previous).ok();
        }
        surface.set_role(Role::Panel { output });
        let id = surface
            .wl_surface()
            .expect("panels are always client surfaces")
            .id();
        self.panels.insert(id, surface.clone());
        self.layers.panel.push_top(surface);
        Ok(())
    }

    pub fn set_background(&mut self, surface: ShellSurface, output: Output) -> Result<()> {
        self.reset_role(&surface)?;
        if let Some(previous) = self
            .backgrounds
            .values()
            .find(|p| p.with_role(|r| matches!(r, Role::Background { output: o } if *o == output)))
            .cloned()
        {
            self.reset_role(&previous).ok();
        }
        surface.set_role(Role::Background { output });
        let id = surface
            .wl_surface()
            .expect("backgrounds are always client surfaces")
            .id();
        self.backgrounds.insert(id, surface.clone());
        self.layers.background.push_bottom(surface);
        Ok(())
    }

    /// The client currently bound as the privileged helper, if any (§4.11).
    pub fn helper_client(&self) -> Option<smithay::reexports::wayland_server::backend::ClientId> {
        self.helper_client.clone()
    }

    pub(crate) fn set_helper_client(&mut self, client: smithay::reexports::wayland_server::backend::ClientId) {
        self.helper_client = Some(client);
    }

    pub fn panel_height(&self, output: &Output) -> i32 {
        self.panels
            .values()
            .find(|p| p.with_role(|r| matches!(r, Role::Panel { output: o } if o == output)))
            .map(|p| p.size().h)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_is_a_noop_for_role_none() {
        // Role::None has no side effects in reset_role's match; this is
        // exercised indirectly through ShellState::reset_role in the
        // integration tests under tests/, which spin up a real Display.
        assert_eq!(Role::None.name(), "none");
    }
}
