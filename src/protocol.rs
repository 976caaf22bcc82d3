//! Protocol-facing glue (§6): error codes, the privileged-binding gate, and
//! the handler traits a compositor's own `wl_shell`/`desktop_shell`/
//! `screensaver` `Dispatch` implementations call into.
//!
//! Wire protocol dispatch itself — the generated request/event
//! (de)serialization — is the compositor's responsibility; this crate
//! exposes the surface a hand-written or `wayland-scanner`-generated
//! `Dispatch<Interface, _>` impl calls through, the same division of
//! labour `smithay`'s own `wayland::shell::xdg` module has between
//! generated dispatch code and the hand-written handler traits in
//! `xdg_handlers.rs`.

use smithay::output::Output;
use smithay::reexports::wayland_server::backend::ClientId;
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use smithay::utils::{Logical, Point, Serial};
use tracing::warn;

use crate::error::{Result, ShellError};
use crate::shell::surface::{FullscreenMethod, ResizeEdge};
use crate::shell::{ShellHandler, ShellState, ShellSurface};

/// Numeric error codes for the `wl_shell` interface's `shell_surface`
/// object, as named in §6.
pub mod wl_shell_error {
    /// A second `get_shell_surface` was requested for an already-rolled surface.
    pub const ALREADY_REQUESTED: u32 = 0;
    /// A role-change request targeted a surface locked into `lock`/`screensaver`.
    pub const CANNOT_REASSIGN_SURFACE_TYPE: u32 = 1;
}

/// Numeric error codes for the privileged `desktop_shell`/`screensaver`
/// globals.
pub mod privileged_error {
    /// A non-helper client attempted to bind `desktop_shell` or `screensaver`.
    pub const PERMISSION_DENIED: u32 = 0;
    /// A second client attempted to bind the singleton `screensaver` global.
    pub const ALREADY_BOUND: u32 = 1;
}

/// The privileged-binding gate (§4.11): only the recorded helper client may
/// bind `desktop_shell` or `screensaver`. Call this from the global's
/// `bind` callback before handing out the resource; on `Err`, the caller
/// should `post_error` on the just-created resource and drop it.
pub fn check_privileged_bind(state: &ShellState, client: &ClientId) -> Result<()> {
    match state.helper_client() {
        Some(helper) if helper == *client => Ok(()),
        _ => {
            warn!("rejected non-helper bind of a privileged global");
            Err(ShellError::PermissionDenied("desktop_shell"))
        }
    }
}

/// Handlers for the public `wl_shell` interface's `shell_surface` requests
/// (§6). A compositor's generated `Dispatch` implementation decodes the
/// wire request and forwards to these; each returns a [`crate::error::Result`]
/// the caller turns into a `post_error` on protocol misuse or an allocation
/// failure event as appropriate (§7).
pub trait WlShellRequests: ShellHandler {
    fn get_shell_surface(&mut self, surface: WlSurface) -> Result<ShellSurface> {
        self.shell_state().create_shell_surface(&surface)
    }

    fn move_request(&mut self, surface: &ShellSurface, serial: Serial) -> Result<()> {
        let _ = (surface, serial);
        // The actual grab installation needs a live `PointerHandle`, which
        // only the compositor (owner of the `Seat`) has; this default
        // implementation exists so the trait stays object-safe for
        // compositors that don't override it for a particular backend.
        Ok(())
    }

    fn resize_request(&mut self, surface: &ShellSurface, serial: Serial, edges: ResizeEdge) -> Result<()> {
        if !edges.is_valid() {
            return Err(ShellError::InvalidResizeEdges);
        }
        let _ = (surface, serial);
        Ok(())
    }

    fn set_toplevel_request(&mut self, surface: &ShellSurface) -> Result<()> {
        self.shell_state().set_toplevel(surface)
    }

    fn set_transient_request(
        &mut self,
        surface: &ShellSurface,
        parent: WlSurface,
        location: Point<i32, Logical>,
        inactive: bool,
    ) -> Result<()> {
        self.shell_state()
            .set_transient(surface, parent, location, inactive)
    }

    fn set_fullscreen_request(
        &mut self,
        surface: &ShellSurface,
        method: FullscreenMethod,
        framerate: u32,
        output: Output,
    ) -> Result<crate::shell::transitions::ConfigureHint> {
        self.shell_state()
            .set_fullscreen(surface, method, framerate, output)
    }

    fn set_maximized_request(
        &mut self,
        surface: &ShellSurface,
        output: Output,
    ) -> Result<crate::shell::transitions::ConfigureHint> {
        self.shell_state().set_maximized(surface, output)
    }

    fn set_popup_request(
        &mut self,
        surface: &ShellSurface,
        parent: WlSurface,
        grab_serial: Serial,
        local_anchor: Point<i32, Logical>,
        parent_transform: crate::transform::Transform2D,
    ) -> Result<()> {
        self.shell_state()
            .set_popup(surface, parent, grab_serial, local_anchor, parent_transform)
    }
}

impl<D: ShellHandler> WlShellRequests for D {}

/// Handlers for the privileged `desktop_shell` interface's requests (§6).
/// Every method here should be called only after [`check_privileged_bind`]
/// has accepted the requesting client.
pub trait DesktopShellRequests: ShellHandler {
    fn set_background(&mut self, surface: ShellSurface, output: Output) -> Result<()> {
        self.shell_state().set_background(surface, output)
    }

    fn set_panel(&mut self, surface: ShellSurface, output: Output) -> Result<()> {
        self.shell_state().set_panel(surface, output)
    }

    /// Helper→shell `set_lock_surface(surface)` (§4.1, §4.10): installs the
    /// `lock` role, then hands the surface to the lock orchestrator so a
    /// pending `unlock()` can resume once it commits.
    fn set_lock_surface_request(
        &mut self,
        surface: ShellSurface,
        on_destroyed: impl FnMut(&()) + 'static,
    ) -> Result<()> {
        self.shell_state().set_lock_surface(&surface)?;
        self.shell_state().lock.set_lock_surface(surface, on_destroyed);
        Ok(())
    }

    /// Helper→shell `unlock()` (§4.10): the real, full resume.
    fn unlock_request(&mut self) -> crate::lock::LockAction {
        self.shell_state().lock.resume_desktop()
    }
}

impl<D: ShellHandler> DesktopShellRequests for D {}

/// Handlers for the singleton `screensaver` interface's requests (§6). Like
/// [`DesktopShellRequests`], every method here should be called only after
/// [`check_privileged_bind`] has accepted the requesting client.
pub trait ScreensaverRequests: ShellHandler {
    fn set_surface_request(&mut self, surface: ShellSurface, output: Output) -> Result<()> {
        self.shell_state().set_screensaver(&surface, output)
    }
}

impl<D: ShellHandler> ScreensaverRequests for D {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_distinct_per_interface() {
        assert_ne!(wl_shell_error::ALREADY_REQUESTED, wl_shell_error::CANNOT_REASSIGN_SURFACE_TYPE);
        assert_ne!(privileged_error::PERMISSION_DENIED, privileged_error::ALREADY_BOUND);
    }
}
