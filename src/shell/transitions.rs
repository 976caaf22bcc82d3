//! Public role-transition entry points (§4.1). Each of these runs the
//! reset protocol first, then installs the new role. Fullscreen and
//! maximized additionally return a [`ConfigureHint`] for the caller (the
//! protocol layer) to send to the client — this crate has no wire codec of
//! its own, so it hands back *what* to configure rather than sending it.

use smithay::output::Output;
use smithay::reexports::wayland_server::protocol::wl_surface::WlSurface;
use smithay::utils::{Logical, Point, Size};
use tracing::instrument;

use crate::error::Result;
use crate::shell::map_configure::output_geometry;
use crate::shell::surface::{
    FullscreenMethod, FullscreenState, MaximizedState, PopupState, Role, TransientState,
};
use crate::shell::{ShellState, ShellSurface};
use crate::transform::Transform2D;

/// What the caller should send the client as a `configure` event after a
/// role transition that pins geometry (§4.1).
#[derive(Debug, Clone, Copy)]
pub struct ConfigureHint {
    pub edges: super::surface::ResizeEdge,
    pub size: Size<i32, Logical>,
}

impl ShellState {
    #[instrument(skip(self, surface))]
    pub fn set_toplevel(&mut self, surface: &ShellSurface) -> Result<()> {
        self.reset_role(surface)?;
        surface.set_role(Role::Toplevel);
        Ok(())
    }

    #[instrument(skip(self, surface, parent))]
    pub fn set_transient(
        &mut self,
        surface: &ShellSurface,
        parent: WlSurface,
        location: Point<i32, Logical>,
        inactive: bool,
    ) -> Result<()> {
        self.reset_role(surface)?;
        surface.set_role(Role::Transient(TransientState {
            parent,
            location,
            inactive,
        }));
        surface.set_location(location);
        Ok(())
    }

    #[instrument(skip(self, surface))]
    pub fn set_maximized(&mut self, surface: &ShellSurface, output: Output) -> Result<ConfigureHint> {
        self.reset_role(surface)?;
        surface.save_position();
        let out_geo = output_geometry(&output);
        let panel_h = self.panel_height(&output);
        let size = Size::from((out_geo.size.w, out_geo.size.h - panel_h));
        surface.set_role(Role::Maximized(MaximizedState { output }));
        Ok(ConfigureHint {
            edges: super::surface::ResizeEdge::TOP_LEFT,
            size,
        })
    }

    /// `output` defaults to the output currently under the surface if not
    /// given explicitly by the client.
    #[instrument(skip(self, surface))]
    pub fn set_fullscreen(
        &mut self,
        surface: &ShellSurface,
        method: FullscreenMethod,
        framerate: u32,
        output: Output,
    ) -> Result<ConfigureHint> {
        self.reset_role(surface)?;
        surface.save_position();

        let black_surface = ShellSurface::new_backdrop();
        self.register_backdrop(&black_surface, surface);

        let out_geo = output_geometry(&output);

        surface.set_role(Role::Fullscreen(FullscreenState {
            method,
            framerate,
            output: output.clone(),
            black_surface,
            transform: None,
        }));

        Ok(ConfigureHint {
            edges: super::surface::ResizeEdge::NONE,
            size: out_geo.size,
        })
    }

    #[instrument(skip(self, surface, parent))]
    pub fn set_popup(
        &mut self,
        surface: &ShellSurface,
        parent: WlSurface,
        grab_serial: smithay::utils::Serial,
        local_anchor: Point<i32, Logical>,
        parent_transform: Transform2D,
    ) -> Result<()> {
        self.reset_role(surface)?;
        surface.set_role(Role::Popup(PopupState {
            parent,
            grab_serial,
            parent_transform,
            local_anchor,
        }));
        Ok(())
    }

    /// Helper-only `set_lock_surface(surface)` (§4.1, §4.10): the privileged
    /// helper's answer to `prepare_lock_surface`.
    #[instrument(skip(self, surface))]
    pub fn set_lock_surface(&mut self, surface: &ShellSurface) -> Result<()> {
        self.reset_role(surface)?;
        surface.set_role(Role::Lock);
        Ok(())
    }

    /// Helper-only `screensaver.set_surface(surface, output)` (§4.1, §6).
    #[instrument(skip(self, surface))]
    pub fn set_screensaver(&mut self, surface: &ShellSurface, output: Output) -> Result<()> {
        self.reset_role(surface)?;
        surface.set_role(Role::Screensaver { output });
        self.register_screensaver(surface.clone());
        Ok(())
    }
}
