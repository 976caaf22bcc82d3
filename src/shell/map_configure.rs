//! The map (§4.13) and configure (§4.12) hooks the compositor calls on
//! every client surface commit.

use rand::distributions::{Distribution, Uniform};
use smithay::output::Output;
use smithay::utils::{Logical, Point, Rectangle, Scale, Size};
use tracing::{instrument, trace};

use crate::shell::activation::activate;
use crate::shell::layer::LayerKind;
use crate::shell::surface::{FullscreenMethod, Role};
use crate::shell::{ShellState, ShellSurface};

/// The rectangle a toplevel's random initial placement is drawn from
/// (§4.13: `[10, 410) x [10, 410)`).
const TOPLEVEL_PLACEMENT_MAX: i32 = 410;
const TOPLEVEL_PLACEMENT_MIN: i32 = 10;

pub fn output_geometry(output: &Output) -> Rectangle<i32, Logical> {
    let mode = output.current_mode();
    let size = mode.map(|m| m.size).unwrap_or_default();
    let scale = output.current_scale().fractional_scale();
    Rectangle::from_loc_and_size(
        output.current_location(),
        size.to_f64().to_logical(Scale::from(scale)).to_i32_round(),
    )
}

/// Compute the black backdrop's placement and, for `scale`, the transform
/// to apply to the fullscreened surface (§4.5).
pub fn fullscreen_placement(
    output: &Output,
    surface_size: Size<i32, Logical>,
    method: FullscreenMethod,
) -> (Rectangle<i32, Logical>, Option<crate::Transform2D>) {
    let out_geo = output_geometry(output);
    let backdrop = out_geo;

    let transform = match method {
        FullscreenMethod::Scale if surface_size.w > 0 => {
            let factor = out_geo.size.w as f64 / surface_size.w as f64;
            Some(crate::Transform2D::scale(factor))
        }
        _ => None,
    };

    (backdrop, transform)
}

/// Centre `size` within `within`.
fn centered(size: Size<i32, Logical>, within: Rectangle<i32, Logical>) -> Point<i32, Logical> {
    Point::from((
        within.loc.x + (within.size.w - size.w) / 2,
        within.loc.y + (within.size.h - size.h) / 2,
    ))
}

impl ShellState {
    /// §4.13: initial placement and stacking of a just-mapped surface.
    #[instrument(skip(self, surface, default_output))]
    pub fn map_surface(&mut self, surface: &ShellSurface, default_output: &Output) {
        let role = surface.with_role(|r| r.clone());
        let size = surface.size();

        let (layer, location) = match &role {
            Role::Background { output } => (LayerKind::Background, output_geometry(output).loc),
            Role::Panel { .. } => (LayerKind::Panel, surface.location()),
            Role::Lock => (LayerKind::Lock, centered(size, output_geometry(default_output))),
            Role::Screensaver { output } => {
                (LayerKind::Lock, centered(size, output_geometry(output)))
            }
            Role::Fullscreen(state) => {
                let (backdrop, transform) = fullscreen_placement(&state.output, size, state.method);
                surface.set_transform(transform);
                state.black_surface.set_geometry(backdrop);
                (LayerKind::Fullscreen, centered(size, output_geometry(&state.output)))
            }
            Role::Maximized(state) => {
                let out_geo = output_geometry(&state.output);
                let panel_h = self.panel_height(&state.output);
                (
                    LayerKind::Toplevel,
                    Point::from((out_geo.loc.x, out_geo.loc.y + panel_h)),
                )
            }
            Role::Popup(_) | Role::Transient(_) => {
                // §9: preserved verbatim -- popups fall through to the
                // `None` branch's offset-by-requested-delta behaviour
                // rather than getting their own placement rule.
                (LayerKind::Toplevel, surface.location())
            }
            Role::Toplevel | Role::None => {
                let mut rng = rand::thread_rng();
                let between = Uniform::from(TOPLEVEL_PLACEMENT_MIN..TOPLEVEL_PLACEMENT_MAX);
                (
                    LayerKind::Toplevel,
                    Point::from((between.sample(&mut rng), between.sample(&mut rng))),
                )
            }
        };

        surface.set_location(location);

        match &role {
            Role::Fullscreen(state) => {
                // Backdrop first, then the surface: push_top appends, so
                // the surface ends up immediately above its backdrop.
                self.layers.fullscreen.push_top(state.black_surface.clone());
                self.layers.fullscreen.push_top(surface.clone());
            }
            Role::Panel { .. } => self.layers.panel.push_top(surface.clone()),
            Role::Background { .. } => {} // already pushed via set_background
            _ => self.layers.layer_mut(layer).push_top(surface.clone()),
        }

        let activatable = matches!(
            role,
            Role::Toplevel | Role::Transient(_) | Role::Fullscreen(_) | Role::Maximized(_)
        );
        if activatable && !self.layers.is_locked() {
            activate(self, surface);
        }

        trace!(role = role.name(), ?location, "mapped surface");
    }

    /// §4.12: a client committed new geometry on an already-mapped surface.
    #[instrument(skip(self, surface))]
    pub fn configure_surface(&mut self, surface: &ShellSurface, size: Size<i32, Logical>) {
        let role = surface.with_role(|r| r.clone());
        match role {
            Role::Screensaver { output } => {
                surface.set_location(centered(size, output_geometry(&output)));
            }
            Role::Fullscreen(state) => {
                // §9: the upstream `prev_surface_type` guard that should
                // have limited this to role *transitions* was never wired
                // up, so the recorded behaviour is to restack on every
                // fullscreen configure. We match that rather than the
                // unreachable intent.
                let (backdrop, transform) = fullscreen_placement(&state.output, size, state.method);
                surface.set_transform(transform);
                state.black_surface.set_geometry(backdrop);
                surface.set_location(centered(size, output_geometry(&state.output)));
                self.layers.fullscreen.push_top(state.black_surface.clone());
                self.layers.fullscreen.push_top(surface.clone());
            }
            Role::Maximized(state) => {
                let out_geo = output_geometry(&state.output);
                let panel_h = self.panel_height(&state.output);
                surface.set_location(Point::from((out_geo.loc.x, out_geo.loc.y + panel_h)));
            }
            _ => {}
        }

        let mut geo = surface.geometry();
        geo.size = size;
        surface.set_geometry(geo);
    }
}
