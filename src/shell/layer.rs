//! Layer stacking (§4.2): an ordered list of layers, each an ordered list
//! of surfaces, concatenating into the desktop's global Z-order.

use crate::shell::surface::ShellSurface;

/// Identifies which of the shell's five layers a surface is stacked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Background,
    Panel,
    Toplevel,
    Fullscreen,
    Lock,
}

/// One layer: a simple bottom-to-top ordered list.
#[derive(Debug, Default)]
pub struct Layer {
    surfaces: Vec<ShellSurface>,
}

impl Layer {
    fn position_of(&self, surface: &ShellSurface) -> Option<usize> {
        self.surfaces.iter().position(|s| s == surface)
    }

    pub fn push_top(&mut self, surface: ShellSurface) {
        self.remove(&surface);
        self.surfaces.push(surface);
    }

    pub fn push_bottom(&mut self, surface: ShellSurface) {
        self.remove(&surface);
        self.surfaces.insert(0, surface);
    }

    /// Insert `surface` immediately below `sibling`, or at the top if the
    /// sibling is not (yet) present in this layer.
    pub fn insert_below(&mut self, surface: ShellSurface, sibling: &ShellSurface) {
        self.remove(&surface);
        match self.position_of(sibling) {
            Some(idx) => self.surfaces.insert(idx, surface),
            None => self.surfaces.push(surface),
        }
    }

    pub fn remove(&mut self, surface: &ShellSurface) -> bool {
        if let Some(idx) = self.position_of(surface) {
            self.surfaces.remove(idx);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, surface: &ShellSurface) -> bool {
        self.position_of(surface).is_some()
    }

    /// Bottom-to-top iteration, i.e. painting order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ShellSurface> {
        self.surfaces.iter()
    }

    pub fn retain_alive(&mut self) {
        self.surfaces.retain(|s| {
            use smithay::utils::IsAlive;
            s.alive()
        });
    }
}

/// The shell's five layers plus the locked/unlocked splicing behaviour
/// described in §4.10.
#[derive(Debug, Default)]
pub struct LayerStack {
    pub background: Layer,
    pub panel: Layer,
    pub toplevel: Layer,
    pub fullscreen: Layer,
    pub lock: Layer,
    locked: bool,
}

impl LayerStack {
    pub fn new() -> Self {
        LayerStack::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Splice the lock layer into the global order, spliced above cursor,
    /// and take panel/toplevel/fullscreen out. The layers themselves are
    /// untouched — only which ones participate in `stacking_order` changes.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// The reverse of [`LayerStack::lock`].
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::Background => &mut self.background,
            LayerKind::Panel => &mut self.panel,
            LayerKind::Toplevel => &mut self.toplevel,
            LayerKind::Fullscreen => &mut self.fullscreen,
            LayerKind::Lock => &mut self.lock,
        }
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Background => &self.background,
            LayerKind::Panel => &self.panel,
            LayerKind::Toplevel => &self.toplevel,
            LayerKind::Fullscreen => &self.fullscreen,
            LayerKind::Lock => &self.lock,
        }
    }

    /// Remove `surface` from whichever layer currently holds it.
    pub fn remove_everywhere(&mut self, surface: &ShellSurface) {
        self.background.remove(surface);
        self.panel.remove(surface);
        self.toplevel.remove(surface);
        self.fullscreen.remove(surface);
        self.lock.remove(surface);
    }

    /// Global bottom-to-top painting order: invariant 4 in §8 — while
    /// locked, panel/toplevel/fullscreen never appear here.
    pub fn stacking_order(&self) -> Vec<ShellSurface> {
        let mut out = Vec::new();
        out.extend(self.background.iter().cloned());
        if !self.locked {
            out.extend(self.panel.iter().cloned());
            out.extend(self.toplevel.iter().cloned());
            out.extend(self.fullscreen.iter().cloned());
        }
        out.extend(self.lock.iter().cloned());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Constructing a ShellSurface needs a live WlSurface, which needs a
    // running wayland-server Display; full stacking-order scenarios with
    // real surfaces live in shell::tests instead. This covers the lock
    // flag toggle in isolation.
    #[test]
    fn lock_toggle_is_idempotent_and_reversible() {
        let mut stack = LayerStack::new();
        assert!(!stack.is_locked());
        stack.lock();
        assert!(stack.is_locked());
        stack.lock();
        assert!(stack.is_locked());
        stack.unlock();
        assert!(!stack.is_locked());
    }
}
