//! Lock/screensaver orchestration (§4.10, §4.11).
//!
//! [`LockState`] is the FSM the compositor drives through `lock()`/`unlock()`
//! calls and the privileged helper's own `set_lock_surface`/`unlock`
//! requests. It owns the [`helper::HelperSupervisor`] and
//! [`screensaver::ScreensaverProcess`] records, but never touches
//! [`crate::shell::LayerStack`] directly — callers read the returned
//! [`LockAction`] and drive the layer splice, idle-time, and DPMS side
//! effects themselves, the same way [`crate::shell::transitions`] hands back
//! a [`crate::shell::transitions::ConfigureHint`] instead of sending wire
//! events itself.

pub mod helper;
pub mod screensaver;

use smithay::utils::signaling::SignalToken;
use tracing::{instrument, warn};

use crate::shell::ShellSurface;

pub use helper::HelperSupervisor;
pub use screensaver::ScreensaverProcess;

/// The four states named in §4.10. `Locking`/`Unlocking` are the brief
/// handshake windows while the shell is waiting on the privileged helper;
/// in this crate's synchronous call model they collapse to `Locked` within
/// the same call that entered them except when a helper round-trip
/// (`prepare_lock_surface` / `set_lock_surface`) is actually outstanding —
/// see the `unlock` design note below and in `DESIGN.md`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPhase {
    Unlocked,
    Locking,
    Locked,
    Unlocking,
}

/// What the caller (the compositor embedding this crate) should do in
/// response to a lock/unlock transition. This crate has no access to the
/// output list, DPMS controls, or the compositor's idle timer, so it hands
/// back instructions instead of performing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockAction {
    /// Nothing to do.
    None,
    /// Splice panel/toplevel/fullscreen out and the lock layer in; set the
    /// compositor's idle timer to `idle_time_ms` if screensaver surfaces
    /// are already showing.
    SpliceLocked { idle_time_ms: Option<u32> },
    /// Cycle every output's DPMS to standby (already-locked re-`lock()`).
    CycleDpms,
    /// Wake the screen without resuming the desktop (screensaver still
    /// hiding it) — issued when `unlock()` is called but no lock surface
    /// is ready yet.
    Wake,
    /// Send the helper `prepare_lock_surface` (gated by `prepare_event_sent`
    /// so it's only sent once per lock session).
    SendPrepareLockSurface,
    /// Full resume: splice lock layer out, panel/toplevel/fullscreen back
    /// in, restore the compositor's configured idle time, wake, damage
    /// everything.
    ResumeDesktop,
}

pub struct LockState {
    phase: LockPhase,
    prepare_event_sent: bool,
    lock_surface: Option<ShellSurface>,
    _lock_surface_destroy_token: Option<SignalToken>,
}

impl Default for LockState {
    fn default() -> Self {
        LockState::new()
    }
}

impl LockState {
    pub fn new() -> Self {
        LockState {
            phase: LockPhase::Unlocked,
            prepare_event_sent: false,
            lock_surface: None,
            _lock_surface_destroy_token: None,
        }
    }

    pub fn phase(&self) -> LockPhase {
        self.phase
    }

    /// Invariant 4 (§8): whether panel/toplevel/fullscreen are currently
    /// excluded from the global stacking order.
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, LockPhase::Locked | LockPhase::Unlocking)
    }

    pub fn lock_surface(&self) -> Option<ShellSurface> {
        self.lock_surface.clone()
    }

    /// Compositor→shell `lock()` (§4.10).
    #[instrument(skip(self))]
    pub fn lock(&mut self, screensaver_showing: bool, idle_time_ms: u32) -> LockAction {
        match self.phase {
            LockPhase::Unlocked => {
                self.phase = LockPhase::Locked;
                self.prepare_event_sent = false;
                LockAction::SpliceLocked {
                    idle_time_ms: screensaver_showing.then_some(idle_time_ms),
                }
            }
            LockPhase::Locked | LockPhase::Locking | LockPhase::Unlocking => LockAction::CycleDpms,
        }
    }

    /// Compositor→shell `unlock()`: a request to wake the screen, not
    /// necessarily to resume the desktop (§4.10).
    #[instrument(skip(self))]
    pub fn compositor_unlock(&mut self, helper_running: bool) -> LockAction {
        if self.phase == LockPhase::Unlocked || self.lock_surface.is_some() {
            return LockAction::Wake;
        }
        if !helper_running {
            return self.resume_desktop();
        }
        if self.prepare_event_sent {
            return LockAction::None;
        }
        self.phase = LockPhase::Unlocking;
        self.prepare_event_sent = true;
        LockAction::SendPrepareLockSurface
    }

    /// Helper→shell `set_lock_surface(surface)` (§4.10): recorded only
    /// while actually locked.
    #[instrument(skip(self, surface))]
    pub fn set_lock_surface(&mut self, surface: ShellSurface, on_destroyed: impl FnMut(&()) + 'static) {
        if !matches!(self.phase, LockPhase::Locked | LockPhase::Unlocking) {
            warn!("ignored set_lock_surface while not locked");
            return;
        }
        let token = surface.on_destroy(on_destroyed);
        self.lock_surface = Some(surface);
        self._lock_surface_destroy_token = Some(token);
    }

    /// Called from the lock surface's destruction subscription: clears the
    /// reference so the desktop can be force-resumed on the next unlock.
    pub fn clear_lock_surface(&mut self) {
        self.lock_surface = None;
        self._lock_surface_destroy_token = None;
    }

    /// Helper→shell `unlock()`: the real, full resume (§4.10).
    #[instrument(skip(self))]
    pub fn resume_desktop(&mut self) -> LockAction {
        if self.phase == LockPhase::Unlocked {
            return LockAction::None;
        }
        self.phase = LockPhase::Unlocked;
        self.prepare_event_sent = false;
        self.lock_surface = None;
        self._lock_surface_destroy_token = None;
        LockAction::ResumeDesktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_from_unlocked_splices_layers() {
        let mut lock = LockState::new();
        let action = lock.lock(true, 120_000);
        assert_eq!(lock.phase(), LockPhase::Locked);
        assert!(lock.is_locked());
        assert_eq!(
            action,
            LockAction::SpliceLocked {
                idle_time_ms: Some(120_000)
            }
        );
    }

    #[test]
    fn relocking_cycles_dpms_instead_of_resplicing() {
        let mut lock = LockState::new();
        lock.lock(false, 0);
        assert_eq!(lock.lock(false, 0), LockAction::CycleDpms);
    }

    #[test]
    fn unlock_without_helper_resumes_immediately() {
        let mut lock = LockState::new();
        lock.lock(false, 0);
        let action = lock.compositor_unlock(false);
        assert_eq!(action, LockAction::ResumeDesktop);
        assert!(!lock.is_locked());
    }

    #[test]
    fn unlock_with_helper_sends_prepare_once() {
        let mut lock = LockState::new();
        lock.lock(false, 0);
        assert_eq!(lock.compositor_unlock(true), LockAction::SendPrepareLockSurface);
        assert_eq!(lock.compositor_unlock(true), LockAction::None);
    }

    #[test]
    fn unlock_when_never_locked_just_wakes() {
        let mut lock = LockState::new();
        assert_eq!(lock.compositor_unlock(true), LockAction::Wake);
    }

    #[test]
    fn resume_desktop_is_a_noop_when_already_unlocked() {
        let mut lock = LockState::new();
        assert_eq!(lock.resume_desktop(), LockAction::None);
    }
}
