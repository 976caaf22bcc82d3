//! Helper process supervision (§4.11): launches the privileged shell
//! helper at startup and respawns it within a bounded leaky-bucket window,
//! mirroring the shape of anvil's own `Command::new(..).spawn()` program
//! launching, but long-lived and restart-aware.

use std::process::{Child, Command};

use tracing::{info, warn};

use crate::error::{Result, ShellError};

/// Deaths within this window count toward the give-up threshold; an older
/// death falls out of the window and the counter resets (§4.11).
const BACKOFF_WINDOW_MS: u32 = 30_000;
/// More than this many deaths inside the window and the supervisor stops
/// respawning.
const MAX_DEATHS_IN_WINDOW: u32 = 5;

/// Tracks one supervised child process and its restart history. Time is
/// always handed in by the caller as a monotonic millisecond counter — this
/// module never reads the wall clock itself (§9, cancellation section).
pub struct HelperSupervisor {
    path: String,
    child: Option<Child>,
    death_count: u32,
    first_death_at: Option<u32>,
    given_up: bool,
}

impl HelperSupervisor {
    pub fn new(path: impl Into<String>) -> Self {
        HelperSupervisor {
            path: path.into(),
            child: None,
            death_count: 0,
            first_death_at: None,
            given_up: false,
        }
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.as_ref().map(|c| c.id())
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    pub fn has_given_up(&self) -> bool {
        self.given_up
    }

    /// Spawn the helper binary. Called once at startup, and again from
    /// [`HelperSupervisor::on_exit`] when a respawn is warranted.
    pub fn spawn(&mut self) -> Result<()> {
        let child = Command::new(&self.path)
            .spawn()
            .map_err(ShellError::HelperLaunch)?;
        info!(pid = child.id(), path = %self.path, "spawned helper process");
        self.child = Some(child);
        Ok(())
    }

    /// Record that the helper process has exited, and respawn it unless the
    /// leaky bucket has tripped. `now_ms` is the caller's monotonic clock at
    /// the moment of the exit notification.
    pub fn on_exit(&mut self, now_ms: u32) {
        self.child = None;

        match self.first_death_at {
            Some(first) if now_ms.saturating_sub(first) > BACKOFF_WINDOW_MS => {
                self.first_death_at = Some(now_ms);
                self.death_count = 0;
            }
            None => self.first_death_at = Some(now_ms),
            _ => {}
        }

        self.death_count += 1;

        if self.death_count > MAX_DEATHS_IN_WINDOW {
            warn!(
                deaths = self.death_count,
                window_ms = BACKOFF_WINDOW_MS,
                "helper process died too many times, giving up"
            );
            self.given_up = true;
            return;
        }

        if let Err(err) = self.spawn() {
            warn!(%err, "failed to respawn helper process");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gives_up_after_too_many_deaths_in_window() {
        let mut s = HelperSupervisor::new("/bin/true");
        // Respawn will fail in a sandboxed test environment anyway; what
        // this test cares about is the counter logic in `on_exit`, not
        // whether the respawn actually succeeds.
        let mut t = 0u32;
        for _ in 0..5 {
            s.on_exit(t);
            t += 1_000;
        }
        assert!(!s.has_given_up());
        s.on_exit(t);
        assert!(s.has_given_up());
    }

    #[test]
    fn window_resets_after_thirty_seconds_of_quiet() {
        let mut s = HelperSupervisor::new("/bin/true");
        s.on_exit(0);
        s.on_exit(1_000);
        s.on_exit(2_000);
        s.on_exit(40_000); // outside the window relative to t=0
        assert_eq!(s.death_count, 1);
        assert!(!s.has_given_up());
    }
}
