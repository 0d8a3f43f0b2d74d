//! Interpreter process control
//!
//! This module provides:
//! - `RunState`, the per-story record of a running interpreter
//! - `Subscription`, a cancellable token for deferred callbacks
//! - `ProcessRunner`, a `ProjectRunner` that spawns interpreters with
//!   `std::process` and reaps them from the event loop via `poll`
//!

use std::cell::Cell;
use std::collections::HashMap;
use std::num::NonZeroU64;
use std::process::{Child, Command};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{Result, StoryError};
use crate::services::ProjectRunner;

// ============================================================================
// Subscriptions
// ============================================================================

/// Handle to a registered deferred callback.
///
/// Clones share the cancelled flag. Cancelling is synchronous, so once
/// `cancel` returns the callback will never be delivered.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: NonZeroU64,
    cancelled: Rc<Cell<bool>>,
}

impl Subscription {
    fn new(id: NonZeroU64) -> Self {
        Self {
            id,
            cancelled: Rc::new(Cell::new(false)),
        }
    }

    pub fn id(&self) -> NonZeroU64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

// ============================================================================
// Run state
// ============================================================================

/// A running interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterProcess {
    pub pid: u32,
    pub started_at: DateTime<Utc>,
}

/// Interpreter bookkeeping carried by each story
#[derive(Debug, Default)]
pub struct RunState {
    pub interp_process: Option<InterpreterProcess>,
    /// Fires when the interpreter exits
    pub child_exit: Option<Subscription>,
    /// Fires to commit typed input into the running game
    pub commit: Option<Subscription>,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        self.interp_process.is_some()
    }

    /// Forget the interpreter after its exit was observed.
    ///
    /// Does nothing unless `pid` is the process this state tracks.
    pub fn mark_exited(&mut self, pid: u32) {
        if self.interp_process.as_ref().map(|p| p.pid) != Some(pid) {
            return;
        }
        self.interp_process = None;
        if let Some(sub) = self.child_exit.take() {
            sub.cancel();
        }
        if let Some(sub) = self.commit.take() {
            sub.cancel();
        }
    }

    fn cancel_all(&mut self) {
        for sub in [self.child_exit.take(), self.commit.take()].into_iter().flatten() {
            sub.cancel();
        }
    }
}

// ============================================================================
// Process runner
// ============================================================================

/// Exit observed by `ProcessRunner::poll`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessExit {
    pub pid: u32,
    /// None when the process was terminated by a signal
    pub code: Option<i32>,
}

struct Tracked {
    child: Child,
    on_exit: Subscription,
}

/// Spawns interpreters and tracks them until they exit or are stopped
#[derive(Default)]
pub struct ProcessRunner {
    children: HashMap<u32, Tracked>,
    last_subscription: u64,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribe(&mut self) -> Subscription {
        self.last_subscription += 1;
        let id = NonZeroU64::new(self.last_subscription).unwrap_or(NonZeroU64::MIN);
        Subscription::new(id)
    }

    /// Spawn the interpreter described by `command` for a story
    pub fn start(&mut self, run_state: &mut RunState, mut command: Command) -> Result<()> {
        if run_state.is_running() {
            return Err(StoryError::AlreadyRunning);
        }

        let child = command
            .spawn()
            .map_err(|e| StoryError::ProcessSpawn(e.to_string()))?;
        let pid = child.id();
        let on_exit = self.subscribe();

        info!(
            event_type = "interpreter",
            action = "started",
            pid = pid,
            program = ?command.get_program(),
            "Interpreter started"
        );

        self.children.insert(
            pid,
            Tracked {
                child,
                on_exit: on_exit.clone(),
            },
        );
        run_state.interp_process = Some(InterpreterProcess {
            pid,
            started_at: Utc::now(),
        });
        run_state.child_exit = Some(on_exit);
        Ok(())
    }

    /// Register the commit callback, replacing any earlier registration
    pub fn watch_commit(&mut self, run_state: &mut RunState) -> Subscription {
        let sub = self.subscribe();
        if let Some(old) = run_state.commit.replace(sub.clone()) {
            old.cancel();
        }
        sub
    }

    /// Event-loop tick: reap interpreters that have exited.
    ///
    /// Children whose subscription was cancelled, or whose status cannot
    /// be queried, are killed and waited for before being forgotten. Their
    /// exits are not reported.
    pub fn poll(&mut self) -> Vec<ProcessExit> {
        let mut finished = Vec::new();
        let mut exited = Vec::new();
        let mut abandoned = Vec::new();

        for (&pid, tracked) in self.children.iter_mut() {
            if tracked.on_exit.is_cancelled() {
                abandoned.push(pid);
                continue;
            }
            match tracked.child.try_wait() {
                Ok(Some(status)) => {
                    debug!(pid = pid, status = %status, "Interpreter exited");
                    finished.push(ProcessExit {
                        pid,
                        code: status.code(),
                    });
                    exited.push(pid);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(pid = pid, error = %e, "Failed to query interpreter status");
                    abandoned.push(pid);
                }
            }
        }

        for pid in exited {
            self.children.remove(&pid);
        }
        for pid in abandoned {
            if let Some(tracked) = self.children.remove(&pid) {
                terminate(tracked);
                debug!(pid = pid, "Abandoned interpreter killed");
            }
        }
        finished
    }

    pub fn active_count(&self) -> usize {
        self.children.len()
    }

    /// Kill every tracked interpreter. Used at shutdown.
    pub fn kill_all(&mut self) {
        for (pid, tracked) in self.children.drain() {
            terminate(tracked);
            debug!(pid = pid, "Interpreter killed at shutdown");
        }
    }
}

/// Cancel the exit callback, then kill and reap the child
fn terminate(mut tracked: Tracked) {
    tracked.on_exit.cancel();
    // The process may already be gone
    let _ = tracked.child.kill();
    let _ = tracked.child.wait();
}

impl ProjectRunner for ProcessRunner {
    fn stop(&mut self, run_state: &mut RunState) {
        if let Some(process) = run_state.interp_process.take() {
            if let Some(tracked) = self.children.remove(&process.pid) {
                terminate(tracked);
            }
            info!(
                event_type = "interpreter",
                action = "stopped",
                pid = process.pid,
                "Interpreter stopped"
            );
        }
        run_state.cancel_all();
    }
}

impl Drop for ProcessRunner {
    fn drop(&mut self) {
        self.kill_all();
    }
}
