// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Fixed-window permit gate for outbound registry calls.
//!
//! The gate admits at most `capacity` calls per window and parks excess
//! callers until capacity returns. Capacity comes back two ways:
//!
//! 1. A caller drops its [`Permit`] before the window ends.
//! 2. The window timer fires and restores the counter to full capacity,
//!    regardless of how many permits are still in flight. The new window
//!    starts with a clean slate.
//!
//! The permit counter is the only shared mutable state; every mutation
//! happens under one mutex that is never held across an await point.

use crate::config::WindowUnit;
use crate::error::{AcquireError, ConfigError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::debug;

/// Shared gate state. Invariant: `0 <= available <= capacity`; callers
/// currently holding a permit number `capacity - available`.
struct Gate {
    capacity: u32,
    state: Mutex<GateState>,
    wakeup: Notify,
}

struct GateState {
    available: u32,
    closed: bool,
}

impl Gate {
    fn lock(&self) -> MutexGuard<'_, GateState> {
        // The state is a plain counter plus a flag; a panicking holder
        // cannot leave it mid-update.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hard reset at the window boundary: full capacity, not a top-up.
    fn replenish(&self) {
        {
            let mut state = self.lock();
            if state.closed {
                return;
            }
            state.available = self.capacity;
        }
        debug!(capacity = self.capacity, "window elapsed, permits restored");
        // Wake every parked waiter, plus one stored wakeup for a caller
        // that checked the counter but has not started waiting yet.
        self.wakeup.notify_waiters();
        self.wakeup.notify_one();
    }

    fn release(&self) {
        {
            let mut state = self.lock();
            // Clamp: the window may have reset to full capacity while
            // this permit was in flight.
            if state.available < self.capacity {
                state.available += 1;
            }
        }
        self.wakeup.notify_one();
    }
}

/// Admission token for one in-flight registry call.
///
/// Dropping the permit returns it to the gate, so release happens on
/// every exit path of the gated call, including panics and early
/// returns. A permit can only be released once because drop consumes it.
pub struct Permit {
    gate: Arc<Gate>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.gate.release();
    }
}

impl std::fmt::Debug for Permit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Permit").finish_non_exhaustive()
    }
}

/// Fixed-window rate gate.
///
/// Owns the window timer task for its whole lifetime; the task is
/// stopped by [`close`](Self::close) or by dropping the gate.
pub struct RateLimiter {
    gate: Arc<Gate>,
    replenisher: JoinHandle<()>,
}

impl RateLimiter {
    /// Create a gate admitting `capacity` calls per `unit` window and
    /// start its window timer.
    ///
    /// Must be called from within a Tokio runtime. Fails with
    /// [`ConfigError::ZeroCapacity`] when `capacity` is zero.
    pub fn new(unit: WindowUnit, capacity: u32) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let gate = Arc::new(Gate {
            capacity,
            state: Mutex::new(GateState {
                available: capacity,
                closed: false,
            }),
            wakeup: Notify::new(),
        });

        let period = unit.period();
        let timer_gate = Arc::clone(&gate);
        let replenisher = tokio::spawn(async move {
            // First reset one full window after startup; construction
            // already starts the window at full capacity.
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                timer_gate.replenish();
            }
        });

        Ok(Self { gate, replenisher })
    }

    /// Wait until the current window has capacity, then take a permit.
    ///
    /// At most `capacity` permits are outstanding at any instant within
    /// a window. Waiters are admitted in no particular order once
    /// capacity returns.
    ///
    /// Fails with [`AcquireError::Closed`] once the gate has been shut
    /// down. Cancel-safe: dropping the future never consumes a permit. A
    /// caller that needs a deadline wraps this in `tokio::time::timeout`.
    pub async fn acquire(&self) -> Result<Permit, AcquireError> {
        loop {
            // Register for a wakeup before checking the counter so a
            // release between the check and the await is not missed.
            let parked = self.gate.wakeup.notified();

            {
                let mut state = self.gate.lock();
                if state.closed {
                    return Err(AcquireError::Closed);
                }
                if state.available > 0 {
                    state.available -= 1;
                    let more = state.available > 0;
                    drop(state);
                    if more {
                        // Pass the wakeup along while capacity remains.
                        self.gate.wakeup.notify_one();
                    }
                    return Ok(Permit {
                        gate: Arc::clone(&self.gate),
                    });
                }
            }

            debug!(
                capacity = self.gate.capacity,
                "window capacity exhausted, waiting for a permit"
            );
            parked.await;
        }
    }

    /// Permits still available in the current window.
    pub fn available_permits(&self) -> u32 {
        self.gate.lock().available
    }

    /// Maximum permits per window.
    pub fn capacity(&self) -> u32 {
        self.gate.capacity
    }

    /// Shut the gate down: stop the window timer and fail all pending
    /// and future [`acquire`](Self::acquire) calls. Idempotent.
    pub fn close(&self) {
        self.replenisher.abort();
        {
            let mut state = self.gate.lock();
            if state.closed {
                return;
            }
            state.closed = true;
        }
        debug!("rate gate closed");
        self.gate.wakeup.notify_waiters();
        self.gate.wakeup.notify_one();
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("capacity", &self.gate.capacity)
            .field("available", &self.gate.lock().available)
            .finish()
    }
}
