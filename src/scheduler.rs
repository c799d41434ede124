//! Interval Scheduler
//!
//! Owns the periodic timers behind mounted pages. Every registration returns
//! a [`TickHandle`]; dropping or cancelling the handle stops the timer, so a
//! page that lets go of its handles on unmount leaves nothing running.
//!
//! The scheduler counts live timers, which makes the "no orphaned timers"
//! rule observable from tests and from the status bar.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Registry of live interval timers.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    active: Arc<AtomicUsize>,
}

impl Scheduler {
    /// Create a scheduler with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `on_tick` every `period`, starting one period from now.
    ///
    /// Each invocation runs to completion before the next can fire. Ticks
    /// missed while the runtime was busy are delayed, never bunched.
    ///
    /// Must be called from within a tokio runtime.
    pub fn register<F>(&self, name: &'static str, period: Duration, mut on_tick: F) -> TickHandle
    where
        F: FnMut() + Send + 'static,
    {
        let cancel = Arc::new(AtomicBool::new(false));
        let fired = Arc::new(AtomicU64::new(0));
        let cancel_clone = cancel.clone();
        let fired_clone = fired.clone();
        let start = Instant::now() + period;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if cancel_clone.load(Ordering::SeqCst) {
                    break;
                }
                on_tick();
                fired_clone.fetch_add(1, Ordering::SeqCst);
            }
        });

        let live = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Registered timer {} every {:?} ({} live)", name, period, live);

        TickHandle {
            name,
            period,
            task: Some(handle),
            cancel,
            fired,
            active: self.active.clone(),
        }
    }

    /// Number of timers currently registered and not cancelled.
    pub fn active_timers(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Handle to one registered timer. Cancels the timer when dropped.
#[derive(Debug)]
pub struct TickHandle {
    name: &'static str,
    period: Duration,
    task: Option<JoinHandle<()>>,
    cancel: Arc<AtomicBool>,
    fired: Arc<AtomicU64>,
    active: Arc<AtomicUsize>,
}

impl TickHandle {
    /// Stop the timer. Further calls are no-ops.
    pub fn cancel(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        self.cancel.store(true, Ordering::SeqCst);
        task.abort();
        let live = self.active.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        info!(
            "Cancelled timer {} after {} ticks ({} live)",
            self.name,
            self.fired(),
            live
        );
    }

    /// Whether the timer is still registered.
    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Number of times the tick callback has completed.
    pub fn fired(&self) -> u64 {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
