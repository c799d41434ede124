//! Live Feed
//!
//! Couples a page state, its reducer and a scheduler timer. On every tick the
//! reducer produces the next state from the current one, and the result is
//! published as an immutable `Arc` snapshot over a `watch` channel. Readers
//! never observe a half-updated state.

use crate::error::Result;
use crate::scheduler::{Scheduler, TickHandle};
use crate::services::FeedRng;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Page state that advances one step per timer tick.
pub trait Reducer: Clone + Send + Sync + 'static {
    /// Next state from the current one and fresh randomness.
    /// Must not mutate `self`.
    fn tick(&self, rng: &mut FeedRng) -> Self;
}

/// A mounted, ticking state.
///
/// Dropping the feed (or calling [`LiveFeed::unmount`]) cancels its timer.
/// [`LiveFeed::pause`] cancels it too, but [`LiveFeed::resume`] can start a
/// new one until the feed is unmounted.
#[derive(Debug)]
pub struct LiveFeed<S> {
    name: &'static str,
    period: Duration,
    scheduler: Scheduler,
    tx: Arc<watch::Sender<Arc<S>>>,
    rx: watch::Receiver<Arc<S>>,
    rng: Arc<Mutex<FeedRng>>,
    handle: Option<TickHandle>,
    ticks: Arc<AtomicU64>,
    mounted: bool,
}

impl<S: Reducer> LiveFeed<S> {
    /// Publish `initial` and start ticking it every `period`.
    pub fn mount(
        scheduler: &Scheduler,
        name: &'static str,
        period: Duration,
        initial: S,
        rng: FeedRng,
    ) -> Self {
        let (tx, rx) = watch::channel(Arc::new(initial));
        let mut feed = Self {
            name,
            period,
            scheduler: scheduler.clone(),
            tx: Arc::new(tx),
            rx,
            rng: Arc::new(Mutex::new(rng)),
            handle: None,
            ticks: Arc::new(AtomicU64::new(0)),
            mounted: true,
        };
        feed.start_timer();

        info!("Mounted feed {} ({:?} period)", name, period);
        feed
    }

    /// Start ticking again after [`LiveFeed::pause`]. The first tick fires
    /// one period from now. No-op when already ticking or unmounted.
    pub fn resume(&mut self) {
        if !self.mounted || self.handle.is_some() {
            return;
        }
        self.start_timer();
        info!("Resumed feed {}", self.name);
    }

    fn start_timer(&mut self) {
        let tick_tx = self.tx.clone();
        let tick_rng = self.rng.clone();
        let tick_count = self.ticks.clone();

        let handle = self.scheduler.register(self.name, self.period, move || {
            let mut rng = tick_rng.lock().unwrap_or_else(PoisonError::into_inner);
            tick_tx.send_modify(|state| {
                *state = Arc::new(state.tick(&mut rng));
            });
            tick_count.fetch_add(1, Ordering::SeqCst);
        });
        self.handle = Some(handle);
    }
}

impl<S> LiveFeed<S> {
    /// Latest published state.
    pub fn snapshot(&self) -> Arc<S> {
        self.rx.borrow().clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
        self.tx.subscribe()
    }

    /// Replace the state with `f(current)` outside the tick cycle, e.g. for a
    /// user action. Publishes the result like a tick does.
    pub fn apply<F>(&self, f: F)
    where
        F: FnOnce(&S) -> S,
    {
        self.tx.send_modify(|state| {
            *state = Arc::new(f(state));
        });
        debug!("Applied update to feed {}", self.name);
    }

    /// Ticks applied since mount.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the feed's timer is running.
    pub fn is_live(&self) -> bool {
        self.handle.as_ref().is_some_and(TickHandle::is_active)
    }

    /// Cancel the timer but keep the feed mounted.
    pub fn pause(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
            info!("Paused feed {} after {} ticks", self.name, self.ticks());
        }
    }

    /// Stop ticking for good. The last snapshot stays readable.
    pub fn unmount(&mut self) {
        if self.mounted {
            self.mounted = false;
            self.pause();
            info!("Unmounted feed {} after {} ticks", self.name, self.ticks());
        }
    }
}

impl<S: Serialize> LiveFeed<S> {
    /// Latest snapshot as JSON, with the same field names the chart views use.
    pub fn snapshot_json(&self) -> Result<String> {
        let snapshot = self.snapshot();
        Ok(serde_json::to_string(snapshot.as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Counter {
        value: u32,
    }

    impl Reducer for Counter {
        fn tick(&self, _rng: &mut FeedRng) -> Self {
            Counter {
                value: self.value + 1,
            }
        }
    }

    async fn step(period: Duration) {
        time::advance(period).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_each_tick() {
        let scheduler = Scheduler::new();
        let feed = LiveFeed::mount(
            &scheduler,
            "counter",
            Duration::from_secs(1),
            Counter { value: 0 },
            FeedRng::seeded(1),
        );
        let initial = feed.snapshot();

        step(Duration::from_secs(1)).await;
        step(Duration::from_secs(1)).await;

        assert_eq!(feed.snapshot().value, 2);
        assert_eq!(feed.ticks(), 2);
        // earlier snapshots are never mutated
        assert_eq!(initial.value, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_freezes_snapshot() {
        let scheduler = Scheduler::new();
        let mut feed = LiveFeed::mount(
            &scheduler,
            "counter",
            Duration::from_secs(1),
            Counter { value: 0 },
            FeedRng::seeded(1),
        );

        step(Duration::from_secs(1)).await;
        feed.unmount();
        step(Duration::from_secs(5)).await;

        assert!(!feed.is_live());
        assert_eq!(feed.snapshot().value, 1);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_publishes() {
        let scheduler = Scheduler::new();
        let feed = LiveFeed::mount(
            &scheduler,
            "counter",
            Duration::from_secs(1),
            Counter { value: 0 },
            FeedRng::seeded(1),
        );
        let mut rx = feed.subscribe();

        feed.apply(|c| Counter { value: c.value + 10 });

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 10);
        assert_eq!(feed.snapshot_json().unwrap(), r#"{"value":10}"#);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_cancels_timer() {
        let scheduler = Scheduler::new();
        let mut feed = LiveFeed::mount(
            &scheduler,
            "counter",
            Duration::from_secs(1),
            Counter { value: 0 },
            FeedRng::seeded(1),
        );

        step(Duration::from_secs(1)).await;
        feed.pause();
        feed.pause();
        assert!(!feed.is_live());
        assert_eq!(scheduler.active_timers(), 0);

        step(Duration::from_secs(3)).await;
        assert_eq!(feed.ticks(), 1);

        feed.resume();
        feed.resume();
        assert!(feed.is_live());
        assert_eq!(scheduler.active_timers(), 1);

        step(Duration::from_millis(999)).await;
        assert_eq!(feed.ticks(), 1);
        step(Duration::from_millis(1)).await;
        assert_eq!(feed.ticks(), 2);
        assert_eq!(feed.snapshot().value, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_after_unmount_is_ignored() {
        let scheduler = Scheduler::new();
        let mut feed = LiveFeed::mount(
            &scheduler,
            "counter",
            Duration::from_secs(1),
            Counter { value: 0 },
            FeedRng::seeded(1),
        );

        feed.unmount();
        feed.resume();

        assert!(!feed.is_live());
        assert_eq!(scheduler.active_timers(), 0);
    }
}
