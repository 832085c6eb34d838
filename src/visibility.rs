//! The "shadow maze" flicker.
//!
//! A background thread periodically hides random walls and brings each one
//! back after a fixed delay. Hidden walls are still solid; only the renderer
//! looks at this map.
//!
//! The map carries an epoch that is bumped whenever it is rebuilt for a new
//! maze (or cleared on teardown). Every write names the epoch it was issued
//! under, so a reveal queued against a discarded maze is dropped instead of
//! touching the new one.

use crate::walls::{WallId, WallSegment};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub const FLICKER_INTERVAL: Duration = Duration::from_secs(1);
pub const HIDE_PROBABILITY: f64 = 0.5;
pub const REVEAL_DELAY: Duration = Duration::from_secs(5);

#[derive(Default)]
struct MapState {
    epoch: u64,
    visible: HashMap<WallId, bool>,
}

/// Shared wall-id -> visible flag map. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct VisibilityMap {
    inner: Arc<Mutex<MapState>>,
}

impl VisibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MapState> {
        // Only plain flags live behind the lock, so a poisoned guard is still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the contents with `ids`, all visible, under a fresh epoch.
    pub fn reset(&self, ids: impl IntoIterator<Item = WallId>) -> u64 {
        let mut state = self.lock();
        state.epoch += 1;
        state.visible = ids.into_iter().map(|id| (id, true)).collect();
        state.epoch
    }

    /// Empties the map and retires the current epoch.
    pub fn clear(&self) -> u64 {
        self.reset(std::iter::empty())
    }

    pub fn epoch(&self) -> u64 {
        self.lock().epoch
    }

    pub fn len(&self) -> usize {
        self.lock().visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unknown ids count as visible.
    pub fn is_visible(&self, id: WallId) -> bool {
        self.lock().visible.get(&id).copied().unwrap_or(true)
    }

    pub fn hidden_count(&self) -> usize {
        self.lock().visible.values().filter(|v| !**v).count()
    }

    /// The segments of `walls` that are currently visible, read under a
    /// single lock so the result is one consistent snapshot.
    pub fn visible_walls<'a>(&self, walls: &'a [WallSegment]) -> Vec<&'a WallSegment> {
        let state = self.lock();
        walls
            .iter()
            .filter(|w| state.visible.get(&w.id).copied().unwrap_or(true))
            .collect()
    }

    /// Marks `id` visible again. Returns false when the write is stale.
    pub fn show(&self, epoch: u64, id: WallId) -> bool {
        let mut state = self.lock();
        if state.epoch != epoch {
            return false;
        }
        match state.visible.get_mut(&id) {
            Some(flag) => {
                *flag = true;
                true
            }
            None => false,
        }
    }

    /// For every id in `ids` that is still visible, asks `coin` whether to
    /// hide it. The check and the hide happen under one lock.
    fn hide_where(
        &self,
        epoch: u64,
        ids: &[WallId],
        mut coin: impl FnMut() -> bool,
    ) -> Vec<WallId> {
        let mut state = self.lock();
        if state.epoch != epoch {
            return Vec::new();
        }
        let mut hidden = Vec::new();
        for id in ids {
            if let Some(flag) = state.visible.get_mut(id) {
                if *flag && coin() {
                    *flag = false;
                    hidden.push(*id);
                }
            }
        }
        hidden
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlickerConfig {
    pub interval: Duration,
    pub hide_probability: f64,
    pub reveal_delay: Duration,
}

impl Default for FlickerConfig {
    fn default() -> Self {
        Self {
            interval: FLICKER_INTERVAL,
            hide_probability: HIDE_PROBABILITY,
            reveal_delay: REVEAL_DELAY,
        }
    }
}

/// Scheduler core. Time is always passed in, so it can be driven by a
/// thread or stepped directly.
pub struct Flicker {
    map: VisibilityMap,
    epoch: u64,
    ids: Vec<WallId>,
    config: FlickerConfig,
    pending: BinaryHeap<Reverse<(Instant, WallId)>>,
    next_pass: Instant,
}

impl Flicker {
    /// Resets `map` to `ids`, all visible. The first hide pass is due one
    /// interval after `now`.
    pub fn new(map: VisibilityMap, ids: Vec<WallId>, config: FlickerConfig, now: Instant) -> Self {
        let epoch = map.reset(ids.iter().copied());
        Self {
            map,
            epoch,
            ids,
            config: FlickerConfig {
                hide_probability: config.hide_probability.clamp(0.0, 1.0),
                ..config
            },
            pending: BinaryHeap::new(),
            next_pass: now + config.interval,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Shows every wall whose delay has run out by `now`.
    pub fn reveal_due(&mut self, now: Instant) -> usize {
        let mut shown = 0;
        while let Some(Reverse((due, id))) = self.pending.peek().copied() {
            if due > now {
                break;
            }
            self.pending.pop();
            if self.map.show(self.epoch, id) {
                debug!(wall = %id, "wall visible");
                shown += 1;
            } else {
                trace!(wall = %id, epoch = self.epoch, "ignoring stale reveal");
            }
        }
        shown
    }

    /// Flips a coin for every visible wall; losers are hidden and queued to
    /// come back after the reveal delay.
    pub fn hide_pass(&mut self, now: Instant, rng: &mut impl Rng) -> usize {
        let p = self.config.hide_probability;
        let hidden = self.map.hide_where(self.epoch, &self.ids, || rng.gen_bool(p));
        let due = now + self.config.reveal_delay;
        for id in &hidden {
            debug!(wall = %id, "wall hidden");
            self.pending.push(Reverse((due, *id)));
        }
        hidden.len()
    }

    pub fn step(&mut self, now: Instant, rng: &mut impl Rng) {
        self.reveal_due(now);
        if now >= self.next_pass {
            self.hide_pass(now, rng);
            self.next_pass = now + self.config.interval;
        }
    }

    pub fn next_wakeup(&self) -> Instant {
        match self.pending.peek() {
            Some(Reverse((due, _))) => (*due).min(self.next_pass),
            None => self.next_pass,
        }
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

/// Owns the flicker thread. Dropping the handle stops and joins it.
pub struct FlickerHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FlickerHandle {
    pub fn spawn(mut flicker: Flicker, seed: u64) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("wall-flicker".into())
            .spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                debug!(epoch = flicker.epoch(), "flicker started");
                loop {
                    flicker.step(Instant::now(), &mut rng);
                    let wait = flicker
                        .next_wakeup()
                        .saturating_duration_since(Instant::now());
                    match rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                flicker.cancel_all();
                debug!(epoch = flicker.epoch(), "flicker stopped");
            })?;
        Ok(Self {
            stop: Some(tx),
            thread: Some(thread),
        })
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for FlickerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
