//! Bounded pool of parking slots with blocking acquire
//!
//! All slot state lives behind one mutex. `acquire` scans in index order and
//! waits on a condition variable when the lot is full. A woken waiter scans
//! again from the first slot and holds no reservation while it sleeps, so a
//! caller arriving just after a release can take the freed slot before a
//! longer-waiting one resumes. There is no FIFO guarantee.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::error;

use super::layout::{LotLayout, SlotSpec};
use super::path::Path;
use super::types::{Position, Rect, SlotId};

/// One parking space
#[derive(Debug, Clone)]
pub struct SimSlot {
    pub id: SlotId,
    pub area: Rect,
    pub available: bool,
    pub parked_at: Position,
    pub parking: Path,
    pub leaving: Path,
}

impl From<&SlotSpec> for SimSlot {
    fn from(spec: &SlotSpec) -> Self {
        Self {
            id: spec.id,
            area: spec.area,
            available: true,
            parked_at: spec.parked_at,
            parking: spec.parking.clone(),
            leaving: spec.leaving.clone(),
        }
    }
}

/// Exclusive claim on a slot, returned by `acquire` and consumed by
/// `release`. A lease dropped without `release` (a vehicle thread
/// unwinding) gives its slot back as well.
#[derive(Debug)]
#[must_use = "a leased slot stays occupied until it is released"]
pub struct SlotLease<'a> {
    pool: Option<&'a SlotPool>,
    pub id: SlotId,
    pub parked_at: Position,
    pub parking: Path,
    pub leaving: Path,
    /// Occupied slots right after this lease was granted
    pub occupied: usize,
}

/// Read-only view of the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub capacity: usize,
    pub occupied: usize,
    /// Callers blocked in `acquire`
    pub waiting: usize,
    pub peak_occupied: usize,
    /// Availability per slot, in index order
    pub available: Vec<bool>,
}

#[derive(Debug)]
struct PoolState {
    slots: Vec<SimSlot>,
    occupied: usize,
    waiting: usize,
    peak_occupied: usize,
}

impl Drop for SlotLease<'_> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.free(self.id);
        }
    }
}

impl PoolState {
    fn claim_first_free<'a>(&mut self, pool: &'a SlotPool) -> Option<SlotLease<'a>> {
        let capacity = self.slots.len();
        let slot = self.slots.iter_mut().find(|slot| slot.available)?;
        slot.available = false;
        self.occupied += 1;
        self.peak_occupied = self.peak_occupied.max(self.occupied);
        debug_assert!(self.occupied <= capacity);
        Some(SlotLease {
            pool: Some(pool),
            id: slot.id,
            parked_at: slot.parked_at,
            parking: slot.parking.clone(),
            leaving: slot.leaving.clone(),
            occupied: self.occupied,
        })
    }
}

/// Fixed-size pool of slots
#[derive(Debug)]
pub struct SlotPool {
    state: Mutex<PoolState>,
    available: Condvar,
}

impl SlotPool {
    pub fn new(slots: Vec<SimSlot>) -> Self {
        Self {
            state: Mutex::new(PoolState {
                slots,
                occupied: 0,
                waiting: 0,
                peak_occupied: 0,
            }),
            available: Condvar::new(),
        }
    }

    pub fn from_layout(layout: &LotLayout) -> Self {
        Self::new(layout.slots.iter().map(SimSlot::from).collect())
    }

    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the first free slot, blocking until one is released
    pub fn acquire(&self) -> SlotLease<'_> {
        let mut state = self.lock();
        loop {
            if let Some(lease) = state.claim_first_free(self) {
                return lease;
            }
            state.waiting += 1;
            state = self
                .available
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
            state.waiting -= 1;
        }
    }

    /// Take the first free slot without blocking
    pub fn try_acquire(&self) -> Option<SlotLease<'_>> {
        self.lock().claim_first_free(self)
    }

    /// Like `acquire`, but gives up after `timeout`
    pub fn acquire_timeout(&self, timeout: Duration) -> Option<SlotLease<'_>> {
        let deadline = Instant::now() + timeout;
        let mut state = self.lock();
        loop {
            if let Some(lease) = state.claim_first_free(self) {
                return Some(lease);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return None;
            }
            state.waiting += 1;
            let (guard, _) = self
                .available
                .wait_timeout(state, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            state = guard;
            state.waiting -= 1;
        }
    }

    /// Give a slot back and wake one waiter. Returns the occupied count
    /// after the release.
    pub fn release(&self, mut lease: SlotLease<'_>) -> usize {
        debug_assert!(
            lease.pool.is_some_and(|pool| std::ptr::eq(pool, self)),
            "slot {} released to a pool it was not leased from",
            lease.id
        );
        lease.pool = None;
        self.free(lease.id)
    }

    fn free(&self, id: SlotId) -> usize {
        let mut guard = self.lock();
        let state = &mut *guard;
        match state.slots.get_mut(id.0) {
            Some(slot) if !slot.available => {
                slot.available = true;
                state.occupied -= 1;
            }
            Some(_) => {
                error!("slot {id} released while already available");
                debug_assert!(false, "slot {id} released while already available");
            }
            None => {
                error!("slot {id} released but does not exist");
                debug_assert!(false, "slot {id} released but does not exist");
            }
        }
        self.available.notify_one();
        state.occupied
    }

    pub fn capacity(&self) -> usize {
        self.lock().slots.len()
    }

    pub fn occupied(&self) -> usize {
        self.lock().occupied
    }

    pub fn waiting(&self) -> usize {
        self.lock().waiting
    }

    pub fn snapshot(&self) -> PoolSnapshot {
        let state = self.lock();
        PoolSnapshot {
            capacity: state.slots.len(),
            occupied: state.occupied,
            waiting: state.waiting,
            peak_occupied: state.peak_occupied,
            available: state.slots.iter().map(|slot| slot.available).collect(),
        }
    }
}
