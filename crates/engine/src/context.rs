//! Shared cross-context game state
//!
//! Exactly two values cross between the main game sequence and the
//! interrupt-style tasks: the *active-task marker* (which mini-task owns
//! sensor routing right now) and the *latched sensor sample* (the most
//! recent accepted conversion). Both are single-writer / many-reader:
//! the dispatcher alone writes the marker through a [`TaskSlot`], the router
//! alone writes the sample through a [`SampleLatch`]. The write handles can
//! each be taken exactly once, so a second writer is unrepresentable rather
//! than merely discouraged.

use core::sync::atomic::{AtomicBool, AtomicU16, AtomicU8, Ordering};

use crate::task::TaskId;

/// Marker value meaning "no task owns a sensor" (menu screens, between
/// evaluators).
const NO_TASK: u8 = 0;

/// The shared state block. Lives in a `static` on hardware; any number of
/// readers may hold `&GameContext`.
pub struct GameContext {
    /// Active task, encoded as `index + 1`, `NO_TASK` when idle.
    active: AtomicU8,
    /// Latched raw sample for the active task's sensor.
    sample: AtomicU16,
    slot_taken: AtomicBool,
    latch_taken: AtomicBool,
}

impl GameContext {
    /// Create an idle context: no active task, sample zero.
    pub const fn new() -> Self {
        Self {
            active: AtomicU8::new(NO_TASK),
            sample: AtomicU16::new(0),
            slot_taken: AtomicBool::new(false),
            latch_taken: AtomicBool::new(false),
        }
    }

    /// The task currently owning sensor routing, if any.
    pub fn active_task(&self) -> Option<TaskId> {
        match self.active.load(Ordering::Acquire) {
            NO_TASK => None,
            encoded => TaskId::from_index(encoded.wrapping_sub(1)),
        }
    }

    /// Most recently latched sample for the active sensor.
    pub fn latest_sample(&self) -> u16 {
        self.sample.load(Ordering::Relaxed)
    }

    /// Take the unique active-task write handle. Returns `None` after the
    /// first call — only the dispatcher may hold this.
    pub fn task_slot(&self) -> Option<TaskSlot<'_>> {
        if self.slot_taken.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(TaskSlot { ctx: self })
        }
    }

    /// Take the unique sample write handle. Returns `None` after the first
    /// call — only the sensor router may hold this.
    pub fn sample_latch(&self) -> Option<SampleLatch<'_>> {
        if self.latch_taken.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(SampleLatch { ctx: self })
        }
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique write handle for the active-task marker.
///
/// Held by the dispatcher, which sets the marker strictly before invoking
/// the matching evaluator and never changes it while one is polling.
pub struct TaskSlot<'a> {
    ctx: &'a GameContext,
}

impl TaskSlot<'_> {
    /// Mark `task` as the owner of sensor routing.
    pub fn set(&mut self, task: TaskId) {
        self.ctx
            .active
            .store(task.index().wrapping_add(1), Ordering::Release);
    }

    /// Mark the console idle — every channel becomes inactive.
    pub fn clear(&mut self) {
        self.ctx.active.store(NO_TASK, Ordering::Release);
    }
}

/// Unique write handle for the latched sensor sample.
pub struct SampleLatch<'a> {
    ctx: &'a GameContext,
}

impl SampleLatch<'_> {
    /// Overwrite the latched sample with a newly accepted conversion.
    pub fn store(&mut self, raw: u16) {
        self.ctx.sample.store(raw, Ordering::Relaxed);
    }

    /// Reader view of the context this latch writes into.
    pub fn context(&self) -> &GameContext {
        self.ctx
    }
}
