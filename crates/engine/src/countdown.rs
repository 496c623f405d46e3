//! Master countdown and urgency oscillator
//!
//! One countdown register drives both gameplay termination and the
//! accelerating beep/blink. The register only ever moves down — by natural
//! tick consumption or by evaluator penalties — and saturates at zero.
//! Reaching zero is terminal: the expiry transition is observable exactly
//! once, through [`Countdown::expired`], regardless of how many decrements
//! raced past the boundary.
//!
//! Decrements clamp inside a single atomic update and *then* decide whether
//! they crossed zero (clamp-then-compare), so no reader ever observes a
//! negative value and the expiry cannot fire twice.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::config::{URGENCY_DIVISOR, URGENCY_MIN_PERIOD_TICKS};
use crate::difficulty::Difficulty;

/// The countdown register and its expiry latch. Lives in a `static` on
/// hardware; every user holds `&Countdown`.
pub struct Countdown {
    remaining: AtomicU32,
    armed: AtomicBool,
    fired: AtomicBool,
    expired: Signal<CriticalSectionRawMutex, ()>,
}

impl Countdown {
    /// Create a disarmed countdown.
    pub const fn new() -> Self {
        Self {
            remaining: AtomicU32::new(0),
            armed: AtomicBool::new(false),
            fired: AtomicBool::new(false),
            expired: Signal::new(),
        }
    }

    /// Seed the register with `ticks` and start consuming time.
    pub fn arm(&self, ticks: u32) {
        self.expired.reset();
        self.fired.store(false, Ordering::SeqCst);
        self.remaining.store(ticks, Ordering::SeqCst);
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Stop consuming time (game complete). The register keeps its value so
    /// the final score can read it.
    pub fn stop(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }

    /// True while the countdown is consuming time.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    /// Remaining time in game ticks. Never negative; zero after expiry.
    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    /// Consume one tick of natural time. Called from the clock task.
    pub fn tick(&self) {
        if self.is_armed() {
            self.take_down(1);
        }
    }

    /// Apply an evaluator penalty: `(1 + difficulty)` seconds of clock.
    ///
    /// Safe to call at any frequency — the register saturates at zero and
    /// the expiry transition still fires exactly once.
    pub fn penalize(&self, difficulty: Difficulty) {
        if self.is_armed() {
            self.take_down(difficulty.penalty_ticks());
        }
    }

    /// Wait for the terminal expiry transition.
    pub async fn expired(&self) {
        self.expired.wait().await;
    }

    /// True once the register has hit zero.
    pub fn has_expired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Subtract `amount`, clamped at zero; the call that crosses the zero
    /// boundary claims the expiry exactly once.
    fn take_down(&self, amount: u32) {
        let update = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_sub(amount))
            });
        let previous = match update {
            Ok(prev) | Err(prev) => prev,
        };
        let crossed = previous > 0 && previous <= amount;
        if crossed && !self.fired.swap(true, Ordering::SeqCst) {
            self.armed.store(false, Ordering::SeqCst);
            self.expired.signal(());
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Urgency oscillator period for a given remaining time, in game ticks.
///
/// Proportional to the countdown (`remaining / 16`), floored at the maximum
/// audible rate — the beep/blink accelerates monotonically as time runs out.
pub fn urgency_period_ticks(remaining: u32) -> u32 {
    (remaining / URGENCY_DIVISOR).max(URGENCY_MIN_PERIOD_TICKS)
}
