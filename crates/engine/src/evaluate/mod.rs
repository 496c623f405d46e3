//! Mini-task evaluators
//!
//! Each of the seven tasks is a self-contained module with the same shape:
//! a small state struct holding the generated target, a pure
//! `step(input) -> Step` decision applied once per poll, and an async
//! `run(..)` driver that owns the polling loop, the display feedback, and
//! the penalty calls. The pure step functions carry all of the win/penalty
//! logic, so every rule is testable without timers or hardware; the drivers
//! only move data.
//!
//! Drivers block (asynchronously) until their task succeeds — failure is
//! never decided here. Running out of time is handled globally by the
//! countdown, which abandons whichever driver is in flight.

use embassy_time::Timer;
use platform::{AdcSequencer, SampleSource, SensorBank, SensorChannel};

use crate::config::SAMPLE_SETTLE_MS;
use crate::context::GameContext;

pub mod binary;
pub mod direction;
pub mod lights;
pub mod password;
pub mod power;
pub mod reaction;
pub mod temperature;

/// Outcome of one evaluator poll. The three conditions are mutually
/// exclusive per iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Not there yet; keep polling.
    Waiting,
    /// Within tolerance; the task is complete.
    Success,
    /// Out of bounds; dock the countdown and keep polling.
    Penalty,
}

/// [`SampleSource`] over the shared latch for one task's sensor.
///
/// Re-triggers the converter, lets the conversion land and the router latch
/// it, then reads the shared sample back. Built by the dispatcher for each
/// sensor-owning task.
pub struct RoutedSensor<'a, A: AdcSequencer> {
    ctx: &'a GameContext,
    adc: &'a mut A,
    channel: SensorChannel,
}

impl<'a, A: AdcSequencer> RoutedSensor<'a, A> {
    /// Route `channel` through the shared latch in `ctx`.
    pub fn new(ctx: &'a GameContext, adc: &'a mut A, channel: SensorChannel) -> Self {
        Self { ctx, adc, channel }
    }
}

impl<A: AdcSequencer> SampleSource for RoutedSensor<'_, A> {
    async fn next_sample(&mut self) -> u16 {
        self.adc.retrigger(self.channel);
        Timer::after_millis(SAMPLE_SETTLE_MS).await;
        self.ctx.latest_sample()
    }
}

/// [`SensorBank`] over the shared latch: lends a [`RoutedSensor`] per
/// channel, all backed by the one converter.
pub struct RoutedBank<'a, A: AdcSequencer> {
    ctx: &'a GameContext,
    adc: A,
}

impl<'a, A: AdcSequencer> RoutedBank<'a, A> {
    /// Build the bank over the shared context and the converter control.
    pub fn new(ctx: &'a GameContext, adc: A) -> Self {
        Self { ctx, adc }
    }
}

impl<'a, A: AdcSequencer> SensorBank for RoutedBank<'a, A> {
    type Source<'s>
        = RoutedSensor<'s, A>
    where
        Self: 's;

    fn acquire(&mut self, channel: SensorChannel) -> Self::Source<'_> {
        RoutedSensor::new(self.ctx, &mut self.adc, channel)
    }
}
