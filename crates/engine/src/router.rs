//! Sensor channel router
//!
//! One multiplexed converter serves three mutually-exclusive sensors. On
//! every conversion-complete notification the router asks a single question:
//! does this channel belong to the sensor the *active task* needs? If yes,
//! the sample is latched over whatever was there before; if no, the sample
//! is dropped and the channel immediately re-triggered so the sequencer
//! free-runs without backlog. While no task owns a sensor (menu screens),
//! every channel is inactive and perpetually re-triggered.

use platform::{AdcSequencer, Conversion, SensorChannel};

use crate::context::SampleLatch;
use crate::task::TaskId;

/// Routing decision for one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RouteAction {
    /// The active task owns this channel: latch the sample.
    Latch,
    /// Nobody owns this channel: drop the sample and re-trigger.
    Discard,
}

/// Pure routing decision: latch iff `channel` feeds the sensor required by
/// the active task.
pub fn route(active: Option<TaskId>, channel: SensorChannel) -> RouteAction {
    match active.and_then(TaskId::sensor) {
        Some(owned) if owned == channel => RouteAction::Latch,
        _ => RouteAction::Discard,
    }
}

/// Applies routing decisions to the shared sample latch.
///
/// Owns the unique [`SampleLatch`] write handle — constructing a router is
/// what makes it the single writer of the shared sample.
pub struct SensorRouter<'a> {
    latch: SampleLatch<'a>,
}

impl<'a> SensorRouter<'a> {
    /// Build the router around the context's unique sample-write handle.
    pub fn new(latch: SampleLatch<'a>) -> Self {
        Self { latch }
    }

    /// Handle one conversion-complete notification.
    ///
    /// Called for every conversion the hardware reports, from the ADC event
    /// task. Discarded channels are re-triggered before returning so the
    /// sequencer never stalls.
    pub fn on_conversion<A: AdcSequencer>(&mut self, adc: &mut A, conversion: Conversion) {
        match route(self.latch.context().active_task(), conversion.channel) {
            RouteAction::Latch => self.latch.store(conversion.raw),
            RouteAction::Discard => adc.retrigger(conversion.channel),
        }
    }
}
