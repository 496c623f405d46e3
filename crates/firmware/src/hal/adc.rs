//! Shared-converter control handle
//!
//! The actual converter is owned by the ADC pump task (see
//! [`crate::tasks::adc_task`]); everyone else holds a [`BoardAdc`], which
//! only knows how to queue a conversion request. Requests that find the
//! queue full are dropped — a trigger is already pending for that round, so
//! the channel keeps free-running either way.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use platform::{AdcSequencer, SensorChannel};

use crate::tasks::TRIGGER_DEPTH;

/// Conversion-request handle, cheap to clone into every owner.
#[derive(Clone)]
pub struct BoardAdc {
    tx: Sender<'static, CriticalSectionRawMutex, SensorChannel, TRIGGER_DEPTH>,
}

impl BoardAdc {
    /// Wrap a sender into the trigger queue.
    pub fn new(tx: Sender<'static, CriticalSectionRawMutex, SensorChannel, TRIGGER_DEPTH>) -> Self {
        Self { tx }
    }
}

impl AdcSequencer for BoardAdc {
    fn retrigger(&mut self, channel: SensorChannel) {
        // Non-blocking: a full queue means this channel already has a
        // pending conversion.
        let _ = self.tx.try_send(channel);
    }
}
