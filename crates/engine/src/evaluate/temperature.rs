//! Temperature task: warm the thermistor until the reading climbs far enough
//!
//! Mirror image of the lights task — position-relative target above the
//! starting sample, one-directional, no penalty path.

use core::fmt::Write as _;

use embassy_time::Timer;
use platform::{CharacterDisplay, Line, SampleSource, ADC_FULL_SCALE};

use crate::config::{POLL_INTERVAL_MS, TEMPERATURE_MARGIN_BASE};
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::task::TaskId;

use super::Step;

/// Temperature-threshold evaluator state.
pub struct TemperatureTask {
    target: u16,
}

impl TemperatureTask {
    /// Derive the threshold from the starting sample: `start + 200·(3−d)`,
    /// clamped to full scale.
    pub fn from_start(start: u16, difficulty: Difficulty) -> Self {
        Self {
            target: start
                .saturating_add(difficulty.window(TEMPERATURE_MARGIN_BASE))
                .min(ADC_FULL_SCALE),
        }
    }

    /// The threshold the reading must rise to.
    pub fn target(&self) -> u16 {
        self.target
    }

    /// One poll: success the moment the sample is at or above threshold.
    pub fn step(&self, sample: u16) -> Step {
        if sample >= self.target {
            Step::Success
        } else {
            Step::Waiting
        }
    }
}

/// Poll the routed thermistor until the threshold is crossed.
pub async fn run<D, S>(
    difficulty: Difficulty,
    display: &mut D,
    sensor: &mut S,
    countdown: &Countdown,
) -> Result<(), D::Error>
where
    D: CharacterDisplay,
    S: SampleSource,
{
    display.clear()?;
    display.write_at(Line::Top, TaskId::Temperature.title())?;

    let start = sensor.next_sample().await;
    let task = TemperatureTask::from_start(start, difficulty);

    loop {
        let sample = sensor.next_sample().await;
        let mut line: heapless::String<16> = heapless::String::new();
        let _ = write!(line, "N:{sample:>5} T:{:>5}", task.target());
        display.write_at(Line::Bottom, &line)?;

        match task.step(sample) {
            Step::Success => break,
            Step::Penalty => countdown.penalize(difficulty),
            Step::Waiting => {}
        }
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
    Ok(())
}
