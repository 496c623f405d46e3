//! Power-diversion task: settle the potentiometer inside a target window
//!
//! A random target at least 2000 counts away from the starting position must
//! be matched within a difficulty-scaled acceptance window and *held* for
//! two consecutive polls. Drifting beyond the wider penalty margin docks the
//! clock on every offending poll. Feedback is rendered in volts on both
//! lines.

use core::fmt::Write as _;

use embassy_time::Timer;
use platform::{CharacterDisplay, Line, SampleSource};

use crate::config::{
    POLL_INTERVAL_MS, POWER_ACCEPT_BASE, POWER_MIN_SEPARATION, POWER_PENALTY_BASE,
    POWER_STEADY_POLLS,
};
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::rng::Rng;
use crate::task::TaskId;

use super::Step;

/// Power-diversion evaluator state.
pub struct PowerTask {
    target: u16,
    accept: u16,
    penalty_margin: u16,
    steady: u8,
}

impl PowerTask {
    /// Draw a target at least [`POWER_MIN_SEPARATION`] away from `start`
    /// (rejection sampling), with windows scaled for `difficulty`.
    pub fn generate(rng: &mut Rng, start: u16, difficulty: Difficulty) -> Self {
        let mut target = rng.sample();
        while target.abs_diff(start) < POWER_MIN_SEPARATION {
            target = rng.sample();
        }
        Self::with_target(target, difficulty)
    }

    /// Build around a known target (tests).
    pub fn with_target(target: u16, difficulty: Difficulty) -> Self {
        Self {
            target,
            accept: difficulty.window(POWER_ACCEPT_BASE),
            penalty_margin: difficulty.window(POWER_PENALTY_BASE),
            steady: 0,
        }
    }

    /// The drawn target, raw counts.
    pub fn target(&self) -> u16 {
        self.target
    }

    /// One poll. Within the open acceptance interval for
    /// [`POWER_STEADY_POLLS`] consecutive polls → success; outside the
    /// penalty margin → penalty; anywhere between → keep waiting.
    pub fn step(&mut self, sample: u16) -> Step {
        let deviation = sample.abs_diff(self.target);
        if deviation < self.accept {
            self.steady = self.steady.saturating_add(1);
            if self.steady >= POWER_STEADY_POLLS {
                Step::Success
            } else {
                Step::Waiting
            }
        } else {
            self.steady = 0;
            if deviation > self.penalty_margin {
                Step::Penalty
            } else {
                Step::Waiting
            }
        }
    }
}

/// Render a raw sample as volts with one decimal, e.g. `2.5V`.
fn write_volts(line: &mut heapless::String<16>, raw: u16) {
    let millivolts = u32::from(raw).saturating_mul(3300) / 16384;
    let whole = millivolts / 1000;
    let tenths = (millivolts % 1000) / 100;
    let _ = write!(line, "{whole}.{tenths}V");
}

/// Drive the task to completion: draw the target, then poll the routed
/// potentiometer until the diversion holds steady.
pub async fn run<D, S>(
    difficulty: Difficulty,
    rng: &mut Rng,
    display: &mut D,
    sensor: &mut S,
    countdown: &Countdown,
) -> Result<(), D::Error>
where
    D: CharacterDisplay,
    S: SampleSource,
{
    display.clear()?;
    display.write_at(Line::Top, TaskId::Power.title())?;

    let start = sensor.next_sample().await;
    let mut task = PowerTask::generate(rng, start, difficulty);

    loop {
        let sample = sensor.next_sample().await;
        let mut bottom: heapless::String<16> = heapless::String::new();
        let _ = write!(bottom, "T ");
        write_volts(&mut bottom, task.target());
        let _ = write!(bottom, " N ");
        write_volts(&mut bottom, sample);
        display.write_at(Line::Bottom, &bottom)?;

        match task.step(sample) {
            Step::Success => break,
            Step::Penalty => countdown.penalize(difficulty),
            Step::Waiting => {}
        }
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
    Ok(())
}
