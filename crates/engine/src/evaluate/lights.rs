//! Lights task: cover the photoresistor until the reading drops far enough
//!
//! The target is position-relative — the starting sample minus a
//! difficulty-scaled margin — so the task works under any ambient light.
//! One-directional: there is no overshoot, hence no penalty path.

use core::fmt::Write as _;

use embassy_time::Timer;
use platform::{CharacterDisplay, Line, SampleSource};

use crate::config::{LIGHTS_MARGIN_BASE, POLL_INTERVAL_MS};
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::task::TaskId;

use super::Step;

/// Light-threshold evaluator state.
pub struct LightsTask {
    target: u16,
}

impl LightsTask {
    /// Derive the threshold from the starting sample: `start − 300·(3−d)`.
    pub fn from_start(start: u16, difficulty: Difficulty) -> Self {
        Self {
            target: start.saturating_sub(difficulty.window(LIGHTS_MARGIN_BASE)),
        }
    }

    /// The threshold the reading must fall to.
    pub fn target(&self) -> u16 {
        self.target
    }

    /// One poll: success the moment the sample is at or below threshold.
    pub fn step(&self, sample: u16) -> Step {
        if sample <= self.target {
            Step::Success
        } else {
            Step::Waiting
        }
    }
}

/// Blocking driver: poll the routed photoresistor at a fixed cadence until
/// the threshold is crossed.
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
    display.write_at(Line::Top, TaskId::Lights.title())?;

    let start = sensor.next_sample().await;
    let task = LightsTask::from_start(start, difficulty);

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

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::{LightsTask, Step};
    use crate::difficulty::Difficulty;

    #[test]
    fn easy_threshold_is_start_minus_900() {
        // 300 * (3 - 0) = 900 below the initial reading.
        let task = LightsTask::from_start(16384, Difficulty::Easy);
        assert_eq!(task.target(), 15484);
    }

    #[test]
    fn succeeds_exactly_at_threshold_not_before() {
        let task = LightsTask::from_start(16384, Difficulty::Easy);
        assert_eq!(task.step(16000), Step::Waiting);
        assert_eq!(task.step(15485), Step::Waiting);
        assert_eq!(task.step(15484), Step::Success);
        assert_eq!(task.step(15000), Step::Success);
    }

    #[test]
    fn margin_is_non_increasing_in_difficulty() {
        let start = 10000;
        let mut prev_margin = u16::MAX;
        for d in Difficulty::ALL {
            let margin = start - LightsTask::from_start(start, d).target();
            assert!(margin < prev_margin);
            prev_margin = margin;
        }
    }

    #[test]
    fn dark_start_clamps_to_zero_target() {
        let task = LightsTask::from_start(500, Difficulty::Easy);
        assert_eq!(task.target(), 0);
        assert_eq!(task.step(0), Step::Success);
    }
}
