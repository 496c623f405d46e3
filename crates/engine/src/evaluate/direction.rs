//! Direction task: steer the servo to a target angle unit
//!
//! The potentiometer sample is quantized into eight angle units (2048 raw
//! counts each). The target unit is drawn on the opposite side of centre
//! from the starting position, so the player always has to travel. The
//! servo horn mirrors the potentiometer continuously; overshooting past the
//! target in the direction of travel penalizes once per excursion.

use core::fmt::Write as _;

use embassy_time::Timer;
use platform::{CharacterDisplay, Line, SampleSource, Servo};

use crate::config::{DIRECTION_STEP, DIRECTION_UNITS, POLL_INTERVAL_MS};
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::rng::Rng;
use crate::task::TaskId;

use super::Step;

/// Quantize a raw sample into an angle unit, `0..DIRECTION_UNITS`.
pub fn angle_unit(raw: u16) -> u16 {
    (raw / DIRECTION_STEP).min(DIRECTION_UNITS.saturating_sub(1))
}

/// Servo-direction evaluator state.
pub struct DirectionTask {
    target_unit: u16,
    rightward: bool,
    overshot: bool,
}

impl DirectionTask {
    /// Draw a target unit on the side of centre opposite `start_unit`.
    pub fn generate(rng: &mut Rng, start_unit: u16) -> Self {
        let half = DIRECTION_UNITS / 2;
        #[allow(clippy::cast_possible_truncation)] // draw bounded by half
        let draw = rng.below(u32::from(half)) as u16;
        let target_unit = if start_unit < half {
            // Start on the left: target in the right half.
            half.saturating_add(draw)
        } else {
            draw
        };
        Self::with_target(target_unit, start_unit)
    }

    /// Build around a known target (tests).
    pub fn with_target(target_unit: u16, start_unit: u16) -> Self {
        Self {
            target_unit,
            rightward: target_unit > start_unit,
            overshot: false,
        }
    }

    /// The unit the player must park on.
    pub fn target_unit(&self) -> u16 {
        self.target_unit
    }

    /// One poll over the quantized position. Exact unit match → success;
    /// passing the target in the travel direction → one penalty per
    /// excursion, re-armed when the player comes back.
    pub fn step(&mut self, unit: u16) -> Step {
        if unit == self.target_unit {
            self.overshot = false;
            return Step::Success;
        }
        let beyond = if self.rightward {
            unit > self.target_unit
        } else {
            unit < self.target_unit
        };
        if beyond {
            if self.overshot {
                Step::Waiting
            } else {
                self.overshot = true;
                Step::Penalty
            }
        } else {
            self.overshot = false;
            Step::Waiting
        }
    }
}

/// Poll the potentiometer, mirroring every sample onto the servo horn, and
/// evaluate the quantized position until the target unit is hit.
pub async fn run<D, S, V>(
    difficulty: Difficulty,
    rng: &mut Rng,
    display: &mut D,
    sensor: &mut S,
    servo: &mut V,
    countdown: &Countdown,
) -> Result<(), D::Error>
where
    D: CharacterDisplay,
    S: SampleSource,
    V: Servo,
{
    display.clear()?;
    display.write_at(Line::Top, TaskId::Direction.title())?;

    let start = sensor.next_sample().await;
    let mut task = DirectionTask::generate(rng, angle_unit(start));

    loop {
        let sample = sensor.next_sample().await;
        servo.set_position_raw(sample);

        let unit = angle_unit(sample);
        let mut line: heapless::String<16> = heapless::String::new();
        let _ = write!(line, "POS {unit}  TGT {}", task.target_unit());
        display.write_at(Line::Bottom, &line)?;

        match task.step(unit) {
            Step::Success => break,
            Step::Penalty => countdown.penalize(difficulty),
            Step::Waiting => {}
        }
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
    Ok(())
}
