//! Reaction task: press the button while the designated light is lit
//!
//! One of the four indicator lights is secretly designated correct. Lights
//! blink in randomized windows; pressing while the correct one is lit wins,
//! pressing at any other moment — during a decoy or during the dark gap —
//! docks the clock. Difficulty widens the decoy pool (1/2/4 candidate
//! lights) and shortens the lit window.

use core::fmt::Write as _;

use embassy_time::Timer;
use platform::{CharacterDisplay, IndicatorLed, Indicators, Line, Switch, Switches};

use crate::config::{REACTION_GAP_MS, REACTION_POLL_MS, REACTION_WINDOW_BASE_MS, REACTION_WINDOW_STEP_MS};
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::rng::Rng;
use crate::task::TaskId;

use super::Step;

/// Reaction evaluator state: the designated light and the blink pool.
pub struct ReactionTask {
    correct: IndicatorLed,
    candidates: heapless::Vec<IndicatorLed, 4>,
}

impl ReactionTask {
    /// Designate a random correct light and build the difficulty's blink
    /// pool: Easy blinks only the correct light, Medium adds one decoy,
    /// Hard blinks any of the four.
    pub fn generate(rng: &mut Rng, difficulty: Difficulty) -> Self {
        let correct = Self::pick(rng);
        let mut candidates: heapless::Vec<IndicatorLed, 4> = heapless::Vec::new();
        match difficulty {
            Difficulty::Easy => {
                let _ = candidates.push(correct);
            }
            Difficulty::Medium => {
                let _ = candidates.push(correct);
                let mut decoy = Self::pick(rng);
                while decoy == correct {
                    decoy = Self::pick(rng);
                }
                let _ = candidates.push(decoy);
            }
            Difficulty::Hard => {
                let _ = candidates.extend_from_slice(&IndicatorLed::ALL);
            }
        }
        Self { correct, candidates }
    }

    fn pick(rng: &mut Rng) -> IndicatorLed {
        IndicatorLed::ALL
            .get(rng.below(IndicatorLed::ALL.len() as u32) as usize)
            .copied()
            .unwrap_or(IndicatorLed::Red)
    }

    /// The designated light.
    pub fn correct(&self) -> IndicatorLed {
        self.correct
    }

    /// Lights eligible to blink at this difficulty.
    pub fn candidates(&self) -> &[IndicatorLed] {
        &self.candidates
    }

    /// Choose which candidate blinks next. A single-entry pool (Easy) needs
    /// no draw.
    pub fn next_blink(&self, rng: &mut Rng) -> IndicatorLed {
        if self.candidates.len() < 2 {
            return self.correct;
        }
        self.candidates
            .get(rng.below(self.candidates.len() as u32) as usize)
            .copied()
            .unwrap_or(self.correct)
    }

    /// Lit window length for `difficulty`: `1000 − 250·level` ms.
    pub fn window_ms(difficulty: Difficulty) -> u64 {
        REACTION_WINDOW_BASE_MS
            .saturating_sub(REACTION_WINDOW_STEP_MS.saturating_mul(u64::from(difficulty.level())))
    }

    /// One poll: `pressed` is a debounced press *edge*. Pressing while the
    /// correct light is lit wins; pressing during a decoy or the dark gap
    /// penalizes; not pressing keeps waiting.
    pub fn step(&self, lit: Option<IndicatorLed>, pressed: bool) -> Step {
        if !pressed {
            return Step::Waiting;
        }
        match lit {
            Some(led) if led == self.correct => Step::Success,
            _ => Step::Penalty,
        }
    }
}

/// Blink candidates in randomized windows, watching the button between
/// polls; every mistimed press edge docks the clock.
pub async fn run<D, S, I>(
    difficulty: Difficulty,
    rng: &mut Rng,
    display: &mut D,
    switches: &mut S,
    indicators: &mut I,
    countdown: &Countdown,
) -> Result<(), D::Error>
where
    D: CharacterDisplay,
    S: Switches,
    I: Indicators,
{
    display.clear()?;
    display.write_at(Line::Top, TaskId::Reaction.title())?;

    let task = ReactionTask::generate(rng, difficulty);
    let mut line: heapless::String<16> = heapless::String::new();
    let _ = write!(line, "WATCH {}", led_label_of(task.correct()));
    display.write_at(Line::Bottom, &line)?;

    let window = ReactionTask::window_ms(difficulty);
    let mut was_pressed = switches.is_pressed(Switch::Reaction);

    loop {
        // Lit window for one randomly chosen candidate.
        let lit = task.next_blink(rng);
        indicators.set_only(lit);
        let mut elapsed: u64 = 0;
        let mut won = false;
        while elapsed < window {
            let pressed = switches.is_pressed(Switch::Reaction);
            let edge = pressed && !was_pressed;
            was_pressed = pressed;
            match task.step(Some(lit), edge) {
                Step::Success => {
                    won = true;
                    break;
                }
                Step::Penalty => countdown.penalize(difficulty),
                Step::Waiting => {}
            }
            Timer::after_millis(REACTION_POLL_MS).await;
            elapsed = elapsed.saturating_add(REACTION_POLL_MS);
        }
        indicators.clear();
        if won {
            break;
        }

        // Dark gap: any press edge is premature.
        let mut elapsed: u64 = 0;
        while elapsed < REACTION_GAP_MS {
            let pressed = switches.is_pressed(Switch::Reaction);
            let edge = pressed && !was_pressed;
            was_pressed = pressed;
            if task.step(None, edge) == Step::Penalty {
                countdown.penalize(difficulty);
            }
            Timer::after_millis(REACTION_POLL_MS).await;
            elapsed = elapsed.saturating_add(REACTION_POLL_MS);
        }
    }
    Ok(())
}

fn led_label_of(led: IndicatorLed) -> &'static str {
    match led {
        IndicatorLed::Red => "RED",
        IndicatorLed::Green => "GREEN",
        IndicatorLed::Blue => "BLUE",
        IndicatorLed::Yellow => "YELLOW",
    }
}

#[cfg(test)]
mod tests {
    use platform::IndicatorLed;

    use super::{ReactionTask, Step};
    use crate::difficulty::Difficulty;
    use crate::rng::Rng;

    #[test]
    fn candidate_pool_grows_with_difficulty() {
        let mut rng = Rng::seeded(11);
        assert_eq!(
            ReactionTask::generate(&mut rng, Difficulty::Easy).candidates().len(),
            1
        );
        assert_eq!(
            ReactionTask::generate(&mut rng, Difficulty::Medium).candidates().len(),
            2
        );
        assert_eq!(
            ReactionTask::generate(&mut rng, Difficulty::Hard).candidates().len(),
            4
        );
    }

    #[test]
    fn easy_pool_contains_only_the_correct_light() {
        for seed in 1..50 {
            let mut rng = Rng::seeded(seed);
            let task = ReactionTask::generate(&mut rng, Difficulty::Easy);
            assert_eq!(task.candidates(), &[task.correct()]);
        }
    }

    #[test]
    fn medium_decoy_differs_from_correct() {
        for seed in 1..100 {
            let mut rng = Rng::seeded(seed);
            let task = ReactionTask::generate(&mut rng, Difficulty::Medium);
            let decoys: Vec<_> = task
                .candidates()
                .iter()
                .filter(|c| **c != task.correct())
                .collect();
            assert_eq!(decoys.len(), 1, "seed {seed}");
        }
    }

    #[test]
    fn window_shrinks_with_difficulty() {
        assert_eq!(ReactionTask::window_ms(Difficulty::Easy), 1000);
        assert_eq!(ReactionTask::window_ms(Difficulty::Medium), 750);
        assert_eq!(ReactionTask::window_ms(Difficulty::Hard), 500);
    }

    #[test]
    fn press_during_correct_light_wins() {
        let mut rng = Rng::seeded(5);
        let task = ReactionTask::generate(&mut rng, Difficulty::Hard);
        assert_eq!(task.step(Some(task.correct()), true), Step::Success);
    }

    #[test]
    fn press_during_decoy_or_dark_penalizes() {
        let mut rng = Rng::seeded(5);
        let task = ReactionTask::generate(&mut rng, Difficulty::Hard);
        let decoy = IndicatorLed::ALL
            .into_iter()
            .find(|l| *l != task.correct())
            .unwrap();
        assert_eq!(task.step(Some(decoy), true), Step::Penalty);
        assert_eq!(task.step(None, true), Step::Penalty);
    }

    #[test]
    fn no_press_keeps_waiting() {
        let mut rng = Rng::seeded(5);
        let task = ReactionTask::generate(&mut rng, Difficulty::Easy);
        assert_eq!(task.step(Some(task.correct()), false), Step::Waiting);
        assert_eq!(task.step(None, false), Step::Waiting);
    }
}
