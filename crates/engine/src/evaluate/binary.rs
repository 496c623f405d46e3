//! Binary task: name the value shown on the external LED bank
//!
//! A random value in `0..=13` is driven onto the four external LEDs as its
//! bit pattern (LED0 = least significant bit); the player answers with the
//! matching hexadecimal keypad symbol. Any other keystroke penalizes and the
//! prompt stands.

use embassy_time::Timer;
use platform::{CharacterDisplay, Keypad, LedBank, Line};

use crate::config::{BINARY_MAX_VALUE, POLL_INTERVAL_MS};
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::rng::Rng;
use crate::task::TaskId;

use super::Step;

/// Binary-to-hex evaluator state.
pub struct BinaryTask {
    value: u8,
}

impl BinaryTask {
    /// Draw a value in `0..=`[`BINARY_MAX_VALUE`].
    pub fn generate(rng: &mut Rng) -> Self {
        #[allow(clippy::cast_possible_truncation)] // bounded by BINARY_MAX_VALUE
        let value = rng.below(u32::from(BINARY_MAX_VALUE) + 1) as u8;
        Self { value }
    }

    /// Build around a known value (tests).
    pub fn with_value(value: u8) -> Self {
        Self {
            value: value.min(BINARY_MAX_VALUE),
        }
    }

    /// The LED bit pattern to drive, LED0 = bit 0.
    pub fn pattern(&self) -> u8 {
        self.value
    }

    /// The keypad symbol that names the pattern.
    pub fn expected_key(&self) -> char {
        match self.value {
            0..=9 => char::from(b'0'.saturating_add(self.value)),
            10 => 'A',
            11 => 'B',
            12 => 'C',
            _ => 'D',
        }
    }

    /// One keystroke: the matching hex symbol succeeds, anything else
    /// penalizes.
    pub fn step(&self, key: char) -> Step {
        if key == self.expected_key() {
            Step::Success
        } else {
            Step::Penalty
        }
    }
}

/// Light the pattern and consume keystrokes until the right symbol arrives.
pub async fn run<D, K, L>(
    difficulty: Difficulty,
    rng: &mut Rng,
    display: &mut D,
    keypad: &mut K,
    led_bank: &mut L,
    countdown: &Countdown,
) -> Result<(), D::Error>
where
    D: CharacterDisplay,
    K: Keypad,
    L: LedBank,
{
    display.clear()?;
    display.write_at(Line::Top, TaskId::Binary.title())?;
    display.write_at(Line::Bottom, "HEX KEY?")?;

    let task = BinaryTask::generate(rng);
    led_bank.set_pattern(task.pattern());

    loop {
        let key = keypad.read_key().await;
        match task.step(key) {
            Step::Success => break,
            Step::Penalty => {
                countdown.penalize(difficulty);
                display.write_at(Line::Bottom, "HEX KEY? NO")?;
                Timer::after_millis(POLL_INTERVAL_MS).await;
                display.write_at(Line::Bottom, "HEX KEY?   ")?;
            }
            Step::Waiting => {}
        }
    }
    led_bank.set_pattern(0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BinaryTask, Step};
    use crate::config::BINARY_MAX_VALUE;
    use crate::rng::Rng;

    #[test]
    fn generated_values_stay_in_led_range() {
        for seed in 1..200 {
            let mut rng = Rng::seeded(seed);
            assert!(BinaryTask::generate(&mut rng).pattern() <= BINARY_MAX_VALUE);
        }
    }

    #[test]
    fn expected_key_covers_digits_and_letters() {
        assert_eq!(BinaryTask::with_value(0).expected_key(), '0');
        assert_eq!(BinaryTask::with_value(9).expected_key(), '9');
        assert_eq!(BinaryTask::with_value(10).expected_key(), 'A');
        assert_eq!(BinaryTask::with_value(13).expected_key(), 'D');
    }

    #[test]
    fn only_the_matching_symbol_succeeds() {
        let task = BinaryTask::with_value(10);
        assert_eq!(task.step('A'), Step::Success);
        assert_eq!(task.step('B'), Step::Penalty);
        assert_eq!(task.step('0'), Step::Penalty);
        assert_eq!(task.step('*'), Step::Penalty);
    }

    #[test]
    fn pattern_is_the_value_itself_lsb_first() {
        // 0b1010 = 10: LED1 and LED3 lit.
        assert_eq!(BinaryTask::with_value(10).pattern(), 0b1010);
    }
}
