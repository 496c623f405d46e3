//! Password task: reproduce a generated passcode on the keypad
//!
//! A random code of `4 + difficulty` symbols is drawn from the keypad grid,
//! excluding the two reserved menu symbols. The player re-enters it one
//! character at a time; every mismatch docks the clock and re-prompts the
//! same position until it is correct. The code is ephemeral — it lives only
//! for the duration of the task.

use core::fmt::Write as _;

use platform::{CharacterDisplay, Keypad, Line, KEYPAD_GRID, RESERVED_KEYS};

use crate::config::PASSWORD_BASE_LEN;
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::rng::Rng;
use crate::task::TaskId;

use super::Step;

/// Longest possible code (Hard).
pub const MAX_CODE_LEN: usize = PASSWORD_BASE_LEN + 2;

/// Password evaluator state: the generated code and entry progress.
pub struct PasswordTask {
    code: heapless::Vec<char, MAX_CODE_LEN>,
    entered: usize,
}

impl PasswordTask {
    /// Draw a code of `4 + difficulty` printable symbols (rejection-samples
    /// past the reserved `*`/`#` keys).
    pub fn generate(rng: &mut Rng, difficulty: Difficulty) -> Self {
        let len = PASSWORD_BASE_LEN.saturating_add(usize::from(difficulty.level()));
        let mut code = heapless::Vec::new();
        while code.len() < len {
            let row = rng.below(4) as usize;
            let col = rng.below(4) as usize;
            let symbol = KEYPAD_GRID
                .get(row)
                .and_then(|r| r.get(col))
                .copied()
                .unwrap_or('0');
            if RESERVED_KEYS.contains(&symbol) {
                continue;
            }
            let _ = code.push(symbol);
        }
        Self { code, entered: 0 }
    }

    /// The generated code.
    pub fn code(&self) -> &[char] {
        &self.code
    }

    /// Characters entered correctly so far.
    pub fn progress(&self) -> usize {
        self.entered
    }

    /// One keystroke. A match advances (success on the final position); a
    /// mismatch penalizes and keeps the cursor on the same position.
    pub fn step(&mut self, key: char) -> Step {
        match self.code.get(self.entered) {
            Some(expected) if *expected == key => {
                self.entered = self.entered.saturating_add(1);
                if self.entered == self.code.len() {
                    Step::Success
                } else {
                    Step::Waiting
                }
            }
            _ => Step::Penalty,
        }
    }
}

/// Show the code and consume keystrokes until it is reproduced.
pub async fn run<D, K>(
    difficulty: Difficulty,
    rng: &mut Rng,
    display: &mut D,
    keypad: &mut K,
    countdown: &Countdown,
) -> Result<(), D::Error>
where
    D: CharacterDisplay,
    K: Keypad,
{
    display.clear()?;
    let mut task = PasswordTask::generate(rng, difficulty);

    let mut top: heapless::String<16> = heapless::String::new();
    let _ = write!(top, "{}", TaskId::Password.title());
    display.write_at(Line::Top, &top)?;

    let mut code_line: heapless::String<16> = heapless::String::new();
    for symbol in task.code() {
        let _ = code_line.push(*symbol);
    }
    display.write_at(Line::Bottom, &code_line)?;

    loop {
        let key = keypad.read_key().await;
        match task.step(key) {
            Step::Success => break,
            Step::Penalty => countdown.penalize(difficulty),
            Step::Waiting => {}
        }
        // Entry feedback: code on the left, one mark per accepted symbol.
        let mut line: heapless::String<16> = heapless::String::new();
        for symbol in task.code() {
            let _ = line.push(*symbol);
        }
        let _ = line.push(' ');
        for _ in 0..task.progress() {
            let _ = line.push('=');
        }
        display.write_at(Line::Bottom, &line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use platform::RESERVED_KEYS;

    use super::{PasswordTask, Step};
    use crate::difficulty::Difficulty;
    use crate::rng::Rng;

    #[test]
    fn code_length_grows_with_difficulty() {
        let mut rng = Rng::seeded(99);
        assert_eq!(
            PasswordTask::generate(&mut rng, Difficulty::Easy).code().len(),
            4
        );
        assert_eq!(
            PasswordTask::generate(&mut rng, Difficulty::Medium).code().len(),
            5
        );
        assert_eq!(
            PasswordTask::generate(&mut rng, Difficulty::Hard).code().len(),
            6
        );
    }

    #[test]
    fn code_never_contains_reserved_symbols() {
        for seed in 1..200 {
            let mut rng = Rng::seeded(seed);
            let task = PasswordTask::generate(&mut rng, Difficulty::Hard);
            for symbol in task.code() {
                assert!(!RESERVED_KEYS.contains(symbol), "seed {seed}: {symbol}");
            }
        }
    }

    #[test]
    fn exact_entry_succeeds_with_no_penalty() {
        let mut rng = Rng::seeded(7);
        let mut task = PasswordTask::generate(&mut rng, Difficulty::Easy);
        let code: Vec<char> = task.code().to_vec();
        let (last, rest) = code.split_last().unwrap();
        for key in rest {
            assert_eq!(task.step(*key), Step::Waiting);
        }
        assert_eq!(task.step(*last), Step::Success);
    }

    #[test]
    fn mismatch_penalizes_and_reprompts_same_position() {
        let mut rng = Rng::seeded(7);
        let mut task = PasswordTask::generate(&mut rng, Difficulty::Easy);
        let code: Vec<char> = task.code().to_vec();
        // A symbol that differs from position 0 ('*' is reserved, never in a code).
        assert_eq!(task.step('*'), Step::Penalty);
        assert_eq!(task.progress(), 0, "cursor must not advance on mismatch");
        // Correct entry still completes from here — exactly one penalty total.
        let (last, rest) = code.split_last().unwrap();
        for key in rest {
            assert_eq!(task.step(*key), Step::Waiting);
        }
        assert_eq!(task.step(*last), Step::Success);
    }
}
