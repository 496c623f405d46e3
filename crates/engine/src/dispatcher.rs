//! Game dispatcher
//!
//! Sequences one full run: `Boot → DifficultySelect → Shuffle →
//! Playing(0..6) → Complete`. The `Expired` phase is never entered from
//! here — the countdown's terminal transition preempts the whole play
//! future from the outside (the game task races it against the expiry
//! signal) and renders the failure screen via [`render_expired`].
//!
//! Dispatch over [`TaskId`] is an exhaustive `match`: a corrupted order
//! table is unrepresentable, so the legacy "task not found" path has no
//! equivalent here.

use core::fmt::Write as _;

use embassy_time::Timer;
use platform::{
    CharacterDisplay, IndicatorLed, Indicators, Keypad, LedBank, Line, SensorBank, SensorChannel,
    Servo, Switch, Switches,
};

use crate::config::{COUNTDOWN_SEED_TICKS, SCORE_TICK_DIVISOR};
use crate::context::TaskSlot;
use crate::countdown::Countdown;
use crate::difficulty::Difficulty;
use crate::evaluate::{binary, direction, lights, password, power, reaction, temperature};
use crate::rng::Rng;
use crate::task::{shuffled_order, TaskId};

/// Milliseconds the boot banner stays up.
const BANNER_MS: u64 = 1500;

/// Dispatcher state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    /// Power-on banner.
    Boot,
    /// Difficulty selection — outside the countdown, no timeout.
    DifficultySelect,
    /// Task-order generation.
    Shuffle,
    /// Mini-task `0..=6` in progress.
    Playing(u8),
    /// All seven tasks done; score rendered.
    Complete,
    /// Countdown hit zero mid-run (observed from outside the dispatcher).
    Expired,
}

/// Every peripheral the dispatcher drives, grouped to keep call signatures
/// sane. Firmware fills this with hardware adapters, tests with mocks.
pub struct Console<D, K, S, B, V, L, I> {
    /// Character LCD.
    pub display: D,
    /// Matrix keypad.
    pub keypad: K,
    /// Panel switches.
    pub switches: S,
    /// Per-channel sensor streams.
    pub sensors: B,
    /// Positional servo.
    pub servo: V,
    /// External binary LED bank.
    pub led_bank: L,
    /// Indicator light group.
    pub indicators: I,
}

/// The game dispatcher. Holds the unique active-task write handle — nothing
/// else in the system can move the marker.
pub struct Dispatcher<'a> {
    slot: TaskSlot<'a>,
    countdown: &'a Countdown,
    rng: Rng,
    phase: GamePhase,
}

impl<'a> Dispatcher<'a> {
    /// Build a dispatcher around the context's task slot and the countdown.
    pub fn new(slot: TaskSlot<'a>, countdown: &'a Countdown, rng: Rng) -> Self {
        Self {
            slot,
            countdown,
            rng,
            phase: GamePhase::Boot,
        }
    }

    /// Current phase, for observation.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Run one full game. Returns the final score.
    ///
    /// Never returns on countdown expiry — the caller races this future
    /// against [`Countdown::expired`] and abandons it in place.
    pub async fn play<D, K, S, B, V, L, I>(
        &mut self,
        console: &mut Console<D, K, S, B, V, L, I>,
    ) -> Result<u32, D::Error>
    where
        D: CharacterDisplay,
        K: Keypad,
        S: Switches,
        B: SensorBank,
        V: Servo,
        L: LedBank,
        I: Indicators,
    {
        self.phase = GamePhase::Boot;
        console.display.clear()?;
        console.display.write_at(Line::Top, "ENGINEERING")?;
        console.display.write_at(Line::Bottom, "SIMULATOR")?;
        Timer::after_millis(BANNER_MS).await;

        self.phase = GamePhase::DifficultySelect;
        let difficulty = select_difficulty(&mut console.display, &mut console.switches).await?;

        self.phase = GamePhase::Shuffle;
        let order = shuffled_order(&mut self.rng);

        self.countdown.arm(COUNTDOWN_SEED_TICKS);
        for (index, task) in order.into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)] // index < 7
            {
                self.phase = GamePhase::Playing(index as u8);
            }
            // Routing invariant: the marker moves strictly before the
            // evaluator starts polling, and not again until it returns.
            self.slot.set(task);
            self.run_task(task, difficulty, console).await?;
            self.slot.clear();
        }

        self.countdown.stop();
        self.phase = GamePhase::Complete;
        let score = final_score(self.countdown.remaining(), difficulty);
        console.display.clear()?;
        console.display.write_at(Line::Top, "SYSTEMS ONLINE")?;
        let mut line: heapless::String<16> = heapless::String::new();
        let _ = write!(line, "SCORE {score}");
        console.display.write_at(Line::Bottom, &line)?;
        Ok(score)
    }

    /// Invoke the evaluator for `task`. Exhaustive over every identity.
    async fn run_task<D, K, S, B, V, L, I>(
        &mut self,
        task: TaskId,
        difficulty: Difficulty,
        console: &mut Console<D, K, S, B, V, L, I>,
    ) -> Result<(), D::Error>
    where
        D: CharacterDisplay,
        K: Keypad,
        S: Switches,
        B: SensorBank,
        V: Servo,
        L: LedBank,
        I: Indicators,
    {
        match task {
            TaskId::Password => {
                password::run(
                    difficulty,
                    &mut self.rng,
                    &mut console.display,
                    &mut console.keypad,
                    self.countdown,
                )
                .await
            }
            TaskId::Lights => {
                let mut sensor = console.sensors.acquire(SensorChannel::Photoresistor);
                lights::run(difficulty, &mut console.display, &mut sensor, self.countdown).await
            }
            TaskId::Temperature => {
                let mut sensor = console.sensors.acquire(SensorChannel::Thermistor);
                temperature::run(difficulty, &mut console.display, &mut sensor, self.countdown)
                    .await
            }
            TaskId::Direction => {
                let mut sensor = console.sensors.acquire(SensorChannel::Potentiometer);
                direction::run(
                    difficulty,
                    &mut self.rng,
                    &mut console.display,
                    &mut sensor,
                    &mut console.servo,
                    self.countdown,
                )
                .await
            }
            TaskId::Power => {
                let mut sensor = console.sensors.acquire(SensorChannel::Potentiometer);
                power::run(
                    difficulty,
                    &mut self.rng,
                    &mut console.display,
                    &mut sensor,
                    self.countdown,
                )
                .await
            }
            TaskId::Reaction => {
                reaction::run(
                    difficulty,
                    &mut self.rng,
                    &mut console.display,
                    &mut console.switches,
                    &mut console.indicators,
                    self.countdown,
                )
                .await
            }
            TaskId::Binary => {
                binary::run(
                    difficulty,
                    &mut self.rng,
                    &mut console.display,
                    &mut console.keypad,
                    &mut console.led_bank,
                    self.countdown,
                )
                .await
            }
        }
    }
}

/// Difficulty selection: Cycle steps through the levels with wraparound,
/// Commit locks the shown level in. No timeout — the countdown is not
/// running yet.
async fn select_difficulty<D, S>(display: &mut D, switches: &mut S) -> Result<Difficulty, D::Error>
where
    D: CharacterDisplay,
    S: Switches,
{
    let mut difficulty = Difficulty::default();
    display.clear()?;
    display.write_at(Line::Top, "SELECT LEVEL")?;
    loop {
        display.write_at(Line::Bottom, difficulty.label())?;
        match switches.next_press().await {
            Switch::Cycle => difficulty = difficulty.cycled(),
            Switch::Commit => return Ok(difficulty),
            Switch::Reaction => {} // has no meaning outside its task
        }
    }
}

/// Final score: seconds of countdown left, scaled up with difficulty.
pub fn final_score(remaining_ticks: u32, difficulty: Difficulty) -> u32 {
    (remaining_ticks / SCORE_TICK_DIVISOR).saturating_mul(difficulty.score_factor())
}

/// Terminal failure screen: fixed message, fault indicator lit. Called from
/// the expiry path after the play future has been abandoned.
pub fn render_expired<D, I>(display: &mut D, indicators: &mut I) -> Result<(), D::Error>
where
    D: CharacterDisplay,
    I: Indicators,
{
    display.clear()?;
    display.write_at(Line::Top, "TIME EXPIRED")?;
    display.write_at(Line::Bottom, "CONSOLE LOCKED")?;
    indicators.set_only(IndicatorLed::Red);
    Ok(())
}
