//! Driver-level evaluator tests — run with `cargo test -p engine --test evaluator_drivers`
//!
//! Each test runs a full async evaluator loop against scripted mocks and
//! checks the observable contract: what was consumed, what the countdown
//! lost, what ended up on the panel. The target-replay trick: a second
//! `Rng` with the same seed regenerates the evaluator's random target so
//! the script can be built around it.

// Test file: assertion math and scripted indices are intentional.
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use engine::config::COUNTDOWN_SEED_TICKS;
use engine::evaluate::direction::{angle_unit, DirectionTask};
use engine::evaluate::password::PasswordTask;
use engine::evaluate::power::PowerTask;
use engine::evaluate::binary::BinaryTask;
use engine::evaluate::{binary, direction, lights, password, power, reaction, temperature};
use engine::{Countdown, Difficulty, Rng};
use platform::mocks::{
    MockDisplay, MockIndicators, MockKeypad, MockLedBank, MockSampleSource, MockServo,
    MockSwitches,
};

const SEED: u32 = 0x5EED_0001;

#[tokio::test]
async fn lights_completes_on_the_threshold_poll_not_earlier() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    // Start 16384 → Easy target 15484. The loop must consume every scripted
    // sample: terminating early would leave some behind.
    let mut sensor = MockSampleSource::scripted(&[16384, 16000, 15485, 15484]);

    lights::run(Difficulty::Easy, &mut display, &mut sensor, &countdown)
        .await
        .unwrap();

    assert_eq!(sensor.remaining(), 0, "loop ended on the wrong iteration");
    assert_eq!(
        countdown.remaining(),
        COUNTDOWN_SEED_TICKS,
        "one-directional task must never penalize"
    );
    assert!(display.ever_showed("CUT THE LIGHTS"));
}

#[tokio::test]
async fn temperature_completes_when_the_probe_warms() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    // Start 4000 → Easy target 4600.
    let mut sensor = MockSampleSource::scripted(&[4000, 4300, 4600]);

    temperature::run(Difficulty::Easy, &mut display, &mut sensor, &countdown)
        .await
        .unwrap();

    assert_eq!(sensor.remaining(), 0);
    assert_eq!(countdown.remaining(), COUNTDOWN_SEED_TICKS);
}

#[tokio::test]
async fn power_overshoot_records_exactly_one_penalty() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    let mut rng = Rng::seeded(SEED);

    // Replay the target the driver will draw from an identical stream.
    let mut replay = Rng::seeded(SEED);
    let start = 5000_u16;
    let target = PowerTask::generate(&mut replay, start, Difficulty::Easy).target();

    // Easy: accept ±150, penalty beyond ±750. One excursion 800 out, then
    // two steady polls on target.
    let excursion = if target < 8000 {
        target + 800
    } else {
        target - 800
    };
    let mut sensor = MockSampleSource::scripted(&[start, excursion, target, target]);

    power::run(
        Difficulty::Easy,
        &mut rng,
        &mut display,
        &mut sensor,
        &countdown,
    )
    .await
    .unwrap();

    assert_eq!(sensor.remaining(), 0);
    assert_eq!(
        countdown.remaining(),
        COUNTDOWN_SEED_TICKS - Difficulty::Easy.penalty_ticks(),
        "exactly one penalty decrement"
    );
}

#[tokio::test]
async fn power_steady_hold_completes_without_penalty() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    let mut rng = Rng::seeded(SEED);
    let mut replay = Rng::seeded(SEED);
    let start = 5000_u16;
    let target = PowerTask::generate(&mut replay, start, Difficulty::Easy).target();

    let mut sensor = MockSampleSource::scripted(&[start, target, target]);
    power::run(
        Difficulty::Easy,
        &mut rng,
        &mut display,
        &mut sensor,
        &countdown,
    )
    .await
    .unwrap();

    assert_eq!(countdown.remaining(), COUNTDOWN_SEED_TICKS);
}

#[tokio::test]
async fn password_wrong_key_costs_one_decrement_then_recovers() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    let mut rng = Rng::seeded(SEED);

    let mut replay = Rng::seeded(SEED);
    let code: String = PasswordTask::generate(&mut replay, Difficulty::Easy)
        .code()
        .iter()
        .collect();

    // '*' is reserved and can never open a code position.
    let mut keypad = MockKeypad::scripted(&format!("*{code}"));
    password::run(
        Difficulty::Easy,
        &mut rng,
        &mut display,
        &mut keypad,
        &countdown,
    )
    .await
    .unwrap();

    assert_eq!(keypad.remaining(), 0);
    assert_eq!(
        countdown.remaining(),
        COUNTDOWN_SEED_TICKS - Difficulty::Easy.penalty_ticks()
    );
    assert!(display.ever_showed(&code), "code must be prompted on screen");
}

#[tokio::test]
async fn password_clean_entry_costs_nothing() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    let mut rng = Rng::seeded(SEED);
    let mut replay = Rng::seeded(SEED);
    let code: String = PasswordTask::generate(&mut replay, Difficulty::Easy)
        .code()
        .iter()
        .collect();

    let mut keypad = MockKeypad::scripted(&code);
    password::run(
        Difficulty::Easy,
        &mut rng,
        &mut display,
        &mut keypad,
        &countdown,
    )
    .await
    .unwrap();

    assert_eq!(countdown.remaining(), COUNTDOWN_SEED_TICKS);
}

#[tokio::test]
async fn binary_wrong_key_penalizes_and_reprompts() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    let mut rng = Rng::seeded(SEED);
    let mut led_bank = MockLedBank::new();

    let mut replay = Rng::seeded(SEED);
    let expected = BinaryTask::generate(&mut replay).expected_key();
    let wrong = if expected == '5' { '6' } else { '5' };

    let mut keypad = MockKeypad::new();
    keypad.push_key(wrong);
    keypad.push_key(expected);

    binary::run(
        Difficulty::Easy,
        &mut rng,
        &mut display,
        &mut keypad,
        &mut led_bank,
        &countdown,
    )
    .await
    .unwrap();

    assert_eq!(keypad.remaining(), 0);
    assert_eq!(
        countdown.remaining(),
        COUNTDOWN_SEED_TICKS - Difficulty::Easy.penalty_ticks()
    );
    assert_eq!(led_bank.pattern(), 0, "bank must be blanked after success");
}

#[tokio::test]
async fn direction_overshoot_penalizes_then_exact_unit_wins() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    let mut rng = Rng::seeded(SEED);
    let mut servo = MockServo::new();

    let start = 1000_u16; // unit 0 → target drawn in the right half
    let mut replay = Rng::seeded(SEED);
    let target = DirectionTask::generate(&mut replay, angle_unit(start)).target_unit();

    let mut samples = vec![start];
    let overshoots = target < 7;
    if overshoots {
        samples.push((target + 1) * 2048 + 10);
    }
    samples.push(target * 2048 + 10);
    let mut sensor = MockSampleSource::scripted(&samples);

    direction::run(
        Difficulty::Easy,
        &mut rng,
        &mut display,
        &mut sensor,
        &mut servo,
        &countdown,
    )
    .await
    .unwrap();

    let expected_loss = if overshoots {
        Difficulty::Easy.penalty_ticks()
    } else {
        0
    };
    assert_eq!(countdown.remaining(), COUNTDOWN_SEED_TICKS - expected_loss);
    // The servo mirrors every polled sample.
    assert_eq!(servo.last_position(), Some(target * 2048 + 10));
}

#[tokio::test]
async fn reaction_press_during_lit_window_completes() {
    let countdown = Countdown::new();
    countdown.arm(COUNTDOWN_SEED_TICKS);
    let mut display = MockDisplay::new();
    let mut rng = Rng::seeded(SEED);
    let mut indicators = MockIndicators::new();

    let mut switches = MockSwitches::new();
    // Released for 5 polls, held for 5: a press edge lands well inside the
    // first 1000 ms window at Easy.
    switches.set_reaction_pattern(5, 5);

    reaction::run(
        Difficulty::Easy,
        &mut rng,
        &mut display,
        &mut switches,
        &mut indicators,
        &countdown,
    )
    .await
    .unwrap();

    assert_eq!(indicators.lit(), None, "lights cleared after success");
    assert_eq!(
        countdown.remaining(),
        COUNTDOWN_SEED_TICKS,
        "a press inside the first correct window costs nothing"
    );
}
