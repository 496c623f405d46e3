//! Full-game dispatcher tests — run with `cargo test -p engine --test game_flow`
//!
//! These drive `Dispatcher::play` end to end against scripted mocks. The
//! scripts are built by replaying the dispatcher's own random stream with an
//! identically-seeded `Rng`: the replay yields the shuffled order and every
//! drawn target, so the keypad and sensor sequences can be laid out to
//! complete each task in a known number of polls.

// Test file: assertion math and scripted indices are intentional.
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use engine::config::COUNTDOWN_SEED_TICKS;
use engine::evaluate::binary::BinaryTask;
use engine::evaluate::direction::{angle_unit, DirectionTask};
use engine::evaluate::password::PasswordTask;
use engine::evaluate::power::PowerTask;
use engine::evaluate::reaction::ReactionTask;
use engine::{
    shuffled_order, Console, Countdown, Difficulty, Dispatcher, GameContext, GamePhase, Rng, TaskId,
};
use platform::mocks::{
    MockDisplay, MockIndicators, MockKeypad, MockLedBank, MockSensorBank, MockServo, MockSwitches,
};
use platform::Switch;

const SEED: u32 = 0xC0FF_EE01;

/// Replay the dispatcher's random stream and lay out input scripts that
/// complete every task without a single penalty.
fn build_scripts(
    seed: u32,
    difficulty: Difficulty,
) -> ([TaskId; 7], String, Vec<u16>, Vec<u16>, Vec<u16>) {
    let mut replay = Rng::seeded(seed);
    let order = shuffled_order(&mut replay);

    let mut keys = String::new();
    let mut pot: Vec<u16> = Vec::new();
    let mut therm: Vec<u16> = Vec::new();
    let mut photo: Vec<u16> = Vec::new();

    for task in order {
        match task {
            TaskId::Password => {
                let code: String = PasswordTask::generate(&mut replay, difficulty)
                    .code()
                    .iter()
                    .collect();
                keys.push_str(&code);
            }
            TaskId::Lights => {
                // Start 12000; even the tightest margin (300) is cleared by
                // a drop to 11000.
                photo.extend([12000, 11000]);
            }
            TaskId::Temperature => {
                // Start 4000; the widest margin (600) is cleared by 4700.
                therm.extend([4000, 4700]);
            }
            TaskId::Direction => {
                let start = 1000_u16;
                let target = DirectionTask::generate(&mut replay, angle_unit(start)).target_unit();
                pot.extend([start, target * 2048 + 10]);
            }
            TaskId::Power => {
                let start = 5000_u16;
                let target = PowerTask::generate(&mut replay, start, difficulty).target();
                // Land on target and hold for the two required polls.
                pot.extend([start, target, target]);
            }
            TaskId::Reaction => {
                // Consume the same draws the live evaluator will: the
                // designated light, then one blink draw per window until the
                // correct light comes up (zero draws at Easy, where only the
                // correct light ever blinks). The press pattern on the mock
                // switches lands an edge inside every window, so the run
                // ends in that first correct window.
                let task = ReactionTask::generate(&mut replay, difficulty);
                while task.next_blink(&mut replay) != task.correct() {}
            }
            TaskId::Binary => {
                keys.push(BinaryTask::generate(&mut replay).expected_key());
            }
        }
    }
    (order, keys, pot, therm, photo)
}

fn console_for(
    keys: &str,
    select_presses: &[Switch],
    pot: &[u16],
    therm: &[u16],
    photo: &[u16],
) -> Console<MockDisplay, MockKeypad, MockSwitches, MockSensorBank, MockServo, MockLedBank, MockIndicators>
{
    let mut switches = MockSwitches::new();
    for press in select_presses {
        switches.push_press(*press);
    }
    switches.set_reaction_pattern(5, 5);
    Console {
        display: MockDisplay::new(),
        keypad: MockKeypad::scripted(keys),
        switches,
        sensors: MockSensorBank::scripted(pot, therm, photo),
        servo: MockServo::new(),
        led_bank: MockLedBank::new(),
        indicators: MockIndicators::new(),
    }
}

#[tokio::test]
async fn clean_easy_run_completes_with_a_full_clock_score() {
    let (order, keys, pot, therm, photo) = build_scripts(SEED, Difficulty::Easy);
    // Sanity: the replayed order is a permutation of the whole task set.
    let mut seen = [false; 7];
    for task in order {
        seen[usize::from(task.index())] = true;
    }
    assert!(seen.iter().all(|s| *s));

    let ctx = GameContext::new();
    let countdown = Countdown::new();
    let mut console = console_for(&keys, &[Switch::Commit], &pot, &therm, &photo);
    let mut dispatcher = Dispatcher::new(
        ctx.task_slot().unwrap(),
        &countdown,
        Rng::seeded(SEED),
    );

    let score = dispatcher.play(&mut console).await.unwrap();

    // No penalties and nobody ticking the clock: the full seed converts.
    assert_eq!(score, COUNTDOWN_SEED_TICKS / 8);
    assert_eq!(dispatcher.phase(), GamePhase::Complete);
    assert_eq!(ctx.active_task(), None, "marker cleared after the last task");
    assert!(!countdown.is_armed(), "countdown stopped on completion");
    assert!(console.display.ever_showed("SYSTEMS ONLINE"));
    assert!(console.display.ever_showed("SCORE 300"));
    assert_eq!(console.keypad.remaining(), 0);
    assert_eq!(console.sensors.potentiometer.remaining(), 0);
    assert_eq!(console.sensors.thermistor.remaining(), 0);
    assert_eq!(console.sensors.photoresistor.remaining(), 0);
}

#[tokio::test]
async fn cycling_wraps_back_to_easy() {
    let (_, keys, pot, therm, photo) = build_scripts(SEED, Difficulty::Easy);

    let ctx = GameContext::new();
    let countdown = Countdown::new();
    // Three cycles wrap Easy → Medium → Hard → Easy.
    let mut console = console_for(
        &keys,
        &[Switch::Cycle, Switch::Cycle, Switch::Cycle, Switch::Commit],
        &pot,
        &therm,
        &photo,
    );
    let mut dispatcher = Dispatcher::new(
        ctx.task_slot().unwrap(),
        &countdown,
        Rng::seeded(SEED),
    );

    let score = dispatcher.play(&mut console).await.unwrap();
    assert_eq!(score, COUNTDOWN_SEED_TICKS / 8);
}
