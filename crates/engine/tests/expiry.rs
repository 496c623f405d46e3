//! Terminal-expiry tests — run with `cargo test -p engine --test expiry`
//!
//! The countdown's zero crossing must preempt whichever evaluator is
//! polling, without that evaluator's cooperation: the game future is raced
//! against the expiry signal and abandoned in place, exactly as the
//! firmware's game task does it.

// Test file: assertion math and scripted indices are intentional.
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use embassy_time::Timer;
use engine::evaluate::lights;
use engine::{render_expired, Countdown, Difficulty};
use platform::mocks::{MockDisplay, MockIndicators, MockSampleSource};
use platform::IndicatorLed;

#[tokio::test]
async fn expiry_preempts_a_stuck_evaluator() {
    let countdown = Countdown::new();
    countdown.arm(8);

    let mut display = MockDisplay::new();
    // The light never dims: target 16000 - 900, samples stay at the start.
    let mut sensor = MockSampleSource::scripted(&[16000]);

    let evaluator = lights::run(Difficulty::Easy, &mut display, &mut sensor, &countdown);
    let clock = async {
        loop {
            countdown.tick();
            Timer::after_millis(5).await;
        }
    };

    tokio::select! {
        _ = evaluator => panic!("evaluator must not complete"),
        () = countdown.expired() => {}
        () = clock => unreachable!(),
    }

    assert!(countdown.has_expired());
    assert_eq!(countdown.remaining(), 0);

    // The evaluator future is gone; the terminal handler now owns the panel.
    let mut indicators = MockIndicators::new();
    render_expired(&mut display, &mut indicators).unwrap();
    assert_eq!(display.line(platform::Line::Top), "TIME EXPIRED");
    assert_eq!(indicators.lit(), Some(IndicatorLed::Red));
}

#[tokio::test]
async fn expiry_fires_even_when_caused_by_a_penalty() {
    let countdown = Countdown::new();
    countdown.arm(4);
    // Hard penalty is 24 ticks — one call blows straight past zero.
    countdown.penalize(Difficulty::Hard);
    countdown.expired().await; // must already be latched
    assert_eq!(countdown.remaining(), 0);
}
