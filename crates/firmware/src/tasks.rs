//! Interrupt-style Embassy tasks
//!
//! The three asynchronous sources in the system — ADC conversion complete,
//! countdown tick/expiry, urgency oscillator edges — live here as tasks,
//! decoupled from the game sequence by channels and the shared context:
//!
//! ```text
//! adc_task ── Conversion ──► router_task ──► shared latch
//!    ▲                            │
//!    └──────── re-trigger ◄───────┘ (inactive channels)
//!
//! countdown_task ── tick ──► Countdown ── expiry signal ──► game_task
//! urgency_task  ◄── remaining ─┘
//! ```

use embassy_stm32::adc::Adc;
use embassy_stm32::gpio::{AnyPin, Output};
use embassy_stm32::peripherals::{ADC1, PA6, PC4, PC5};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker, Timer};
use platform::{Buzzer, Conversion, SensorChannel};

use engine::config::{TICK_MS, URGENCY_PULSE_MS};
use engine::{
    render_expired, urgency_period_ticks, Countdown, Dispatcher, GameContext, Rng, SensorRouter,
};

use crate::hal::{BoardAdc, BoardConsole, PwmBuzzer};

/// Depth of the conversion-request queue.
pub const TRIGGER_DEPTH: usize = 8;

/// Depth of the conversion-complete queue. If the router stalls, further
/// conversions are dropped rather than blocking the pump.
pub const CONVERSION_DEPTH: usize = 16;

/// Pending conversion requests, written by every [`BoardAdc`] handle.
pub static TRIGGERS: Channel<CriticalSectionRawMutex, SensorChannel, TRIGGER_DEPTH> =
    Channel::new();

/// Completed conversions, pumped from the converter to the router.
pub static CONVERSIONS: Channel<CriticalSectionRawMutex, Conversion, CONVERSION_DEPTH> =
    Channel::new();

/// The shared game context (active-task marker + sample latch).
pub static GAME: GameContext = GameContext::new();

/// The master countdown.
pub static COUNTDOWN: Countdown = Countdown::new();

/// A fresh conversion-request handle.
pub fn board_adc() -> BoardAdc {
    BoardAdc::new(TRIGGERS.sender())
}

/// Prime the sequencer: one pending conversion per channel. From then on
/// every discard and every evaluator poll keeps the rotation alive.
pub fn kick_sequencer() {
    use platform::AdcSequencer as _;
    let mut adc = board_adc();
    for channel in [
        SensorChannel::Potentiometer,
        SensorChannel::Thermistor,
        SensorChannel::Photoresistor,
    ] {
        adc.retrigger(channel);
    }
}

/// Converter pump: performs each requested conversion and reports it.
#[embassy_executor::task]
pub async fn adc_task(
    mut adc: Adc<'static, ADC1>,
    mut pot: PA6,
    mut therm: PC4,
    mut photo: PC5,
) {
    loop {
        let channel = TRIGGERS.receive().await;
        let raw = match channel {
            SensorChannel::Potentiometer => adc.read(&mut pot),
            SensorChannel::Thermistor => adc.read(&mut therm),
            SensorChannel::Photoresistor => adc.read(&mut photo),
        };
        // Drop on overflow: the next re-trigger reissues the conversion.
        let _ = CONVERSIONS.try_send(Conversion { channel, raw });
    }
}

/// Routing: latch samples for the active task, re-trigger everything else.
#[embassy_executor::task]
pub async fn router_task(mut router: SensorRouter<'static>) {
    let mut adc = board_adc();
    loop {
        let conversion = CONVERSIONS.receive().await;
        router.on_conversion(&mut adc, conversion);
    }
}

/// The game clock: one [`Countdown::tick`] per game tick.
#[embassy_executor::task]
pub async fn countdown_task() {
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    loop {
        ticker.next().await;
        COUNTDOWN.tick();
    }
}

/// Urgency oscillator: a short beep/blink pulse, then a pause proportional
/// to the remaining time — the rate climbs as the clock runs out.
#[embassy_executor::task]
pub async fn urgency_task(mut buzzer: PwmBuzzer, mut blink: Output<'static, AnyPin>) {
    loop {
        if !COUNTDOWN.is_armed() {
            buzzer.stop_tone();
            blink.set_low();
            Timer::after_millis(100).await;
            continue;
        }
        buzzer.start_tone();
        blink.set_high();
        Timer::after_millis(URGENCY_PULSE_MS).await;
        buzzer.stop_tone();
        blink.set_low();

        let period = urgency_period_ticks(COUNTDOWN.remaining());
        Timer::after_millis(u64::from(period).saturating_mul(TICK_MS)).await;
    }
}

/// The main game sequence, raced against the terminal expiry.
///
/// On expiry the in-flight evaluator is abandoned in place — its loop state
/// is unrecoverable and irrelevant, because nothing runs after the failure
/// screen short of a power cycle.
#[embassy_executor::task]
pub async fn game_task(mut console: BoardConsole, seed: u32) {
    let Some(slot) = GAME.task_slot() else {
        defmt::panic!("active-task slot already taken");
    };
    let mut dispatcher = Dispatcher::new(slot, &COUNTDOWN, Rng::seeded(seed));

    match embassy_futures::select::select(dispatcher.play(&mut console), COUNTDOWN.expired()).await
    {
        embassy_futures::select::Either::First(Ok(score)) => {
            defmt::info!("run complete, score {=u32}", score);
        }
        embassy_futures::select::Either::First(Err(e)) => {
            defmt::error!("display fault mid-run: {:?}", defmt::Debug2Format(&e));
        }
        embassy_futures::select::Either::Second(()) => {
            defmt::warn!("countdown expired — locking console");
            let _ = render_expired(&mut console.display, &mut console.indicators);
        }
    }

    // Terminal either way: a power cycle starts the next session.
    loop {
        Timer::after_secs(60).await;
    }
}
