//! Engineering Simulator — Main Entry Point
//!
//! Hardware-only entry point for STM32H743ZI.

#![no_std]
#![no_main]

use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32::adc::{Adc, Resolution};
use embassy_stm32::gpio::{Input, Level, Output, Pin, Pull, Speed};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_time::{Delay, Instant};

use engine::evaluate::RoutedBank;
use engine::Console;
use firmware::hal::{
    CharLcd, GpioIndicators, GpioLedBank, MatrixKeypad, PanelSwitches, PwmBuzzer, PwmServo,
};
use firmware::tasks;

// Panic handler
use panic_probe as _;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("Engineering Simulator firmware v{=str}", env!("CARGO_PKG_VERSION"));
    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // ── Character LCD (HD44780, 4-bit) ──────────────────────────────────
    let lcd_out = |pin| Output::new(pin, Level::Low, Speed::Low);
    let mut display = CharLcd::new(
        lcd_out(p.PE12.degrade()),
        lcd_out(p.PE13.degrade()),
        [
            lcd_out(p.PE8.degrade()),
            lcd_out(p.PE9.degrade()),
            lcd_out(p.PE10.degrade()),
            lcd_out(p.PE11.degrade()),
        ],
        Delay,
    );
    match display.init() {
        Ok(()) => defmt::info!("display ready (2x16)"),
        Err(e) => defmt::error!("display init failed: {:?}", e),
    }

    // ── Keypad and panel switches ───────────────────────────────────────
    let keypad = MatrixKeypad::new(
        [
            Output::new(p.PD0.degrade(), Level::High, Speed::Low),
            Output::new(p.PD1.degrade(), Level::High, Speed::Low),
            Output::new(p.PD2.degrade(), Level::High, Speed::Low),
            Output::new(p.PD3.degrade(), Level::High, Speed::Low),
        ],
        [
            Input::new(p.PD4.degrade(), Pull::Up),
            Input::new(p.PD5.degrade(), Pull::Up),
            Input::new(p.PD6.degrade(), Pull::Up),
            Input::new(p.PD7.degrade(), Pull::Up),
        ],
    );
    let switches = PanelSwitches::new(
        Input::new(p.PC0.degrade(), Pull::Up),
        Input::new(p.PC1.degrade(), Pull::Up),
        Input::new(p.PC2.degrade(), Pull::Up),
    );

    // ── Shared 14-bit converter ─────────────────────────────────────────
    let mut adc = Adc::new(p.ADC1, &mut Delay);
    adc.set_resolution(Resolution::BITS14);
    let mut pot = p.PA6;
    let mut therm = p.PC4;
    let mut photo = p.PC5;

    // Seed the game's PRNG from sensor noise plus the boot timestamp —
    // every run shuffles differently.
    let noise = u32::from(adc.read(&mut pot))
        ^ u32::from(adc.read(&mut therm)).rotate_left(11)
        ^ u32::from(adc.read(&mut photo)).rotate_left(22);
    #[allow(clippy::cast_possible_truncation)]
    let seed = noise ^ Instant::now().as_ticks() as u32;

    // ── Actuators ───────────────────────────────────────────────────────
    let servo = PwmServo::new(SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PB4, embassy_stm32::gpio::OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(50),
        Default::default(),
    ));
    let buzzer = PwmBuzzer::new(SimplePwm::new(
        p.TIM4,
        Some(PwmPin::new_ch1(p.PB6, embassy_stm32::gpio::OutputType::PushPull)),
        None,
        None,
        None,
        Hertz(1000),
        Default::default(),
    ));
    let led_bank = GpioLedBank::new([
        Output::new(p.PE0.degrade(), Level::Low, Speed::Low),
        Output::new(p.PE1.degrade(), Level::Low, Speed::Low),
        Output::new(p.PE2.degrade(), Level::Low, Speed::Low),
        Output::new(p.PE3.degrade(), Level::Low, Speed::Low),
    ]);
    let indicators = GpioIndicators::new([
        Output::new(p.PD8.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD9.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD10.degrade(), Level::Low, Speed::Low),
        Output::new(p.PD11.degrade(), Level::Low, Speed::Low),
    ]);
    let blink = Output::new(p.PB0.degrade(), Level::Low, Speed::Low);

    // ── Interrupt-style tasks ───────────────────────────────────────────
    let Some(latch) = tasks::GAME.sample_latch() else {
        defmt::panic!("sample latch already taken");
    };
    spawner.must_spawn(tasks::adc_task(adc, pot, therm, photo));
    spawner.must_spawn(tasks::router_task(engine::SensorRouter::new(latch)));
    spawner.must_spawn(tasks::countdown_task());
    spawner.must_spawn(tasks::urgency_task(buzzer, blink));
    tasks::kick_sequencer();

    // ── The game itself ─────────────────────────────────────────────────
    let console = Console {
        display,
        keypad,
        switches,
        sensors: RoutedBank::new(&tasks::GAME, tasks::board_adc()),
        servo,
        led_bank,
        indicators,
    };
    defmt::info!("console wired — starting game task (seed {=u32:x})", seed);
    spawner.must_spawn(tasks::game_task(console, seed));
}
