//! Hardware adapters — thin implementations of the `platform` traits
//!
//! # Pin assignments
//!
//! These constants document the target PCB assignment; change them to match
//! your board before flashing.
//!
//! | Signal                  | MCU pins  | Notes                          |
//! |-------------------------|-----------|--------------------------------|
//! | LCD RS / EN             | PE12/PE13 | HD44780, 4-bit bus             |
//! | LCD D4..D7              | PE8..PE11 |                                |
//! | Keypad rows (strobed)   | PD0..PD3  | Driven low one at a time       |
//! | Keypad columns          | PD4..PD7  | Inputs, internal pull-up       |
//! | Cycle / Commit switches | PC0/PC1   | Active-low, internal pull-up   |
//! | Reaction button         | PC2       | Active-low, internal pull-up   |
//! | Potentiometer           | PA6       | ADC1, 14-bit                   |
//! | Thermistor              | PC4       | ADC1, 14-bit                   |
//! | Photoresistor           | PC5       | ADC1, 14-bit                   |
//! | Servo PWM               | PB4       | TIM3 CH1, 50 Hz                |
//! | Buzzer PWM              | PB6       | TIM4 CH1, 1 kHz tone           |
//! | External LED bank 0..3  | PE0..PE3  | Binary task display            |
//! | Indicators R/G/B/Y      | PD8..PD11 | Reaction task + fault light    |
//! | Urgency blink LED       | PB0       | Mirrors the beep               |

pub mod adc;
pub mod keypad;
pub mod lcd;
pub mod outputs;
pub mod switches;

pub use adc::BoardAdc;
pub use keypad::MatrixKeypad;
pub use lcd::CharLcd;
pub use outputs::{GpioIndicators, GpioLedBank, PwmBuzzer, PwmServo};
pub use switches::PanelSwitches;

use embassy_stm32::gpio::{AnyPin, Output};
use embassy_time::Delay;
use engine::evaluate::RoutedBank;
use engine::Console;

/// The LCD driver as wired on this board.
pub type BoardLcd = CharLcd<Output<'static, AnyPin>, Delay>;

/// The fully-wired console handed to the game task.
pub type BoardConsole = Console<
    BoardLcd,
    MatrixKeypad,
    PanelSwitches,
    RoutedBank<'static, BoardAdc>,
    PwmServo,
    GpioLedBank,
    GpioIndicators,
>;
