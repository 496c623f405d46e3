//! Engineering Simulator firmware
//!
//! Application shell for the game console: hardware adapters behind the
//! `platform` traits, the interrupt-style Embassy tasks, and the entry point
//! in `main.rs`.
//!
//! # Architecture
//!
//! ```text
//! main.rs — board bring-up, statics, task spawn
//!         ↓
//! tasks — ADC event pump, countdown clock, urgency oscillator, game task
//!         ↓
//! hal — thin peripheral adapters (LCD, keypad, switches, ADC, PWM, LEDs)
//!         ↓
//! Embassy HAL (embassy-stm32)
//! ```
//!
//! # Features
//!
//! - `hardware` — build for the STM32H7 target; required by the binary.
//!   Without it only the (host-testable) crate skeleton compiles.

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

#[cfg(feature = "hardware")]
pub mod hal;

#[cfg(feature = "hardware")]
pub mod tasks;

#[cfg(feature = "hardware")]
pub use hal::BoardConsole;
