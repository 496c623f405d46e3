//! Hardware Abstraction Layer (HAL) for the Engineering Simulator console
//!
//! This crate provides trait-based abstractions for every peripheral the game
//! core touches, enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Game Core (engine crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Abstraction Levels
//!
//! - [`CharacterDisplay`] - 2×16 character LCD, addressed by line + string
//! - [`Keypad`] - debounced 4×4 matrix keypad characters
//! - [`Switches`] - debounced panel switches
//! - [`AdcSequencer`] - shared multiplexed ADC channel set
//! - [`Servo`], [`LedBank`], [`Indicators`], [`Buzzer`] - actuators
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `hardware`: Physical hardware target marker
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{CharacterDisplay, Line};
//!
//! fn announce<D: CharacterDisplay>(display: &mut D) -> Result<(), D::Error> {
//!     display.clear()?;
//!     display.write_at(Line::Top, "DIVERT POWER")
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// Pedantic lints suppressed for this HAL crate:
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod actuators;
pub mod analog;
pub mod display;
pub mod input;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use actuators::{Buzzer, IndicatorLed, Indicators, LedBank, Servo};
pub use analog::{AdcSequencer, Conversion, SampleSource, SensorBank, SensorChannel, ADC_FULL_SCALE};
pub use display::{CharacterDisplay, DisplayError, Line, DISPLAY_COLUMNS};
pub use input::{Keypad, Switch, Switches, KEYPAD_GRID, RESERVED_KEYS};
