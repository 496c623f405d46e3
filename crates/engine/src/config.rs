//! Central game tuning constants
//!
//! Every timing, margin, and scaling value the game uses lives here so a
//! board bring-up can be retuned in one place. Difficulty scaling is applied
//! in [`crate::difficulty`]; these are the bases it scales.

/// Countdown resolution: game clock ticks per wall-clock second.
pub const TICKS_PER_SECOND: u32 = 8;

/// Milliseconds per game clock tick.
pub const TICK_MS: u64 = 1000 / TICKS_PER_SECOND as u64;

/// Countdown seed, wall-clock seconds. Difficulty-independent.
pub const COUNTDOWN_SECONDS: u32 = 300;

/// Countdown seed in game ticks.
pub const COUNTDOWN_SEED_TICKS: u32 = COUNTDOWN_SECONDS * TICKS_PER_SECOND;

/// Urgency oscillator period = remaining ticks / this divisor.
pub const URGENCY_DIVISOR: u32 = 16;

/// Floor of the urgency period — the maximum beep rate near zero.
pub const URGENCY_MIN_PERIOD_TICKS: u32 = 1;

/// Length of each urgency beep/blink pulse.
pub const URGENCY_PULSE_MS: u64 = 60;

/// Sensor-task poll cadence.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Conversion settle time between a re-trigger and the routed read-back.
pub const SAMPLE_SETTLE_MS: u64 = 5;

/// Lights task: threshold distance base below the starting sample.
pub const LIGHTS_MARGIN_BASE: u16 = 300;

/// Temperature task: threshold distance base above the starting sample.
pub const TEMPERATURE_MARGIN_BASE: u16 = 200;

/// Power task: minimum separation between start sample and drawn target.
pub const POWER_MIN_SEPARATION: u16 = 2000;

/// Power task: acceptance window base around the target.
pub const POWER_ACCEPT_BASE: u16 = 50;

/// Power task: deviation beyond this scaled margin penalizes.
pub const POWER_PENALTY_BASE: u16 = 250;

/// Power task: consecutive in-window polls required to hold the diversion.
pub const POWER_STEADY_POLLS: u8 = 2;

/// Direction task: raw samples per angle unit (14-bit range / 8 units).
pub const DIRECTION_STEP: u16 = 2048;

/// Direction task: number of quantized angle units.
pub const DIRECTION_UNITS: u16 = 8;

/// Password length at Easy; grows by one per difficulty level.
pub const PASSWORD_BASE_LEN: usize = 4;

/// Reaction task: lit window at Easy, shrinking per difficulty level.
pub const REACTION_WINDOW_BASE_MS: u64 = 1000;

/// Reaction task: lit-window shrink per difficulty level.
pub const REACTION_WINDOW_STEP_MS: u64 = 250;

/// Reaction task: dark gap between blink windows.
pub const REACTION_GAP_MS: u64 = 400;

/// Reaction task: button poll cadence inside a window.
pub const REACTION_POLL_MS: u64 = 10;

/// Binary task: highest encodable value (14 usable keypad symbols).
pub const BINARY_MAX_VALUE: u8 = 13;

/// Score granularity: remaining ticks per score unit.
pub const SCORE_TICK_DIVISOR: u32 = TICKS_PER_SECOND;
