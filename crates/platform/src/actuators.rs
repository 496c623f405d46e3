//! Actuator abstractions: servo, LED bank, indicator lights, buzzer

use crate::analog::ADC_FULL_SCALE;

/// Servo PWM compare value at the 0° stop.
pub const SERVO_MIN_COMPARE: u16 = 700;
/// Servo PWM compare value at the 180° stop.
pub const SERVO_MAX_COMPARE: u16 = 3652;
/// Servo PWM period in timer ticks.
pub const SERVO_PERIOD: u16 = 37750;

/// Positional servo driven from raw sensor samples.
pub trait Servo {
    /// Point the horn proportionally to `raw` over the full sample range.
    fn set_position_raw(&mut self, raw: u16);
}

/// Map a raw 14-bit sample onto the servo compare range.
///
/// `0` maps to [`SERVO_MIN_COMPARE`], [`ADC_FULL_SCALE`] to
/// [`SERVO_MAX_COMPARE`]; implementations feed the result straight into
/// their compare register.
pub fn servo_compare_for(raw: u16) -> u16 {
    let span = u32::from(SERVO_MAX_COMPARE.saturating_sub(SERVO_MIN_COMPARE));
    let scaled = u32::from(raw.min(ADC_FULL_SCALE))
        .saturating_mul(span)
        .checked_div(u32::from(ADC_FULL_SCALE))
        .unwrap_or(0);
    #[allow(clippy::cast_possible_truncation)] // scaled <= span < u16::MAX
    let scaled = scaled as u16;
    SERVO_MIN_COMPARE.saturating_add(scaled)
}

/// The four-LED external bank displaying binary patterns.
pub trait LedBank {
    /// Drive the bank to the low four bits of `bits` (bit 0 = LED0).
    fn set_pattern(&mut self, bits: u8);
}

/// The four coloured indicator lights used by the reaction task and the
/// terminal fault display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorLed {
    /// Red indicator — doubles as the "time's up" fault light.
    Red,
    /// Green indicator.
    Green,
    /// Blue indicator.
    Blue,
    /// Yellow indicator.
    Yellow,
}

impl IndicatorLed {
    /// All four indicators, in panel order.
    pub const ALL: [IndicatorLed; 4] = [
        IndicatorLed::Red,
        IndicatorLed::Green,
        IndicatorLed::Blue,
        IndicatorLed::Yellow,
    ];
}

/// Indicator light group.
pub trait Indicators {
    /// Light `led` and extinguish the other three.
    fn set_only(&mut self, led: IndicatorLed);

    /// Extinguish all four.
    fn clear(&mut self);
}

/// The urgency buzzer.
///
/// Tone frequency is fixed by the hardware layer; the core only gates it.
pub trait Buzzer {
    /// Begin sounding the tone.
    fn start_tone(&mut self);

    /// Silence the tone.
    fn stop_tone(&mut self);
}
