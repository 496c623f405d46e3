//! Actuator adapters: servo PWM, buzzer PWM, LED bank, indicator lights

use embassy_stm32::gpio::{AnyPin, Output};
use embassy_stm32::peripherals::{TIM3, TIM4};
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::timer::Channel;
use platform::actuators::{servo_compare_for, SERVO_PERIOD};
use platform::{Buzzer, IndicatorLed, Indicators, LedBank, Servo};

/// Positional servo on TIM3 CH1.
pub struct PwmServo {
    pwm: SimplePwm<'static, TIM3>,
}

impl PwmServo {
    /// Take ownership of the configured 50 Hz PWM and centre the horn.
    pub fn new(mut pwm: SimplePwm<'static, TIM3>) -> Self {
        pwm.enable(Channel::Ch1);
        let mut servo = Self { pwm };
        servo.set_position_raw(platform::ADC_FULL_SCALE / 2);
        servo
    }
}

impl Servo for PwmServo {
    fn set_position_raw(&mut self, raw: u16) {
        let compare = servo_compare_for(raw);
        let max = self.pwm.get_max_duty();
        let duty = u32::from(compare)
            .saturating_mul(u32::from(max))
            .checked_div(u32::from(SERVO_PERIOD))
            .unwrap_or(0);
        #[allow(clippy::cast_possible_truncation)] // duty <= max < u16::MAX
        self.pwm.set_duty(Channel::Ch1, duty as u16);
    }
}

/// Urgency buzzer on TIM4 CH1, fixed 1 kHz tone.
pub struct PwmBuzzer {
    pwm: SimplePwm<'static, TIM4>,
}

impl PwmBuzzer {
    /// Take ownership of the configured 1 kHz PWM, silenced.
    pub fn new(pwm: SimplePwm<'static, TIM4>) -> Self {
        Self { pwm }
    }
}

impl Buzzer for PwmBuzzer {
    fn start_tone(&mut self) {
        let half = self.pwm.get_max_duty() / 2;
        self.pwm.set_duty(Channel::Ch1, half);
        self.pwm.enable(Channel::Ch1);
    }

    fn stop_tone(&mut self) {
        self.pwm.disable(Channel::Ch1);
    }
}

/// Four-LED external bank for the binary task.
pub struct GpioLedBank {
    leds: [Output<'static, AnyPin>; 4],
}

impl GpioLedBank {
    /// Wrap the bank pins, all off.
    pub fn new(mut leds: [Output<'static, AnyPin>; 4]) -> Self {
        for led in &mut leds {
            led.set_low();
        }
        Self { leds }
    }
}

impl LedBank for GpioLedBank {
    fn set_pattern(&mut self, bits: u8) {
        for (bit, led) in self.leds.iter_mut().enumerate() {
            if bits & (1 << bit) != 0 {
                led.set_high();
            } else {
                led.set_low();
            }
        }
    }
}

/// The four coloured indicator lights.
pub struct GpioIndicators {
    leds: [Output<'static, AnyPin>; 4],
}

impl GpioIndicators {
    /// Wrap the indicator pins in R/G/B/Y order, all off.
    pub fn new(mut leds: [Output<'static, AnyPin>; 4]) -> Self {
        for led in &mut leds {
            led.set_low();
        }
        Self { leds }
    }

    fn index(led: IndicatorLed) -> usize {
        match led {
            IndicatorLed::Red => 0,
            IndicatorLed::Green => 1,
            IndicatorLed::Blue => 2,
            IndicatorLed::Yellow => 3,
        }
    }
}

impl Indicators for GpioIndicators {
    fn set_only(&mut self, led: IndicatorLed) {
        let on = Self::index(led);
        for (i, pin) in self.leds.iter_mut().enumerate() {
            if i == on {
                pin.set_high();
            } else {
                pin.set_low();
            }
        }
    }

    fn clear(&mut self) {
        for pin in &mut self.leds {
            pin.set_low();
        }
    }
}
