//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits for use
//! in unit and integration tests. Scripted inputs are queued up front;
//! outputs are recorded for assertion.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::missing_panics_doc)]

use crate::actuators::{Buzzer, IndicatorLed, Indicators, LedBank, Servo};
use crate::analog::{AdcSequencer, SampleSource, SensorBank, SensorChannel};
use crate::display::{CharacterDisplay, DisplayError, Line};
use crate::input::{Keypad, Switch, Switches};

/// Mock character display that records everything written to it.
#[derive(Default)]
pub struct MockDisplay {
    top: heapless::String<32>,
    bottom: heapless::String<32>,
    clear_count: usize,
    history: heapless::Vec<heapless::String<32>, 64>,
}

impl MockDisplay {
    /// Create a blank mock display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown on `line`.
    pub fn line(&self, line: Line) -> &str {
        match line {
            Line::Top => &self.top,
            Line::Bottom => &self.bottom,
        }
    }

    /// Number of `clear()` calls seen.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }

    /// Every string ever written, in order.
    pub fn history(&self) -> &[heapless::String<32>] {
        &self.history
    }

    /// True if `needle` appeared in any write.
    pub fn ever_showed(&self, needle: &str) -> bool {
        self.history.iter().any(|s| s.contains(needle))
    }
}

impl CharacterDisplay for MockDisplay {
    type Error = DisplayError;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.top.clear();
        self.bottom.clear();
        self.clear_count = self.clear_count.saturating_add(1);
        Ok(())
    }

    fn home(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write_at(&mut self, line: Line, text: &str) -> Result<(), Self::Error> {
        let slot = match line {
            Line::Top => &mut self.top,
            Line::Bottom => &mut self.bottom,
        };
        slot.clear();
        let _ = slot.push_str(text); // overlong text silently truncates, like the panel
        let mut copy = heapless::String::new();
        let _ = copy.push_str(text);
        let _ = self.history.push(copy);
        Ok(())
    }
}

/// Mock keypad fed from a scripted key queue.
#[derive(Default)]
pub struct MockKeypad {
    keys: heapless::Deque<char, 64>,
}

impl MockKeypad {
    /// Create an empty mock keypad.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a keypad scripted with `keys`, pressed in order.
    pub fn scripted(keys: &str) -> Self {
        let mut pad = Self::new();
        for key in keys.chars() {
            pad.push_key(key);
        }
        pad
    }

    /// Append one keypress to the script.
    pub fn push_key(&mut self, key: char) {
        let _ = self.keys.push_back(key);
    }

    /// Keys not yet consumed.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Keypad for MockKeypad {
    async fn read_key(&mut self) -> char {
        loop {
            if let Some(key) = self.keys.pop_front() {
                return key;
            }
            embassy_time::Timer::after_millis(10).await;
        }
    }
}

/// Mock panel switches: level state is set directly, presses are scripted.
///
/// For the reaction button a repeating press pattern can be armed so polling
/// loops see periodic press edges without the test having to interleave.
#[derive(Default)]
pub struct MockSwitches {
    cycle: bool,
    commit: bool,
    reaction: bool,
    presses: heapless::Deque<Switch, 32>,
    reaction_pattern: Option<(u32, u32)>,
    reaction_polls: u32,
}

impl MockSwitches {
    /// Create a mock with all switches released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settled level of `switch`.
    pub fn set_pressed(&mut self, switch: Switch, pressed: bool) {
        match switch {
            Switch::Cycle => self.cycle = pressed,
            Switch::Commit => self.commit = pressed,
            Switch::Reaction => self.reaction = pressed,
        }
    }

    /// Script a press, consumed by `next_press` in FIFO order.
    pub fn push_press(&mut self, switch: Switch) {
        let _ = self.presses.push_back(switch);
    }

    /// Arm a repeating reaction-button pattern: released for `off_polls`
    /// calls of `is_pressed(Reaction)`, then held for `on_polls`, repeating.
    pub fn set_reaction_pattern(&mut self, off_polls: u32, on_polls: u32) {
        self.reaction_pattern = Some((off_polls, on_polls));
        self.reaction_polls = 0;
    }
}

impl Switches for MockSwitches {
    fn is_pressed(&mut self, switch: Switch) -> bool {
        match switch {
            Switch::Cycle => self.cycle,
            Switch::Commit => self.commit,
            Switch::Reaction => match self.reaction_pattern {
                Some((off, on)) => {
                    let phase = self.reaction_polls % (off + on).max(1);
                    self.reaction_polls = self.reaction_polls.wrapping_add(1);
                    phase >= off
                }
                None => self.reaction,
            },
        }
    }

    async fn next_press(&mut self) -> Switch {
        loop {
            if let Some(switch) = self.presses.pop_front() {
                return switch;
            }
            embassy_time::Timer::after_millis(10).await;
        }
    }
}

/// Mock ADC sequencer that logs every re-trigger.
#[derive(Default)]
pub struct MockAdc {
    retriggers: heapless::Vec<SensorChannel, 128>,
}

impl MockAdc {
    /// Create a mock sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// All re-triggered channels, in order.
    pub fn retriggers(&self) -> &[SensorChannel] {
        &self.retriggers
    }

    /// Number of re-triggers issued for `channel`.
    pub fn retrigger_count(&self, channel: SensorChannel) -> usize {
        self.retriggers.iter().filter(|c| **c == channel).count()
    }
}

impl AdcSequencer for MockAdc {
    fn retrigger(&mut self, channel: SensorChannel) {
        let _ = self.retriggers.push(channel);
    }
}

/// Mock sample source fed from a scripted sequence.
///
/// Once the script runs dry the last sample repeats forever, modelling a
/// sensor that has settled.
pub struct MockSampleSource {
    samples: heapless::Deque<u16, 64>,
    last: u16,
}

impl MockSampleSource {
    /// Create a source scripted with `samples`, returned in order.
    pub fn scripted(samples: &[u16]) -> Self {
        let mut queue = heapless::Deque::new();
        for sample in samples {
            let _ = queue.push_back(*sample);
        }
        let last = samples.last().copied().unwrap_or(0);
        Self {
            samples: queue,
            last,
        }
    }

    /// Scripted samples not yet consumed.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl SampleSource for MockSampleSource {
    async fn next_sample(&mut self) -> u16 {
        if let Some(sample) = self.samples.pop_front() {
            self.last = sample;
        }
        self.last
    }
}

/// Mock sensor bank: one scripted stream per channel.
pub struct MockSensorBank {
    /// Potentiometer stream.
    pub potentiometer: MockSampleSource,
    /// Thermistor stream.
    pub thermistor: MockSampleSource,
    /// Photoresistor stream.
    pub photoresistor: MockSampleSource,
}

impl MockSensorBank {
    /// Build a bank from three scripted sequences.
    pub fn scripted(potentiometer: &[u16], thermistor: &[u16], photoresistor: &[u16]) -> Self {
        Self {
            potentiometer: MockSampleSource::scripted(potentiometer),
            thermistor: MockSampleSource::scripted(thermistor),
            photoresistor: MockSampleSource::scripted(photoresistor),
        }
    }
}

impl SensorBank for MockSensorBank {
    type Source<'s>
        = &'s mut MockSampleSource
    where
        Self: 's;

    fn acquire(&mut self, channel: SensorChannel) -> Self::Source<'_> {
        match channel {
            SensorChannel::Potentiometer => &mut self.potentiometer,
            SensorChannel::Thermistor => &mut self.thermistor,
            SensorChannel::Photoresistor => &mut self.photoresistor,
        }
    }
}

/// Mock servo recording the positions it was driven to.
#[derive(Default)]
pub struct MockServo {
    positions: heapless::Vec<u16, 128>,
}

impl MockServo {
    /// Create a mock servo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent raw position, if any.
    pub fn last_position(&self) -> Option<u16> {
        self.positions.last().copied()
    }
}

impl Servo for MockServo {
    fn set_position_raw(&mut self, raw: u16) {
        let _ = self.positions.push(raw);
    }
}

/// Mock external LED bank.
#[derive(Default)]
pub struct MockLedBank {
    pattern: u8,
}

impl MockLedBank {
    /// Create a mock bank with all LEDs off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently driven 4-bit pattern.
    pub fn pattern(&self) -> u8 {
        self.pattern
    }
}

impl LedBank for MockLedBank {
    fn set_pattern(&mut self, bits: u8) {
        self.pattern = bits & 0x0F;
    }
}

/// Mock indicator light group.
#[derive(Default)]
pub struct MockIndicators {
    lit: Option<IndicatorLed>,
}

impl MockIndicators {
    /// Create a mock group with all lights off.
    pub fn new() -> Self {
        Self::default()
    }

    /// The single lit indicator, if any.
    pub fn lit(&self) -> Option<IndicatorLed> {
        self.lit
    }
}

impl Indicators for MockIndicators {
    fn set_only(&mut self, led: IndicatorLed) {
        self.lit = Some(led);
    }

    fn clear(&mut self) {
        self.lit = None;
    }
}

/// Mock buzzer recording tone gating.
#[derive(Default)]
pub struct MockBuzzer {
    sounding: bool,
    pulses: usize,
}

impl MockBuzzer {
    /// Create a silent mock buzzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the tone is gated on.
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Number of completed on/off pulses.
    pub fn pulses(&self) -> usize {
        self.pulses
    }
}

impl Buzzer for MockBuzzer {
    fn start_tone(&mut self) {
        self.sounding = true;
    }

    fn stop_tone(&mut self) {
        if self.sounding {
            self.pulses = self.pulses.saturating_add(1);
        }
        self.sounding = false;
    }
}
