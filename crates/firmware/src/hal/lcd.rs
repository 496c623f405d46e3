//! HD44780-style character LCD over a 4-bit GPIO bus
//!
//! Generic over `embedded-hal` pins and delay so the driver itself never
//! names an MCU. Command timing is tens of microseconds, well under any task
//! deadline, so the [`CharacterDisplay`] contract stays synchronous for the
//! game core.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use platform::{CharacterDisplay, DisplayError, Line, DISPLAY_COLUMNS};

const CMD_CLEAR: u8 = 0x01;
const CMD_HOME: u8 = 0x02;
const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off
const CMD_FUNCTION_4BIT: u8 = 0x28; // 4-bit, 2 lines, 5x8 font
const CMD_SET_CURSOR: u8 = 0x80;
const LINE2_OFFSET: u8 = 0x40;

/// HD44780 driver: RS, EN and the high data nibble.
pub struct CharLcd<P: OutputPin, D: DelayNs> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
}

impl<P: OutputPin, D: DelayNs> CharLcd<P, D> {
    /// Wrap the six control/data pins. Call [`init`](CharLcd::init) before
    /// first use.
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self {
            rs,
            en,
            data,
            delay,
        }
    }

    /// Power-on initialisation: the 8-bit → 4-bit dance, then function set,
    /// display on, entry mode, clear.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Controller needs >40 ms after VCC rise.
        self.delay.delay_ms(50);
        set_level(&mut self.rs, false)?;
        // Three times 0b0011 with generous spacing, then 0b0010 = 4-bit.
        for _ in 0..3 {
            self.write_nibble(0x03)?;
            self.delay.delay_ms(5);
        }
        self.write_nibble(0x02)?;
        self.delay.delay_us(100);

        self.command(CMD_FUNCTION_4BIT)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_ENTRY_MODE)?;
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn pulse(&mut self) -> Result<(), DisplayError> {
        set_level(&mut self.en, true)?;
        self.delay.delay_us(1);
        set_level(&mut self.en, false)?;
        self.delay.delay_us(40);
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            set_level(pin, nibble & (1 << bit) != 0)?;
        }
        self.pulse()
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        set_level(&mut self.rs, false)?;
        self.write_nibble(command >> 4)?;
        self.write_nibble(command & 0x0F)?;
        if command == CMD_CLEAR || command == CMD_HOME {
            self.delay.delay_ms(2);
        }
        Ok(())
    }

    fn put_char(&mut self, ch: u8) -> Result<(), DisplayError> {
        set_level(&mut self.rs, true)?;
        self.write_nibble(ch >> 4)?;
        self.write_nibble(ch & 0x0F)
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), DisplayError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| DisplayError::Communication)
}

impl<P: OutputPin, D: DelayNs> CharacterDisplay for CharLcd<P, D> {
    type Error = DisplayError;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.command(CMD_CLEAR)
    }

    fn home(&mut self) -> Result<(), Self::Error> {
        self.command(CMD_HOME)
    }

    fn write_at(&mut self, line: Line, text: &str) -> Result<(), Self::Error> {
        let origin = match line {
            Line::Top => 0,
            Line::Bottom => LINE2_OFFSET,
        };
        self.command(CMD_SET_CURSOR | origin)?;
        for ch in text.bytes().take(DISPLAY_COLUMNS) {
            self.put_char(ch)?;
        }
        Ok(())
    }
}
